fn main() {
    block_breaker::game::run();
}

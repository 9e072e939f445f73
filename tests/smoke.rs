mod common;

use block_breaker::common::state::GamePhase;
use block_breaker::plugins::arena::Wall;
use block_breaker::plugins::blocks::Block;
use block_breaker::plugins::hud::{HudText, IDLE_MESSAGE};
use block_breaker::plugins::paddle::Paddle;

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();

    for _ in 0..3 {
        app.update();
    }
}

#[test]
fn startup_builds_field_paddle_and_hud() {
    let mut app = common::app_headless();
    app.update();

    assert_eq!(
        app.world_mut().query::<&Block>().iter(app.world()).count(),
        8
    );
    assert_eq!(
        app.world_mut().query::<&Paddle>().iter(app.world()).count(),
        1
    );
    assert_eq!(
        app.world_mut().query::<&Wall>().iter(app.world()).count(),
        3
    );

    let hud = app.world().resource::<HudText>();
    assert_eq!(hud.status, IDLE_MESSAGE);
    assert_eq!(hud.blocks, "blocks 8/8");

    assert_eq!(common::phase(&mut app), GamePhase::Idle);
}

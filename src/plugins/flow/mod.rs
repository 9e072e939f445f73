//! Game flow plugin: the Idle / Running / AwaitingRestart state machine.
//!
//! Transitions:
//! - Idle --Enter--> Running (clear the start prompt)
//! - Running --all blocks cleared--> AwaitingRestart (victory message; the
//!   ball is state-scoped to Running and despawns on exit)
//! - Running --ball lost--> AwaitingRestart (game-over message)
//! - AwaitingRestart --Enter--> Running (reset field + tally, clear message)
//!
//! Every message has a defined effect in every phase; irrelevant ones are
//! no-ops via `run_if` gates or the phase match. The remaining-block tally
//! is monotonically non-increasing while running and resets exactly on
//! restart.

use bevy::prelude::*;

use crate::common::{state::GamePhase, tunables::Tunables};
use crate::plugins::ball::{self, BallLost};
use crate::plugins::blocks::{BlockCleared, ResetField};
use crate::plugins::hud::{format_blocks, HudText, GAME_OVER_MESSAGE, VICTORY_MESSAGE};

#[derive(Resource, Debug, Clone)]
pub struct BlockTally {
    pub remaining: u32,
    pub total: u32,
}

pub fn plugin(app: &mut App) {
    let total = app.world().resource::<Tunables>().grid.total();
    app.insert_resource(BlockTally {
        remaining: total,
        total,
    });

    app.add_systems(Update, handle_start_input);
    app.add_systems(
        Update,
        (
            apply_block_cleared,
            apply_ball_lost.after(ball::despawn_out_of_bounds),
        )
            .run_if(in_state(GamePhase::Running)),
    );
}

/// Enter starts a fresh session or restarts a finished one. A press while
/// already running is a no-op.
pub fn handle_start_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    phase: Res<State<GamePhase>>,
    mut next: ResMut<NextState<GamePhase>>,
    mut tally: ResMut<BlockTally>,
    mut hud: ResMut<HudText>,
    mut resets: MessageWriter<ResetField>,
) {
    let Some(keys) = keys else {
        return;
    };
    if !keys.just_pressed(KeyCode::Enter) {
        return;
    }

    match phase.get() {
        GamePhase::Idle => {
            hud.status.clear();
            next.set(GamePhase::Running);
        }
        GamePhase::AwaitingRestart => {
            resets.write(ResetField);
            tally.remaining = tally.total;
            hud.blocks = format_blocks(tally.remaining, tally.total);
            hud.status.clear();
            next.set(GamePhase::Running);
        }
        GamePhase::Running => {}
    }
}

/// Decrement the tally, refresh the counter line, and fire the victory
/// transition exactly once when it reaches zero.
pub fn apply_block_cleared(
    mut cleared: MessageReader<BlockCleared>,
    mut tally: ResMut<BlockTally>,
    mut hud: ResMut<HudText>,
    mut next: ResMut<NextState<GamePhase>>,
) {
    let mut changed = false;
    for msg in cleared.read() {
        tally.remaining = tally.remaining.saturating_sub(msg.count);
        changed = true;
    }
    if !changed {
        return;
    }

    hud.blocks = format_blocks(tally.remaining, tally.total);

    if tally.remaining == 0 {
        hud.status = VICTORY_MESSAGE.into();
        next.set(GamePhase::AwaitingRestart);
    }
}

/// A lost ball ends the running session. The `run_if(Running)` gate makes a
/// stale signal in any other phase a no-op.
pub fn apply_ball_lost(
    mut lost: MessageReader<BallLost>,
    mut hud: ResMut<HudText>,
    mut next: ResMut<NextState<GamePhase>>,
) {
    if lost.read().next().is_none() {
        return;
    }

    hud.status = GAME_OVER_MESSAGE.into();
    next.set(GamePhase::AwaitingRestart);
}

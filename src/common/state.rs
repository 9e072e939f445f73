//! Global state machine.

use bevy::prelude::*;

/// Session phase.
///
/// `Running` and `AwaitingRestart` are mutually exclusive by construction:
/// a `States` enum can only hold one variant at a time.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GamePhase {
    /// Pre-start: the field is built, nothing moves yet.
    #[default]
    Idle,
    Running,
    /// Game over or victory; Enter rebuilds the session.
    AwaitingRestart,
}

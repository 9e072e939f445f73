//! Collision router: raw physics events → domain messages.
//!
//! Avian's `CollisionStart` messages carry collider/body entity pairs and
//! nothing the gameplay layer should have to interpret. This plugin is the
//! only place that reads them; everything downstream (block field, ball
//! speed correction, game flow) consumes the domain messages written here:
//!
//! - `BallImpact { ball }` — the ball touched anything. Drives the
//!   speed-preserving velocity correction.
//! - `BlockHit { block }` — the ball touched a block. The block field owns
//!   deduplication; the router may emit the same block several times if the
//!   solver produces several raw events for one contact.
//!
//! Keeping the engine vocabulary out of the other plugins is what lets their
//! tests inject domain messages directly instead of stepping physics.

use avian3d::collision::narrow_phase::CollisionEventSystems;
use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::state::GamePhase;
use crate::plugins::ball::Ball;
use crate::plugins::blocks::Block;

#[derive(Message, Clone, Copy, Debug)]
pub struct BlockHit {
    pub block: Entity,
}

#[derive(Message, Clone, Copy, Debug)]
pub struct BallImpact {
    pub ball: Entity,
}

pub fn plugin(app: &mut App) {
    app.add_message::<BlockHit>();
    app.add_message::<BallImpact>();

    app.add_systems(
        FixedPostUpdate,
        route_collisions
            .after(CollisionEventSystems)
            .run_if(in_state(GamePhase::Running)),
    );
}

/// Classify raw collision events.
///
/// Only pairs involving the ball matter: exactly one side must be the ball
/// (the ball is the sole collider with `CollisionEventsEnabled` besides
/// blocks, but a block-block pair can never start a contact anyway).
pub fn route_collisions(
    mut started: MessageReader<CollisionStart>,
    q_balls: Query<(), With<Ball>>,
    q_blocks: Query<(), With<Block>>,
    mut impacts: MessageWriter<BallImpact>,
    mut block_hits: MessageWriter<BlockHit>,
) {
    for ev in started.read() {
        let a = ev.collider1;
        let b = ev.collider2;

        let (ball, other) = if q_balls.contains(a) {
            (a, b)
        } else if q_balls.contains(b) {
            (b, a)
        } else {
            continue;
        };

        impacts.write(BallImpact { ball });

        if q_blocks.contains(other) {
            block_hits.write(BlockHit { block: other });
        }
    }
}

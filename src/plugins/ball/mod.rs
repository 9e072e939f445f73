//! Ball plugin.
//!
//! Pipeline:
//! - Update: consume `ShootRequest` messages (spawn guard: at most one ball)
//! - FixedPostUpdate: speed-preserving velocity correction after contacts
//! - Update: out-of-bounds check against the current position, once per
//!   render tick, after physics has integrated
//!
//! The ball's planar speed is held exactly constant across bounces: after
//! every resolved contact the post-solver velocity is renormalized to the
//! target speed recorded at spawn, with the vertical component discarded.
//! A deliberate simplification over realistic energy loss.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GamePhase, tunables::Tunables};
use crate::plugins::collision::BallImpact;
use crate::plugins::paddle;

#[derive(Component, Debug)]
pub struct Ball {
    /// Planar speed the ball must hold; fixed at spawn from the launch
    /// velocity magnitude.
    pub target_speed: f32,
}

/// Intent to launch a ball, produced by the paddle's shoot input.
#[derive(Message, Clone, Copy, Debug)]
pub struct ShootRequest {
    pub origin: Vec3,
}

/// The ball left the play boundary.
#[derive(Message, Clone, Copy, Debug)]
pub struct BallLost;

pub fn plugin(app: &mut App) {
    app.add_message::<ShootRequest>();
    app.add_message::<BallLost>();

    app.add_systems(
        Update,
        (
            spawn_on_shoot.after(paddle::request_shoot),
            despawn_out_of_bounds,
        )
            .run_if(in_state(GamePhase::Running)),
    );

    app.add_systems(
        FixedPostUpdate,
        correct_velocity
            .after(crate::plugins::collision::route_collisions)
            .run_if(in_state(GamePhase::Running)),
    );
}

/// Spawn consumer with the single-ball guard.
///
/// Multiple requests in one tick (or a request while a ball is alive) spawn
/// nothing: an expected steady-state condition, not an error.
pub fn spawn_on_shoot(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut requests: MessageReader<ShootRequest>,
    q_balls: Query<(), With<Ball>>,
) {
    let mut alive = !q_balls.is_empty();

    for req in requests.read() {
        if alive {
            continue;
        }
        alive = true;

        let launch = tunables.ball_launch_velocity;

        commands.spawn((
            Name::new("Ball"),
            Ball {
                target_speed: launch.length(),
            },
            Transform::from_translation(req.origin),
            RigidBody::Dynamic,
            Collider::sphere(tunables.ball_radius),
            CollisionLayers::new(Layer::Ball, [Layer::Block, Layer::Paddle, Layer::Wall]),
            Mass(tunables.ball_mass),
            Restitution::new(1.0).with_combine_rule(CoefficientCombine::Max),
            Friction::ZERO,
            GravityScale(0.0),
            LinearVelocity(launch),
            // Opt-in collision events: Avian only emits CollisionStart if one
            // collider in the pair carries this marker.
            CollisionEventsEnabled,
            // Any transition out of Running (victory, loss, restart) must
            // destroy the ball; state scoping centralizes that.
            DespawnOnExit(GamePhase::Running),
        ));
    }
}

/// Renormalize the post-solver velocity after every resolved contact.
///
/// `v_corrected = normalize(planar(v_post)) * target_speed`, Y forced to
/// zero: the solver is 3D but the game is planar, so any vertical drift it
/// introduces is discarded on every contact. A zero-length planar velocity
/// cannot be normalized and is left for the next contact to fix.
pub fn correct_velocity(
    mut impacts: MessageReader<BallImpact>,
    mut q_balls: Query<(&Ball, &mut LinearVelocity)>,
) {
    for impact in impacts.read() {
        let Ok((ball, mut vel)) = q_balls.get_mut(impact.ball) else {
            // Ball already disposed; stale impact is a no-op.
            continue;
        };

        let planar = Vec3::new(vel.x, 0.0, vel.z);
        let Some(dir) = planar.try_normalize() else {
            debug!("ball planar velocity degenerate, skipping correction");
            continue;
        };

        vel.0 = dir * ball.target_speed;
    }
}

/// Dispose the ball once either planar coordinate leaves the field.
///
/// `try_despawn` keeps disposal idempotent against the state-scoped cleanup
/// that runs when `Running` is left.
pub fn despawn_out_of_bounds(
    mut commands: Commands,
    tunables: Res<Tunables>,
    q_balls: Query<(Entity, &Transform), With<Ball>>,
    mut lost: MessageWriter<BallLost>,
) {
    let bound = tunables.field_boundary;

    for (entity, tf) in &q_balls {
        let p = tf.translation;
        if p.x.abs() > bound || p.z.abs() > bound {
            lost.write(BallLost);
            commands.entity(entity).try_despawn();
        }
    }
}

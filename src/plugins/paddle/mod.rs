//! Paddle plugin.
//!
//! Pipeline:
//! - Update: sample input, write PaddleInput resource
//! - Update: edge-triggered shoot producer (only while Running)
//! - FixedUpdate: bounded movement (only while Running)
//!
//! Movement is reject-not-clamp: if the candidate position would leave the
//! open interval `(min_z, max_z)`, the paddle does not move this tick and
//! its position stays bit-identical.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::{layers::Layer, state::GamePhase, tunables::Tunables};
use crate::plugins::ball::ShootRequest;

#[derive(Component)]
pub struct Paddle;

#[derive(Resource, Default, Debug)]
pub struct PaddleInput {
    pub left: bool,
    pub right: bool,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<PaddleInput>();

    app.add_systems(Startup, spawn);
    app.add_systems(Update, gather_input);
    app.add_systems(Update, request_shoot.run_if(in_state(GamePhase::Running)));
    app.add_systems(
        FixedUpdate,
        apply_movement.run_if(in_state(GamePhase::Running)),
    );
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    let size = tunables.paddle_size;

    commands.spawn((
        Name::new("Paddle"),
        Paddle,
        Transform::from_translation(tunables.paddle_home),
        // Kinematic: position-driven, immovable by the ball, still a full
        // participant in collision response.
        RigidBody::Kinematic,
        Collider::cuboid(size.x, size.y, size.z),
        CollisionLayers::new(Layer::Paddle, [Layer::Ball]),
        Restitution::new(1.0).with_combine_rule(CoefficientCombine::Max),
        Friction::ZERO,
    ));
}

/// Sample held arrow keys into the input resource.
///
/// `Option<Res<…>>` keeps this a no-op in headless worlds without an input
/// host rather than a panic.
pub fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PaddleInput>) {
    let Some(keys) = keys else {
        debug!("no keyboard input resource; paddle input degraded to idle");
        return;
    };

    input.left = keys.pressed(KeyCode::ArrowLeft);
    input.right = keys.pressed(KeyCode::ArrowRight);
}

/// Edge-triggered shoot producer.
///
/// `just_pressed` fires once per press and re-arms only on release + new
/// press. The "no ball alive" guard lives in the spawn consumer, not here.
pub fn request_shoot(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    tunables: Res<Tunables>,
    q_paddle: Query<&Transform, With<Paddle>>,
    mut requests: MessageWriter<ShootRequest>,
) {
    let Some(keys) = keys else {
        return;
    };
    if !keys.just_pressed(KeyCode::Space) {
        return;
    }

    let Ok(tf) = q_paddle.single() else {
        debug!("no single Paddle; shoot ignored");
        return;
    };

    requests.write(ShootRequest {
        origin: tf.translation + tunables.ball_spawn_offset,
    });
}

/// Bounded lateral movement along Z. Left takes priority when both keys are
/// held; a candidate outside the open bound interval is rejected outright.
pub fn apply_movement(
    time: Res<Time>,
    tunables: Res<Tunables>,
    input: Res<PaddleInput>,
    mut q_paddle: Query<&mut Transform, With<Paddle>>,
) {
    let Ok(mut tf) = q_paddle.single_mut() else {
        return;
    };

    let direction = if input.left {
        1.0
    } else if input.right {
        -1.0
    } else {
        return;
    };

    let candidate = tf.translation.z + direction * tunables.paddle_speed * time.delta_secs();
    if candidate > tunables.paddle_min_z && candidate < tunables.paddle_max_z {
        tf.translation.z = candidate;
    }
}

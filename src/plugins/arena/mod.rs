//! Arena plugin: static walls on three sides of the play field.
//!
//! The side behind the paddle stays open so a missed ball can leave the
//! field and trip the out-of-bounds check.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;

const HALF_SPAN: f32 = 260.0;
const WALL_THICKNESS: f32 = 10.0;
const WALL_HEIGHT: f32 = 30.0;

#[derive(Component)]
pub struct Wall;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_walls);
}

fn spawn_walls(mut commands: Commands) {
    let mut spawn_wall = |name: String, pos: Vec3, size: Vec3| {
        commands.spawn((
            Name::new(name),
            Wall,
            Transform::from_translation(pos),
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            CollisionLayers::new(Layer::Wall, [Layer::Ball]),
            Restitution::new(1.0).with_combine_rule(CoefficientCombine::Max),
            Friction::ZERO,
        ));
    };

    let span = HALF_SPAN * 2.0 + WALL_THICKNESS;

    // Back wall behind the block field (+X).
    spawn_wall(
        "WallBack".into(),
        Vec3::new(HALF_SPAN, WALL_HEIGHT * 0.5, 0.0),
        Vec3::new(WALL_THICKNESS, WALL_HEIGHT, span),
    );
    // Side walls (+Z / -Z).
    spawn_wall(
        "WallLeft".into(),
        Vec3::new(0.0, WALL_HEIGHT * 0.5, HALF_SPAN),
        Vec3::new(span, WALL_HEIGHT, WALL_THICKNESS),
    );
    spawn_wall(
        "WallRight".into(),
        Vec3::new(0.0, WALL_HEIGHT * 0.5, -HALF_SPAN),
        Vec3::new(span, WALL_HEIGHT, WALL_THICKNESS),
    );
}

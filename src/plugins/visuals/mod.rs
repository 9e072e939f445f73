//! Visuals plugin (render-only).
//!
//! Gameplay entities spawn without meshes so headless tests never touch
//! assets; this plugin attaches meshes/materials to newly spawned gameplay
//! entities and provides the light. Blocks regenerate on every field reset,
//! which is why attachment is `Added`-driven rather than a one-shot setup.

use avian3d::prelude::{Collider, SimpleCollider};
use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::arena::Wall;
use crate::plugins::ball::Ball;
use crate::plugins::blocks::Block;
use crate::plugins::paddle::Paddle;

#[derive(Resource)]
struct VisualAssets {
    ball_mesh: Handle<Mesh>,
    ball_material: Handle<StandardMaterial>,
    block_mesh: Handle<Mesh>,
    block_material: Handle<StandardMaterial>,
    paddle_mesh: Handle<Mesh>,
    paddle_material: Handle<StandardMaterial>,
    wall_material: Handle<StandardMaterial>,
}

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, setup);
    app.add_systems(Update, (attach_shared_visuals, attach_wall_visuals));
}

fn setup(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let block = tunables.grid.block_size;
    let paddle = tunables.paddle_size;

    commands.insert_resource(VisualAssets {
        ball_mesh: meshes.add(Sphere::new(tunables.ball_radius)),
        ball_material: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.3, 0.0),
            emissive: LinearRgba::rgb(0.7, 0.2, 0.0),
            perceptual_roughness: 0.2,
            ..default()
        }),
        block_mesh: meshes.add(Cuboid::new(block.x, block.y, block.z)),
        block_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.2, 0.4, 0.8),
            ..default()
        }),
        paddle_mesh: meshes.add(Cuboid::new(paddle.x, paddle.y, paddle.z)),
        paddle_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.2, 0.75, 0.9),
            ..default()
        }),
        wall_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.25, 0.27, 0.33),
            ..default()
        }),
    });

    commands.spawn((
        Name::new("KeyLight"),
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(-200.0, 400.0, 200.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn attach_shared_visuals(
    mut commands: Commands,
    assets: Res<VisualAssets>,
    q_balls: Query<Entity, Added<Ball>>,
    q_blocks: Query<Entity, Added<Block>>,
    q_paddles: Query<Entity, Added<Paddle>>,
) {
    for entity in &q_balls {
        commands.entity(entity).insert((
            Mesh3d(assets.ball_mesh.clone()),
            MeshMaterial3d(assets.ball_material.clone()),
        ));
    }
    for entity in &q_blocks {
        commands.entity(entity).insert((
            Mesh3d(assets.block_mesh.clone()),
            MeshMaterial3d(assets.block_material.clone()),
        ));
    }
    for entity in &q_paddles {
        commands.entity(entity).insert((
            Mesh3d(assets.paddle_mesh.clone()),
            MeshMaterial3d(assets.paddle_material.clone()),
        ));
    }
}

fn attach_wall_visuals(
    mut commands: Commands,
    assets: Res<VisualAssets>,
    mut meshes: ResMut<Assets<Mesh>>,
    q_walls: Query<(Entity, &Collider), Added<Wall>>,
) {
    for (entity, collider) in &q_walls {
        // Wall sizes vary per side; derive each mesh from its collider AABB.
        let aabb = collider.aabb(Vec3::ZERO, Quat::IDENTITY);
        let size = aabb.max - aabb.min;
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(assets.wall_material.clone()),
        ));
    }
}

//! Camera plugin (render-only).

use bevy::prelude::*;

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera);
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        MainCamera,
        Camera3d::default(),
        Transform::from_xyz(-480.0, 520.0, 0.0).looking_at(Vec3::new(40.0, 0.0, 0.0), Vec3::Y),
    ));
}

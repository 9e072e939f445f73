//! Feature plugins.

use bevy::prelude::*;

pub mod arena;
pub mod ball;
pub mod blocks;
pub mod collision;
pub mod core;
pub mod flow;
pub mod hud;
pub mod paddle;
pub mod physics;

// Render-only
pub mod camera;
pub mod visuals;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    hud::plugin(app);
    arena::plugin(app);
    collision::plugin(app);
    blocks::plugin(app);
    paddle::plugin(app);
    ball::plugin(app);
    flow::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
    visuals::plugin(app);
    hud::render(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}

//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides the core ECS runtime.
//! - `StatesPlugin` + `TransformPlugin` cover what the gameplay plugins need.
//! - `AssetPlugin` + `ScenePlugin` (and a registered `Mesh` asset) satisfy
//!   the physics plugins without any render infrastructure.
//! - a plain `ButtonInput<KeyCode>` resource stands in for the input host;
//!   `tick` ages its edges the way `bevy_input` would each frame.

#![allow(dead_code)]

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::transform::TransformPlugin;

pub fn app_headless() -> App {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        TransformPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.init_asset::<Mesh>();
    app.insert_resource(ButtonInput::<KeyCode>::default());

    block_breaker::game::configure_headless(&mut app);

    // Tests drive schedules by hand, so run the plugin finalizers that a
    // normal `App::run` would perform.
    app.finish();
    app.cleanup();
    app
}

pub fn press(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
}

pub fn release(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(key);
}

/// Advance one frame, then clear just-pressed/just-released edges.
pub fn tick(app: &mut App) {
    app.update();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .clear();
}

pub fn phase(app: &mut App) -> block_breaker::common::state::GamePhase {
    *app.world()
        .resource::<State<block_breaker::common::state::GamePhase>>()
        .get()
}

//! HUD text plugin.
//!
//! Gameplay only ever writes plain strings into the `HudText` resource; the
//! render-only half (`render`) mirrors the resource into UI `Text` nodes.
//! Headless apps carry the resource alone, which keeps every display string
//! assertable in tests.

use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub const IDLE_MESSAGE: &str = "Press Enter to start";
pub const VICTORY_MESSAGE: &str = "Congratulations! Press Enter to restart";
pub const GAME_OVER_MESSAGE: &str = "Game over. Press Enter to restart";

#[derive(Resource, Debug, Clone)]
pub struct HudText {
    /// Status line: start prompt, victory, or game over. Empty while running.
    pub status: String,
    /// Counter line, always "blocks {remaining}/{total}".
    pub blocks: String,
}

pub fn format_blocks(remaining: u32, total: u32) -> String {
    format!("blocks {remaining}/{total}")
}

pub fn plugin(app: &mut App) {
    let total = app.world().resource::<Tunables>().grid.total();
    app.insert_resource(HudText {
        status: IDLE_MESSAGE.into(),
        blocks: format_blocks(total, total),
    });
}

// ---------------------------------------------------------------------------
// Render-only mirror
// ---------------------------------------------------------------------------

#[derive(Component)]
struct StatusText;

#[derive(Component)]
struct BlockCountText;

pub fn render(app: &mut App) {
    app.add_systems(Startup, setup_widgets);
    app.add_systems(Update, sync_widgets);
}

fn setup_widgets(mut commands: Commands, hud: Res<HudText>) {
    commands
        .spawn((
            Name::new("Hud"),
            Node {
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                padding: UiRect::top(Val::Px(100.0)),
                row_gap: Val::Px(16.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                StatusText,
                Text::new(hud.status.clone()),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            parent.spawn((
                BlockCountText,
                Text::new(hud.blocks.clone()),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

fn sync_widgets(
    hud: Res<HudText>,
    mut q_status: Query<&mut Text, (With<StatusText>, Without<BlockCountText>)>,
    mut q_blocks: Query<&mut Text, (With<BlockCountText>, Without<StatusText>)>,
) {
    if !hud.is_changed() {
        return;
    }

    if let Ok(mut text) = q_status.single_mut() {
        text.0 = hud.status.clone();
    }
    if let Ok(mut text) = q_blocks.single_mut() {
        text.0 = hud.blocks.clone();
    }
}

//! Tunable gameplay constants.
//!
//! The play field lives in the XZ plane; Y is the (unused) vertical axis.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub length_unit: f32,

    /// Paddle travel in units per second along Z.
    pub paddle_speed: f32,
    /// Open interval: a move whose candidate position lands on or past a
    /// bound is rejected outright, not clamped.
    pub paddle_min_z: f32,
    pub paddle_max_z: f32,
    pub paddle_home: Vec3,
    pub paddle_size: Vec3,

    pub ball_radius: f32,
    pub ball_mass: f32,
    /// Fixed launch vector; its magnitude becomes the ball's target speed.
    pub ball_launch_velocity: Vec3,
    /// Spawn point relative to the paddle, in front of its face.
    pub ball_spawn_offset: Vec3,

    /// A ball whose |x| or |z| exceeds this is lost.
    pub field_boundary: f32,

    /// Render ticks between marking a block and despawning its batch.
    /// Despawning inside the physics dispatch that produced the contact
    /// dropped removals; the minimum safe delay is unverified, so it stays
    /// configurable.
    pub removal_delay_ticks: u32,

    pub grid: BlockGrid,
}

/// Deterministic block placement: rows step in -X, columns in -Z.
#[derive(Debug, Clone)]
pub struct BlockGrid {
    pub rows: u32,
    pub columns: u32,
    pub block_size: Vec3,
    /// (row step, column step).
    pub spacing: Vec2,
    pub origin: Vec3,
}

impl BlockGrid {
    pub fn total(&self) -> u32 {
        self.rows * self.columns
    }

    pub fn position(&self, row: u32, column: u32) -> Vec3 {
        Vec3::new(
            self.origin.x - row as f32 * self.spacing.x,
            self.origin.y,
            self.origin.z - column as f32 * self.spacing.y,
        )
    }
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            length_unit: 10.0,
            paddle_speed: 120.0,
            paddle_min_z: -169.0,
            paddle_max_z: 192.0,
            paddle_home: Vec3::new(-200.0, 8.0, 0.0),
            paddle_size: Vec3::new(10.0, 16.0, 70.0),
            ball_radius: 5.0,
            ball_mass: 0.1,
            ball_launch_velocity: Vec3::new(2000.0, 0.0, 2000.0),
            ball_spawn_offset: Vec3::new(20.0, 3.0, 0.0),
            field_boundary: 500.0,
            removal_delay_ticks: 2,
            grid: BlockGrid {
                rows: 2,
                columns: 4,
                block_size: Vec3::new(40.0, 10.0, 70.0),
                spacing: Vec2::new(50.0, 100.0),
                origin: Vec3::new(162.0, 14.0, 162.0),
            },
        }
    }
}

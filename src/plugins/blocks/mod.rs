//! Block field plugin.
//!
//! # Removal protocol (the correctness-critical part)
//! On a block's first `BlockHit`:
//! 1. write `BlockCleared { count: 1 }` for the flow plugin,
//! 2. remove the block's `CollisionEventsEnabled` marker so one physical
//!    contact cannot keep producing raw events,
//! 3. flip `BlockState::Alive -> Marked` and enqueue the block in the
//!    `RemovalQueue` — it is NOT despawned here.
//!
//! Despawning a body while the physics engine is still dispatching the
//! collision pass that produced the event dropped removals in practice, so
//! the queue drains a fixed number of render ticks later (see
//! `Tunables::removal_delay_ticks`). Blocks hit while a batch is pending
//! join that batch; the countdown is never restarted.
//!
//! A `Marked` block hit again before the batch fires is a no-op: the state
//! flag is the dedup, the queue is only the deferral.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::{
    layers::Layer,
    state::GamePhase,
    tunables::{BlockGrid, Tunables},
};
use crate::plugins::collision::{self, BlockHit};

#[derive(Component)]
pub struct Block;

/// Stable grid identity, assigned once at field generation.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockCell {
    pub row: u32,
    pub column: u32,
}

/// A block transitions `Alive -> Marked` exactly once; despawn finishes the
/// lifecycle. Mutating the flag instead of adding a marker component keeps
/// the hot path free of archetype moves.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockState {
    #[default]
    Alive,
    Marked,
}

/// One cleared block, reported exactly once per block.
#[derive(Message, Clone, Copy, Debug)]
pub struct BlockCleared {
    pub count: u32,
}

/// Tear down every block (marked or not) and regenerate the full grid.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct ResetField;

/// Deferred-removal batch: blocks marked for despawn plus the tick countdown.
///
/// At most one batch is ever scheduled; marks arriving while the countdown
/// runs are swept up by the same batch.
#[derive(Resource, Debug, Default)]
pub struct RemovalQueue {
    pending: Vec<Entity>,
    ticks_left: Option<u32>,
}

impl RemovalQueue {
    pub fn schedule(&mut self, block: Entity, delay_ticks: u32) {
        self.pending.push(block);
        if self.ticks_left.is_none() {
            self.ticks_left = Some(delay_ticks);
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.ticks_left.is_some()
    }

    pub fn pending(&self) -> &[Entity] {
        &self.pending
    }

    /// Advance one render tick. Returns the batch once the countdown hits
    /// zero, leaving the queue empty and unscheduled.
    pub fn tick(&mut self) -> Option<Vec<Entity>> {
        let ticks_left = self.ticks_left.as_mut()?;
        if *ticks_left > 0 {
            *ticks_left -= 1;
            return None;
        }
        self.ticks_left = None;
        Some(std::mem::take(&mut self.pending))
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.ticks_left = None;
    }
}

pub fn plugin(app: &mut App) {
    app.add_message::<BlockCleared>();
    app.add_message::<ResetField>();
    app.init_resource::<RemovalQueue>();

    app.add_systems(Startup, spawn_field);
    app.add_systems(
        FixedPostUpdate,
        handle_block_hits
            .after(collision::route_collisions)
            .run_if(in_state(GamePhase::Running)),
    );
    // Render-tick cadence: the deferral counts frame boundaries, not
    // physics substeps.
    app.add_systems(PostUpdate, drain_removal_queue);
    app.add_systems(Update, reset_field);
}

pub fn spawn_field(mut commands: Commands, tunables: Res<Tunables>) {
    spawn_grid(&mut commands, &tunables.grid);
}

fn spawn_grid(commands: &mut Commands, grid: &BlockGrid) {
    let size = grid.block_size;

    for row in 0..grid.rows {
        for column in 0..grid.columns {
            commands.spawn((
                Name::new(format!("Block-{row}-{column}")),
                Block,
                BlockCell { row, column },
                BlockState::Alive,
                Transform::from_translation(grid.position(row, column)),
                // Static, perfectly elastic, no momentum transfer.
                RigidBody::Static,
                Collider::cuboid(size.x, size.y, size.z),
                CollisionLayers::new(Layer::Block, [Layer::Ball]),
                Restitution::new(1.0).with_combine_rule(CoefficientCombine::Max),
                Friction::ZERO,
                CollisionEventsEnabled,
            ));
        }
    }
}

/// First hit wins: report, unsubscribe, mark, enqueue.
pub fn handle_block_hits(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut hits: MessageReader<BlockHit>,
    mut queue: ResMut<RemovalQueue>,
    mut cleared: MessageWriter<BlockCleared>,
    mut q_blocks: Query<&mut BlockState, With<Block>>,
) {
    for hit in hits.read() {
        let Ok(mut state) = q_blocks.get_mut(hit.block) else {
            // Already despawned; a late duplicate event is a no-op.
            continue;
        };
        if *state != BlockState::Alive {
            continue;
        }
        *state = BlockState::Marked;

        cleared.write(BlockCleared { count: 1 });
        commands.entity(hit.block).remove::<CollisionEventsEnabled>();
        queue.schedule(hit.block, tunables.removal_delay_ticks);
    }
}

/// Drain the pending batch once its countdown expires.
///
/// `try_despawn` skips blocks a field reset already tore down.
pub fn drain_removal_queue(mut commands: Commands, mut queue: ResMut<RemovalQueue>) {
    let Some(batch) = queue.tick() else {
        return;
    };
    for block in batch {
        commands.entity(block).try_despawn();
    }
}

/// Full reset: dispose every block regardless of marked state, invalidate
/// the pending batch, regenerate the grid with fresh subscriptions.
pub fn reset_field(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut resets: MessageReader<ResetField>,
    mut queue: ResMut<RemovalQueue>,
    q_blocks: Query<Entity, With<Block>>,
) {
    if resets.read().next().is_none() {
        return;
    }

    for block in &q_blocks {
        commands.entity(block).try_despawn();
    }
    queue.clear();
    spawn_grid(&mut commands, &tunables.grid);
}

#[cfg(test)]
mod tests;

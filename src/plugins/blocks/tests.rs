use avian3d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use std::collections::HashSet;

use super::{
    drain_removal_queue, handle_block_hits, reset_field, spawn_field, Block, BlockCell,
    BlockCleared, BlockState, RemovalQueue, ResetField,
};
use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::collision::BlockHit;

fn world_with_field() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.init_resource::<RemovalQueue>();
    world.init_resource::<Messages<BlockHit>>();
    world.init_resource::<Messages<BlockCleared>>();
    world.init_resource::<Messages<ResetField>>();
    run_system_once(&mut world, spawn_field);
    world
}

fn any_alive_block(world: &mut World) -> Entity {
    world
        .query::<(Entity, &BlockState)>()
        .iter(world)
        .find(|(_, state)| **state == BlockState::Alive)
        .map(|(e, _)| e)
        .expect("an alive block")
}

#[test]
fn field_spawns_full_grid_with_subscriptions() {
    let mut world = world_with_field();

    let mut q = world.query::<(&Block, &BlockState, &RigidBody)>();
    let mut count = 0;
    for (_, state, body) in q.iter(&world) {
        assert_eq!(*state, BlockState::Alive);
        assert!(matches!(body, RigidBody::Static));
        count += 1;
    }
    assert_eq!(count, 8);

    // Every fresh block opts in to collision events.
    let subscribed = world
        .query_filtered::<(), (With<Block>, With<CollisionEventsEnabled>)>()
        .iter(&world)
        .count();
    assert_eq!(subscribed, 8);

    // Each block carries a distinct grid identity and sits at its slot.
    let grid = Tunables::default().grid;
    let mut cells = HashSet::new();
    for (cell, tf) in world.query::<(&BlockCell, &Transform)>().iter(&world) {
        assert!(cell.row < grid.rows && cell.column < grid.columns);
        assert_eq!(tf.translation, grid.position(cell.row, cell.column));
        cells.insert((cell.row, cell.column));
    }
    assert_eq!(cells.len(), 8);
}

#[test]
fn duplicate_hits_on_one_block_report_exactly_one_clear() {
    let mut world = world_with_field();
    let block = any_alive_block(&mut world);

    // One physical contact can surface as several raw events.
    world.write_message(BlockHit { block });
    world.write_message(BlockHit { block });
    run_system_once(&mut world, handle_block_hits);

    let cleared: Vec<BlockCleared> = world
        .resource_mut::<Messages<BlockCleared>>()
        .drain()
        .collect();
    assert_eq!(cleared.len(), 1);
    assert_eq!(cleared[0].count, 1);

    assert_eq!(*world.get::<BlockState>(block).unwrap(), BlockState::Marked);
    // Unsubscribed: no further raw events for this block.
    assert!(world.get::<CollisionEventsEnabled>(block).is_none());

    let queue = world.resource::<RemovalQueue>();
    assert!(queue.is_scheduled());
    assert_eq!(queue.pending(), &[block]);
}

#[test]
fn hit_on_an_already_marked_block_is_a_noop() {
    let mut world = world_with_field();
    let block = any_alive_block(&mut world);

    world.write_message(BlockHit { block });
    run_system_once(&mut world, handle_block_hits);
    world.resource_mut::<Messages<BlockCleared>>().drain().count();

    world.write_message(BlockHit { block });
    run_system_once(&mut world, handle_block_hits);

    assert_eq!(
        world
            .resource_mut::<Messages<BlockCleared>>()
            .drain()
            .count(),
        0
    );
    // Still one entry in the pending batch.
    assert_eq!(world.resource::<RemovalQueue>().pending().len(), 1);
}

#[test]
fn hit_on_a_despawned_block_is_a_noop() {
    let mut world = world_with_field();
    let block = any_alive_block(&mut world);
    world.despawn(block);

    world.write_message(BlockHit { block });
    run_system_once(&mut world, handle_block_hits);

    assert_eq!(
        world
            .resource_mut::<Messages<BlockCleared>>()
            .drain()
            .count(),
        0
    );
}

#[test]
fn removal_queue_coalesces_marks_into_one_batch() {
    let mut world = World::new();
    let a = world.spawn_empty().id();
    let b = world.spawn_empty().id();
    let mut queue = RemovalQueue::default();

    queue.schedule(a, 2);
    assert!(queue.is_scheduled());
    assert!(queue.tick().is_none()); // 2 -> 1

    // A hit inside the window joins the pending batch without rescheduling.
    queue.schedule(b, 2);
    assert!(queue.tick().is_none()); // 1 -> 0

    let batch = queue.tick().expect("batch due");
    assert_eq!(batch, vec![a, b]);
    assert!(!queue.is_scheduled());
    assert!(queue.tick().is_none());
}

#[test]
fn hit_after_a_drained_batch_opens_a_new_window() {
    let mut world = World::new();
    let a = world.spawn_empty().id();
    let b = world.spawn_empty().id();
    let mut queue = RemovalQueue::default();

    queue.schedule(a, 2);
    assert!(queue.tick().is_none());
    assert!(queue.tick().is_none());
    assert_eq!(queue.tick().expect("first batch due"), vec![a]);

    // The next mark must not ride the old countdown.
    queue.schedule(b, 2);
    assert!(queue.is_scheduled());
    assert!(queue.tick().is_none()); // 2 -> 1
    assert!(queue.tick().is_none()); // 1 -> 0
    assert_eq!(queue.tick().expect("second batch due"), vec![b]);
    assert!(!queue.is_scheduled());
}

#[test]
fn drained_batch_despawns_marked_blocks_and_skips_dead_ones() {
    let mut world = world_with_field();
    let block = any_alive_block(&mut world);

    world.write_message(BlockHit { block });
    run_system_once(&mut world, handle_block_hits);

    // Simulate a reset racing the batch: the block is already gone.
    world.despawn(block);

    // Two delay ticks, then the drain.
    run_system_once(&mut world, drain_removal_queue);
    run_system_once(&mut world, drain_removal_queue);
    run_system_once(&mut world, drain_removal_queue);

    assert!(!world.resource::<RemovalQueue>().is_scheduled());
    assert_eq!(world.query::<&Block>().iter(&world).count(), 7);
}

#[test]
fn batch_fires_exactly_on_the_deferral_boundary() {
    let mut world = world_with_field();
    let block = any_alive_block(&mut world);

    world.write_message(BlockHit { block });
    run_system_once(&mut world, handle_block_hits);

    run_system_once(&mut world, drain_removal_queue);
    assert!(world.get_entity(block).is_ok());
    run_system_once(&mut world, drain_removal_queue);
    assert!(world.get_entity(block).is_ok());
    run_system_once(&mut world, drain_removal_queue);
    assert!(world.get_entity(block).is_err());
}

#[test]
fn reset_rebuilds_the_full_grid_and_invalidates_the_batch() {
    let mut world = world_with_field();
    let block = any_alive_block(&mut world);

    world.write_message(BlockHit { block });
    run_system_once(&mut world, handle_block_hits);

    world.write_message(ResetField);
    run_system_once(&mut world, reset_field);

    assert_eq!(world.query::<&Block>().iter(&world).count(), 8);
    let all_alive = world
        .query::<&BlockState>()
        .iter(&world)
        .all(|state| *state == BlockState::Alive);
    assert!(all_alive);
    assert!(!world.resource::<RemovalQueue>().is_scheduled());
    assert!(world.resource::<RemovalQueue>().pending().is_empty());
}

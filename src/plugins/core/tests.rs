use crate::common::tunables::Tunables;
use crate::plugins::core;
use bevy::prelude::*;

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert!(app.world().get_resource::<ClearColor>().is_some());
}

#[test]
fn grid_positions_step_away_from_origin() {
    let grid = Tunables::default().grid;
    assert_eq!(grid.total(), 8);

    let first = grid.position(0, 0);
    assert_eq!(first, Vec3::new(162.0, 14.0, 162.0));

    let last = grid.position(1, 3);
    assert_eq!(last, Vec3::new(112.0, 14.0, -138.0));
}

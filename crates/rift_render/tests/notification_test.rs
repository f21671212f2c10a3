//! # Notification Integration Test
//!
//! A projection attached to the world must reflect post-command state
//! after `notify`, and stay row-aligned through removals.

use std::sync::Arc;

use parking_lot::Mutex;
use rift_core::{Action, ActorType, Attributes, MovementData, PositionData, WorldState};
use rift_render::{Rect, ViewportProjection};

fn spawn(world: &mut WorldState, projection: &Mutex<ViewportProjection>, bx: i32) -> usize {
    let pos = PositionData::new(bx, 0, 0.0, 0.0, 32, 32);
    let row = world.add_entity(pos, MovementData::REST, ActorType::Rock, Attributes::EMPTY);
    let mirrored = projection.lock().add_entity(&pos, None);
    assert_eq!(row, mirrored, "world and screen rows must line up");
    row
}

#[test]
fn test_observer_sees_post_move_position() {
    let mut world = WorldState::new(4);
    let projection = Arc::new(Mutex::new(ViewportProjection::new(32, 4)));
    world.attach(&projection);

    let row = spawn(&mut world, &projection, 0);
    world
        .apply(&[Action::Move { index: row, dx: 10.0, dy: 3.0 }])
        .unwrap();

    // Not notified yet: cache still holds the spawn position.
    assert_eq!(projection.lock().screen_entities()[row].dest_rect.x, 0);

    assert_eq!(world.notify().unwrap(), 1);
    assert_eq!(
        projection.lock().screen_entities()[row].dest_rect,
        Rect::new(10, 3, 32, 32)
    );
}

#[test]
fn test_every_attached_view_updates() {
    let mut world = WorldState::new(2);
    let near = Arc::new(Mutex::new(ViewportProjection::new(32, 2)));
    let far = Arc::new(Mutex::new(ViewportProjection::new(32, 2)));
    far.lock().offset(1, 1, 0.0, 0.0);
    world.attach(&near);
    world.attach(&far);

    let pos = PositionData::new(2, 2, 0.0, 0.0, 8, 8);
    world.add_entity(pos, MovementData::REST, ActorType::Player, Attributes::EMPTY);
    near.lock().add_entity(&pos, None);
    far.lock().add_entity(&pos, None);

    world.apply(&[Action::Move { index: 0, dx: 1.0, dy: 0.0 }]).unwrap();
    world.notify().unwrap();

    assert_eq!(near.lock().screen_entities()[0].dest_rect.x, 65);
    assert_eq!(far.lock().screen_entities()[0].dest_rect.x, 33);
}

#[test]
fn test_removal_keeps_rows_aligned() {
    let mut world = WorldState::new(3);
    let projection = Arc::new(Mutex::new(ViewportProjection::new(32, 3)));
    world.attach(&projection);
    for bx in 0..3 {
        spawn(&mut world, &projection, bx);
    }

    world.remove_entity(0).unwrap();
    projection.lock().remove_entity(0).unwrap();
    world.notify().unwrap();

    let view = projection.lock();
    let xs: Vec<i32> = view.screen_entities().iter().map(|s| s.dest_rect.x).collect();
    let world_bx: Vec<i32> = world.entities().positions().iter().map(|p| p.bx).collect();
    assert_eq!(world_bx, vec![2, 1]);
    assert_eq!(xs, vec![64, 32]);
}

//! # Entity Store Invariants
//!
//! Random push/swap/pop/swap_remove sequences checked against a plain
//! `Vec` model. Each entity carries its tag in `bx` and in its movement, so
//! a row that tears across columns shows up immediately.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rift_core::{
    ActorType, Attributes, EntityError, EntityId, EntityStore, MovementData, PositionData,
};

fn push_tagged(store: &mut EntityStore, tag: i32) -> usize {
    store.push(
        PositionData::new(tag, 0, 0.0, 0.0, 1, 1),
        MovementData::new(tag as f32, 0.0, 0.0, 0.0),
        if tag % 2 == 0 { ActorType::Rock } else { ActorType::Stick },
        Attributes::from_bits(tag as u32),
    )
}

fn assert_matches_model(store: &EntityStore, model: &[i32]) {
    assert_eq!(store.len(), model.len());
    assert_eq!(store.positions().len(), model.len());
    assert_eq!(store.movements().len(), model.len());
    assert_eq!(store.types().len(), model.len());
    assert_eq!(store.attributes().len(), model.len());

    for (row, &tag) in model.iter().enumerate() {
        assert_eq!(store.positions()[row].bx, tag);
        assert!((store.movements()[row].vx - tag as f32).abs() < f32::EPSILON);
        assert_eq!(store.attributes()[row].bits(), tag as u32);
        let id = store.id_of(row).unwrap();
        assert_eq!(store.resolve(id), Some(row));
    }
}

#[test]
fn test_random_sequences_keep_columns_aligned() {
    for seed in 0..16 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut store = EntityStore::with_capacity(8);
        let mut model: Vec<i32> = Vec::new();
        let mut next_tag = 0;

        for _ in 0..2_000 {
            match rng.gen_range(0..4) {
                0 => {
                    let row = push_tagged(&mut store, next_tag);
                    assert_eq!(row, model.len());
                    model.push(next_tag);
                    next_tag += 1;
                }
                1 => {
                    let i = rng.gen_range(0..model.len() + 2);
                    let j = rng.gen_range(0..model.len() + 2);
                    let result = store.swap(i, j);
                    if i < model.len() && j < model.len() {
                        assert!(result.is_ok());
                        model.swap(i, j);
                    } else {
                        assert!(matches!(result, Err(EntityError::OutOfRange { .. })));
                    }
                }
                2 => match model.pop() {
                    Some(tag) => assert_eq!(store.pop().unwrap().position.bx, tag),
                    None => assert_eq!(store.pop(), Err(EntityError::EmptyStore)),
                },
                _ => {
                    if model.is_empty() {
                        continue;
                    }
                    let row = rng.gen_range(0..model.len());
                    let removed = store.swap_remove(row).unwrap();
                    assert_eq!(removed.position.bx, model.swap_remove(row));
                }
            }
            assert_matches_model(&store, &model);
        }
    }
}

#[test]
fn test_swap_pop_at_edges_and_middle() {
    for row in [0, 4, 9] {
        let mut store = EntityStore::with_capacity(10);
        for tag in 0..10 {
            push_tagged(&mut store, tag);
        }
        let mut model: Vec<i32> = (0..10).collect();

        store.swap(row, 9).unwrap();
        store.pop().unwrap();
        model.swap(row, 9);
        model.pop();

        assert_matches_model(&store, &model);
        if row < 9 {
            assert_eq!(store.positions()[row].bx, 9);
        }
    }
}

#[test]
fn test_removed_handles_go_stale() {
    let mut store = EntityStore::with_capacity(4);
    let ids: Vec<EntityId> = (0..4)
        .map(|tag| {
            let row = push_tagged(&mut store, tag);
            store.id_of(row).unwrap()
        })
        .collect();

    store.swap_remove(1).unwrap();
    assert_eq!(store.resolve(ids[1]), None);
    assert_eq!(store.resolve(ids[3]), Some(1));

    // A new entity may reuse the slot but never the handle.
    let row = push_tagged(&mut store, 7);
    let fresh = store.id_of(row).unwrap();
    assert_ne!(fresh, ids[1]);
    assert_eq!(store.resolve(ids[1]), None);
    assert_eq!(store.resolve(fresh), Some(row));
}

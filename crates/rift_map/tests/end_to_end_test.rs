//! End-to-end check: one player in the world, a scrolled test grid, and a
//! tile draw that only ever references loaded images.

use rift_core::{ActorType, Attributes, MovementData, PositionData, WorldState};
use rift_map::{Layer, TileGrid};
use rift_render::{HeadlessLoader, ImageHandle, RecordingSurface};

#[test]
fn test_player_on_scrolled_test_grid() {
    let mut world = WorldState::new(0);
    assert!(world.entities().is_empty());
    world.add_entity(
        PositionData::new(0, 0, 0.0, 0.0, 32, 32),
        MovementData::REST,
        ActorType::Player,
        Attributes::EMPTY,
    );
    assert_eq!(world.entities().len(), 1);

    let mut loader = HeadlessLoader::new();
    let mut grid = TileGrid::new();
    grid.load_tile_images(&mut loader, &["blue.png", "brown.png", "green.png"])
        .unwrap();
    grid.generate_test_grid(10, 10, 0).unwrap();
    grid.set_display(5, 5);
    grid.set_offset(8, 8);
    assert_eq!(grid.offset(), (5, 5));

    let mut surface = RecordingSurface::new();
    assert_eq!(grid.draw(Layer::Tiles, &mut surface).unwrap(), 25);
    assert!(surface.blits().iter().all(|b| b.image < ImageHandle(3)));
}

#[test]
fn test_layers_compose_in_draw_order() {
    let mut loader = HeadlessLoader::new();
    let mut grid = TileGrid::new();
    grid.load_tile_images(&mut loader, &["grass.png"]).unwrap();
    grid.load_layer_images(Layer::Decorations, &mut loader, &["flower.png"])
        .unwrap();
    grid.load_layer_images(Layer::Overlays, &mut loader, &["cloud.png"])
        .unwrap();
    grid.generate_test_grid(2, 2, 3).unwrap();
    grid.layer_mut(Layer::Decorations)[0] = 0;
    grid.layer_mut(Layer::Overlays)[3] = 0;

    let mut surface = RecordingSurface::new();
    let mut drawn = 0;
    for layer in Layer::ALL {
        drawn += grid.draw(layer, &mut surface).unwrap();
    }

    assert_eq!(drawn, 6);
    let images: Vec<u32> = surface.blits().iter().map(|b| b.image.0).collect();
    assert_eq!(images, vec![0, 0, 0, 0, 1, 2]);
}

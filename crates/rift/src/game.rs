//! # Game
//!
//! Composition root. Owns the world, the tile map and the input queue, and
//! keeps one [`ViewportProjection`] attached to the world as an observer.
//!
//! ```text
//! tick:  drain input ──> simulate(PlayerControl) ──> apply ──> notify
//! draw:  tiles ──> decorations ──> entities ──> overlays
//! ```
//!
//! The world and the projection are row-aligned. Actors are only added and
//! removed through [`Game::add_actor`] / [`Game::remove_actor`], which
//! mirror every change into the projection.

use std::sync::Arc;

use parking_lot::Mutex;
use rift_core::{
    ActorType, Attributes, EntityRow, EntityStore, MovementData, PositionData, WorldState,
};
use rift_map::{Layer, MapDescription, TileGrid};
use rift_render::{
    Animation, AnimationId, AnimationSet, ImageLoader, RenderError, Surface, ViewportProjection,
};

use crate::config::{EngineConfig, MapSource};
use crate::control::PlayerControl;
use crate::error::GameResult;
use crate::input::{InputEvent, InputQueue, InputSender, INPUT_QUEUE_CAPACITY};

/// The running game.
pub struct Game {
    config: EngineConfig,
    world: WorldState,
    projection: Arc<Mutex<ViewportProjection>>,
    grid: TileGrid,
    animations: AnimationSet,
    control: PlayerControl,
    input: InputQueue,
    running: bool,
    ticks: u64,
}

impl Game {
    /// Creates an empty game: no actors, no images, a 0×0 map.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Invalid`] if `config` does not validate.
    pub fn new(config: EngineConfig) -> GameResult<Self> {
        config.validate()?;

        let store = EntityStore::with_capacity(config.world.capacity)
            .with_block_size(config.world.block_size);
        let mut world = WorldState::from_store(store);
        let projection = Arc::new(Mutex::new(ViewportProjection::new(
            config.world.block_size,
            config.world.capacity,
        )));
        world.attach(&projection);

        tracing::info!(
            title = %config.window.title,
            width = config.window.width,
            height = config.window.height,
            "game created"
        );

        Ok(Self {
            control: PlayerControl::new(config.player.speed, config.world.ticks_per_second),
            config,
            world,
            projection,
            grid: TileGrid::new(),
            animations: AnimationSet::new(),
            input: InputQueue::new(INPUT_QUEUE_CAPACITY),
            running: true,
            ticks: 0,
        })
    }

    /// Creates a game and runs the boxy setup: images, map and one player.
    ///
    /// # Errors
    ///
    /// Fails on an invalid config, an image the loader rejects, or an
    /// unusable map.
    pub fn boxy<L: ImageLoader + ?Sized>(config: EngineConfig, loader: &mut L) -> GameResult<Self> {
        let mut game = Self::new(config)?;
        game.setup(loader)?;
        Ok(game)
    }

    /// Loads every configured image, builds the map and spawns the player.
    ///
    /// # Errors
    ///
    /// As [`boxy`](Self::boxy).
    pub fn setup<L: ImageLoader + ?Sized>(&mut self, loader: &mut L) -> GameResult<()> {
        self.grid.load_tile_images(loader, &self.config.tiles)?;
        self.grid
            .load_layer_images(Layer::Decorations, loader, &self.config.decorations)?;
        self.grid
            .load_layer_images(Layer::Overlays, loader, &self.config.overlays)?;

        match &self.config.map {
            MapSource::Test { seed } => {
                let (nx, ny) = self.config.test_grid_size();
                self.grid.generate_test_grid(nx, ny, *seed)?;
            }
            MapSource::File { path } => {
                let description = MapDescription::load(path)?;
                self.grid.load_description(&description)?;
            }
        }

        let player = &self.config.player;
        tracing::debug!(sprite = %player.sprite.display(), "loading player sprite");
        let sprite = loader.load_image(&player.sprite)?;
        let animation = self
            .animations
            .insert(Animation::still(sprite, player.size[0], player.size[1]));
        let position = PositionData::new(
            player.block[0],
            player.block[1],
            player.offset[0],
            player.offset[1],
            player.size[0],
            player.size[1],
        );
        self.add_actor(
            position,
            MovementData::REST,
            ActorType::Player,
            Attributes::EMPTY,
            Some(animation),
        );
        Ok(())
    }

    /// Adds an actor to the world and its screen entry to the projection.
    ///
    /// Returns the shared row.
    pub fn add_actor(
        &mut self,
        position: PositionData,
        movement: MovementData,
        actor: ActorType,
        attributes: Attributes,
        animation: Option<AnimationId>,
    ) -> usize {
        let row = self.world.add_entity(position, movement, actor, attributes);
        let screen_row = self.projection.lock().add_entity(&position, animation);
        if row != screen_row {
            tracing::warn!(row, screen_row, "actor rows diverged");
        }
        row
    }

    /// Swap-removes an actor from the world and the projection.
    ///
    /// # Errors
    ///
    /// Returns [`rift_core::EntityError::OutOfRange`] if `row` is not live,
    /// or [`rift_render::RenderError::ProjectionOutOfRange`] if only the
    /// projection lacks it. Neither side is touched then.
    pub fn remove_actor(&mut self, row: usize) -> GameResult<EntityRow> {
        let cached = self.projection.lock().screen_entities().len();
        if row < self.world.entities().len() && row >= cached {
            return Err(RenderError::ProjectionOutOfRange {
                index: row,
                len: cached,
            }
            .into());
        }
        let removed = self.world.remove_entity(row)?;
        self.projection.lock().remove_entity(row)?;
        Ok(removed)
    }

    /// New handle for pushing input into the game.
    #[must_use]
    pub fn input(&self) -> InputSender {
        self.input.sender()
    }

    fn handle_input(&mut self) {
        for event in self.input.drain() {
            match event {
                InputEvent::Move(direction) => self.control.push(direction),
                InputEvent::Pan { dx, dy } => self.pan(dx, dy),
                InputEvent::Quit => {
                    tracing::info!(ticks = self.ticks, "quit requested");
                    self.running = false;
                }
            }
        }
    }

    /// Scrolls the map by whole tiles and moves the projection frame by the
    /// same number of pixels.
    fn pan(&mut self, dx: i32, dy: i32) {
        let (before_x, before_y) = self.grid.offset();
        self.grid.delta_offset(i64::from(dx), i64::from(dy));
        let (after_x, after_y) = self.grid.offset();

        let (tile_w, tile_h) = self.grid.tile_size();
        let block = i64::from(self.config.world.block_size);
        let (block_dx, sub_dx) = split_pixels(
            (i64::from(after_x) - i64::from(before_x)) * i64::from(tile_w),
            block,
        );
        let (block_dy, sub_dy) = split_pixels(
            (i64::from(after_y) - i64::from(before_y)) * i64::from(tile_h),
            block,
        );
        self.projection.lock().offset(block_dx, block_dy, sub_dx, sub_dy);
        tracing::trace!(offset = ?self.grid.offset(), "camera panned");
    }

    /// Runs one tick: input, simulation, application, notification.
    ///
    /// Does nothing once the game has stopped.
    ///
    /// # Errors
    ///
    /// Propagates command or notification failures. A failed batch may
    /// have partly applied; observers have not been notified of it.
    pub fn tick(&mut self) -> GameResult<()> {
        self.handle_input();
        if !self.running {
            return Ok(());
        }

        let commands = self.world.simulate(&mut self.control)?;
        self.world.apply(&commands)?;
        self.world.notify()?;
        self.animations.advance_all();

        if self.world.entities().rows_of(ActorType::Player).next().is_none() {
            tracing::warn!(tick = self.ticks, "tick with no player actor");
        }
        self.ticks += 1;
        tracing::trace!(tick = self.ticks, commands = commands.len(), "tick complete");
        Ok(())
    }

    /// Draws map layers and actors. Returns the blit count.
    ///
    /// # Errors
    ///
    /// Returns [`rift_map::MapError::MissingImage`] for a visible tile with
    /// no image, or the surface's failure.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> GameResult<usize> {
        let mut blits = self.grid.draw(Layer::Tiles, surface)?;
        blits += self.grid.draw(Layer::Decorations, surface)?;
        blits += self.projection.lock().draw(surface, &self.animations)?;
        blits += self.grid.draw(Layer::Overlays, surface)?;
        Ok(blits)
    }

    /// Ticks and draws until quit or until `max_ticks` ticks have run.
    ///
    /// Returns the number of ticks run by this call.
    ///
    /// # Errors
    ///
    /// Stops at the first tick or draw failure.
    pub fn run<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        max_ticks: Option<u64>,
    ) -> GameResult<u64> {
        let start = self.ticks;
        while self.running && max_ticks.map_or(true, |max| self.ticks - start < max) {
            self.tick()?;
            if self.running {
                self.draw(surface)?;
            }
        }
        Ok(self.ticks - start)
    }

    /// Stops the loop after the current tick.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// True until a quit.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks completed so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The world.
    #[must_use]
    pub const fn world(&self) -> &WorldState {
        &self.world
    }

    /// The tile map.
    #[must_use]
    pub const fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Mutable tile map, e.g. to change the display size.
    pub fn grid_mut(&mut self) -> &mut TileGrid {
        &mut self.grid
    }

    /// The attached projection.
    #[must_use]
    pub fn projection(&self) -> &Arc<Mutex<ViewportProjection>> {
        &self.projection
    }

    /// Startup configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Splits a pixel distance into whole blocks and the pixel remainder.
fn split_pixels(pixels: i64, block_size: i64) -> (i32, f32) {
    let blocks = pixels.div_euclid(block_size);
    let blocks = i32::try_from(blocks).unwrap_or(if blocks < 0 { i32::MIN } else { i32::MAX });
    #[allow(clippy::cast_precision_loss)]
    let sub = pixels.rem_euclid(block_size) as f32;
    (blocks, sub)
}

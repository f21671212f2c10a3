//! # RIFT Headless Runner
//!
//! Runs the boxy setup without a window. Images are never decoded and
//! blits are recorded, so this is useful for soak runs and log inspection.
//!
//! ```bash
//! rift [config.toml] [ticks]
//! RUST_LOG=rift_map=trace rift demos/boxy.toml 120
//! ```

use std::process::ExitCode;

use rift::{Direction, EngineConfig, Game, GameResult, InputEvent};
use rift_render::{HeadlessLoader, RecordingSurface};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_TICKS: u64 = 600;

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .init();
}

fn run(config: EngineConfig, ticks: u64) -> GameResult<()> {
    let mut loader = HeadlessLoader::new();
    let mut game = Game::boxy(config, &mut loader)?;
    info!(images = loader.loaded().len(), "setup complete");

    // Walk the player around a square so the log shows movement.
    let route = [Direction::Right, Direction::Down, Direction::Left, Direction::Up];
    let input = game.input();
    let mut surface = RecordingSurface::new();
    let mut blits = 0;
    for tick in 0..ticks {
        let leg = usize::try_from(tick / 16 % 4).unwrap_or(0);
        input.send(InputEvent::Move(route[leg]));
        game.tick()?;
        surface.clear();
        blits += game.draw(&mut surface)?;
    }

    let player = game.world().entities().positions().first().copied();
    info!(ticks = game.ticks(), blits, ?player, "run finished");
    Ok(())
}

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => EngineConfig::load(&path),
        None => Ok(EngineConfig::default()),
    };
    let ticks = args
        .next()
        .and_then(|t| t.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    let config = match config {
        Ok(config) => config,
        Err(err) => {
            init_tracing("info");
            error!(%err, "could not load config");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging.level);
    info!("=== RIFT start ===");

    match run(config, ticks) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "game stopped");
            ExitCode::FAILURE
        }
    }
}

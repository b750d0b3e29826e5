//! Blinky Beak headless runner
//!
//! Plays one run with a simple autopilot, feeding synthetic ticks, and prints
//! the final snapshot as JSON. Useful for smoke-testing balance changes.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use env_logger::{Builder, Env};
use log::LevelFilter;

use blinky_beak::audio::{AudioManager, LogBackend};
use blinky_beak::persistence::{FileStorage, MemoryStorage, SharedStorage};
use blinky_beak::sim::{GameEvent, ObstacleKind};
use blinky_beak::{Difficulty, Game, SettingsManager, Snapshot};

#[derive(Debug, Parser)]
#[command(name = "blinky-beak", about = "Run a headless Blinky Beak game")]
struct Args {
    /// Difficulty: easy, medium or hard (defaults to the saved setting)
    #[arg(short, long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// RNG seed (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Give up after this many ticks
    #[arg(short, long, default_value_t = 5_000)]
    ticks: u32,

    /// Directory for settings and high scores (in-memory when omitted)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(s).ok_or_else(|| format!("unknown difficulty {s:?}"))
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let env = Env::default().default_filter_or(level.to_string());
    let _ = Builder::from_env(env).try_init();
}

/// Flap when the body is about to sink below the height it should hold
fn autopilot(snap: &Snapshot, ground_line: f32) -> bool {
    let next = snap
        .obstacles
        .iter()
        .filter(|o| o.pos.x + o.kind.visual_size().x > snap.body.x)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    let cruise = match next {
        // Stay above ground hazards
        Some(o) if o.kind == ObstacleKind::Tall => o.pos.y - 120.0,
        // Go under floating ones when there's room, otherwise over
        Some(o) if o.pos.y < ground_line / 2.0 => o.pos.y + 120.0,
        Some(o) => o.pos.y - 120.0,
        None => ground_line / 2.0,
    };
    snap.body.y + snap.velocity > cruise
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.verbose);
    log::info!("Blinky Beak (headless) starting...");

    let storage: SharedStorage = match &args.data_dir {
        Some(dir) => Arc::new(FileStorage::new(dir)),
        None => Arc::new(MemoryStorage::new()),
    };

    let mut settings = SettingsManager::load(storage.clone());
    if let Some(difficulty) = args.difficulty {
        settings.set_difficulty(difficulty);
    }

    let seed = args.seed.unwrap_or_else(|| blinky_beak::now_millis() as u64);
    let mut game = Game::new(
        seed,
        settings.settings(),
        AudioManager::new(Box::new(LogBackend)),
        storage,
    )
    .with_settings_events(settings.subscribe());

    let ground_line = game.params().bounds.ground_line();
    let dt = game.tick_interval();
    game.start_game();

    for _ in 0..args.ticks {
        if autopilot(&game.snapshot(), ground_line) {
            game.flap();
        }
        game.advance(dt);

        for event in game.drain_events() {
            match event {
                GameEvent::Scored { score } => log::debug!("Score {}", score),
                GameEvent::NewBest { best } => log::debug!("New best {}", best),
                GameEvent::Collided { slot } => log::info!("Hit obstacle in slot {}", slot),
                GameEvent::GameOver { score } => log::info!("Game over with {} points", score),
                _ => {}
            }
        }
        if game.snapshot().is_over {
            break;
        }
    }
    game.stop();

    println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    Ok(())
}

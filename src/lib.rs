//! Blinky Beak - a side-scrolling flap-and-dodge game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (integrator, obstacle pool, collisions, phases)
//! - `tuning`: Difficulty-driven physics parameters
//! - `clock`: Fixed-step accumulator the host feeds with elapsed time
//! - `game`: Host-facing facade wiring the simulation to its collaborators
//! - `driver`: Threaded tick driver with a serialized command queue
//! - `audio`, `settings`, `highscores`, `theme`, `persistence`: collaborators

pub mod audio;
pub mod clock;
pub mod driver;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod theme;
pub mod tuning;

pub use game::{Game, Snapshot};
pub use highscores::HighScores;
pub use settings::{Settings, SettingsEvent, SettingsManager};
pub use theme::Theme;
pub use tuning::{Bounds, Difficulty, SimParams};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (time units per tick)
    pub const TICK_INTERVAL: f32 = 0.03;
    /// Maximum catch-up ticks per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default world dimensions
    pub const SCREEN_WIDTH: f32 = 390.0;
    pub const SCREEN_HEIGHT: f32 = 844.0;
    /// Height of the ground band measured up from the bottom edge
    pub const GROUND_HEIGHT: f32 = 300.0;

    /// Body defaults
    pub const BODY_SIZE: f32 = 50.0;
    /// Body spawns this far above the bottom edge
    pub const BODY_SPAWN_FROM_BOTTOM: f32 = 550.0;

    /// Physics defaults (per tick, not per second)
    pub const GRAVITY: f32 = 2.5;
    pub const FLAP_IMPULSE: f32 = 20.0;
    pub const BOUNCE_DAMPING: f32 = 0.5;
    pub const SETTLE_THRESHOLD: f32 = 1.0;

    /// Obstacle pool
    pub const POOL_SIZE: usize = 3;
    /// Obstacles are recycled once their x drops below -RECYCLE_MARGIN
    pub const RECYCLE_MARGIN: f32 = 50.0;
    /// Recycled obstacles reappear this far past the right edge
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Hitbox is the visual footprint shrunk by this much on each axis
    pub const OBSTACLE_INSET: f32 = 20.0;
    /// Vertical band for low hazards
    pub const LOW_HAZARD_MIN_Y: f32 = 100.0;
    pub const LOW_HAZARD_MAX_Y: f32 = 500.0;
    /// Tall hazards sit this far above the ground line
    pub const TALL_HAZARD_LIFT: f32 = 45.0;

    /// Undrained host events kept before the oldest are dropped
    pub const MAX_PENDING_EVENTS: usize = 256;
}

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_millis() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (speeds and gravity are per tick)
//! - Seeded RNG only
//! - Stable iteration order (pool slot order)
//! - No rendering, audio, storage or platform dependencies

pub mod body;
pub mod collision;
pub mod field;
pub mod pool;
pub mod state;
pub mod tick;

pub use body::Contact;
pub use collision::{Rect, body_rect, first_hit, obstacle_hitbox};
pub use field::ScrollField;
pub use pool::ObstaclePool;
pub use state::{Body, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind};
pub use tick::{abandon_run, flap, start_run, tick};

//! Data-driven game balance
//!
//! Physics parameters are derived from the selected difficulty once per run.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Horizontal speed shared by obstacles and the ground (units per tick)
    pub fn scroll_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 3.0,
            Difficulty::Medium => 6.0,
            Difficulty::Hard => 9.0,
        }
    }
}

/// World extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    /// Height of the ground band, measured up from the bottom edge
    pub ground_height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            ground_height: GROUND_HEIGHT,
        }
    }
}

impl Bounds {
    /// Y coordinate of the ground line (y grows downward)
    #[inline]
    pub fn ground_line(&self) -> f32 {
        self.height - self.ground_height
    }
}

/// Physics parameters for one run. Immutable once the run starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimParams {
    pub gravity: f32,
    pub flap_impulse: f32,
    /// Obstacle speed, units per tick
    pub obstacle_speed: f32,
    /// Ground scroll speed, units per tick
    pub field_speed: f32,
    /// Fraction of velocity kept on a ground bounce (0 < d < 1)
    pub bounce_damping: f32,
    pub settle_threshold: f32,
    pub bounds: Bounds,
}

impl SimParams {
    pub fn for_difficulty(difficulty: Difficulty, bounds: Bounds) -> Self {
        let speed = difficulty.scroll_speed();
        let params = Self {
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            obstacle_speed: speed,
            field_speed: speed,
            bounce_damping: BOUNCE_DAMPING,
            settle_threshold: SETTLE_THRESHOLD,
            bounds,
        };
        debug_assert!(params.is_valid(), "invalid params: {params:?}");
        params
    }

    /// All values finite and damping strictly inside (0, 1)
    pub fn is_valid(&self) -> bool {
        [
            self.gravity,
            self.flap_impulse,
            self.obstacle_speed,
            self.field_speed,
            self.settle_threshold,
            self.bounds.width,
            self.bounds.height,
            self.bounds.ground_height,
        ]
        .iter()
        .all(|v| v.is_finite())
            && self.bounce_damping > 0.0
            && self.bounce_damping < 1.0
    }
}

impl Default for SimParams {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::default(), Bounds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_round_trip_names() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("MED"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_speeds_scale_with_difficulty() {
        let bounds = Bounds::default();
        let easy = SimParams::for_difficulty(Difficulty::Easy, bounds);
        let medium = SimParams::for_difficulty(Difficulty::Medium, bounds);
        let hard = SimParams::for_difficulty(Difficulty::Hard, bounds);

        assert_eq!(easy.obstacle_speed, 3.0);
        assert_eq!(medium.obstacle_speed, 6.0);
        assert_eq!(hard.obstacle_speed, 9.0);
        // Ground and obstacles stay visually in sync
        for p in [easy, medium, hard] {
            assert_eq!(p.obstacle_speed, p.field_speed);
            assert_eq!(p.gravity, 2.5);
            assert_eq!(p.flap_impulse, 20.0);
            assert!(p.is_valid());
        }
    }

    #[test]
    fn test_ground_line() {
        let bounds = Bounds::default();
        assert_eq!(bounds.ground_line(), 544.0);
    }
}

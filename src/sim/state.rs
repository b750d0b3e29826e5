//! Game state and core simulation types
//!
//! Everything a run mutates lives here; the presentation layer only reads it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::field::ScrollField;
use super::pool::ObstaclePool;
use crate::consts::*;
use crate::tuning::Bounds;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start; everything frozen
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Hit something; tumbling to the ground, obstacles frozen
    CollidedFalling,
    /// Run ended
    GameOver,
}

impl GamePhase {
    pub fn is_started(&self) -> bool {
        *self != GamePhase::Idle
    }

    pub fn is_over(&self) -> bool {
        *self == GamePhase::GameOver
    }

    /// A run is in progress (the clock should be ticking)
    pub fn is_active(&self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::CollidedFalling)
    }
}

/// Things that happened during a tick, drained by the host for feedback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Flapped,
    /// An obstacle was recycled; carries the new score
    Scored { score: u32 },
    /// Score passed the previous best
    NewBest { best: u32 },
    /// Body hit an obstacle
    Collided { slot: usize },
    /// Body bounced on the ground with the given upward speed
    Bounced { velocity: f32 },
    GameOver { score: u32 },
}

/// The player-controlled body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner of the collision box; x never changes during a run
    pub pos: Vec2,
    /// Vertical velocity (positive is downward)
    pub vel: f32,
    pub size: Vec2,
}

impl Body {
    /// Body at its spawn point for the given world
    pub fn spawn(bounds: &Bounds) -> Self {
        Self {
            pos: Vec2::new(bounds.width / 2.0, bounds.height - BODY_SPAWN_FROM_BOTTOM),
            vel: 0.0,
            size: Vec2::splat(BODY_SIZE),
        }
    }

    /// Is the body at or below the ground line
    #[inline]
    pub fn on_ground(&self, ground_line: f32) -> bool {
        self.pos.y >= ground_line
    }
}

/// Obstacle kinds. The simulation only cares about sizes and placement;
/// what they look like is up to the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Floating hazard placed anywhere in a safe vertical band
    Low,
    /// Ground hazard pinned just above the ground line
    Tall,
}

impl ObstacleKind {
    /// Displayed footprint
    pub fn visual_size(&self) -> Vec2 {
        match self {
            ObstacleKind::Low => Vec2::new(60.0, 60.0),
            ObstacleKind::Tall => Vec2::new(60.0, 80.0),
        }
    }

    /// Collision box size (visual footprint minus the inset on each axis)
    pub fn hitbox_size(&self) -> Vec2 {
        self.visual_size() - Vec2::splat(OBSTACLE_INSET)
    }
}

/// An obstacle slot in the pool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner of the visual footprint
    pub pos: Vec2,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn new(x: f32, y: f32, kind: ObstacleKind) -> Self {
        Self {
            pos: Vec2::new(x, y),
            kind,
        }
    }
}

/// Complete run state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub body: Body,
    pub obstacles: ObstaclePool,
    pub field: ScrollField,
    /// Score for the current run
    pub score: u32,
    /// Best score ever recorded (never decreases)
    pub best_score: u32,
    /// Flips on every accepted flap so observers can edge-trigger feedback
    pub flap_toggle: bool,
    /// Ticks since the run started
    pub time_ticks: u64,
    /// Pending events for the host
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game state with the given seed
    pub fn new(seed: u64, bounds: &Bounds) -> Self {
        Self {
            phase: GamePhase::Idle,
            body: Body::spawn(bounds),
            obstacles: ObstaclePool::new(seed, bounds),
            field: ScrollField::default(),
            score: 0,
            best_score: 0,
            flap_toggle: false,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Bump the score by one recycle, tracking the best
    pub fn add_point(&mut self) {
        self.score += 1;
        self.events.push(GameEvent::Scored { score: self.score });
        if self.score > self.best_score {
            self.best_score = self.score;
            self.events.push(GameEvent::NewBest {
                best: self.best_score,
            });
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_spawn_position() {
        let bounds = Bounds::default();
        let body = Body::spawn(&bounds);
        assert_eq!(body.pos, Vec2::new(195.0, 294.0));
        assert_eq!(body.vel, 0.0);
        assert!(!body.on_ground(bounds.ground_line()));
    }

    #[test]
    fn test_hitbox_smaller_than_visual() {
        for kind in [ObstacleKind::Low, ObstacleKind::Tall] {
            let visual = kind.visual_size();
            let hitbox = kind.hitbox_size();
            assert_eq!(visual - hitbox, Vec2::splat(20.0));
        }
        assert_eq!(ObstacleKind::Tall.hitbox_size(), Vec2::new(40.0, 60.0));
    }

    #[test]
    fn test_add_point_tracks_best() {
        let mut state = GameState::new(1, &Bounds::default());
        state.best_score = 2;

        state.add_point();
        state.add_point();
        assert_eq!(state.best_score, 2);
        assert!(
            !state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::NewBest { .. }))
        );

        state.add_point();
        assert_eq!(state.score, 3);
        assert_eq!(state.best_score, 3);
        assert_eq!(state.drain_events().last(), Some(&GameEvent::NewBest { best: 3 }));
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_phase_flags() {
        assert!(!GamePhase::Idle.is_started());
        assert!(GamePhase::Playing.is_active());
        assert!(GamePhase::CollidedFalling.is_active());
        assert!(GamePhase::GameOver.is_over());
        assert!(GamePhase::GameOver.is_started());
        assert!(!GamePhase::GameOver.is_active());
    }
}

//! Visual themes
//!
//! A theme maps once to a descriptor of asset keys. Nothing here affects
//! physics; the simulation only ever sees [`ObstacleKind`].

use serde::{Deserialize, Serialize};

use crate::sim::ObstacleKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Earth,
    OuterSpace,
}

/// Asset keys the presentation layer needs for a theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeDescriptor {
    pub display_name: &'static str,
    pub body_sprite: &'static str,
    /// Drawn around the body (e.g. a space bubble)
    pub body_overlay: Option<&'static str>,
    pub low_obstacle_sprite: &'static str,
    pub tall_obstacle_sprite: &'static str,
    pub ground_asset: &'static str,
    pub ground_idle_animation: &'static str,
    pub ground_active_animation: &'static str,
}

impl ThemeDescriptor {
    pub fn obstacle_sprite(&self, kind: ObstacleKind) -> &'static str {
        match kind {
            ObstacleKind::Low => self.low_obstacle_sprite,
            ObstacleKind::Tall => self.tall_obstacle_sprite,
        }
    }

    /// Ground animation for the current run state
    pub fn ground_animation(&self, started: bool) -> &'static str {
        if started {
            self.ground_active_animation
        } else {
            self.ground_idle_animation
        }
    }
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Earth => "Earth",
            Theme::OuterSpace => "OuterSpace",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace([' ', '_'], "").as_str() {
            "earth" => Some(Theme::Earth),
            "outerspace" | "space" => Some(Theme::OuterSpace),
            _ => None,
        }
    }

    pub fn descriptor(&self) -> ThemeDescriptor {
        match self {
            Theme::Earth => ThemeDescriptor {
                display_name: "Earth",
                body_sprite: "flying_bird",
                body_overlay: None,
                low_obstacle_sprite: "cloud",
                tall_obstacle_sprite: "tree",
                ground_asset: "ground-6",
                ground_idle_animation: "Idle",
                ground_active_animation: "fly",
            },
            Theme::OuterSpace => ThemeDescriptor {
                display_name: "Outer Space",
                body_sprite: "flying_bird",
                body_overlay: Some("bubble"),
                low_obstacle_sprite: "asteroid",
                tall_obstacle_sprite: "antenna",
                ground_asset: "ground-6",
                ground_idle_animation: "Idle",
                ground_active_animation: "fly",
            },
        }
    }
}

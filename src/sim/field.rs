//! Scrolling ground offset
//!
//! Cosmetic only: the presentation layer tiles the ground at this offset.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollField {
    /// Horizontal offset in (-width, 0]
    pub offset: f32,
}

impl ScrollField {
    /// Scroll left by one tick of `speed`, wrapping after a full screen width
    pub fn advance(&mut self, speed: f32, width: f32) {
        self.offset -= speed;
        if self.offset <= -width {
            self.offset = 0.0;
        }
    }

    pub fn reset(&mut self) {
        self.offset = 0.0;
    }
}

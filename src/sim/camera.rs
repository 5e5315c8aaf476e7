//! Vertical follow camera
//!
//! `target_y` is written only by player physics and traversal; the camera
//! just eases toward it.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_CAMERA_Y, VIEWPORT_HEIGHT};

/// World height shown at the bottom edge of the viewport
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Camera {
    pub y: f32,
    pub target_y: f32,
}

impl Camera {
    /// Clamp a camera offset into the world
    #[inline]
    pub fn clamp_y(y: f32) -> f32 {
        y.clamp(0.0, MAX_CAMERA_Y)
    }

    pub fn set_target(&mut self, target: f32) {
        self.target_y = Self::clamp_y(target);
    }

    /// One exponential smoothing step
    pub fn update(&mut self, smoothing: f32) {
        self.y += (self.target_y - self.y) * smoothing;
        self.y = Self::clamp_y(self.y);
    }

    /// World height to screen y (down from viewport top)
    #[inline]
    pub fn world_to_screen_y(&self, world_y: f32) -> f32 {
        VIEWPORT_HEIGHT - (world_y - self.y)
    }

    /// Screen y (down from viewport top) to world height
    #[inline]
    pub fn screen_to_world_y(&self, screen_y: f32) -> f32 {
        self.y + VIEWPORT_HEIGHT - screen_y
    }
}

//! Orb Climb - A vertical zone-climbing arcade game
//!
//! Core modules:
//! - `sim`: Simulation (world generation, traversal, physics, session control)
//! - `tuning`: Data-driven game balance
//! - `web`: Thin wasm adapter over the simulation (wasm32 only)

pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Logical viewport dimensions (world X spans the viewport width)
    pub const VIEWPORT_WIDTH: f32 = 480.0;
    pub const VIEWPORT_HEIGHT: f32 = 700.0;

    /// Total world height, floor at y = 0
    pub const WORLD_HEIGHT: f32 = 7000.0;
    /// Number of stacked zones
    pub const ZONE_COUNT: usize = 5;
    pub const ZONE_HEIGHT: f32 = WORLD_HEIGHT / ZONE_COUNT as f32;

    /// Player box
    pub const PLAYER_WIDTH: f32 = 22.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    /// Extra margin between the player box and a side wall
    pub const WALL_STANDOFF: f32 = 2.0;

    /// Orb radius (collision and wall contact)
    pub const ORB_RADIUS: f32 = 7.0;

    /// Highest camera offset
    pub const MAX_CAMERA_Y: f32 = WORLD_HEIGHT - VIEWPORT_HEIGHT;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate two packed `0xRRGGBB` colors channel by channel
pub fn lerp_color(c1: u32, c2: u32, t: f32) -> [u8; 3] {
    let channel = |c: u32, shift: u32| ((c >> shift) & 0xff) as f32;
    let mix = |shift: u32| lerp(channel(c1, shift), channel(c2, shift), t).round() as u8;
    [mix(16), mix(8), mix(0)]
}

/// Format elapsed milliseconds as `HH:MM:SS`
pub fn format_elapsed(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1000;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

//! Read-only per-frame view handed to the presentation layer

use serde::Serialize;

use super::state::{
    GamePhase, GameState, Orb, Particle, Platform, Player, Snowflake, Star, WindStreak,
};
use super::zone::Zone;
use crate::consts::VIEWPORT_HEIGHT;
use crate::format_elapsed;

/// HUD zone readout
#[derive(Debug, Clone, Serialize)]
pub struct ZoneView {
    pub index: usize,
    pub name: &'static str,
    pub color: &'static str,
}

impl From<Zone> for ZoneView {
    fn from(zone: Zone) -> Self {
        Self {
            index: zone.index(),
            name: zone.name(),
            color: zone.label_color(),
        }
    }
}

/// Everything needed to draw one frame, borrowed from the session
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub practice: bool,
    pub zone: ZoneView,
    /// Player height over world height, in `[0, 1]`
    pub progress: f32,
    /// Run time so far, absent in practice
    pub elapsed_ms: Option<u64>,
    pub elapsed: Option<String>,
    pub final_time: Option<&'a str>,
    pub camera_y: f32,
    /// Background colors at the top and bottom edges of the viewport
    pub background: [[u8; 3]; 2],
    pub wind_strength: f32,
    pub player: &'a Player,
    pub orb: Option<&'a Orb>,
    pub platforms: &'a [Platform],
    pub particles: &'a [Particle],
    pub wind_streaks: &'a [WindStreak],
    pub stars: &'a [Star],
    pub snowflakes: &'a [Snowflake],
}

impl<'a> Snapshot<'a> {
    pub fn new(state: &'a GameState, elapsed_ms: Option<u64>, final_time: Option<&'a str>) -> Self {
        Self {
            phase: state.phase,
            practice: state.practice,
            zone: state.current_zone().into(),
            progress: state.progress(),
            elapsed_ms,
            elapsed: elapsed_ms.map(format_elapsed),
            final_time,
            camera_y: state.camera.y,
            background: [
                Zone::background_at(state.camera.y + VIEWPORT_HEIGHT),
                Zone::background_at(state.camera.y),
            ],
            wind_strength: state.world.wind_strength,
            player: &state.player,
            orb: state.orb.as_ref(),
            platforms: &state.world.platforms,
            particles: &state.particles,
            wind_streaks: &state.wind_streaks,
            stars: &state.world.stars,
            snowflakes: &state.world.snowflakes,
        }
    }

    /// Progress as a whole percentage
    pub fn progress_percent(&self) -> u32 {
        (self.progress * 100.0).round() as u32
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

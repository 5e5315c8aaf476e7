//! Data-driven game balance
//!
//! Every physics rate and throw parameter lives here so a run can be
//! retuned from JSON without touching the simulation. Geometry (world and
//! viewport size) stays fixed in [`crate::consts`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Gameplay balance values, all in world units per tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Downward acceleration while the player falls
    pub player_gravity: f32,
    /// Feet may sit this far above a platform top and still land
    pub landing_tolerance: f32,
    /// Extra depth below a platform top that still counts as landing
    pub landing_slack: f32,

    // === Orb ===
    /// Downward acceleration of a live orb (weaker than the player's)
    pub orb_gravity: f32,
    /// Aims closer than this to the player are ignored
    pub throw_min_distance: f32,
    pub throw_base_speed: f32,
    /// Speed gained per unit of aim distance
    pub throw_speed_per_px: f32,
    pub throw_min_speed: f32,
    pub throw_max_speed: f32,
    /// Spawn distance from the player center along the aim
    pub throw_standoff: f32,
    /// Number of past orb positions kept for the trail
    pub trail_capacity: usize,
    /// Orbs below `-orb_lost_margin` are discarded
    pub orb_lost_margin: f32,

    // === Wind (sky zone) ===
    pub wind_min: f32,
    pub wind_max: f32,
    /// Orb x nudge per tick, as a multiple of wind strength
    pub wind_drift: f32,
    /// Orb vx nudge per tick, as a multiple of wind strength
    pub wind_accel: f32,
    /// Per-tick chance of spawning a wind streak
    pub wind_streak_chance: f64,

    // === Camera ===
    pub camera_smoothing: f32,
    /// Camera target sits this fraction of the viewport below the player
    pub camera_lead: f32,

    // === Effects ===
    pub burst_count: usize,
    /// Oldest burst particles are trimmed past this count
    pub max_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_gravity: 0.42,
            landing_tolerance: 2.0,
            landing_slack: 4.0,

            orb_gravity: 0.20,
            throw_min_distance: 5.0,
            throw_base_speed: 7.0,
            throw_speed_per_px: 0.015,
            throw_min_speed: 7.0,
            throw_max_speed: 13.0,
            throw_standoff: 18.0,
            trail_capacity: 16,
            orb_lost_margin: 200.0,

            wind_min: 0.008,
            wind_max: 0.015,
            wind_drift: 2.0,
            wind_accel: 0.05,
            wind_streak_chance: 0.6,

            camera_smoothing: 0.09,
            camera_lead: 0.35,

            burst_count: 22,
            max_particles: 512,
        }
    }
}

/// Failure to load a tuning file
#[derive(Debug)]
pub enum TuningError {
    /// The JSON could not be parsed
    Parse(serde_json::Error),
    /// A value is out of its allowed range
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning parse error: {e}"),
            TuningError::Invalid(what) => write!(f, "invalid tuning: {what}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check ranges the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let rates = [
            self.player_gravity,
            self.landing_tolerance,
            self.landing_slack,
            self.orb_gravity,
            self.throw_min_distance,
            self.throw_base_speed,
            self.throw_speed_per_px,
            self.throw_min_speed,
            self.throw_max_speed,
            self.throw_standoff,
            self.orb_lost_margin,
            self.wind_min,
            self.wind_max,
            self.wind_drift,
            self.wind_accel,
            self.camera_smoothing,
            self.camera_lead,
        ];
        if rates.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(TuningError::Invalid("rates must be finite and non-negative"));
        }
        if self.throw_min_speed > self.throw_max_speed {
            return Err(TuningError::Invalid("throw_min_speed exceeds throw_max_speed"));
        }
        if self.wind_min > self.wind_max {
            return Err(TuningError::Invalid("wind_min exceeds wind_max"));
        }
        if self.player_gravity == 0.0 {
            return Err(TuningError::Invalid("player_gravity must be positive"));
        }
        if self.camera_smoothing > 1.0 {
            return Err(TuningError::Invalid("camera_smoothing must be at most 1"));
        }
        if !(0.0..=1.0).contains(&self.wind_streak_chance) {
            return Err(TuningError::Invalid("wind_streak_chance must be a probability"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_gravity": 0.5, "trail_capacity": 8 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.player_gravity, 0.5);
        assert_eq!(tuning.trail_capacity, 8);
        assert_eq!(tuning.orb_gravity, Tuning::default().orb_gravity);
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let err = Tuning::from_json(r#"{ "throw_min_speed": 20.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }
}

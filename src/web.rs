//! Browser adapter
//!
//! Exposes a [`Session`] to JavaScript. The page owns the canvas and the
//! animation loop: it forwards clicks and menu buttons, calls `tick` once per
//! frame and draws from `snapshot_json`. Pending events should be drained
//! with `eventsJson` each frame; past a fixed cap the oldest are dropped.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::sim::{Clock, Session};
use crate::tuning::Tuning;

/// Wall-clock milliseconds from `Date.now()`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsClock;

impl Clock for JsClock {
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    // A second init from a hot reload is harmless
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Orb Climb starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session<JsClock>,
}

#[wasm_bindgen]
impl WebGame {
    /// New game on the menu; a seed of 0 draws one from the clock
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64) -> WebGame {
        Self::build(seed, Tuning::default())
    }

    /// New game with balance values from a JSON document
    #[wasm_bindgen(js_name = withTuning)]
    pub fn with_tuning(seed: f64, json: &str) -> Result<WebGame, JsValue> {
        let tuning = Tuning::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: f64, tuning: Tuning) -> WebGame {
        let seed = if seed > 0.0 {
            seed as u64
        } else {
            js_sys::Date::now() as u64
        };
        WebGame {
            session: Session::new(seed, tuning, JsClock),
        }
    }

    pub fn start(&mut self) {
        self.session.start();
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    /// Practice from zone `index` (0 = Abyss); returns whether the player
    /// was moved there
    pub fn practice(&mut self, index: u32) -> bool {
        self.session.practice_zone_index(index as usize)
    }

    pub fn menu(&mut self) {
        self.session.return_to_menu();
    }

    /// Throw toward a point in viewport coordinates
    #[wasm_bindgen(js_name = throwAt)]
    pub fn throw_at(&mut self, x: f32, y: f32) -> bool {
        self.session.aim_and_throw(Vec2::new(x, y))
    }

    pub fn tick(&mut self) {
        self.session.tick();
    }

    /// Pending events as a JSON array, cleared on read
    #[wasm_bindgen(js_name = eventsJson)]
    pub fn events_json(&mut self) -> Result<String, JsValue> {
        let events = self.session.drain_events();
        serde_json::to_string(&events).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Current frame as JSON
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.session
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

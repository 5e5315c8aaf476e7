//! Session control: start, restart, practice, menu and the win timer
//!
//! Wraps a [`GameState`] with the clock that times a run. Every transition
//! away from playing stops the stopwatch, and every new run stops it before
//! zeroing it.

use glam::Vec2;

use super::clock::{Clock, Stopwatch};
use super::snapshot::Snapshot;
use super::state::{GameEvent, GamePhase, GameState};
use super::tick::{TickInput, throw_orb, tick};
use super::zone::Zone;
use crate::format_elapsed;
use crate::tuning::Tuning;

/// One player's run, from menu to goal
#[derive(Debug)]
pub struct Session<C: Clock> {
    state: GameState,
    clock: C,
    timer: Stopwatch,
    /// Formatted run time, set on a non-practice win
    final_time: Option<String>,
}

impl<C: Clock> Session<C> {
    /// New session on the menu with a world already laid out
    pub fn new(seed: u64, tuning: Tuning, clock: C) -> Self {
        log::info!("Session created with seed {seed}");
        Self {
            state: GameState::new(seed, tuning),
            clock,
            timer: Stopwatch::default(),
            final_time: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for adapters and tests that stage scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_practice(&self) -> bool {
        self.state.practice
    }

    pub fn final_time(&self) -> Option<&str> {
        self.final_time.as_deref()
    }

    /// Timed run time so far; `None` in practice
    pub fn elapsed_ms(&self) -> Option<u64> {
        if self.state.practice {
            None
        } else {
            Some(self.timer.elapsed_ms(self.clock.now_ms()))
        }
    }

    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    fn stop_timer(&mut self) {
        self.timer.stop(self.clock.now_ms());
    }

    fn restart_timer(&mut self) {
        self.stop_timer();
        self.timer.reset();
        self.timer.start(self.clock.now_ms());
    }

    /// Lay out a fresh world and begin playing
    fn begin_run(&mut self) {
        self.state.regenerate();
        self.state.events.clear();
        self.state.time_ticks = 0;
        self.state.phase = GamePhase::Playing;
        self.final_time = None;
    }

    /// Start a timed run
    pub fn start(&mut self) {
        self.begin_run();
        self.state.practice = false;
        self.restart_timer();
        log::info!("Run started");
    }

    /// Replay in the current mode on a new world
    pub fn restart(&mut self) {
        self.stop_timer();
        self.timer.reset();
        self.begin_run();
        if !self.state.practice {
            self.timer.start(self.clock.now_ms());
        }
        log::info!("Run restarted (practice: {})", self.state.practice);
    }

    /// Untimed run beginning on the first platform of `zone`
    ///
    /// Returns whether the player was moved; a zone without platforms
    /// leaves the player on the spawn.
    pub fn practice_zone(&mut self, zone: Zone) -> bool {
        self.stop_timer();
        self.begin_run();
        self.state.practice = true;

        let moved = self.state.enter_zone(zone);
        if !moved {
            log::warn!("No platforms in {}, practicing from spawn", zone.name());
        }
        log::info!("Practice started in {}", zone.name());
        moved
    }

    /// Practice by zone index; out-of-range indexes are ignored
    pub fn practice_zone_index(&mut self, index: usize) -> bool {
        match Zone::from_index(index) {
            Some(zone) => self.practice_zone(zone),
            None => false,
        }
    }

    /// Leave the run for the menu
    pub fn return_to_menu(&mut self) {
        self.stop_timer();
        self.state.phase = GamePhase::Start;
        self.state.orb = None;
        self.state.particles.clear();
        self.state.wind_streaks.clear();
        log::info!("Returned to menu");
    }

    /// Throw toward a viewport-space aim point; silently ignored when not
    /// allowed
    pub fn aim_and_throw(&mut self, aim: Vec2) -> bool {
        throw_orb(&mut self.state, aim)
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        self.tick_with(&TickInput::default());
    }

    /// Advance one frame with input
    pub fn tick_with(&mut self, input: &TickInput) {
        let was_playing = self.state.phase == GamePhase::Playing;
        tick(&mut self.state, input);
        if was_playing && self.state.phase == GamePhase::Win {
            self.on_win();
        }
    }

    fn on_win(&mut self) {
        self.stop_timer();
        if !self.state.practice {
            let elapsed = self.timer.elapsed_ms(self.clock.now_ms());
            let formatted = format_elapsed(elapsed);
            log::info!("Run finished in {formatted}");
            self.final_time = Some(formatted);
        }
    }

    /// Take pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// Read-only view for drawing
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(&self.state, self.elapsed_ms(), self.final_time())
    }
}

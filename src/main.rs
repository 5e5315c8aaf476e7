//! Orb Climb entry point
//!
//! Native builds run a headless autopilot over the simulation and report the
//! result; the browser build is driven through `orb_climb::web`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use orb_climb::Tuning;
    use orb_climb::sim::{GameEvent, GamePhase, GameState, ManualClock, Session};

    /// Simulated frame length
    const FRAME_MS: u64 = 16;
    const DEFAULT_FRAMES: u64 = 60 * 60 * 5;
    /// Aim this far above the top of the chosen platform
    const AIM_LIFT: f32 = 60.0;

    fn load_tuning() -> Tuning {
        let Some(path) = std::env::args().nth(1) else {
            return Tuning::default();
        };
        let loaded = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
        match loaded {
            Ok(tuning) => {
                log::info!("Loaded tuning from {path}");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {path}: {e}");
                Tuning::default()
            }
        }
    }

    fn env_u64(name: &str) -> Option<u64> {
        std::env::var(name).ok().and_then(|v| v.parse().ok())
    }

    /// Screen-space aim at the lowest platform clearly above the player
    fn pick_aim(state: &GameState) -> Option<Vec2> {
        let player = &state.player;
        let target = state
            .world
            .platforms
            .iter()
            .filter(|p| p.top() > player.y + 40.0)
            .min_by(|a, b| a.top().total_cmp(&b.top()))?;
        let world = Vec2::new(target.center_x(), target.top() + AIM_LIFT);
        Some(Vec2::new(world.x, state.camera.world_to_screen_y(world.y)))
    }

    fn is_teleport(event: &GameEvent) -> bool {
        matches!(
            event,
            GameEvent::Teleported { .. } | GameEvent::WallTeleported { .. }
        )
    }

    pub fn run() {
        env_logger::init();
        log::info!("Orb Climb (headless) starting...");

        let seed = env_u64("ORB_CLIMB_SEED").unwrap_or_else(rand::random);
        let frames = env_u64("ORB_CLIMB_FRAMES").unwrap_or(DEFAULT_FRAMES);
        let clock = ManualClock::new();
        let mut session = Session::new(seed, load_tuning(), clock.clone());
        session.start();

        let mut throws = 0u32;
        let mut teleports = 0u32;
        for frame in 0..frames {
            let state = session.state();
            if state.orb.is_none()
                && !state.player.falling
                && let Some(aim) = pick_aim(state)
                && session.aim_and_throw(aim)
            {
                throws += 1;
            }

            session.tick();
            clock.advance(FRAME_MS);

            let events = session.drain_events();
            teleports += events.iter().filter(|e| is_teleport(e)).count() as u32;

            if frame % 600 == 0 {
                let snap = session.snapshot();
                log::info!(
                    "frame {frame}: {} {}%",
                    snap.zone.name,
                    snap.progress_percent()
                );
            }
            if session.phase() == GamePhase::Win {
                break;
            }
        }

        let snap = session.snapshot();
        println!("seed:      {seed}");
        println!("phase:     {:?}", snap.phase);
        println!("zone:      {}", snap.zone.name);
        println!("progress:  {}%", snap.progress_percent());
        println!("throws:    {throws}");
        println!("teleports: {teleports}");
        match (snap.final_time, snap.elapsed.as_deref()) {
            (Some(final_time), _) => println!("time:      {final_time}"),
            (None, Some(elapsed)) => println!("elapsed:   {elapsed}"),
            (None, None) => {}
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is orb_climb::web, this is just to satisfy the compiler
}

//! Cosmetic entities: burst particles, snowfall and sky wind streaks
//!
//! None of these feed back into gameplay.

use glam::Vec2;

use super::random::{chance, range};
use super::state::{GameState, Particle, Snowflake, WindStreak};
use super::zone::Zone;
use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

/// Burst particles are dropped once faded below this
const PARTICLE_MIN_ALPHA: f32 = 0.03;
/// Weak pull on burst particles
const PARTICLE_GRAVITY: f32 = 0.08;
const PARTICLE_FADE: f32 = 0.022;
const PARTICLE_SHRINK: f32 = 0.97;

const STREAK_MIN_ALPHA: f32 = 0.02;
const STREAK_FADE: f32 = 0.98;
/// Streaks live within this far past either wall
const STREAK_MARGIN: f32 = 100.0;

/// Advance and cull burst particles
pub fn update_particles(particles: &mut Vec<Particle>) {
    particles.retain(|p| p.alpha > PARTICLE_MIN_ALPHA);
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.vel.y -= PARTICLE_GRAVITY;
        p.alpha -= PARTICLE_FADE;
        p.radius *= PARTICLE_SHRINK;
    }
}

/// Drift snowflakes, looping them through the sky band and across the walls
pub fn update_snowflakes(snowflakes: &mut [Snowflake]) {
    let sky = Zone::Sky;
    for flake in snowflakes.iter_mut() {
        flake.pos += flake.vel;
        if flake.pos.y < sky.bottom() {
            flake.pos.y = sky.top();
        }
        if flake.pos.x < 0.0 {
            flake.pos.x = VIEWPORT_WIDTH;
        }
        if flake.pos.x > VIEWPORT_WIDTH {
            flake.pos.x = 0.0;
        }
    }
}

/// Whether the sky band is in play: player or orb inside it, or the camera
/// looking at it
pub fn sky_in_view(state: &GameState) -> bool {
    let sky = Zone::Sky;
    let player_in_sky = sky.contains(state.player.y);
    let orb_in_sky = state.orb.as_ref().is_some_and(|orb| sky.contains(orb.pos.y));
    let cam = state.camera.y;
    let camera_on_sky = cam >= sky.bottom() - VIEWPORT_HEIGHT / 2.0 && cam < sky.top();
    player_in_sky || orb_in_sky || camera_on_sky
}

/// Spawn, move and cull wind streaks
pub fn update_wind_streaks(state: &mut GameState) {
    if sky_in_view(state) && chance(&mut state.rng, state.tuning.wind_streak_chance) {
        let rng = &mut state.rng;
        let x = range(rng, -STREAK_MARGIN / 2.0, VIEWPORT_WIDTH + STREAK_MARGIN / 2.0);
        let y = state.camera.y + range(rng, 0.0, VIEWPORT_HEIGHT);
        let streak = WindStreak {
            pos: Vec2::new(x, y),
            vel: Vec2::new(-range(rng, 1.5, 3.0), range(rng, -0.5, 0.5)),
            alpha: range(rng, 0.1, 0.3),
            length: range(rng, 8.0, 16.0),
        };
        state.wind_streaks.push(streak);
    }

    state.wind_streaks.retain_mut(|s| {
        s.pos += s.vel;
        s.alpha *= STREAK_FADE;
        s.alpha > STREAK_MIN_ALPHA
            && s.pos.x > -STREAK_MARGIN
            && s.pos.x < VIEWPORT_WIDTH + STREAK_MARGIN
    });
}

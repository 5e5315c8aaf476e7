//! Per-frame simulation tick
//!
//! Runs orb, player, effects and camera in that fixed order. Also hosts the
//! throw intent and teleport resolution, the only code that removes the orb
//! on impact and moves the player onto it.

use glam::Vec2;

use super::ambient::{update_particles, update_snowflakes, update_wind_streaks};
use super::collision::{Side, first_platform_hit};
use super::state::{BurstKind, GameEvent, GamePhase, GameState, Orb, Wall};
use super::zone::Zone;
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Aim point in viewport space (world x, screen y down from the top)
    pub throw_at: Option<Vec2>,
}

/// Advance the game state by one frame
///
/// Does nothing unless the session is playing.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if let Some(aim) = input.throw_at {
        throw_orb(state, aim);
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    update_orb(state);
    update_player(state);
    update_particles(&mut state.particles);
    update_snowflakes(&mut state.world.snowflakes);
    update_wind_streaks(state);
    state.camera.update(state.tuning.camera_smoothing);
}

/// Throw an orb toward a viewport-space aim point
///
/// Ignored unless playing with the player at rest and no orb in flight, or
/// when the aim is too close to the player. Returns whether an orb spawned.
pub fn throw_orb(state: &mut GameState, aim: Vec2) -> bool {
    if state.phase != GamePhase::Playing || state.orb.is_some() || state.player.falling {
        return false;
    }

    let origin = state.player.center();
    let target = Vec2::new(aim.x, state.camera.screen_to_world_y(aim.y));
    let delta = target - origin;
    let dist = delta.length();
    if dist < state.tuning.throw_min_distance || dist == 0.0 {
        return false;
    }

    let t = &state.tuning;
    let dir = delta / dist;
    let speed = (t.throw_base_speed + dist * t.throw_speed_per_px)
        .clamp(t.throw_min_speed, t.throw_max_speed);
    let pos = origin + dir * t.throw_standoff;
    let vel = dir * speed;

    state.orb = Some(Orb::new(pos, vel, t.trail_capacity));
    state.emit(GameEvent::Thrown { pos, vel });
    log::debug!("Orb thrown from {pos} at {vel}");
    true
}

/// Where an orb update ended up
enum OrbOutcome {
    Flying,
    Wall(Wall),
    Platform(usize, Side),
    Lost,
}

/// Move the orb one step and resolve any contact
pub fn update_orb(state: &mut GameState) {
    let wind = state.world.wind_strength;
    let t = &state.tuning;
    let platforms = &state.world.platforms;
    let Some(orb) = state.orb.as_mut() else {
        return;
    };

    orb.record_trail(t.trail_capacity);

    orb.vel.y -= t.orb_gravity;
    orb.pos += orb.vel;

    // Sky wind pushes the orb every tick it stays in the band
    if Zone::Sky.contains(orb.pos.y) {
        orb.pos.x += wind * t.wind_drift;
        orb.vel.x += wind * t.wind_accel;
    }

    let outcome = if orb.pos.x < orb.radius {
        OrbOutcome::Wall(Wall::Left)
    } else if orb.pos.x > VIEWPORT_WIDTH - orb.radius {
        OrbOutcome::Wall(Wall::Right)
    } else if orb.pos.y < -t.orb_lost_margin {
        OrbOutcome::Lost
    } else if let Some((index, side)) = first_platform_hit(orb.pos, orb.radius, platforms) {
        OrbOutcome::Platform(index, side)
    } else {
        OrbOutcome::Flying
    };

    let impact = orb.pos;
    match outcome {
        OrbOutcome::Flying => {}
        OrbOutcome::Wall(wall) => wall_teleport(state, wall, impact),
        OrbOutcome::Platform(index, side) => platform_teleport(state, index, side, impact),
        OrbOutcome::Lost => {
            state.orb = None;
            state.emit(GameEvent::OrbLost);
            log::debug!("Orb lost below the world");
        }
    }
}

/// Relocate the player onto the orb's impact point on a platform face
pub fn platform_teleport(state: &mut GameState, index: usize, side: Side, impact: Vec2) {
    let x = impact.x.clamp(state.player.min_x(), state.player.max_x());
    relocate_player(state, impact, Vec2::new(x, impact.y));
    state.emit(GameEvent::Teleported {
        platform: index,
        side,
        pos: Vec2::new(x, impact.y),
    });
    let Some(platform) = state.world.platforms.get(index) else {
        return;
    };
    log::debug!(
        "Teleported to {} platform {index} ({side:?}) at ({x:.1}, {:.1})",
        platform.terrain.name(),
        impact.y
    );

    if platform.is_goal && side == Side::Top {
        win(state);
    }
}

/// Relocate the player against a side wall at the orb's height
pub fn wall_teleport(state: &mut GameState, wall: Wall, impact: Vec2) {
    let x = match wall {
        Wall::Left => state.player.min_x(),
        Wall::Right => state.player.max_x(),
    };
    relocate_player(state, impact, Vec2::new(x, impact.y));
    state.emit(GameEvent::WallTeleported {
        wall,
        pos: Vec2::new(x, impact.y),
    });
    log::debug!("Wall teleport ({wall:?}) at height {:.1}", impact.y);
}

/// Shared teleport side effects: consume the orb, move the player and start
/// the fall that lets ordinary landing catch it
fn relocate_player(state: &mut GameState, impact: Vec2, to: Vec2) {
    state.spawn_burst(impact, BurstKind::Impact);
    state.orb = None;

    let player = &mut state.player;
    player.x = to.x;
    player.y = to.y;
    player.vy = 0.0;
    player.falling = true;

    let arrival = Vec2::new(player.x, player.y + player.height / 2.0);
    state.spawn_burst(arrival, BurstKind::Arrival);
    state.retarget_camera();
}

/// Integrate a falling player and check for landing
pub fn update_player(state: &mut GameState) {
    if !state.player.falling {
        return;
    }

    let t = &state.tuning;
    let player = &mut state.player;
    player.vy -= t.player_gravity;
    player.y += player.vy;

    let landed_on = state.world.platforms.iter().position(|p| {
        let top = p.top();
        player.y <= top + t.landing_tolerance
            && player.y >= top - player.vy.abs() - t.landing_slack
            && player.overlaps_x(p)
            && player.vy <= 0.0
    });

    if let Some(index) = landed_on {
        let platform = &state.world.platforms[index];
        let goal = platform.is_goal;
        player.y = platform.top();
        player.vy = 0.0;
        player.falling = false;

        let feet = Vec2::new(player.x, player.y);
        state.spawn_burst(feet, BurstKind::Landing);
        state.emit(GameEvent::Landed { platform: index, goal });
        log::debug!("Landed on platform {index} at height {:.1}", feet.y);
        if goal {
            win(state);
        }
    } else if player.y <= 0.0 {
        // Floor failsafe, not a loss
        player.y = 0.0;
        player.vy = 0.0;
        player.falling = false;
        state.emit(GameEvent::Floored);
    }

    state.retarget_camera();
}

/// Enter the win phase
fn win(state: &mut GameState) {
    if state.phase == GamePhase::Win {
        return;
    }
    state.phase = GamePhase::Win;
    state.emit(GameEvent::Won);
    log::info!("Goal reached after {} ticks", state.time_ticks);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Platform, Terrain};
    use crate::tuning::Tuning;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default());
        state.phase = GamePhase::Playing;
        state
    }

    /// x 200..300, top at 1018
    fn ledge() -> Platform {
        Platform::new(200.0, 1000.0, 100.0, 18.0, Zone::Abyss, Terrain::AbyssRock, 1)
    }

    /// Screen-space point `dx`, `dy_up` away from the player's center
    fn aim_from_player(state: &GameState, dx: f32, dy_up: f32) -> Vec2 {
        let c = state.player.center();
        Vec2::new(c.x + dx, state.camera.world_to_screen_y(c.y + dy_up))
    }

    #[test]
    fn test_throw_up_right() {
        let mut state = playing(1);
        let aim = aim_from_player(&state, 150.0, 300.0);
        assert!(throw_orb(&mut state, aim));
        let orb = state.orb.as_ref().expect("orb spawned");
        assert!(orb.vel.x > 0.0 && orb.vel.y > 0.0);
        assert!(orb.trail.is_empty());
        let speed = orb.vel.length();
        assert!((7.0..=13.0).contains(&speed));
        let standoff = orb.pos.distance(state.player.center());
        assert!((standoff - 18.0).abs() < 1e-3);
    }

    #[test]
    fn test_horizontal_throw_clears_own_platform() {
        let mut state = playing(2);
        let aim = aim_from_player(&state, 150.0, 0.0);
        assert!(throw_orb(&mut state, aim));
        let spawn = state.orb.as_ref().map(|o| o.pos).expect("orb spawned");
        assert_eq!(spawn.y, state.player.center().y);

        update_orb(&mut state);
        assert!(state.orb.is_some());
        assert!(!state.player.falling);
    }

    #[test]
    fn test_throw_speed_clamped() {
        let mut state = playing(1);
        let aim = aim_from_player(&state, 0.0, 6.0);
        assert!(throw_orb(&mut state, aim));
        assert!((state.orb.as_ref().unwrap().vel.length() - 7.09).abs() < 1e-3);

        let mut state = playing(1);
        let aim = aim_from_player(&state, 0.0, 650.0);
        assert!(throw_orb(&mut state, aim));
        assert!((state.orb.as_ref().unwrap().vel.length() - 13.0).abs() < 1e-3);
    }

    #[test]
    fn test_throw_rejections() {
        let mut state = playing(1);
        // Too close
        let aim = aim_from_player(&state, 2.0, 2.0);
        assert!(!throw_orb(&mut state, aim));
        assert!(state.orb.is_none());

        // Orb already live
        let aim = aim_from_player(&state, 50.0, 200.0);
        assert!(throw_orb(&mut state, aim));
        let before = state.orb.clone().map(|o| o.vel);
        let aim = aim_from_player(&state, -50.0, 200.0);
        assert!(!throw_orb(&mut state, aim));
        assert_eq!(state.orb.map(|o| o.vel), before);

        // Falling
        let mut state = playing(1);
        state.player.falling = true;
        let aim = aim_from_player(&state, 50.0, 200.0);
        assert!(!throw_orb(&mut state, aim));

        // Not playing
        let mut state = playing(1);
        state.phase = GamePhase::Start;
        let aim = aim_from_player(&state, 50.0, 200.0);
        assert!(!throw_orb(&mut state, aim));
    }

    #[test]
    fn test_orb_trail_and_gravity() {
        let mut state = playing(2);
        state.world.platforms.clear();
        state.orb = Some(Orb::new(Vec2::new(240.0, 500.0), Vec2::new(1.0, 5.0), 16));
        update_orb(&mut state);
        let orb = state.orb.as_ref().expect("still flying");
        assert_eq!(orb.trail.len(), 1);
        assert_eq!(orb.trail[0], Vec2::new(240.0, 500.0));
        assert!((orb.vel.y - 4.8).abs() < 1e-5);
        assert!((orb.pos.y - 504.8).abs() < 1e-3);

        for _ in 0..40 {
            update_orb(&mut state);
        }
        assert_eq!(state.orb.as_ref().map(|o| o.trail.len()), Some(16));
    }

    #[test]
    fn test_wind_only_in_sky() {
        let mut state = playing(3);
        state.world.platforms.clear();
        state.world.wind_strength = -0.01;

        let sky_y = Zone::Sky.bottom() + 300.0;
        state.orb = Some(Orb::new(Vec2::new(240.0, sky_y), Vec2::new(0.0, 0.2), 16));
        update_orb(&mut state);
        let orb = state.orb.as_ref().unwrap();
        assert!((orb.pos.x - (240.0 - 0.02)).abs() < 1e-4);
        assert!((orb.vel.x - (-0.0005)).abs() < 1e-6);

        let ground_y = Zone::Surface.bottom() + 300.0;
        state.orb = Some(Orb::new(Vec2::new(240.0, ground_y), Vec2::new(0.0, 0.2), 16));
        update_orb(&mut state);
        let orb = state.orb.as_ref().unwrap();
        assert_eq!(orb.pos.x, 240.0);
        assert_eq!(orb.vel.x, 0.0);
    }

    #[test]
    fn test_wall_wrap_left() {
        let mut state = playing(4);
        state.orb = Some(Orb::new(Vec2::new(0.5, 3000.0), Vec2::new(-1.0, 0.2), 16));
        update_orb(&mut state);
        assert!(state.orb.is_none());
        assert_eq!(state.player.x, PLAYER_WIDTH / 2.0 + 2.0);
        assert!((state.player.y - 3000.0).abs() < 1e-3);
        assert!(state.player.falling);
        assert_eq!(state.player.vy, 0.0);
    }

    #[test]
    fn test_wall_wrap_right() {
        let mut state = playing(4);
        let pos = Vec2::new(VIEWPORT_WIDTH - 0.5, 3000.0);
        state.orb = Some(Orb::new(pos, Vec2::new(1.0, 0.2), 16));
        update_orb(&mut state);
        assert!(state.orb.is_none());
        assert_eq!(state.player.x, VIEWPORT_WIDTH - PLAYER_WIDTH / 2.0 - 2.0);
        assert!(state.player.falling);
    }

    #[test]
    fn test_wall_teleport_direct() {
        let mut state = playing(4);
        wall_teleport(&mut state, Wall::Left, Vec2::new(-0.5, 2000.0));
        assert_eq!(state.player.x, 13.0);
        wall_teleport(&mut state, Wall::Right, Vec2::new(VIEWPORT_WIDTH + 0.5, 2000.0));
        assert_eq!(state.player.x, VIEWPORT_WIDTH - 13.0);
        assert!(state.orb.is_none());
        assert!(state.player.falling);
    }

    #[test]
    fn test_orb_lost_below_world() {
        let mut state = playing(5);
        state.world.platforms.clear();
        let before = state.player.clone();
        state.orb = Some(Orb::new(Vec2::new(240.0, -199.0), Vec2::new(0.0, -3.0), 16));
        update_orb(&mut state);
        assert!(state.orb.is_none());
        assert_eq!(state.player.x, before.x);
        assert_eq!(state.player.y, before.y);
        assert!(!state.player.falling);
        assert!(state.events.contains(&GameEvent::OrbLost));
    }

    #[test]
    fn test_teleport_shape_for_every_side() {
        for side in [Side::Top, Side::Bottom, Side::Left, Side::Right] {
            let mut state = playing(6);
            state.orb = Some(Orb::new(Vec2::new(100.0, 800.0), Vec2::ZERO, 16));
            platform_teleport(&mut state, 1, side, Vec2::new(100.0, 800.0));
            assert!(state.orb.is_none());
            assert!(state.player.falling);
            assert_eq!(state.player.vy, 0.0);
            assert_eq!(state.phase, GamePhase::Playing);
            assert_eq!(state.particles.len(), 44);
        }
    }

    #[test]
    fn test_teleport_clamps_x() {
        let mut state = playing(6);
        platform_teleport(&mut state, 1, Side::Left, Vec2::new(3.0, 800.0));
        assert_eq!(state.player.x, 13.0);
    }

    #[test]
    fn test_orb_hits_platform_and_player_lands() {
        let mut state = playing(7);
        state.world.platforms = vec![ledge()];
        state.orb = Some(Orb::new(Vec2::new(250.0, 1030.0), Vec2::new(0.0, -5.0), 16));
        update_orb(&mut state);
        assert!(state.orb.is_none());
        assert!(state.player.falling);
        // Grazing from above reports the underside
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::Teleported { platform: 0, side: Side::Bottom, .. })
        ));

        for _ in 0..10 {
            update_player(&mut state);
        }
        assert!(!state.player.falling);
        assert_eq!(state.player.y, 1018.0);
        let landed = GameEvent::Landed { platform: 0, goal: false };
        assert!(state.events.contains(&landed));
    }

    #[test]
    fn test_goal_top_hit_wins() {
        let mut state = playing(8);
        let goal = state.world.goal_platform().cloned().expect("goal");
        // Pierces the top face: inside the station, nearest the top
        let pos = Vec2::new(goal.center_x(), goal.top() + 1.0);
        state.orb = Some(Orb::new(pos, Vec2::new(0.0, -2.0), 16));
        update_orb(&mut state);
        assert_eq!(state.phase, GamePhase::Win);
        assert!(state.events.contains(&GameEvent::Won));
    }

    #[test]
    fn test_goal_underside_graze_wins() {
        let mut state = playing(8);
        let goal = state.world.goal_platform().cloned().expect("goal");
        let pos = Vec2::new(goal.center_x(), goal.bottom() - 12.0);
        state.orb = Some(Orb::new(pos, Vec2::new(0.0, 6.2), 16));
        update_orb(&mut state);
        assert!(state.orb.is_none());
        let top_hit = |e: &GameEvent| matches!(e, GameEvent::Teleported { side: Side::Top, .. });
        assert!(state.events.iter().any(top_hit));
        assert_eq!(state.phase, GamePhase::Win);
    }

    #[test]
    fn test_goal_graze_from_above_does_not_win() {
        let mut state = playing(8);
        let goal = state.world.goal_platform().cloned().expect("goal");
        let pos = Vec2::new(goal.center_x(), goal.top() + 5.0);
        state.orb = Some(Orb::new(pos, Vec2::new(0.0, -2.0), 16));
        update_orb(&mut state);
        assert!(state.orb.is_none());
        assert!(state.player.falling);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_goal_bottom_hit_does_not_win() {
        let mut state = playing(8);
        let index = state.world.platforms.iter().position(|p| p.is_goal).unwrap();
        platform_teleport(&mut state, index, Side::Bottom, Vec2::new(240.0, 6895.0));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_landing_on_goal_wins() {
        let mut state = playing(9);
        let goal = state.world.goal_platform().cloned().unwrap();
        state.player.x = goal.center_x();
        state.player.y = goal.top() + 1.0;
        state.player.vy = 0.0;
        state.player.falling = true;
        update_player(&mut state);
        assert!(!state.player.falling);
        assert_eq!(state.phase, GamePhase::Win);
    }

    #[test]
    fn test_no_landing_while_rising() {
        let mut state = playing(10);
        state.world.platforms = vec![ledge()];
        state.player.x = 250.0;
        state.player.y = 1017.0;
        state.player.vy = 5.0;
        state.player.falling = true;
        update_player(&mut state);
        assert!(state.player.falling);
    }

    #[test]
    fn test_floor_failsafe() {
        let mut state = playing(11);
        state.world.platforms.clear();
        state.player.y = 1.0;
        state.player.vy = -3.0;
        state.player.falling = true;
        update_player(&mut state);
        assert_eq!(state.player.y, 0.0);
        assert!(!state.player.falling);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_camera_target_follows_fall() {
        let mut state = playing(12);
        state.world.platforms.clear();
        state.player.y = 3000.0;
        state.player.falling = true;
        update_player(&mut state);
        let expected = state.player.y - VIEWPORT_HEIGHT * 0.35;
        assert!((state.camera.target_y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_tick_frozen_outside_playing() {
        let mut state = GameState::new(13, Tuning::default());
        state.orb = Some(Orb::new(Vec2::new(240.0, 500.0), Vec2::new(0.0, 5.0), 16));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.orb.as_ref().map(|o| o.pos), Some(Vec2::new(240.0, 500.0)));
    }

    #[test]
    fn test_tick_input_throws() {
        let mut state = playing(14);
        let aim = aim_from_player(&state, 100.0, 300.0);
        tick(&mut state, &TickInput { throw_at: Some(aim) });
        let orb = state.orb.as_ref().expect("orb");
        assert_eq!(orb.trail.len(), 1);
        assert_eq!(state.time_ticks, 1);
    }
}

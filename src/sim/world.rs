//! Procedural world generation
//!
//! Each call lays out a brand-new world zone by zone, drawing from the
//! session RNG, so successive runs differ while a seeded session stays
//! reproducible.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::random::{chance, range, range_int};
use super::state::{OreKind, Platform, Snowflake, Star, Terrain, World};
use super::zone::Zone;
use crate::consts::*;
use crate::tuning::Tuning;

/// Background stars across the whole world
pub const STAR_COUNT: usize = 350;
/// Snowflakes inside the sky band
pub const SNOWFLAKE_COUNT: usize = 140;

/// Spawn and goal pads share this footprint
const PAD_WIDTH: f32 = 160.0;
const START_Y: f32 = 120.0;
/// Goal station bottom sits this far below the world top
const GOAL_DROP: f32 = 100.0;

/// Ore table; two of seven outcomes are bare stone
const ORE_TABLE: [Option<OreKind>; 7] = [
    Some(OreKind::Coal),
    Some(OreKind::Iron),
    Some(OreKind::Gold),
    Some(OreKind::Diamond),
    Some(OreKind::Emerald),
    None,
    None,
];

/// Generate a complete world
pub fn generate_world<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> World {
    let mut world = World {
        // Sky wind always blows toward -x
        wind_strength: -range(rng, tuning.wind_min, tuning.wind_max),
        ..World::default()
    };

    let mut start = Platform::new(
        VIEWPORT_WIDTH / 2.0 - PAD_WIDTH / 2.0,
        START_Y,
        PAD_WIDTH,
        18.0,
        Zone::Abyss,
        Terrain::AbyssRock,
        rng.random(),
    );
    start.is_start = true;
    world.platforms.push(start);

    generate_abyss(rng, &mut world.platforms);
    generate_underground(rng, &mut world.platforms);
    generate_surface(rng, &mut world.platforms);
    generate_sky(rng, &mut world.platforms);
    generate_space(rng, &mut world.platforms);

    let mut goal = Platform::new(
        VIEWPORT_WIDTH / 2.0 - PAD_WIDTH / 2.0,
        WORLD_HEIGHT - GOAL_DROP,
        PAD_WIDTH,
        22.0,
        Zone::Space,
        Terrain::Station,
        0,
    );
    goal.is_goal = true;
    world.platforms.push(goal);

    world.stars = (0..STAR_COUNT)
        .map(|_| Star {
            pos: Vec2::new(range(rng, 0.0, VIEWPORT_WIDTH), range(rng, 0.0, WORLD_HEIGHT)),
            radius: range(rng, 0.4, 2.0),
            alpha: range(rng, 0.3, 1.0),
            phase: range(rng, 0.0, TAU),
        })
        .collect();

    world.snowflakes = (0..SNOWFLAKE_COUNT)
        .map(|_| Snowflake {
            pos: Vec2::new(
                range(rng, 0.0, VIEWPORT_WIDTH),
                range(rng, Zone::Sky.bottom(), Zone::Sky.top()),
            ),
            vel: Vec2::new(range(rng, -0.4, 0.4), -range(rng, 0.4, 1.2)),
            radius: range(rng, 0.8, 2.8),
            alpha: range(rng, 0.3, 0.85),
        })
        .collect();

    log::info!(
        "Generated world: {} platforms, wind {:.4}",
        world.platforms.len(),
        world.wind_strength
    );

    world
}

/// Heights at which a zone's main platforms sit
///
/// Starts `first` above the zone bottom and steps by `gap` until `last`
/// below the zone top. The gap range has a positive minimum, so the walk
/// always terminates.
fn rows<R: Rng + ?Sized>(
    rng: &mut R,
    zone: Zone,
    first: f32,
    last: f32,
    gap: (f32, f32),
) -> Vec<f32> {
    debug_assert!(gap.0 > 0.0);
    let mut ys = Vec::new();
    let mut y = first;
    while y < zone.top() - last {
        ys.push(y);
        y += range(rng, gap.0, gap.1);
    }
    ys
}

/// Random width and an x that keeps the platform `margin` inside both walls
fn span<R: Rng + ?Sized>(rng: &mut R, width: (f32, f32), margin: f32) -> (f32, f32) {
    let w = range(rng, width.0, width.1);
    let x = range(rng, margin, VIEWPORT_WIDTH - w - margin);
    (x, w)
}

/// Keep a platform of `height` fully inside the zone band
fn clamp_into(zone: Zone, y: f32, height: f32) -> f32 {
    y.clamp(zone.bottom(), zone.top() - height)
}

fn generate_abyss<R: Rng + ?Sized>(rng: &mut R, platforms: &mut Vec<Platform>) {
    let zone = Zone::Abyss;
    for y in rows(rng, zone, 220.0, 40.0, (100.0, 150.0)) {
        let (x, w) = span(rng, (60.0, 120.0), 18.0);
        platforms.push(Platform::new(x, y, w, 14.0, zone, Terrain::AbyssRock, rng.random()));

        if chance(rng, 0.25) {
            let cw = range(rng, 35.0, 60.0);
            let cx = x + range(rng, -70.0, w + 40.0);
            let cy = clamp_into(zone, y + range(rng, -20.0, 20.0), 30.0);
            if cx > 10.0 && cx + cw < VIEWPORT_WIDTH {
                let crystal = Terrain::AbyssCrystal;
                platforms.push(Platform::new(cx, cy, cw, 30.0, zone, crystal, rng.random()));
            }
        }
    }
}

fn generate_underground<R: Rng + ?Sized>(rng: &mut R, platforms: &mut Vec<Platform>) {
    let zone = Zone::Underground;
    let first = zone.bottom() + 60.0;
    for y in rows(rng, zone, first, 40.0, (95.0, 145.0)) {
        let (x, w) = span(rng, (70.0, 135.0), 15.0);
        let ore = ORE_TABLE[range_int(rng, 0, ORE_TABLE.len() as i32 - 1) as usize];
        platforms.push(Platform::new(x, y, w, 18.0, zone, Terrain::Stone { ore }, rng.random()));

        if chance(rng, 0.25) {
            let (ex, ew) = span(rng, (40.0, 65.0), 15.0);
            let ey = clamp_into(zone, y + range(rng, -30.0, 30.0), 14.0);
            let bare = Terrain::Stone { ore: None };
            platforms.push(Platform::new(ex, ey, ew, 14.0, zone, bare, rng.random()));
        }
    }
}

fn generate_surface<R: Rng + ?Sized>(rng: &mut R, platforms: &mut Vec<Platform>) {
    let zone = Zone::Surface;
    let first = zone.bottom() + 60.0;
    for y in rows(rng, zone, first, 40.0, (95.0, 140.0)) {
        let (x, w) = span(rng, (75.0, 150.0), 15.0);
        let trees = if chance(rng, 0.55) { range_int(rng, 1, 2) as u8 } else { 0 };
        platforms.push(Platform::new(x, y, w, 18.0, zone, Terrain::Grass { trees }, rng.random()));
    }
}

fn generate_sky<R: Rng + ?Sized>(rng: &mut R, platforms: &mut Vec<Platform>) {
    let zone = Zone::Sky;
    let first = zone.bottom() + 60.0;
    for y in rows(rng, zone, first, 40.0, (100.0, 150.0)) {
        let (x, w) = span(rng, (65.0, 150.0), 15.0);
        let (terrain, h) = if chance(rng, 0.60) {
            (Terrain::Cloud { phase: range(rng, 0.0, TAU) }, 22.0)
        } else {
            (Terrain::MountainLedge, 15.0)
        };
        platforms.push(Platform::new(x, y, w, h, zone, terrain, rng.random()));
    }
}

fn generate_space<R: Rng + ?Sized>(rng: &mut R, platforms: &mut Vec<Platform>) {
    let zone = Zone::Space;
    let first = zone.bottom() + 60.0;
    // Stop well short of the top to leave room for the station
    for y in rows(rng, zone, first, 160.0, (100.0, 145.0)) {
        let (x, w) = span(rng, (50.0, 100.0), 15.0);
        platforms.push(Platform::new(x, y, w, 14.0, zone, Terrain::Asteroid, rng.random()));
    }
}

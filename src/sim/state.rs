//! Game state and core simulation types
//!
//! Everything one run needs lives in [`GameState`]; the world layout inside
//! it is replaced wholesale on every new session.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::collision::Side;
use super::random::{SeedRng, range};
use super::world::generate_world;
use super::zone::Zone;
use crate::consts::*;
use crate::tuning::Tuning;

/// Undrained events beyond this are dropped oldest first
pub const MAX_PENDING_EVENTS: usize = 256;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title/menu, simulation frozen
    Start,
    /// Active climbing
    Playing,
    /// Goal reached
    Win,
}

/// Ore embedded in underground stone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OreKind {
    Coal,
    Iron,
    Gold,
    Diamond,
    Emerald,
}

/// Terrain variant with its decoration payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Terrain {
    AbyssRock,
    AbyssCrystal,
    Stone { ore: Option<OreKind> },
    Grass { trees: u8 },
    /// Idle bob phase in radians
    Cloud { phase: f32 },
    MountainLedge,
    Asteroid,
    Station,
}

impl Terrain {
    pub fn name(&self) -> &'static str {
        match self {
            Terrain::AbyssRock => "abyss_rock",
            Terrain::AbyssCrystal => "abyss_crystal",
            Terrain::Stone { .. } => "stone",
            Terrain::Grass { .. } => "grass",
            Terrain::Cloud { .. } => "cloud",
            Terrain::MountainLedge => "mountain_ledge",
            Terrain::Asteroid => "asteroid",
            Terrain::Station => "station",
        }
    }
}

/// A static axis-aligned platform; `y` is its bottom edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub zone: Zone,
    pub terrain: Terrain,
    /// Per-instance variation seed
    pub seed: u32,
    #[serde(default)]
    pub is_start: bool,
    #[serde(default)]
    pub is_goal: bool,
}

impl Platform {
    pub fn new(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        zone: Zone,
        terrain: Terrain,
        seed: u32,
    ) -> Self {
        Self {
            x,
            y,
            width,
            height,
            zone,
            terrain,
            seed,
            is_start: false,
            is_goal: false,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Radial jitter for `n` outline points, stable per platform
    pub fn outline_radii(&self, n: usize) -> Vec<f32> {
        let mut sr = SeedRng::new(self.seed);
        let base = self.width * 0.45;
        (0..n).map(|_| base * (0.75 + sr.next_f32() * 0.45)).collect()
    }
}

/// The player; `x` is the horizontal center and `y` the feet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Vertical velocity, positive = up
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub falling: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: VIEWPORT_WIDTH / 2.0,
            y: 0.0,
            vy: 0.0,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            falling: false,
        }
    }
}

impl Player {
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    /// Body center (throw origin)
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y + self.height / 2.0)
    }

    /// Leftmost allowed center x
    pub fn min_x(&self) -> f32 {
        self.half_width() + WALL_STANDOFF
    }

    /// Rightmost allowed center x
    pub fn max_x(&self) -> f32 {
        VIEWPORT_WIDTH - self.half_width() - WALL_STANDOFF
    }

    /// Stand on top of a platform, at rest
    pub fn stand_on(&mut self, platform: &Platform) {
        self.x = platform.center_x();
        self.y = platform.top();
        self.vy = 0.0;
        self.falling = false;
    }

    /// Horizontal overlap with a platform (strict)
    pub fn overlaps_x(&self, platform: &Platform) -> bool {
        let hw = self.half_width();
        self.x - hw < platform.right() && self.x + hw > platform.left()
    }
}

/// The thrown projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orb {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Past positions, oldest first
    pub trail: VecDeque<Vec2>,
}

impl Orb {
    pub fn new(pos: Vec2, vel: Vec2, trail_capacity: usize) -> Self {
        Self {
            pos,
            vel,
            radius: ORB_RADIUS,
            trail: VecDeque::with_capacity(trail_capacity + 1),
        }
    }

    /// Record current position to the trail, dropping the oldest past `capacity`
    pub fn record_trail(&mut self, capacity: usize) {
        self.trail.push_back(self.pos);
        while self.trail.len() > capacity {
            self.trail.pop_front();
        }
    }
}

/// Background star (twinkle is presentation-side)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
    pub phase: f32,
}

/// Snowflake looping through the sky band
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snowflake {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

/// Short wind streak crossing the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindStreak {
    pub pos: Vec2,
    pub vel: Vec2,
    pub alpha: f32,
    pub length: f32,
}

/// What spawned a burst; decides its color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurstKind {
    /// Orb impact point
    Impact,
    /// Player arrival after a teleport
    Arrival,
    /// Player landing on a platform
    Landing,
}

impl BurstKind {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            BurstKind::Impact => [80, 255, 140],
            BurstKind::Arrival => [140, 200, 255],
            BurstKind::Landing => [160, 200, 255],
        }
    }
}

/// A burst particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub alpha: f32,
    pub kind: BurstKind,
}

/// Which side wall an orb touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
}

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Thrown { pos: Vec2, vel: Vec2 },
    /// Player relocated onto a platform face (index in generation order)
    Teleported { platform: usize, side: Side, pos: Vec2 },
    WallTeleported { wall: Wall, pos: Vec2 },
    /// Orb fell out of the world without hitting anything
    OrbLost,
    Landed { platform: usize, goal: bool },
    /// Player reached the world floor without landing
    Floored,
    Won,
}

/// Static layout plus ambient decoration for one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    /// Platforms in generation order (collision tie-break order)
    pub platforms: Vec<Platform>,
    pub stars: Vec<Star>,
    pub snowflakes: Vec<Snowflake>,
    /// Horizontal wind in the sky band (negative = blowing left)
    pub wind_strength: f32,
}

impl World {
    pub fn start_platform(&self) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.is_start)
    }

    pub fn goal_platform(&self) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.is_goal)
    }

    /// First platform generated in `zone`
    pub fn first_in_zone(&self, zone: Zone) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.zone == zone)
    }
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub practice: bool,
    pub world: World,
    pub player: Player,
    /// At most one live orb
    pub orb: Option<Orb>,
    pub camera: Camera,
    pub particles: Vec<Particle>,
    pub wind_streaks: Vec<WindStreak>,
    pub tuning: Tuning,
    /// Simulation ticks while playing
    pub time_ticks: u64,
    /// Pending notifications
    pub events: Vec<GameEvent>,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
}

impl GameState {
    /// Create a state with a freshly generated world, player on the spawn
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            phase: GamePhase::Start,
            practice: false,
            world: World::default(),
            player: Player::default(),
            orb: None,
            camera: Camera::default(),
            particles: Vec::new(),
            wind_streaks: Vec::new(),
            tuning,
            time_ticks: 0,
            events: Vec::new(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.regenerate();
        state
    }

    /// Replace the world with a new layout and reset everything on it
    pub fn regenerate(&mut self) {
        self.world = generate_world(&mut self.rng, &self.tuning);
        self.reset_player();
    }

    /// Put the player back on the spawn and clear transient entities
    pub fn reset_player(&mut self) {
        self.player = Player::default();
        if let Some(start) = self.world.start_platform() {
            self.player.stand_on(start);
        }
        self.camera = Camera::default();
        self.orb = None;
        self.particles.clear();
        self.wind_streaks.clear();
    }

    /// Aim the camera below the player by the configured lead
    pub fn retarget_camera(&mut self) {
        let target = self.player.y - VIEWPORT_HEIGHT * self.tuning.camera_lead;
        self.camera.set_target(target);
    }

    /// Stand the player on the first platform of `zone`
    ///
    /// Returns false, leaving the player where it is, when the zone has no
    /// platforms.
    pub fn enter_zone(&mut self, zone: Zone) -> bool {
        let Some(platform) = self.world.first_in_zone(zone).cloned() else {
            return false;
        };
        self.player.stand_on(&platform);
        self.retarget_camera();
        true
    }

    pub fn current_zone(&self) -> Zone {
        Zone::at_height(self.player.y)
    }

    /// Height progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        (self.player.y / WORLD_HEIGHT).clamp(0.0, 1.0)
    }

    /// Queue an event for the presentation layer
    pub fn emit(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            let excess = self.events.len() + 1 - MAX_PENDING_EVENTS;
            self.events.drain(..excess);
        }
        self.events.push(event);
    }

    /// Spawn a ring of burst particles at `pos`
    pub fn spawn_burst(&mut self, pos: Vec2, kind: BurstKind) {
        for _ in 0..self.tuning.burst_count {
            let angle = range(&mut self.rng, 0.0, std::f32::consts::TAU);
            let speed = range(&mut self.rng, 0.8, 5.3);
            let radius = range(&mut self.rng, 0.8, 4.0);
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                radius,
                alpha: 0.9,
                kind,
            });
        }
        let max = self.tuning.max_particles;
        if self.particles.len() > max {
            let excess = self.particles.len() - max;
            self.particles.drain(..excess);
        }
    }
}

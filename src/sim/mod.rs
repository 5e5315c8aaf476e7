//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - One tick per display frame, fixed per-tick rates
//! - Seeded RNG only
//! - Platforms kept in generation order (collision tie-break order)

pub mod ambient;
pub mod camera;
pub mod clock;
pub mod collision;
pub mod random;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod world;
pub mod zone;

pub use camera::Camera;
pub use clock::{Clock, ManualClock, Stopwatch};
pub use collision::{Side, circle_box_hit, orb_platform_hit};
pub use session::Session;
pub use snapshot::{Snapshot, ZoneView};
pub use state::{
    BurstKind, GameEvent, GamePhase, GameState, OreKind, Orb, Particle, Platform, Player, Terrain,
    Wall, World,
};
pub use tick::{TickInput, throw_orb, tick};
pub use world::generate_world;
pub use zone::Zone;

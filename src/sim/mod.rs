//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time advances only through `tick`
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod background;
pub mod collision;
pub mod motion;
pub mod registry;
pub mod rng;
pub mod score;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Body, CollisionCategory, Contact, ContactKind, ContactTracker, Shape, classify};
pub use motion::Motion;
pub use registry::{EntityRef, MotionReport, Registry};
pub use rng::SimRng;
pub use score::{Outcome, Scoreboard};
pub use spawner::{Spawner, spawn_enemy};
pub use state::{
    BackgroundTile, Enemy, EntityId, EntityKind, GameEvent, GameState, Player, Projectile,
    ScoreLabel,
};
pub use tick::{TickInput, resolve_contact, tick};

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Injected RNG only
//! - Stable iteration order (insertion order, pruned back to front)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Bounded, check_collision, check_collision_lenient};
pub use rng::{RandomSource, SequenceRng, seeded};
pub use state::{
    FieldSize, GameEvent, GamePhase, GameState, Heading, Hostile, MAX_HEALTH, Particle,
    ParticleBurst, Pickup, PickupKind, Player, Projectile,
};
pub use tick::{TickInput, apply_pickup, autofire, tick};

//! Sky Strike - A vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, step)
//! - `platform`: Input mapping and frame timing collaborators
//! - `session`: Session state machine and host-facing surface
//! - `hud`: Score/health display snapshot
//! - `tuning`: Data-driven game balance

pub mod hud;
pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

pub use hud::{HealthTier, HudSnapshot};
pub use session::Session;
pub use sim::{GamePhase, GameState};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta the frame driver will hand to the simulation (ms)
    pub const MAX_FRAME_DT_MS: f32 = 100.0;
    /// Hostile fire timers assume ~60 fps regardless of real frame time (ms)
    pub const HOSTILE_FRAME_MS: f32 = 16.0;

    /// Default field size before the viewport reports one
    pub const DEFAULT_FIELD_WIDTH: f32 = 800.0;
    pub const DEFAULT_FIELD_HEIGHT: f32 = 600.0;

    /// Player craft
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Gap between player spawn position and the field bottom
    pub const PLAYER_SPAWN_MARGIN: f32 = 20.0;
    /// Autofire delay can never be tuned below this (ms)
    pub const FIRE_RATE_FLOOR: f32 = 100.0;
    /// Horizontal offset of each barrel when dual shot is active
    pub const DUAL_SHOT_OFFSET: f32 = 12.0;

    /// Projectiles
    pub const PROJECTILE_WIDTH: f32 = 5.0;
    pub const PROJECTILE_HEIGHT: f32 = 15.0;
    pub const PROJECTILE_SPEED: f32 = 8.0;

    /// Hostiles
    pub const HOSTILE_WIDTH: f32 = 45.0;
    pub const HOSTILE_HEIGHT: f32 = 35.0;
    pub const HOSTILE_MIN_SPEED: f32 = 2.0;
    pub const HOSTILE_SPEED_RANGE: f32 = 2.0;
    pub const HOSTILE_MIN_SHOOT_INTERVAL: f32 = 1500.0;
    pub const HOSTILE_SHOOT_INTERVAL_RANGE: f32 = 1000.0;

    /// Pickups
    pub const PICKUP_SIZE: f32 = 40.0;
    pub const PICKUP_SPEED: f32 = 2.0;
    pub const PICKUP_SPIN: f32 = 0.05;
    pub const PICKUP_PULSE: f32 = 0.1;

    /// Explosion bursts
    pub const BURST_PARTICLES: usize = 15;
    pub const BURST_LIFE_TICKS: u32 = 30;
    pub const BURST_MAX_SPEED: f32 = 5.0;
    pub const BURST_GRAVITY: f32 = 0.2;
}

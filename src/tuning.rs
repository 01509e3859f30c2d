//! Data-driven game balance
//!
//! Loaded from JSON; any field left out falls back to the stock value.

use serde::{Deserialize, Serialize};

use crate::consts::{FIRE_RATE_FLOOR, MAX_FRAME_DT_MS};

/// Balance knobs for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Player movement speed (pixels per millisecond)
    pub player_speed: f32,
    /// Autofire delay at session start (ms)
    pub initial_fire_rate: f32,
    /// Fire rate can never drop below this (ms)
    pub min_fire_rate: f32,
    /// Fire rate reduction per boost pickup (ms)
    pub fire_rate_step: f32,
    /// Fire automatically every `fire_rate` ms while playing
    pub autofire: bool,

    // === Spawning ===
    /// Hostile spawn interval at session start (ms)
    pub spawn_interval_start: f32,
    /// Spawn interval floor (ms)
    pub spawn_interval_min: f32,
    /// Spawn interval decrease per spawned hostile (ms)
    pub spawn_interval_step: f32,
    /// Probability a destroyed hostile drops a pickup
    pub pickup_drop_chance: f32,

    // === Damage / scoring ===
    /// Health lost when a hostile rams the player
    pub contact_damage: f32,
    /// Health lost per hostile projectile
    pub projectile_damage: f32,
    /// Score per hostile shot down
    pub kill_score: u64,
    /// Extra slack on every side when collecting pickups
    pub pickup_margin: f32,

    // === Frame driver ===
    /// Frame deltas above this are clamped (ms)
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 0.45,
            initial_fire_rate: 300.0,
            min_fire_rate: 100.0,
            fire_rate_step: 50.0,
            autofire: true,

            spawn_interval_start: 2000.0,
            spawn_interval_min: 800.0,
            spawn_interval_step: 20.0,
            pickup_drop_chance: 0.6,

            contact_damage: 10.0,
            projectile_damage: 5.0,
            kill_score: 10,
            pickup_margin: 5.0,

            max_frame_dt: MAX_FRAME_DT_MS,
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        log::info!("Loaded tuning overrides");
        Ok(tuning.sanitized())
    }

    /// Pull every knob back into a range the simulation can honor
    pub fn sanitized(mut self) -> Self {
        let before = self.clone();

        self.player_speed = self.player_speed.max(0.0);
        self.min_fire_rate = self.min_fire_rate.max(FIRE_RATE_FLOOR);
        self.initial_fire_rate = self.initial_fire_rate.max(self.min_fire_rate);
        self.fire_rate_step = self.fire_rate_step.max(0.0);

        self.spawn_interval_min = self.spawn_interval_min.max(0.0);
        self.spawn_interval_start = self.spawn_interval_start.max(self.spawn_interval_min);
        self.spawn_interval_step = self.spawn_interval_step.max(0.0);
        self.pickup_drop_chance = self.pickup_drop_chance.clamp(0.0, 1.0);

        self.contact_damage = self.contact_damage.max(0.0);
        self.projectile_damage = self.projectile_damage.max(0.0);
        self.pickup_margin = self.pickup_margin.max(0.0);

        self.max_frame_dt = self.max_frame_dt.max(0.0);

        if self != before {
            log::warn!("Tuning values out of range were clamped");
        }
        self
    }

    /// Export tuning as pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

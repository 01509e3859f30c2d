//! Spawn scheduling
//!
//! Hostiles arrive on a time accumulator whose interval shrinks with every
//! spawn (the difficulty ramp never resets within a run). Destroyed hostiles
//! may leave a pickup behind.

use glam::Vec2;

use super::rng::RandomSource;
use super::state::{FieldSize, GameEvent, GameState, Hostile, Pickup, PickupKind};
use crate::consts::*;

/// Build a hostile just above the top edge at a random column
pub fn spawn_hostile(field: FieldSize, rng: &mut impl RandomSource) -> Hostile {
    let max_x = (field.width - HOSTILE_WIDTH).max(0.0);
    Hostile {
        pos: Vec2::new(rng.next_unit() * max_x, -HOSTILE_HEIGHT),
        width: HOSTILE_WIDTH,
        height: HOSTILE_HEIGHT,
        speed: rng.next_in(HOSTILE_MIN_SPEED, HOSTILE_SPEED_RANGE),
        shoot_accumulator: 0.0,
        shoot_interval: rng.next_in(HOSTILE_MIN_SHOOT_INTERVAL, HOSTILE_SHOOT_INTERVAL_RANGE),
        hue: rng.next_in(300.0, 60.0),
    }
}

/// Gather `dt` toward the next spawn; emits at most one hostile per call
pub fn update_spawner(state: &mut GameState, rng: &mut impl RandomSource, dt: f32) {
    state.spawn_accumulator += dt;
    if state.spawn_accumulator < state.spawn_interval {
        return;
    }

    state.hostiles.push(spawn_hostile(state.field, rng));
    state.spawn_accumulator = 0.0;
    let tuning = &state.tuning;
    let next = (state.spawn_interval - tuning.spawn_interval_step).max(tuning.spawn_interval_min);
    state.spawn_interval = next.min(state.spawn_interval);
    state.events.push(GameEvent::HostileSpawned);
    log::debug!(
        "Hostile spawned ({} on field), next interval {}ms",
        state.hostiles.len(),
        state.spawn_interval
    );
}

/// Roll for a pickup dropped at `at`
pub fn roll_pickup(chance: f32, at: Vec2, rng: &mut impl RandomSource) -> Option<Pickup> {
    if rng.next_unit() >= chance {
        return None;
    }
    let kind = PickupKind::ALL[rng.next_index(PickupKind::ALL.len())];
    // Top-left corner sits on `at`
    Some(Pickup::new(at, kind))
}

/// Drop a pickup where a hostile died, if the roll succeeds
pub fn maybe_drop_pickup(state: &mut GameState, at: Vec2, rng: &mut impl RandomSource) {
    if let Some(pickup) = roll_pickup(state.tuning.pickup_drop_chance, at, rng) {
        log::debug!("Pickup {:?} dropped at ({:.0}, {:.0})", pickup.kind, at.x, at.y);
        state.events.push(GameEvent::PickupDropped { kind: pickup.kind });
        state.pickups.push(pickup);
    }
}

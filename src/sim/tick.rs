//! Simulation step
//!
//! Advances every pool by one frame, resolves collisions, and prunes dead or
//! off-field entities. Pools are walked back to front and only the current
//! index is ever removed, so removal never skips or repeats an element and the
//! survivors keep their insertion order.

use glam::Vec2;

use super::collision::{check_collision, check_collision_lenient};
use super::rng::RandomSource;
use super::spawn::{maybe_drop_pickup, update_spawner};
use super::state::{GameEvent, GameState, Heading, ParticleBurst, PickupKind, Player};
use crate::consts::HOSTILE_FRAME_MS;
use crate::tuning::Tuning;

/// Input sampled once per step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Directional intent, each axis in {-1, 0, 1}; zero means no keys held
    pub intent: Vec2,
    /// Pointer/touch position while pressed
    pub pointer: Option<Vec2>,
}

/// Advance the game state by `dt` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, rng: &mut impl RandomSource, dt: f32) {
    debug_assert!(dt.is_finite() && dt >= 0.0, "frame delta out of range: {dt}");

    if !state.is_playing() {
        return;
    }

    state.events.clear();
    state.last_dt = dt;
    state.time_ticks += 1;
    let field = state.field;

    state.player.steer(input.intent, input.pointer, field, dt);

    update_spawner(state, rng, dt);

    for i in (0..state.projectiles.len()).rev() {
        state.projectiles[i].advance();
        if state.projectiles[i].is_out_of_field(field) {
            state.projectiles.remove(i);
        }
    }

    if advance_hostiles(state, rng) {
        return;
    }

    if resolve_projectiles(state, rng) {
        return;
    }

    for i in (0..state.bursts.len()).rev() {
        state.bursts[i].advance();
        if state.bursts[i].is_dead() {
            state.bursts.remove(i);
        }
    }

    advance_pickups(state, rng);

    log::trace!(
        "tick {}: {} projectiles, {} hostiles, {} pickups",
        state.time_ticks,
        state.projectiles.len(),
        state.hostiles.len(),
        state.pickups.len()
    );
}

/// Fire automatically once `fire_rate` ms have gathered
pub fn autofire(state: &mut GameState, dt: f32) {
    if !state.is_playing() || !state.tuning.autofire {
        return;
    }

    state.autofire_accumulator += dt;
    if state.autofire_accumulator >= state.player.fire_rate {
        state.player.shoot(&mut state.projectiles);
        state.autofire_accumulator = 0.0;
    }
}

/// Apply a collected pickup to the player
pub fn apply_pickup(player: &mut Player, kind: PickupKind, tuning: &Tuning) {
    match kind {
        PickupKind::FireRateBoost => {
            player.upgrade_fire_rate(tuning.fire_rate_step, tuning.min_fire_rate)
        }
        PickupKind::DualShotUnlock => player.enable_dual_shot(),
    }
}

/// Move hostiles, let them fire, and handle ramming. Returns true on game over.
fn advance_hostiles(state: &mut GameState, rng: &mut impl RandomSource) -> bool {
    let field = state.field;
    let contact_damage = state.tuning.contact_damage;

    for i in (0..state.hostiles.len()).rev() {
        if let Some(shot) = state.hostiles[i].advance(HOSTILE_FRAME_MS, rng) {
            state.projectiles.push(shot);
        }

        if check_collision(&state.player, &state.hostiles[i]) {
            let hostile = state.hostiles.remove(i);
            destroy_hostile(state, hostile.center(), false, rng);
            if state.damage_player(contact_damage) {
                return true;
            }
            continue;
        }

        if state.hostiles[i].is_out_of_field(field) {
            state.hostiles.remove(i);
        }
    }
    false
}

/// Projectile hits in both directions. Returns true on game over.
fn resolve_projectiles(state: &mut GameState, rng: &mut impl RandomSource) -> bool {
    let projectile_damage = state.tuning.projectile_damage;

    for i in (0..state.projectiles.len()).rev() {
        match state.projectiles[i].heading {
            Heading::Up => {
                // A projectile takes down at most one hostile
                let hit = (0..state.hostiles.len())
                    .rev()
                    .find(|&j| check_collision(&state.projectiles[i], &state.hostiles[j]));
                if let Some(j) = hit {
                    let hostile = state.hostiles.remove(j);
                    state.projectiles.remove(i);
                    state.score += state.tuning.kill_score;
                    destroy_hostile(state, hostile.center(), true, rng);
                }
            }
            Heading::Down => {
                if check_collision(&state.projectiles[i], &state.player) {
                    state.projectiles.remove(i);
                    if state.damage_player(projectile_damage) {
                        return true;
                    }
                }
            }
        }
    }
    false
}

/// Drift pickups and collect any the player touches (with leniency)
fn advance_pickups(state: &mut GameState, rng: &mut impl RandomSource) {
    let field = state.field;
    let margin = state.tuning.pickup_margin;

    for i in (0..state.pickups.len()).rev() {
        state.pickups[i].advance();

        if check_collision_lenient(&state.pickups[i], &state.player, margin) {
            let pickup = state.pickups.remove(i);
            apply_pickup(&mut state.player, pickup.kind, &state.tuning);
            state.bursts.push(ParticleBurst::new(pickup.center(), rng));
            state.events.push(GameEvent::PickupCollected { kind: pickup.kind });
            log::debug!(
                "Collected {:?} (fire rate {}ms, dual shot {})",
                pickup.kind,
                state.player.fire_rate,
                state.player.dual_shot
            );
        } else if state.pickups[i].is_out_of_field(field) {
            state.pickups.remove(i);
        }
    }
}

/// Explosion plus a possible drop where a hostile died
fn destroy_hostile(
    state: &mut GameState,
    at: Vec2,
    by_projectile: bool,
    rng: &mut impl RandomSource,
) {
    state.bursts.push(ParticleBurst::new(at, rng));
    maybe_drop_pickup(state, at, rng);
    state.events.push(GameEvent::HostileDestroyed { at, by_projectile });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::rng::{SequenceRng, seeded};
    use crate::sim::state::{GamePhase, Hostile, Pickup, Projectile};
    use proptest::prelude::*;

    fn playing_state() -> GameState {
        let mut state = GameState::new(Tuning::default());
        state.begin_session();
        state
    }

    fn hostile_at(x: f32, y: f32) -> Hostile {
        Hostile {
            pos: Vec2::new(x, y),
            width: HOSTILE_WIDTH,
            height: HOSTILE_HEIGHT,
            speed: 2.0,
            shoot_accumulator: 0.0,
            shoot_interval: 2000.0,
            hue: 320.0,
        }
    }

    #[test]
    fn test_menu_step_is_noop() {
        let mut state = GameState::new(Tuning::default());
        let mut rng = SequenceRng::constant(0.5);
        tick(&mut state, &TickInput::default(), &mut rng, 2000.0);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.time_ticks, 0);
        assert!(state.hostiles.is_empty());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_first_spawn_after_interval() {
        let mut state = playing_state();
        let mut rng = SequenceRng::constant(0.5);
        tick(&mut state, &TickInput::default(), &mut rng, 2000.0);

        assert_eq!(state.hostiles.len(), 1);
        assert_eq!(state.spawn_accumulator, 0.0);
        assert_eq!(state.spawn_interval, 1980.0);
        assert_eq!(state.events, vec![GameEvent::HostileSpawned]);
    }

    #[test]
    fn test_hostile_projectile_damage() {
        let mut state = playing_state();
        state.health = 10.0;
        // Lands inside the player (375, 540, 50x40) after moving 8 px
        state.projectiles.push(Projectile::new(400.0, 550.0, Heading::Down));

        tick(&mut state, &TickInput::default(), &mut SequenceRng::constant(0.5), 16.0);

        assert_eq!(state.health, 5.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_ramming_ends_run_and_truncates_step() {
        let mut state = playing_state();
        state.health = 10.0;
        state.hostiles.push(hostile_at(375.0, 540.0));
        state.projectiles.push(Projectile::new(400.0, 550.0, Heading::Down));
        state.pickups.push(Pickup::new(Vec2::new(10.0, 10.0), PickupKind::DualShotUnlock));
        let mut rng = SequenceRng::constant(0.9);
        state.bursts.push(ParticleBurst::new(Vec2::ZERO, &mut rng));

        tick(&mut state, &TickInput::default(), &mut rng, 16.0);

        assert!(state.health <= 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.hostiles.is_empty());
        // Steps 6-8 never ran: the hostile shot still exists, the old burst
        // and the pickup did not move
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.bursts.len(), 2);
        assert_eq!(state.bursts[0].life_ticks, BURST_LIFE_TICKS);
        assert_eq!(state.pickups[0].pos, Vec2::new(10.0, 10.0));
        assert_eq!(state.score, 0);
        assert!(state.events.contains(&GameEvent::GameOver { score: 0 }));
    }

    #[test]
    fn test_ramming_costs_health_not_score() {
        let mut state = playing_state();
        state.hostiles.push(hostile_at(375.0, 540.0));

        tick(&mut state, &TickInput::default(), &mut SequenceRng::constant(0.9), 16.0);

        assert_eq!(state.health, 90.0);
        assert_eq!(state.score, 0);
        assert!(state.hostiles.is_empty());
        assert_eq!(state.bursts.len(), 1);
        assert!(state.pickups.is_empty());
    }

    #[test]
    fn test_ramming_drops_pickup_at_hostile_center() {
        let mut state = playing_state();
        // 542 after the move, so the center is (397.5, 559.5)
        state.hostiles.push(hostile_at(375.0, 540.0));

        let over = advance_hostiles(&mut state, &mut SequenceRng::constant(0.5));

        assert!(!over);
        assert_eq!(state.health, 90.0);
        assert_eq!(state.score, 0);
        assert_eq!(state.pickups.len(), 1);
        assert_eq!(state.pickups[0].pos, Vec2::new(397.5, 559.5));
        assert_eq!(state.pickups[0].kind, PickupKind::DualShotUnlock);
        assert_eq!(state.bursts[0].origin, Vec2::new(397.5, 559.5));
    }

    #[test]
    fn test_ramming_drop_lands_on_player() {
        let mut state = playing_state();
        state.hostiles.push(hostile_at(375.0, 540.0));

        tick(&mut state, &TickInput::default(), &mut SequenceRng::constant(0.5), 16.0);

        // Dropped inside the player, so it is collected in the same step
        assert_eq!(state.health, 90.0);
        assert!(state.pickups.is_empty());
        assert!(state.player.dual_shot);
        assert_eq!(
            state.events,
            vec![
                GameEvent::PickupDropped {
                    kind: PickupKind::DualShotUnlock
                },
                GameEvent::HostileDestroyed {
                    at: Vec2::new(397.5, 559.5),
                    by_projectile: false,
                },
                GameEvent::PickupCollected {
                    kind: PickupKind::DualShotUnlock
                },
            ]
        );
    }

    #[test]
    fn test_projectile_kill_scores_and_drops() {
        let mut state = playing_state();
        state.hostiles.push(hostile_at(200.0, 200.0));
        state.projectiles.push(Projectile::new(222.5, 215.0, Heading::Up));

        tick(&mut state, &TickInput::default(), &mut SequenceRng::constant(0.5), 16.0);

        assert!(state.hostiles.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.score, 10);
        assert_eq!(state.bursts.len(), 1);
        assert_eq!(state.pickups.len(), 1);
        assert_eq!(state.pickups[0].kind, PickupKind::DualShotUnlock);
        assert!(state.events.contains(&GameEvent::HostileDestroyed {
            at: Vec2::new(222.5, 219.5),
            by_projectile: true,
        }));
    }

    #[test]
    fn test_projectile_kill_without_drop() {
        let mut state = playing_state();
        state.hostiles.push(hostile_at(200.0, 200.0));
        state.projectiles.push(Projectile::new(222.5, 215.0, Heading::Up));

        tick(&mut state, &TickInput::default(), &mut SequenceRng::constant(0.9), 16.0);

        assert_eq!(state.score, 10);
        assert_eq!(state.bursts.len(), 1);
        assert!(state.pickups.is_empty());
    }

    #[test]
    fn test_one_projectile_one_kill() {
        let mut state = playing_state();
        let mut first = hostile_at(200.0, 200.0);
        first.hue = 301.0;
        state.hostiles.push(first);
        state.hostiles.push(hostile_at(205.0, 200.0));
        state.projectiles.push(Projectile::new(222.5, 215.0, Heading::Up));

        tick(&mut state, &TickInput::default(), &mut SequenceRng::constant(0.9), 16.0);

        assert_eq!(state.score, 10);
        assert_eq!(state.hostiles.len(), 1);
        // Later hostiles are checked first
        assert_eq!(state.hostiles[0].hue, 301.0);
    }

    #[test]
    fn test_off_field_pruning_keeps_order() {
        let mut state = playing_state();
        for (i, y) in [100.0, 3.0, 200.0, 5.0, 300.0].into_iter().enumerate() {
            state.projectiles.push(Projectile::new(i as f32 * 10.0, y, Heading::Up));
        }

        tick(&mut state, &TickInput::default(), &mut SequenceRng::constant(0.5), 16.0);

        let xs: Vec<f32> = state.projectiles.iter().map(|p| p.pos.x).collect();
        assert_eq!(xs, vec![0.0, 20.0, 40.0]);
    }

    #[test]
    fn test_hostile_leaves_bottom() {
        let mut state = playing_state();
        state.hostiles.push(hostile_at(0.0, 599.0));
        state.hostiles.push(hostile_at(0.0, 500.0));

        tick(&mut state, &TickInput::default(), &mut SequenceRng::constant(0.5), 16.0);

        assert_eq!(state.hostiles.len(), 1);
        assert_eq!(state.hostiles[0].pos.y, 502.0);
    }

    #[test]
    fn test_hostile_fire_joins_pool() {
        let mut state = playing_state();
        let mut hostile = hostile_at(0.0, 100.0);
        hostile.shoot_accumulator = 1990.0;
        state.hostiles.push(hostile);

        tick(&mut state, &TickInput::default(), &mut SequenceRng::constant(0.5), 16.0);

        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].heading, Heading::Down);
        // Fresh shots are not advanced in the step that fired them
        assert_eq!(state.projectiles[0].pos.y, 102.0 + HOSTILE_HEIGHT);
    }

    #[test]
    fn test_pickup_collected_with_margin() {
        let mut state = playing_state();
        // Ends 8 px above the player: only the 5 px margins make them touch
        state.pickups.push(Pickup::new(Vec2::new(375.0, 490.0), PickupKind::FireRateBoost));

        tick(&mut state, &TickInput::default(), &mut SequenceRng::constant(0.5), 16.0);

        assert!(state.pickups.is_empty());
        assert_eq!(state.player.fire_rate, 250.0);
        assert_eq!(state.bursts.len(), 1);
        assert_eq!(state.bursts[0].origin, Vec2::new(395.0, 512.0));
        assert_eq!(
            state.events,
            vec![GameEvent::PickupCollected {
                kind: PickupKind::FireRateBoost
            }]
        );
    }

    #[test]
    fn test_dual_shot_pickup_collected() {
        let mut state = playing_state();
        state.pickups.push(Pickup::new(Vec2::new(375.0, 490.0), PickupKind::DualShotUnlock));

        tick(&mut state, &TickInput::default(), &mut SequenceRng::constant(0.5), 16.0);

        assert!(state.pickups.is_empty());
        assert!(state.player.dual_shot);
        assert_eq!(state.player.fire_rate, 300.0);
        assert_eq!(
            state.events,
            vec![GameEvent::PickupCollected {
                kind: PickupKind::DualShotUnlock
            }]
        );

        state.player.shoot(&mut state.projectiles);
        let xs: Vec<f32> = state.projectiles.iter().map(|p| p.pos.x).collect();
        assert_eq!(xs, vec![388.0, 412.0]);
    }

    #[test]
    fn test_pickup_missed_falls_off() {
        let mut state = playing_state();
        state.pickups.push(Pickup::new(Vec2::new(0.0, 599.0), PickupKind::FireRateBoost));

        tick(&mut state, &TickInput::default(), &mut SequenceRng::constant(0.5), 16.0);

        assert!(state.pickups.is_empty());
        assert_eq!(state.player.fire_rate, 300.0);
    }

    #[test]
    fn test_bursts_expire() {
        let mut state = playing_state();
        let mut rng = SequenceRng::constant(0.5);
        state.bursts.push(ParticleBurst::new(Vec2::ZERO, &mut rng));
        for _ in 0..BURST_LIFE_TICKS {
            tick(&mut state, &TickInput::default(), &mut rng, 1.0);
        }
        assert!(state.bursts.is_empty());
    }

    #[test]
    fn test_player_clamped_after_resize() {
        let mut state = playing_state();
        state.field.width = 200.0;
        state.field.height = 150.0;
        tick(&mut state, &TickInput::default(), &mut SequenceRng::constant(0.5), 16.0);
        assert_eq!(state.player.pos, Vec2::new(150.0, 110.0));
    }

    #[test]
    fn test_autofire_respects_fire_rate() {
        let mut state = playing_state();
        autofire(&mut state, 299.0);
        assert!(state.projectiles.is_empty());
        autofire(&mut state, 1.0);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.autofire_accumulator, 0.0);

        state.player.enable_dual_shot();
        autofire(&mut state, 300.0);
        assert_eq!(state.projectiles.len(), 3);
    }

    #[test]
    fn test_autofire_disabled_or_not_playing() {
        let mut state = GameState::new(Tuning::default());
        autofire(&mut state, 1000.0);
        assert!(state.projectiles.is_empty());

        state.tuning.autofire = false;
        state.begin_session();
        autofire(&mut state, 1000.0);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut state1 = playing_state();
        let mut state2 = playing_state();
        let mut rng1 = seeded(99999);
        let mut rng2 = seeded(99999);

        let inputs = [
            TickInput {
                intent: Vec2::new(1.0, 0.0),
                pointer: None,
            },
            TickInput {
                intent: Vec2::ZERO,
                pointer: Some(Vec2::new(100.0, 400.0)),
            },
            TickInput::default(),
        ];

        for frame in 0..600 {
            let input = &inputs[frame % inputs.len()];
            tick(&mut state1, input, &mut rng1, 16.0);
            autofire(&mut state1, 16.0);
            tick(&mut state2, input, &mut rng2, 16.0);
            autofire(&mut state2, 16.0);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.health, state2.health);
        assert_eq!(state1.hostiles.len(), state2.hostiles.len());
        assert_eq!(state1.player.pos, state2.player.pos);
    }

    fn intent_strategy() -> impl Strategy<Value = Vec2> {
        (-1i8..=1, -1i8..=1).prop_map(|(x, y)| Vec2::new(x as f32, y as f32))
    }

    proptest! {
        #[test]
        fn prop_session_invariants(
            seed in any::<u64>(),
            frames in prop::collection::vec((0.0f32..=100.0, intent_strategy()), 1..600),
        ) {
            let mut state = playing_state();
            let mut rng = seeded(seed);
            let mut fire_rate = state.player.fire_rate;
            let mut dual_shot = state.player.dual_shot;
            let mut interval = state.spawn_interval;

            for (dt, intent) in frames {
                let input = TickInput { intent, pointer: None };
                tick(&mut state, &input, &mut rng, dt);
                autofire(&mut state, dt);

                prop_assert!((0.0..=100.0).contains(&state.health));
                prop_assert!(state.player.fire_rate <= fire_rate);
                prop_assert!(state.player.fire_rate >= 100.0);
                prop_assert!(state.player.dual_shot || !dual_shot);
                prop_assert!(state.spawn_interval >= 800.0);
                let drop = interval - state.spawn_interval;
                prop_assert!(drop == 0.0 || drop == 20.0 || state.spawn_interval == 800.0);

                fire_rate = state.player.fire_rate;
                dual_shot = state.player.dual_shot;
                interval = state.spawn_interval;
            }
        }

        #[test]
        fn prop_pickups_are_monotone(kinds in prop::collection::vec(0usize..2, 0..40)) {
            let tuning = Tuning::default();
            let mut player = Player::new(Default::default(), 0.45, 300.0);
            for k in kinds {
                let before = player.clone();
                apply_pickup(&mut player, PickupKind::ALL[k], &tuning);
                prop_assert!(player.fire_rate <= before.fire_rate);
                prop_assert!(player.fire_rate >= 100.0);
                prop_assert!(player.dual_shot || !before.dual_shot);
            }
        }
    }
}

//! Game session
//!
//! Owns the simulation state, the input collaborator's state, the RNG and the
//! frame clock, and exposes the surface the host wires its events into.
//! Menu -> Playing on start, Playing -> GameOver when health runs out,
//! GameOver -> Playing on restart.

use rand_pcg::Pcg32;

use crate::hud::HudSnapshot;
use crate::platform::{Direction, FrameClock, InputState, KeyAction, key_action};
use crate::sim::{
    FieldSize, GameEvent, GamePhase, GameState, Hostile, ParticleBurst, Pickup, Player, Projectile,
    RandomSource, autofire, seeded, tick,
};
use crate::tuning::Tuning;

/// A game session driven by an external frame source
#[derive(Debug)]
pub struct Session<R = Pcg32> {
    state: GameState,
    input: InputState,
    clock: FrameClock,
    rng: R,
}

impl Session<Pcg32> {
    /// Session at the menu with a seeded PCG generator
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        log::info!("Session created with seed: {}", seed);
        Self::with_rng(tuning, seeded(seed))
    }
}

impl<R: RandomSource> Session<R> {
    /// Session at the menu drawing from `rng`
    pub fn with_rng(tuning: Tuning, rng: R) -> Self {
        let tuning = tuning.sanitized();
        Self {
            clock: FrameClock::new(tuning.max_frame_dt),
            state: GameState::new(tuning),
            input: InputState::default(),
            rng,
        }
    }

    /// Leave the menu and begin a run
    pub fn start_session(&mut self) {
        self.reset();
        log::info!("Session started");
    }

    /// Throw away the current run and begin a fresh one
    pub fn restart_session(&mut self) {
        let previous = self.state.score;
        self.reset();
        log::info!("Session restarted (previous score {})", previous);
    }

    fn reset(&mut self) {
        self.input.reset();
        self.state.begin_session();
    }

    /// Advance the simulation by `dt` milliseconds. No-op unless playing.
    pub fn step(&mut self, dt: f32) {
        let input = self.input.tick_input();
        tick(&mut self.state, &input, &mut self.rng, dt);
    }

    /// One host frame at absolute time `now_ms`: clamped step, then autofire.
    /// Returns the delta that was simulated.
    pub fn frame(&mut self, now_ms: f64) -> f32 {
        let dt = self.clock.advance(now_ms);
        self.step(dt);
        autofire(&mut self.state, dt);
        dt
    }

    /// Manual shot (key or on-screen button)
    pub fn issue_player_shot(&mut self) {
        if self.state.is_playing() {
            self.state.player.shoot(&mut self.state.projectiles);
        }
    }

    pub fn set_directional_intent(&mut self, direction: Direction, active: bool) {
        self.input.set_direction(direction, active);
    }

    pub fn set_pointer_target(&mut self, x: f32, y: f32) {
        self.input.set_pointer_target(x, y);
    }

    pub fn set_pointer_active(&mut self, active: bool) {
        self.input.set_pointer_active(active);
    }

    /// Route a key event through the binding table. Returns true if the key
    /// is bound (so the host can suppress its default action).
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> bool {
        match key_action(key) {
            Some(KeyAction::Move(direction)) => {
                self.set_directional_intent(direction, pressed);
                true
            }
            Some(KeyAction::Shoot) => {
                if pressed {
                    self.issue_player_shot();
                }
                true
            }
            None => false,
        }
    }

    /// Viewport resize; the player is re-clamped on the next step
    pub fn set_field_size(&mut self, width: f32, height: f32) {
        self.state.field = FieldSize { width, height };
    }

    // === Read-only accessors ===

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn health_percent(&self) -> u32 {
        self.state.health_percent()
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.state.projectiles
    }

    pub fn hostiles(&self) -> &[Hostile] {
        &self.state.hostiles
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.state.pickups
    }

    pub fn bursts(&self) -> &[ParticleBurst] {
        &self.state.bursts
    }

    /// Events raised by the last step
    pub fn events(&self) -> &[GameEvent] {
        &self.state.events
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::capture(&self.state)
    }

    /// Mutable state access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

//! Game state and core simulation types
//!
//! Entity records plus the `GameState` that owns every pool. Presentation code
//! reads this between steps and never mutates it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Bounded};
use super::rng::RandomSource;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulates
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Health ran out; holds until restart
    GameOver,
}

/// Playfield dimensions, reported by the viewport and free to change per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSize {
    pub width: f32,
    pub height: f32,
}

impl Default for FieldSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
        }
    }
}

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Pixels per millisecond
    pub speed: f32,
    /// Milliseconds between autofire shots (only ever decreases)
    pub fire_rate: f32,
    /// Twin barrels (one-way upgrade)
    pub dual_shot: bool,
}

impl Player {
    /// Spawn centered near the bottom of the field
    pub fn new(field: FieldSize, speed: f32, fire_rate: f32) -> Self {
        Self {
            pos: Vec2::new(
                field.width / 2.0 - PLAYER_WIDTH / 2.0,
                field.height - PLAYER_HEIGHT - PLAYER_SPAWN_MARGIN,
            ),
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed,
            fire_rate,
            dual_shot: false,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    /// Move for one frame.
    ///
    /// A non-zero `intent` (unnormalized directional keys) wins; otherwise the
    /// craft chases `pointer` (centering itself on it) without overshooting.
    /// The whole craft is kept inside `field` afterwards.
    pub fn steer(&mut self, intent: Vec2, pointer: Option<Vec2>, field: FieldSize, dt: f32) {
        let step = self.speed * dt;

        if intent != Vec2::ZERO {
            self.pos += intent.normalize() * step;
        } else if let Some(pointer) = pointer {
            let target = pointer - Vec2::new(self.width, self.height) * 0.5;
            let delta = target - self.pos;
            let distance = delta.length();
            if distance > step {
                self.pos += delta / distance * step;
            } else {
                self.pos = target;
            }
        }

        self.clamp_to(field);
    }

    /// Keep the bounding box inside the field
    pub fn clamp_to(&mut self, field: FieldSize) {
        self.pos.x = self.pos.x.min(field.width - self.width).max(0.0);
        self.pos.y = self.pos.y.min(field.height - self.height).max(0.0);
    }

    /// Fire from the nose (or both barrels with dual shot)
    pub fn shoot(&self, projectiles: &mut Vec<Projectile>) {
        let center_x = self.pos.x + self.width / 2.0;
        if self.dual_shot {
            projectiles.push(Projectile::new(center_x - DUAL_SHOT_OFFSET, self.pos.y, Heading::Up));
            projectiles.push(Projectile::new(center_x + DUAL_SHOT_OFFSET, self.pos.y, Heading::Up));
        } else {
            projectiles.push(Projectile::new(center_x, self.pos.y, Heading::Up));
        }
    }

    /// Shorten the autofire delay, never below `floor`
    pub fn upgrade_fire_rate(&mut self, step: f32, floor: f32) {
        self.fire_rate = (self.fire_rate - step).max(floor).min(self.fire_rate);
    }

    pub fn enable_dual_shot(&mut self) {
        self.dual_shot = true;
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.width, self.height)
    }
}

/// Vertical travel direction, which also identifies the owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    /// Fired by the player
    Up,
    /// Fired by a hostile
    Down,
}

impl Heading {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Heading::Up => -1.0,
            Heading::Down => 1.0,
        }
    }
}

/// A projectile. `pos.x` is the horizontal center, `pos.y` the top edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub heading: Heading,
}

impl Projectile {
    pub fn new(x: f32, y: f32, heading: Heading) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width: PROJECTILE_WIDTH,
            height: PROJECTILE_HEIGHT,
            speed: PROJECTILE_SPEED,
            heading,
        }
    }

    pub fn advance(&mut self) {
        self.pos.y += self.speed * self.heading.sign();
    }

    pub fn is_out_of_field(&self, field: FieldSize) -> bool {
        self.pos.y < 0.0 || self.pos.y > field.height
    }
}

impl Bounded for Projectile {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos.x - self.width / 2.0, self.pos.y, self.width, self.height)
    }
}

/// A descending enemy craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Pixels per frame (not time-scaled)
    pub speed: f32,
    pub shoot_accumulator: f32,
    pub shoot_interval: f32,
    /// Cosmetic tint (degrees)
    pub hue: f32,
}

impl Hostile {
    /// Move down one frame and run the fire timer. Returns a shot when it fires.
    pub fn advance(&mut self, elapsed_ms: f32, rng: &mut impl RandomSource) -> Option<Projectile> {
        self.pos.y += self.speed;
        self.shoot_accumulator += elapsed_ms;

        if self.shoot_accumulator >= self.shoot_interval {
            self.shoot_accumulator = 0.0;
            self.shoot_interval =
                rng.next_in(HOSTILE_MIN_SHOOT_INTERVAL, HOSTILE_SHOOT_INTERVAL_RANGE);
            return Some(Projectile::new(
                self.pos.x + self.width / 2.0,
                self.pos.y + self.height,
                Heading::Down,
            ));
        }
        None
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    pub fn is_out_of_field(&self, field: FieldSize) -> bool {
        self.pos.y > field.height
    }
}

impl Bounded for Hostile {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.width, self.height)
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    FireRateBoost,
    DualShotUnlock,
}

impl PickupKind {
    pub const ALL: [PickupKind; 2] = [PickupKind::FireRateBoost, PickupKind::DualShotUnlock];
}

/// A drifting power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub kind: PickupKind,
    /// Cosmetic spin (radians)
    pub rotation: f32,
    /// Cosmetic pulse phase
    pub pulse: f32,
}

impl Pickup {
    /// Place a pickup with its top-left corner at `pos`
    pub fn new(pos: Vec2, kind: PickupKind) -> Self {
        Self {
            pos,
            width: PICKUP_SIZE,
            height: PICKUP_SIZE,
            speed: PICKUP_SPEED,
            kind,
            rotation: 0.0,
            pulse: 0.0,
        }
    }

    pub fn advance(&mut self) {
        self.pos.y += self.speed;
        self.rotation += PICKUP_SPIN;
        self.pulse += PICKUP_PULSE;
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    pub fn is_out_of_field(&self, field: FieldSize) -> bool {
        self.pos.y > field.height
    }
}

impl Bounded for Pickup {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.width, self.height)
    }
}

/// A single explosion fragment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Degrees, reds through yellows
    pub hue: f32,
    pub size: f32,
}

/// Explosion effect (cosmetic only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleBurst {
    pub origin: Vec2,
    pub particles: Vec<Particle>,
    pub life_ticks: u32,
}

impl ParticleBurst {
    pub fn new(origin: Vec2, rng: &mut impl RandomSource) -> Self {
        let particles = (0..BURST_PARTICLES)
            .map(|_| {
                let vx = rng.next_in(-BURST_MAX_SPEED, BURST_MAX_SPEED * 2.0);
                let vy = rng.next_in(-BURST_MAX_SPEED, BURST_MAX_SPEED * 2.0);
                Particle {
                    pos: origin,
                    vel: Vec2::new(vx, vy),
                    hue: rng.next_in(0.0, 60.0),
                    size: rng.next_in(2.0, 5.0),
                }
            })
            .collect();

        Self {
            origin,
            particles,
            life_ticks: BURST_LIFE_TICKS,
        }
    }

    pub fn advance(&mut self) {
        self.life_ticks = self.life_ticks.saturating_sub(1);
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.vel.y += BURST_GRAVITY;
        }
    }

    pub fn is_dead(&self) -> bool {
        self.life_ticks == 0
    }
}

/// Things that happened during the last step, for HUD/audio collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    HostileSpawned,
    /// `by_projectile` is false when the hostile rammed the player
    HostileDestroyed { at: Vec2, by_projectile: bool },
    PlayerHit { damage: f32 },
    PickupDropped { kind: PickupKind },
    PickupCollected { kind: PickupKind },
    GameOver { score: u64 },
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Balance knobs for this session
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Score
    pub score: u64,
    /// Health, always within [0, 100]
    pub health: f32,
    /// Time gathered toward the next hostile spawn (ms)
    pub spawn_accumulator: f32,
    /// Current spawn interval (ms, only ever decreases)
    pub spawn_interval: f32,
    /// Time gathered toward the next autofire shot (ms)
    pub autofire_accumulator: f32,
    /// Delta handed to the most recent step (ms)
    pub last_dt: f32,
    /// Steps simulated this session
    pub time_ticks: u64,
    /// Current field size
    pub field: FieldSize,
    /// Player craft
    pub player: Player,
    /// Projectiles in flight (insertion order)
    pub projectiles: Vec<Projectile>,
    /// Hostiles on the field (insertion order)
    pub hostiles: Vec<Hostile>,
    /// Pickups drifting down (insertion order)
    pub pickups: Vec<Pickup>,
    /// Explosion effects (not gameplay-affecting)
    #[serde(skip)]
    pub bursts: Vec<ParticleBurst>,
    /// Events raised by the last step
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

/// Starting and maximum health
pub const MAX_HEALTH: f32 = 100.0;

impl GameState {
    /// Create a state sitting at the menu
    pub fn new(tuning: Tuning) -> Self {
        let field = FieldSize::default();
        Self {
            player: Player::new(field, tuning.player_speed, tuning.initial_fire_rate),
            phase: GamePhase::Menu,
            score: 0,
            health: MAX_HEALTH,
            spawn_accumulator: 0.0,
            spawn_interval: tuning.spawn_interval_start,
            autofire_accumulator: 0.0,
            last_dt: 0.0,
            time_ticks: 0,
            field,
            projectiles: Vec::new(),
            hostiles: Vec::new(),
            pickups: Vec::new(),
            bursts: Vec::new(),
            events: Vec::new(),
            tuning,
        }
    }

    /// Wipe every pool and scalar and begin a fresh run
    pub fn begin_session(&mut self) {
        self.player = Player::new(
            self.field,
            self.tuning.player_speed,
            self.tuning.initial_fire_rate,
        );
        self.projectiles.clear();
        self.hostiles.clear();
        self.pickups.clear();
        self.bursts.clear();
        self.events.clear();
        self.score = 0;
        self.health = MAX_HEALTH;
        self.spawn_accumulator = 0.0;
        self.spawn_interval = self.tuning.spawn_interval_start;
        self.autofire_accumulator = 0.0;
        self.last_dt = 0.0;
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Health rounded and clamped for display
    pub fn health_percent(&self) -> u32 {
        self.health.round().clamp(0.0, MAX_HEALTH) as u32
    }

    /// Apply damage; returns true if this ended the run
    pub fn damage_player(&mut self, damage: f32) -> bool {
        self.health = (self.health - damage).clamp(0.0, MAX_HEALTH);
        self.events.push(GameEvent::PlayerHit { damage });
        if self.health <= 0.0 {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver { score: self.score });
            log::info!("Game over - final score {}", self.score);
            return true;
        }
        false
    }
}

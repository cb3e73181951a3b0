//! Game state and core simulation types
//!
//! Everything a round mutates lives in `GameState`. Entities are held in typed
//! containers, one per kind, so no entity can belong to two of them.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::schedule::Schedule;
use crate::consts::*;
use crate::settings::Settings;

/// Directional and fire intent, written by input or AI and read once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
}

impl Intent {
    /// Horizontal direction: -1, 0 or 1 (both or neither cancel out)
    pub fn direction(&self) -> f32 {
        match (self.move_left, self.move_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Ship tilt, for renderers that skew the sprite while moving
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tilt {
    #[default]
    Idle,
    SkewLeft,
    SkewRight,
}

/// Position (box centre) and bounding size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

/// Per-firer fire-rate limiter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    pub duration_ms: f32,
    pub remaining_ms: f32,
}

impl Cooldown {
    pub fn new(duration_ms: f32) -> Self {
        Self {
            duration_ms,
            remaining_ms: 0.0,
        }
    }

    pub fn advance(&mut self, dt_ms: f32) {
        self.remaining_ms = (self.remaining_ms - dt_ms).max(0.0);
    }

    pub fn is_ready(&self) -> bool {
        self.remaining_ms <= 0.0
    }

    /// Start the cooldown. Returns false (and does nothing) while one is running.
    pub fn trigger(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.remaining_ms = self.duration_ms;
        true
    }

    pub fn clear(&mut self) {
        self.remaining_ms = 0.0;
    }
}

/// Player or boss ship
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub id: u32,
    pub body: Body,
    pub vel: Vec2,
    pub intent: Intent,
    pub alive: bool,
    pub tilt: Tilt,
    pub cooldown: Cooldown,
}

impl Ship {
    pub fn new(id: u32, body: Body, cooldown_ms: f32) -> Self {
        Self {
            id,
            body,
            vel: Vec2::ZERO,
            intent: Intent::default(),
            alive: true,
            tilt: Tilt::Idle,
            cooldown: Cooldown::new(cooldown_ms),
        }
    }

    /// Mark destroyed; a dead ship stops steering and shooting
    pub fn kill(&mut self) {
        self.alive = false;
        self.intent = Intent::default();
        self.vel = Vec2::ZERO;
        self.tilt = Tilt::Idle;
    }
}

/// A wave enemy drifting along its phase direction
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: u32,
    pub body: Body,
    pub vel: Vec2,
    /// Direction angle (radians) of the drift path
    pub phase: f32,
    pub alive: bool,
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileOwner {
    Player,
    Boss,
}

/// A projectile with a fixed travel vector
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: u32,
    pub body: Body,
    pub vel: Vec2,
    pub owner: ProjectileOwner,
    pub alive: bool,
}

/// A visual particle (not gameplay-affecting)
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: u32,
    pub body: Body,
    pub vel: Vec2,
    pub color: u32,
    /// 0-1, decreases over time
    pub alpha: f32,
    /// Cleared once faded out or off-screen
    pub alive: bool,
}

/// Entity discriminant for collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Boss,
    Projectile(ProjectileOwner),
    Particle,
}

/// Read-only view of one entity for drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntitySnapshot {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub visible: bool,
    pub alpha: f32,
    pub tilt: Tilt,
}

/// Budgets for the active phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundCounters {
    pub enemies_remaining: u32,
    pub ammo_remaining: u32,
    pub time_remaining_ms: f32,
    pub boss_health: u32,
}

impl RoundCounters {
    pub fn initial(settings: &Settings) -> Self {
        Self {
            enemies_remaining: settings.enemy_count,
            ammo_remaining: settings.ammo,
            time_remaining_ms: settings.round_time_ms,
            boss_health: settings.boss_health,
        }
    }

    pub fn consume_ammo(&mut self) {
        debug_assert!(self.ammo_remaining > 0, "ammo consumed past zero");
        self.ammo_remaining = self.ammo_remaining.saturating_sub(1);
    }

    pub fn kill_enemy(&mut self) {
        debug_assert!(self.enemies_remaining > 0, "enemy killed past zero");
        self.enemies_remaining = self.enemies_remaining.saturating_sub(1);
    }

    pub fn damage_boss(&mut self, damage: u32) {
        debug_assert!(self.boss_health > 0, "boss damaged past zero");
        self.boss_health = self.boss_health.saturating_sub(damage);
    }

    pub fn drain_time(&mut self, dt_ms: f32) {
        debug_assert!(dt_ms >= 0.0, "negative frame delta");
        self.time_remaining_ms = (self.time_remaining_ms - dt_ms.max(0.0)).max(0.0);
    }
}

/// Why a round was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    TimeExpired,
    AmmoExhausted,
    PlayerDestroyed,
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost(LossReason),
}

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No active round, end-of-round modal visible
    Idle,
    /// Enemies active, ammo/time counting down
    Wave,
    /// Boss active with its own ammo/time budget
    BossFight,
    /// Round over, waiting for the idle delay
    RoundEnd(Outcome),
}

impl Phase {
    /// Wave or BossFight
    pub fn is_active(&self) -> bool {
        matches!(self, Phase::Wave | Phase::BossFight)
    }
}

/// Events for audio/UI collaborators (fire-and-forget)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    PhaseChanged { from: Phase, to: Phase },
    ShotFired { owner: ProjectileOwner },
    TargetDestroyed { kind: EntityKind, pos: Vec2 },
    BossHit { health: u32 },
    BossPhaseStarted,
    RoundWon,
    RoundLost { reason: LossReason },
    MusicStart,
    MusicStop,
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub settings: Settings,
    pub rng: Pcg32,
    /// Bumped on every reset; timers from older generations are ignored
    pub generation: u32,
    /// Simulation clock (ms since creation)
    pub now_ms: f64,
    pub time_ticks: u64,
    pub phase: Phase,
    /// Outcome of the most recent round, shown by the idle modal
    pub last_outcome: Option<Outcome>,
    pub counters: RoundCounters,
    pub player: Ship,
    pub boss: Option<Ship>,
    pub enemies: Vec<Enemy>,
    pub player_projectiles: Vec<Projectile>,
    pub boss_projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub schedule: Schedule,
    /// Pending events, oldest first. Bounded by `MAX_PENDING_EVENTS`.
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an idle game with the given seed
    pub fn new(seed: u64, settings: Settings) -> Self {
        let counters = RoundCounters::initial(&settings);
        let player_cooldown = settings.player_fire_cooldown_ms;
        let mut state = Self {
            seed,
            settings,
            rng: Pcg32::seed_from_u64(seed),
            generation: 0,
            now_ms: 0.0,
            time_ticks: 0,
            phase: Phase::Idle,
            last_outcome: None,
            counters,
            player: Ship::new(0, Body::new(Vec2::ZERO, Vec2::ZERO), player_cooldown),
            boss: None,
            enemies: Vec::new(),
            player_projectiles: Vec::new(),
            boss_projectiles: Vec::new(),
            particles: Vec::new(),
            schedule: Schedule::default(),
            events: Vec::new(),
            next_id: 1,
        };
        state.player = state.spawn_player();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The visible area all entities are confined to or reaped against
    pub fn view(&self) -> Aabb {
        Aabb::new(
            Vec2::ZERO,
            Vec2::new(self.settings.view_width, self.settings.view_height),
        )
    }

    /// Fresh player ship at the bottom centre
    pub fn spawn_player(&mut self) -> Ship {
        let size = Vec2::from(PLAYER_SIZE);
        let pos = Vec2::new(
            self.settings.view_width / 2.0,
            self.settings.view_height - size.y,
        );
        let id = self.next_entity_id();
        Ship::new(id, Body::new(pos, size), self.settings.player_fire_cooldown_ms)
    }

    /// Put the player back at its spawn point, alive and at rest
    pub fn reset_player(&mut self) {
        let size = Vec2::from(PLAYER_SIZE);
        let pos = Vec2::new(
            self.settings.view_width / 2.0,
            self.settings.view_height - size.y,
        );
        let player = &mut self.player;
        player.body = Body::new(pos, size);
        player.vel = Vec2::ZERO;
        player.intent = Intent::default();
        player.alive = true;
        player.tilt = Tilt::Idle;
        player.cooldown.clear();
    }

    /// Fresh boss ship at the top centre
    pub fn spawn_boss(&mut self) -> Ship {
        let size = Vec2::from(BOSS_SIZE);
        let pos = Vec2::new(self.settings.view_width / 2.0, size.y);
        let id = self.next_entity_id();
        Ship::new(id, Body::new(pos, size), self.settings.boss_fire_cooldown_ms)
    }

    /// Queue an event for collaborators.
    ///
    /// Hosts should call [`drain_events`](Self::drain_events) every frame.
    /// If nobody does, only the newest `MAX_PENDING_EVENTS` are kept.
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
        self.trim_events();
    }

    /// Drop the oldest events beyond `MAX_PENDING_EVENTS`
    pub fn trim_events(&mut self) {
        let excess = self.events.len().saturating_sub(MAX_PENDING_EVENTS);
        if excess > 0 {
            log::debug!("Dropping {} undrained events", excess);
            self.events.drain(..excess);
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop every round entity except the player slot
    pub fn clear_containers(&mut self) {
        self.enemies.clear();
        self.player_projectiles.clear();
        self.boss_projectiles.clear();
        self.particles.clear();
        self.boss = None;
    }

    /// Snapshots of every entity, in draw order
    pub fn snapshots(&self) -> Vec<EntitySnapshot> {
        let ship = |ship: &Ship, kind| EntitySnapshot {
            id: ship.id,
            kind,
            pos: ship.body.pos,
            size: ship.body.size,
            visible: ship.alive,
            alpha: 1.0,
            tilt: ship.tilt,
        };
        let projectile = |p: &Projectile| EntitySnapshot {
            id: p.id,
            kind: EntityKind::Projectile(p.owner),
            pos: p.body.pos,
            size: p.body.size,
            visible: p.alive,
            alpha: 1.0,
            tilt: Tilt::Idle,
        };

        let mut out = Vec::with_capacity(
            2 + self.enemies.len()
                + self.player_projectiles.len()
                + self.boss_projectiles.len()
                + self.particles.len(),
        );
        out.push(ship(&self.player, EntityKind::Player));
        if let Some(boss) = &self.boss {
            out.push(ship(boss, EntityKind::Boss));
        }
        out.extend(self.enemies.iter().map(|e| EntitySnapshot {
            id: e.id,
            kind: EntityKind::Enemy,
            pos: e.body.pos,
            size: e.body.size,
            visible: e.alive,
            alpha: 1.0,
            tilt: Tilt::Idle,
        }));
        out.extend(self.player_projectiles.iter().map(projectile));
        out.extend(self.boss_projectiles.iter().map(projectile));
        out.extend(self.particles.iter().map(|p| EntitySnapshot {
            id: p.id,
            kind: EntityKind::Particle,
            pos: p.body.pos,
            size: p.body.size,
            visible: p.alive,
            alpha: p.alpha,
            tilt: Tilt::Idle,
        }));
        out
    }
}

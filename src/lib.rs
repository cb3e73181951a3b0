//! Star Siege - a wave-and-boss arcade shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, round state machine)
//! - `settings`: Data-driven round tuning
//! - `audio`: Sound cues derived from simulation events
//! - `ui`: HUD text and modal state derived from the round

pub mod audio;
pub mod logging;
pub mod settings;
pub mod sim;
pub mod ui;

pub use logging::init as init_logging;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Reference frame length; per-frame tuning values are scaled by this
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Default viewport
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 600.0;

    /// Round budgets
    pub const ROUND_TIME_MS: f32 = 60_000.0;
    pub const COUNT_ENEMY: u32 = 5;
    pub const COUNT_PROJECTILE: u32 = 10;
    pub const BOSS_HEALTH: u32 = 4;

    /// Boss AI timers
    pub const BOSS_FIRE_INTERVAL_MS: f64 = 2000.0;
    pub const BOSS_RETARGET_INTERVAL_MS: f64 = 1000.0;

    /// Delay between "start" and the first wave
    pub const WAVE_SPAWN_DELAY_MS: f64 = 100.0;
    /// Delay between round end and the idle modal
    pub const ROUND_END_DELAY_MS: f64 = 2000.0;

    /// Speeds in pixels per second (6 px/frame at 60 Hz)
    pub const SHIP_SPEED: f32 = 360.0;
    pub const ENEMY_SPEED: f32 = 360.0;
    pub const PLAYER_PROJECTILE_SPEED: f32 = 360.0;
    pub const BOSS_PROJECTILE_SPEED: f32 = 180.0;
    /// Particle velocity components are drawn from [-spread, spread]
    pub const PARTICLE_SPREAD: f32 = 300.0;
    /// Alpha lost per second
    pub const PARTICLE_FADE_PER_SEC: f32 = 1.2;

    /// Fire cooldowns
    pub const PLAYER_FIRE_COOLDOWN_MS: f32 = 250.0;
    pub const BOSS_FIRE_COOLDOWN_MS: f32 = 500.0;

    /// Bounding boxes
    pub const PLAYER_SIZE: (f32, f32) = (64.0, 64.0);
    pub const BOSS_SIZE: (f32, f32) = (128.0, 96.0);
    pub const ENEMY_SIZE: (f32, f32) = (40.0, 40.0);
    pub const PROJECTILE_RADIUS: f32 = 8.0;
    pub const PARTICLE_RADIUS: f32 = 2.0;

    /// Particles spawned per pixel of destroyed-entity width
    pub const PARTICLES_PER_PX: f32 = 1.0;
    /// Maximum live particles
    pub const MAX_PARTICLES: usize = 1000;
    /// Undrained events kept before the oldest are dropped
    pub const MAX_PENDING_EVENTS: usize = 1024;

    /// Colors
    pub const COLOR_WHITE: u32 = 0xffffff;
    pub const COLOR_RED: u32 = 0xff0000;
    pub const COLOR_PURP: u32 = 0xbaa0de;
}

/// Scale a per-second quantity to the elapsed milliseconds
#[inline]
pub fn per_ms(per_second: f32, dt_ms: f32) -> f32 {
    per_second * dt_ms / 1000.0
}

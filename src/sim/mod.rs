//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time comes in through `tick` only
//! - Seeded RNG only
//! - Stable iteration order (container order)
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod collision;
pub mod combat;
pub mod kinematics;
pub mod round;
pub mod schedule;
pub mod spawn;
pub mod state;
pub mod tick;

pub use ai::{BossMove, autopilot_intent, next_boss_intent};
pub use collision::{Aabb, is_hit, overlap_ratio};
pub use round::{reset_round, start_round, teardown};
pub use schedule::{Schedule, TimerAction};
pub use state::{
    Body, Cooldown, Enemy, EntityKind, EntitySnapshot, GameEvent, GameState, Intent, LossReason,
    Outcome, Particle, Phase, Projectile, ProjectileOwner, RoundCounters, Ship, Tilt,
};
pub use tick::{TickInput, tick};

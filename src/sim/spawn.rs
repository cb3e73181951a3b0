//! Entity creation: enemy waves, particle bursts and projectiles

use glam::Vec2;
use rand::Rng;

use super::state::{
    Body, Cooldown, Enemy, GameEvent, GameState, Particle, Projectile, ProjectileOwner,
};
use crate::consts::*;

/// Where a wave appears: top third, horizontally centred
pub fn wave_origin(state: &GameState) -> Vec2 {
    Vec2::new(state.settings.view_width / 2.0, state.settings.view_height / 3.0)
}

/// Create `count` enemies stacked on one point.
///
/// They overlap at spawn and spread out because each gets its own phase.
pub fn spawn_wave(state: &mut GameState, count: u32, origin: Vec2) -> Vec<Enemy> {
    let speed = state.settings.enemy_speed;
    (0..count)
        .map(|i| Enemy {
            id: state.next_entity_id(),
            body: Body::new(origin, Vec2::from(ENEMY_SIZE)),
            vel: Vec2::splat(speed),
            phase: i as f32,
            alive: true,
        })
        .collect()
}

/// Create up to `count` particles at `origin` with random velocities.
///
/// Never exceeds the configured live-particle cap.
pub fn spawn_particles(state: &mut GameState, count: usize, origin: Vec2, color: u32) -> Vec<Particle> {
    let room = state.settings.max_particles.saturating_sub(state.particles.len());
    let count = count.min(room);
    let spread = state.settings.particle_spread;
    let size = Vec2::splat(PARTICLE_RADIUS * 2.0);

    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let vel = if spread > 0.0 {
            Vec2::new(
                state.rng.random_range(-spread..=spread),
                state.rng.random_range(-spread..=spread),
            )
        } else {
            Vec2::ZERO
        };
        out.push(Particle {
            id: state.next_entity_id(),
            body: Body::new(origin, size),
            vel,
            color,
            alpha: 1.0,
            alive: true,
        });
    }
    out
}

/// Spawn a burst sized to the width of whatever was destroyed
pub fn burst(state: &mut GameState, origin: Vec2, width: f32, color: u32) {
    let count = (width * state.settings.particles_per_px).round().max(0.0) as usize;
    let particles = spawn_particles(state, count, origin, color);
    state.particles.extend(particles);
}

/// Build a projectile centred on `origin`
pub fn make_projectile(id: u32, origin: Vec2, vel: Vec2, owner: ProjectileOwner) -> Projectile {
    Projectile {
        id,
        body: Body::new(origin, Vec2::splat(PROJECTILE_RADIUS * 2.0)),
        vel,
        owner,
        alive: true,
    }
}

/// Fire one projectile from `origin` if `cooldown` allows.
///
/// The ID is only drawn when a shot is actually spawned.
pub fn fire_projectile(
    origin: Vec2,
    velocity: Vec2,
    owner: ProjectileOwner,
    cooldown: &mut Cooldown,
    next_id: impl FnOnce() -> u32,
) -> Option<Projectile> {
    if !cooldown.trigger() {
        return None;
    }
    Some(make_projectile(next_id(), origin, velocity, owner))
}

/// Fire from a live ship: the player shoots upward, the boss downward
pub fn fire_from_ship(state: &mut GameState, owner: ProjectileOwner) -> Option<Projectile> {
    let ship = match owner {
        ProjectileOwner::Player => &state.player,
        ProjectileOwner::Boss => state.boss.as_ref()?,
    };
    if !ship.alive {
        return None;
    }
    let origin = ship.body.pos;
    let mut cooldown = ship.cooldown;
    let velocity = match owner {
        ProjectileOwner::Player => Vec2::new(0.0, -state.settings.player_projectile_speed),
        ProjectileOwner::Boss => Vec2::new(0.0, state.settings.boss_projectile_speed),
    };

    let shot = fire_projectile(origin, velocity, owner, &mut cooldown, || {
        state.next_entity_id()
    });
    match owner {
        ProjectileOwner::Player => state.player.cooldown = cooldown,
        ProjectileOwner::Boss => {
            if let Some(boss) = state.boss.as_mut() {
                boss.cooldown = cooldown;
            }
        }
    }
    shot
}

/// Turn fire intents into projectiles.
///
/// Shots in flight reserve ammo, so the player can only fire while fewer
/// projectiles are airborne than ammo remains. The boss fire intent is a
/// one-shot pulse raised by its fire timer and is lowered once evaluated.
pub fn fire_from_intents(state: &mut GameState, dt_ms: f32) {
    state.player.cooldown.advance(dt_ms);
    if let Some(boss) = state.boss.as_mut() {
        boss.cooldown.advance(dt_ms);
    }

    let in_flight = state.player_projectiles.len() as u32;
    if state.player.intent.fire && in_flight < state.counters.ammo_remaining {
        if let Some(shot) = fire_from_ship(state, ProjectileOwner::Player) {
            state.player_projectiles.push(shot);
            state.emit(GameEvent::ShotFired {
                owner: ProjectileOwner::Player,
            });
        }
    }

    let boss_wants_fire = state.boss.as_ref().is_some_and(|b| b.intent.fire);
    if boss_wants_fire {
        if let Some(shot) = fire_from_ship(state, ProjectileOwner::Boss) {
            state.boss_projectiles.push(shot);
            state.emit(GameEvent::ShotFired {
                owner: ProjectileOwner::Boss,
            });
        }
        if let Some(boss) = state.boss.as_mut() {
            boss.intent.fire = false;
        }
    }
}

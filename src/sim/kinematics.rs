//! Per-entity motion rules
//!
//! All velocities are in pixels per second; `dt_ms` is the frame delta.

use glam::Vec2;

use super::collision::Aabb;
use super::state::{Enemy, Particle, Projectile, Ship, Tilt};
use crate::per_ms;

/// Steer a ship horizontally from its intent, clamped to the view's width
pub fn update_ship(ship: &mut Ship, speed: f32, view: &Aabb, dt_ms: f32) {
    if !ship.alive {
        return;
    }

    ship.vel.x = ship.intent.direction() * speed;
    let step = per_ms(ship.vel.x, dt_ms);
    let half_w = ship.body.size.x / 2.0;
    let bounds = ship.body.aabb();

    if bounds.min.x + step < view.min.x {
        ship.vel.x = 0.0;
        ship.body.pos.x = view.min.x + half_w;
    } else if bounds.max.x + step > view.max.x {
        ship.vel.x = 0.0;
        ship.body.pos.x = view.max.x - half_w;
    } else {
        ship.body.pos.x += step;
    }

    ship.tilt = if ship.vel.x > 0.0 {
        Tilt::SkewRight
    } else if ship.vel.x < 0.0 {
        Tilt::SkewLeft
    } else {
        Tilt::Idle
    };
}

/// Drift an enemy along its phase direction, bouncing off the view edges.
///
/// The enemy's centre never leaves the view.
pub fn update_enemy(enemy: &mut Enemy, view: &Aabb, dt_ms: f32) {
    let dir = Vec2::new(enemy.phase.cos(), enemy.phase.sin());

    enemy.body.pos.x += per_ms(dir.x * enemy.vel.x, dt_ms);
    if enemy.body.pos.x < view.min.x {
        enemy.body.pos.x = view.min.x;
        enemy.vel.x = -enemy.vel.x;
    } else if enemy.body.pos.x > view.max.x {
        enemy.body.pos.x = view.max.x;
        enemy.vel.x = -enemy.vel.x;
    }

    enemy.body.pos.y += per_ms(dir.y * enemy.vel.y, dt_ms);
    if enemy.body.pos.y < view.min.y {
        enemy.body.pos.y = view.min.y;
        enemy.vel.y = -enemy.vel.y;
    } else if enemy.body.pos.y > view.max.y {
        enemy.body.pos.y = view.max.y;
        enemy.vel.y = -enemy.vel.y;
    }
}

/// Move a projectile. Returns false once it has left the view.
pub fn update_projectile(projectile: &mut Projectile, view: &Aabb, dt_ms: f32) -> bool {
    projectile.body.pos += projectile.vel * (dt_ms / 1000.0);
    !projectile.body.aabb().is_outside(view)
}

/// Move and fade a particle. Returns false once it is spent or off-screen.
pub fn update_particle(particle: &mut Particle, fade_per_sec: f32, view: &Aabb, dt_ms: f32) -> bool {
    particle.body.pos += particle.vel * (dt_ms / 1000.0);
    particle.alpha = (particle.alpha - per_ms(fade_per_sec, dt_ms)).max(0.0);
    particle.alive = particle.alpha > 0.0 && !particle.body.aabb().is_outside(view);
    particle.alive
}

//! Combat resolution
//!
//! Tests live projectiles against the targets relevant to the current phase.
//! A projectile is consumed by its first hit in container order; every hit
//! leaves a particle burst sized to whatever was destroyed.

use glam::Vec2;

use super::collision::overlap_ratio;
use super::spawn::burst;
use super::state::{EntityKind, GameEvent, GameState, Phase, ProjectileOwner};
use crate::consts::*;

/// Damage dealt to the boss by one player projectile
pub const BOSS_DAMAGE_PER_HIT: u32 = 1;

/// A confirmed hit, applied after the pair scan
#[derive(Debug, Clone, Copy)]
struct Hit {
    destroyed: Option<EntityKind>,
    pos: Vec2,
    width: f32,
    color: u32,
}

/// Resolve all collisions for this tick and reap destroyed entities
pub fn resolve(state: &mut GameState) {
    let mut hits = Vec::new();
    match state.phase {
        Phase::Wave => enemy_hits(state, &mut hits),
        Phase::BossFight => {
            boss_hits(state, &mut hits);
            player_hits(state, &mut hits);
            projectile_clashes(state, &mut hits);
        }
        _ => return,
    }

    for hit in hits {
        burst(state, hit.pos, hit.width, hit.color);
        if let Some(kind) = hit.destroyed {
            log::debug!("{:?} destroyed at ({:.0}, {:.0})", kind, hit.pos.x, hit.pos.y);
            state.emit(GameEvent::TargetDestroyed { kind, pos: hit.pos });
        }
    }

    state.enemies.retain(|e| e.alive);
    state.player_projectiles.retain(|p| p.alive);
    state.boss_projectiles.retain(|p| p.alive);
}

/// Player projectiles against wave enemies
fn enemy_hits(state: &mut GameState, hits: &mut Vec<Hit>) {
    for shot in state.player_projectiles.iter_mut().filter(|p| p.alive) {
        let shot_box = shot.body.aabb();
        let target = state
            .enemies
            .iter_mut()
            .filter(|e| e.alive)
            .find(|e| overlap_ratio(&e.body.aabb(), &shot_box) > 0.0);

        if let Some(enemy) = target {
            shot.alive = false;
            enemy.alive = false;
            state.counters.consume_ammo();
            state.counters.kill_enemy();
            hits.push(Hit {
                destroyed: Some(EntityKind::Enemy),
                pos: enemy.body.pos,
                width: enemy.body.size.x,
                color: COLOR_PURP,
            });
        }
    }
}

/// Player projectiles against the boss
fn boss_hits(state: &mut GameState, hits: &mut Vec<Hit>) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };

    for shot in state.player_projectiles.iter_mut().filter(|p| p.alive) {
        if !boss.alive {
            break;
        }
        if overlap_ratio(&boss.body.aabb(), &shot.body.aabb()) <= 0.0 {
            continue;
        }

        shot.alive = false;
        state.counters.consume_ammo();
        state.counters.damage_boss(BOSS_DAMAGE_PER_HIT);
        let health = state.counters.boss_health;
        state.events.push(GameEvent::BossHit { health });
        log::debug!("Boss hit, health {}", health);
        hits.push(Hit {
            destroyed: None,
            pos: shot.body.pos,
            width: shot.body.size.x,
            color: COLOR_WHITE,
        });

        if health == 0 {
            boss.kill();
            hits.push(Hit {
                destroyed: Some(EntityKind::Boss),
                pos: boss.body.pos,
                width: boss.body.size.x,
                color: COLOR_RED,
            });
        }
    }
}

/// Boss projectiles against the player
fn player_hits(state: &mut GameState, hits: &mut Vec<Hit>) {
    let player = &mut state.player;
    for shot in state.boss_projectiles.iter_mut().filter(|p| p.alive) {
        if !player.alive {
            break;
        }
        if overlap_ratio(&player.body.aabb(), &shot.body.aabb()) <= 0.0 {
            continue;
        }

        shot.alive = false;
        player.kill();
        hits.push(Hit {
            destroyed: Some(EntityKind::Player),
            pos: player.body.pos,
            width: player.body.size.x,
            color: COLOR_WHITE,
        });
    }
}

/// Player projectiles shooting down boss projectiles
fn projectile_clashes(state: &mut GameState, hits: &mut Vec<Hit>) {
    for shot in state.player_projectiles.iter_mut().filter(|p| p.alive) {
        let shot_box = shot.body.aabb();
        let target = state
            .boss_projectiles
            .iter_mut()
            .filter(|p| p.alive)
            .find(|p| overlap_ratio(&p.body.aabb(), &shot_box) > 0.0);

        if let Some(enemy_shot) = target {
            shot.alive = false;
            enemy_shot.alive = false;
            state.counters.consume_ammo();
            hits.push(Hit {
                destroyed: Some(EntityKind::Projectile(ProjectileOwner::Boss)),
                pos: enemy_shot.body.pos,
                width: enemy_shot.body.size.x,
                color: COLOR_WHITE,
            });
        }
    }
}

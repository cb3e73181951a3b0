//! Frame driver
//!
//! Advances the round by one render frame. The step order is fixed and every
//! step reads the results of the one before it.

use super::ai::autopilot_intent;
use super::combat;
use super::kinematics::{update_enemy, update_particle, update_projectile, update_ship};
use super::round;
use super::spawn::fire_from_intents;
use super::state::{GameState, Intent, Phase};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held movement and fire keys
    pub player: Intent,
    /// Start (or restart) a round; ignored unless idle
    pub start: bool,
    /// Demo mode - the autopilot flies the player
    pub autopilot: bool,
}

/// Advance the game state by `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    let dt_ms = dt_ms.max(0.0);

    // 0. Clock, start signal, due timers
    state.time_ticks += 1;
    state.now_ms += f64::from(dt_ms);
    if input.start && state.phase == Phase::Idle {
        round::start_round(state);
    }
    round::run_timers(state);

    if state.phase == Phase::Idle {
        return;
    }
    let active = state.phase.is_active();

    // 1. Round countdown
    if active {
        state.counters.drain_time(dt_ms);
    }

    // 2. Ships
    state.player.intent = if active && state.player.alive {
        if input.autopilot {
            autopilot_intent(state)
        } else {
            input.player
        }
    } else {
        Intent::default()
    };
    let view = state.view();
    let ship_speed = state.settings.ship_speed;
    update_ship(&mut state.player, ship_speed, &view, dt_ms);
    if let Some(boss) = state.boss.as_mut() {
        update_ship(boss, ship_speed, &view, dt_ms);
    }

    // 3. Drifting entities, reaping whatever leaves the view
    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        update_enemy(enemy, &view, dt_ms);
    }
    state
        .player_projectiles
        .retain_mut(|p| update_projectile(p, &view, dt_ms));
    state
        .boss_projectiles
        .retain_mut(|p| update_projectile(p, &view, dt_ms));
    let fade = state.settings.particle_fade_per_sec;
    state
        .particles
        .retain_mut(|p| update_particle(p, fade, &view, dt_ms));

    if !active {
        return;
    }

    // 4. Fire
    fire_from_intents(state, dt_ms);

    // 5. Collisions
    combat::resolve(state);

    // 6. Transitions
    round::evaluate(state);

    // Combat queues events directly; keep the bound
    state.trim_events();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::settings::Settings;
    use crate::sim::spawn::make_projectile;
    use crate::sim::state::{GameEvent, LossReason, Outcome, ProjectileOwner};
    use glam::Vec2;
    use proptest::prelude::*;

    const START: TickInput = TickInput {
        player: Intent {
            move_left: false,
            move_right: false,
            fire: false,
        },
        start: true,
        autopilot: false,
    };

    /// Tick with no input until `done` holds; panics after `max` ticks
    fn run_until(state: &mut GameState, max: usize, done: impl Fn(&GameState) -> bool) {
        for _ in 0..max {
            if done(state) {
                return;
            }
            tick(state, &TickInput::default(), FRAME_MS);
        }
        assert!(done(state), "condition not reached in {} ticks", max);
    }

    /// A started round with its wave on the field
    fn wave_in_play(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Settings::default());
        tick(&mut state, &START, FRAME_MS);
        assert_eq!(state.phase, Phase::Wave);
        run_until(&mut state, 20, |s| !s.enemies.is_empty());
        state
    }

    fn shoot_at(state: &mut GameState, pos: Vec2) {
        let id = state.next_entity_id();
        let shot = make_projectile(id, pos, Vec2::new(0.0, -360.0), ProjectileOwner::Player);
        state.player_projectiles.push(shot);
    }

    fn boss_fight(seed: u64) -> GameState {
        let mut state = wave_in_play(seed);
        while let Some(pos) = state.enemies.first().map(|e| e.body.pos) {
            shoot_at(&mut state, pos);
            tick(&mut state, &TickInput::default(), 1.0);
        }
        assert_eq!(state.phase, Phase::BossFight);
        state
    }

    #[test]
    fn test_idle_until_start() {
        let mut state = GameState::new(3, Settings::default());
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), FRAME_MS);
        }
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.counters.time_remaining_ms, state.settings.round_time_ms);
        assert!(state.enemies.is_empty());

        tick(&mut state, &START, FRAME_MS);
        assert_eq!(state.phase, Phase::Wave);
        assert!(state.drain_events().contains(&GameEvent::MusicStart));
    }

    #[test]
    fn test_wave_cleared_enters_boss_fight() {
        let mut state = wave_in_play(21);
        assert_eq!(state.enemies.len(), 5);

        for hits in 1..=5u32 {
            let pos = state.enemies[0].body.pos;
            shoot_at(&mut state, pos);
            tick(&mut state, &TickInput::default(), 1.0);
            if hits < 5 {
                assert_eq!(state.counters.enemies_remaining, 5 - hits);
                assert_eq!(state.counters.ammo_remaining, 10 - hits);
            }
        }

        assert_eq!(state.phase, Phase::BossFight);
        assert_eq!(state.counters.enemies_remaining, 0);
        assert_eq!(state.counters.ammo_remaining, 10);
        assert_eq!(state.counters.time_remaining_ms, state.settings.round_time_ms);
        assert!(state.boss.is_some());
    }

    #[test]
    fn test_boss_defeated_wins_round() {
        let mut state = boss_fight(22);
        for _ in 0..4 {
            let pos = state.boss.as_ref().unwrap().body.pos;
            shoot_at(&mut state, pos);
            tick(&mut state, &TickInput::default(), 1.0);
        }
        assert_eq!(state.counters.boss_health, 0);
        assert_eq!(state.phase, Phase::RoundEnd(Outcome::Won));
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::RoundWon));
        assert!(events.contains(&GameEvent::MusicStop));
    }

    #[test]
    fn test_last_shot_killing_boss_wins() {
        let mut state = boss_fight(23);
        state.counters.ammo_remaining = 1;
        state.counters.boss_health = 1;
        let pos = state.boss.as_ref().unwrap().body.pos;
        shoot_at(&mut state, pos);
        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.counters.ammo_remaining, 0);
        assert_eq!(state.phase, Phase::RoundEnd(Outcome::Won));
    }

    #[test]
    fn test_time_expired_loses() {
        let mut state = wave_in_play(24);
        state.counters.time_remaining_ms = 5.0;
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.counters.time_remaining_ms, 0.0);
        assert_eq!(
            state.phase,
            Phase::RoundEnd(Outcome::Lost(LossReason::TimeExpired))
        );
    }

    #[test]
    fn test_time_expiry_beats_boss_kill() {
        let mut state = boss_fight(25);
        state.counters.boss_health = 1;
        state.counters.time_remaining_ms = 0.5;
        let pos = state.boss.as_ref().unwrap().body.pos;
        shoot_at(&mut state, pos);
        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.counters.boss_health, 0);
        assert_eq!(
            state.phase,
            Phase::RoundEnd(Outcome::Lost(LossReason::TimeExpired))
        );
    }

    #[test]
    fn test_out_of_ammo_with_enemies_left_loses() {
        let mut state = wave_in_play(26);
        state.counters.ammo_remaining = 1;
        let pos = state.enemies[0].body.pos;
        shoot_at(&mut state, pos);
        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.counters.enemies_remaining, 4);
        assert_eq!(
            state.phase,
            Phase::RoundEnd(Outcome::Lost(LossReason::AmmoExhausted))
        );
    }

    #[test]
    fn test_player_destroyed_loses() {
        let mut state = boss_fight(27);
        let id = state.next_entity_id();
        let pos = state.player.body.pos;
        let shot = make_projectile(id, pos, Vec2::new(0.0, 180.0), ProjectileOwner::Boss);
        state.boss_projectiles.push(shot);
        tick(&mut state, &TickInput::default(), 1.0);
        assert!(!state.player.alive);
        assert_eq!(
            state.phase,
            Phase::RoundEnd(Outcome::Lost(LossReason::PlayerDestroyed))
        );
    }

    #[test]
    fn test_round_end_settles_then_goes_idle() {
        let mut state = wave_in_play(28);
        state.counters.time_remaining_ms = 1.0;
        tick(&mut state, &TickInput::default(), FRAME_MS);
        let ended_at = state.now_ms;
        let frozen = state.counters;
        let enemy_before = state.enemies[0].body.pos;

        // Entities keep drifting, counters are frozen, input is ignored
        let fire = TickInput {
            player: Intent {
                fire: true,
                ..Default::default()
            },
            ..Default::default()
        };
        tick(&mut state, &fire, FRAME_MS);
        assert_ne!(state.enemies[0].body.pos, enemy_before);
        assert_eq!(state.counters, frozen);
        assert!(state.player_projectiles.is_empty());

        run_until(&mut state, 200, |s| s.phase == Phase::Idle);
        assert!(state.now_ms - ended_at >= state.settings.round_end_delay_ms);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_early_loss_cancels_wave_spawn() {
        let mut state = GameState::new(29, Settings::default());
        tick(&mut state, &START, FRAME_MS);
        state.counters.time_remaining_ms = 1.0;
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert!(matches!(state.phase, Phase::RoundEnd(_)));
        for _ in 0..20 {
            tick(&mut state, &TickInput::default(), FRAME_MS);
        }
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_restart_after_round() {
        let mut state = wave_in_play(30);
        state.counters.time_remaining_ms = 1.0;
        tick(&mut state, &TickInput::default(), FRAME_MS);
        run_until(&mut state, 200, |s| s.phase == Phase::Idle);

        let player_id = state.player.id;
        tick(&mut state, &START, FRAME_MS);
        assert_eq!(state.phase, Phase::Wave);
        assert_eq!(state.player.id, player_id);
        assert!(state.player.alive);
        assert_eq!(state.counters.ammo_remaining, state.settings.ammo);
    }

    #[test]
    fn test_player_fires_on_input() {
        let mut state = wave_in_play(31);
        let fire = TickInput {
            player: Intent {
                fire: true,
                ..Default::default()
            },
            ..Default::default()
        };
        tick(&mut state, &fire, FRAME_MS);
        assert_eq!(state.player_projectiles.len(), 1);
        assert!(state.player_projectiles[0].vel.y < 0.0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(4242, Settings::default());
        let mut state2 = GameState::new(4242, Settings::default());
        let demo = TickInput {
            start: true,
            autopilot: true,
            ..Default::default()
        };

        for _ in 0..3000 {
            tick(&mut state1, &demo, FRAME_MS);
            tick(&mut state2, &demo, FRAME_MS);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.counters, state2.counters);
        assert_eq!(state1.snapshots(), state2.snapshots());
        assert_eq!(state1.drain_events(), state2.drain_events());
    }

    #[test]
    fn test_event_queue_bounded_without_host() {
        let mut state = GameState::new(77, Settings::default());
        let demo = TickInput {
            start: true,
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..20_000 {
            tick(&mut state, &demo, FRAME_MS);
            assert!(state.events.len() <= crate::consts::MAX_PENDING_EVENTS);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_budgets_never_grow_within_a_phase(seed in any::<u64>()) {
            let mut state = GameState::new(seed, Settings::default());
            let demo = TickInput {
                start: true,
                autopilot: true,
                ..Default::default()
            };
            for _ in 0..1500 {
                let before = (state.phase, state.counters);
                tick(&mut state, &demo, FRAME_MS);
                let (phase, counters) = before;
                if phase.is_active() && state.phase == phase {
                    prop_assert!(state.counters.ammo_remaining <= counters.ammo_remaining);
                    prop_assert!(state.counters.time_remaining_ms <= counters.time_remaining_ms);
                    prop_assert!(state.counters.enemies_remaining <= counters.enemies_remaining);
                    prop_assert!(state.counters.boss_health <= counters.boss_health);
                }
            }
        }
    }
}

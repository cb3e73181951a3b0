//! Round state machine
//!
//! Idle -> Wave -> BossFight -> RoundEnd(outcome) -> Idle. Loss conditions are
//! checked before win conditions, and nothing is checked once the round has
//! ended. Delayed transitions go through the timer schedule, tagged with the
//! round generation so a reset silences everything scheduled before it.

use super::ai::next_boss_intent;
use super::schedule::{Timer, TimerAction};
use super::spawn::{spawn_wave, wave_origin};
use super::state::{GameEvent, GameState, LossReason, Outcome, Phase, RoundCounters};

/// Switch phase, logging and announcing the change
fn set_phase(state: &mut GameState, to: Phase) {
    let from = state.phase;
    if from == to {
        return;
    }
    state.phase = to;
    log::info!("Phase {:?} -> {:?}", from, to);
    state.emit(GameEvent::PhaseChanged { from, to });
}

/// Return to the initial idle state.
///
/// Cancels every timer, clears all containers and restores the counters.
/// Calling it twice is the same as calling it once, apart from the generation.
pub fn reset_round(state: &mut GameState) {
    state.generation = state.generation.wrapping_add(1);
    state.schedule.clear();
    state.clear_containers();
    state.counters = RoundCounters::initial(&state.settings);
    state.reset_player();
    set_phase(state, Phase::Idle);
}

/// Start a new round from Idle. Returns false if a round is already running.
pub fn start_round(state: &mut GameState) -> bool {
    if state.phase != Phase::Idle {
        log::warn!("Ignoring start request during {:?}", state.phase);
        return false;
    }

    reset_round(state);
    set_phase(state, Phase::Wave);
    let at = state.now_ms + state.settings.wave_spawn_delay_ms;
    state.schedule.schedule(at, state.generation, TimerAction::SpawnWave);
    state.emit(GameEvent::MusicStart);
    log::info!("Round started (seed {}, generation {})", state.seed, state.generation);
    true
}

/// Cancel all pending timers, e.g. before the state is dropped
pub fn teardown(state: &mut GameState) {
    state.generation = state.generation.wrapping_add(1);
    state.schedule.clear();
    log::debug!("Simulation torn down at generation {}", state.generation);
}

/// Enter the boss fight: fresh budgets, a boss, and its AI timers
fn enter_boss_fight(state: &mut GameState) {
    state.schedule.cancel(TimerAction::SpawnWave);
    state.counters.ammo_remaining = state.settings.ammo;
    state.counters.time_remaining_ms = state.settings.round_time_ms;

    let boss = state.spawn_boss();
    state.boss = Some(boss);

    let generation = state.generation;
    let retarget_at = state.now_ms + state.settings.boss_retarget_interval_ms;
    let fire_at = state.now_ms + state.settings.boss_fire_interval_ms;
    state.schedule.schedule(retarget_at, generation, TimerAction::BossRetarget);
    state.schedule.schedule(fire_at, generation, TimerAction::BossFire);

    set_phase(state, Phase::BossFight);
    state.emit(GameEvent::BossPhaseStarted);
}

/// Finish the round and schedule the return to Idle
fn end_round(state: &mut GameState, outcome: Outcome) {
    state.schedule.cancel(TimerAction::SpawnWave);
    state.schedule.cancel(TimerAction::BossRetarget);
    state.schedule.cancel(TimerAction::BossFire);
    if let Some(boss) = state.boss.as_mut() {
        boss.intent = Default::default();
    }

    set_phase(state, Phase::RoundEnd(outcome));
    state.last_outcome = Some(outcome);
    state.emit(GameEvent::MusicStop);
    match outcome {
        Outcome::Won => state.emit(GameEvent::RoundWon),
        Outcome::Lost(reason) => state.emit(GameEvent::RoundLost { reason }),
    }

    let at = state.now_ms + state.settings.round_end_delay_ms;
    state.schedule.schedule(at, state.generation, TimerAction::EnterIdle);
}

/// Clear the field and show the end-of-round modal
fn enter_idle(state: &mut GameState) {
    state.clear_containers();
    set_phase(state, Phase::Idle);
}

/// First loss condition that holds, if any
fn loss_reason(state: &GameState) -> Option<LossReason> {
    let counters = &state.counters;
    let targets_alive = match state.phase {
        Phase::Wave => counters.enemies_remaining > 0,
        Phase::BossFight => counters.boss_health > 0,
        _ => false,
    };

    if counters.time_remaining_ms <= 0.0 {
        Some(LossReason::TimeExpired)
    } else if !state.player.alive {
        Some(LossReason::PlayerDestroyed)
    } else if counters.ammo_remaining == 0 && targets_alive {
        Some(LossReason::AmmoExhausted)
    } else {
        None
    }
}

/// Check transitions against the post-combat counters
pub fn evaluate(state: &mut GameState) {
    if !state.phase.is_active() {
        return;
    }

    if let Some(reason) = loss_reason(state) {
        end_round(state, Outcome::Lost(reason));
        return;
    }

    match state.phase {
        Phase::Wave if state.counters.enemies_remaining == 0 => enter_boss_fight(state),
        Phase::BossFight if state.counters.boss_health == 0 => end_round(state, Outcome::Won),
        _ => {}
    }
}

/// Fire every due timer that still belongs to the current round
pub fn run_timers(state: &mut GameState) {
    for timer in state.schedule.take_due(state.now_ms) {
        if timer.generation != state.generation {
            log::trace!(
                "Dropping stale {:?} from generation {} (current {})",
                timer.action,
                timer.generation,
                state.generation
            );
            continue;
        }
        fire_timer(state, timer);
    }
}

fn fire_timer(state: &mut GameState, timer: Timer) {
    match timer.action {
        TimerAction::SpawnWave => {
            if state.phase != Phase::Wave {
                return;
            }
            let origin = wave_origin(state);
            let count = state.counters.enemies_remaining;
            let wave = spawn_wave(state, count, origin);
            log::debug!("Spawned wave of {}", wave.len());
            state.enemies.extend(wave);
        }
        TimerAction::BossRetarget => {
            if state.phase != Phase::BossFight {
                return;
            }
            let next = next_boss_intent(&mut state.rng, &state.settings.boss_moves);
            if let Some(boss) = state.boss.as_mut().filter(|b| b.alive) {
                next.apply(&mut boss.intent);
            }
            let at = timer.fire_at_ms + state.settings.boss_retarget_interval_ms;
            state.schedule.schedule(at, timer.generation, TimerAction::BossRetarget);
        }
        TimerAction::BossFire => {
            if state.phase != Phase::BossFight {
                return;
            }
            if let Some(boss) = state.boss.as_mut().filter(|b| b.alive) {
                boss.intent.fire = true;
            }
            let at = timer.fire_at_ms + state.settings.boss_fire_interval_ms;
            state.schedule.schedule(at, timer.generation, TimerAction::BossFire);
        }
        TimerAction::EnterIdle => {
            if matches!(state.phase, Phase::RoundEnd(_)) {
                enter_idle(state);
            }
        }
    }
}

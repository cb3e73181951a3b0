//! Timer schedule
//!
//! Delayed and repeating actions are entries in a list consumed by the frame
//! driver. Each entry remembers the round generation that scheduled it; the
//! caller drops entries whose generation is no longer current.

use serde::{Deserialize, Serialize};

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerAction {
    /// Spawn the enemy wave after "start"
    SpawnWave,
    /// Pick a new boss movement (repeats)
    BossRetarget,
    /// Raise the boss fire intent (repeats)
    BossFire,
    /// Leave RoundEnd for Idle
    EnterIdle,
}

/// One pending timer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    pub fire_at_ms: f64,
    pub generation: u32,
    pub action: TimerAction,
    /// Insertion order, breaks ties between equal deadlines
    seq: u64,
}

/// Pending timers, ordered by deadline
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    timers: Vec<Timer>,
    next_seq: u64,
}

impl Schedule {
    /// Queue `action` to fire at `fire_at_ms`
    pub fn schedule(&mut self, fire_at_ms: f64, generation: u32, action: TimerAction) {
        let timer = Timer {
            fire_at_ms,
            generation,
            action,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        let idx = self
            .timers
            .partition_point(|t| (t.fire_at_ms, t.seq) <= (timer.fire_at_ms, timer.seq));
        self.timers.insert(idx, timer);
    }

    /// Remove and return every timer due at `now_ms`, earliest first
    pub fn take_due(&mut self, now_ms: f64) -> Vec<Timer> {
        let due = self.timers.partition_point(|t| t.fire_at_ms <= now_ms);
        self.timers.drain(..due).collect()
    }

    /// Cancel one kind of timer
    pub fn cancel(&mut self, action: TimerAction) {
        self.timers.retain(|t| t.action != action);
    }

    /// Cancel everything
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn pending(&self) -> impl Iterator<Item = &Timer> {
        self.timers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_in_deadline_order() {
        let mut schedule = Schedule::default();
        schedule.schedule(300.0, 0, TimerAction::EnterIdle);
        schedule.schedule(100.0, 0, TimerAction::BossFire);
        schedule.schedule(100.0, 0, TimerAction::BossRetarget);
        schedule.schedule(200.0, 0, TimerAction::SpawnWave);

        let due = schedule.take_due(200.0);
        let actions: Vec<_> = due.iter().map(|t| t.action).collect();
        assert_eq!(
            actions,
            vec![
                TimerAction::BossFire,
                TimerAction::BossRetarget,
                TimerAction::SpawnWave
            ]
        );
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn test_nothing_due_early() {
        let mut schedule = Schedule::default();
        schedule.schedule(50.0, 3, TimerAction::SpawnWave);
        assert!(schedule.take_due(49.9).is_empty());
        let due = schedule.take_due(50.0);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].generation, 3);
    }

    #[test]
    fn test_cancel_and_clear() {
        let mut schedule = Schedule::default();
        schedule.schedule(10.0, 0, TimerAction::BossFire);
        schedule.schedule(20.0, 0, TimerAction::BossRetarget);
        schedule.cancel(TimerAction::BossFire);
        assert_eq!(schedule.len(), 1);
        assert!(schedule.pending().all(|t| t.action == TimerAction::BossRetarget));
        schedule.clear();
        assert!(schedule.is_empty());
    }
}

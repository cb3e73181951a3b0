//! Ship steering: the boss's random moves and the player autopilot
//!
//! The retarget timer asks for a new boss move; the choice itself is a pure
//! function of the RNG and the configured weights. The autopilot drives the
//! player in demo mode and reads state without touching the RNG.

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};

use super::state::{GameState, Intent, Phase};
use crate::settings::BossMoveWeights;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossMove {
    MoveLeft,
    MoveRight,
    Stop,
}

impl BossMove {
    /// Overwrite the directional part of `intent`, leaving fire alone
    pub fn apply(self, intent: &mut Intent) {
        let (left, right) = match self {
            BossMove::MoveLeft => (true, false),
            BossMove::MoveRight => (false, true),
            BossMove::Stop => (false, false),
        };
        intent.move_left = left;
        intent.move_right = right;
    }
}

/// Weighted random pick of the next boss move
pub fn next_boss_intent<R: Rng + ?Sized>(rng: &mut R, weights: &BossMoveWeights) -> BossMove {
    const MOVES: [BossMove; 3] = [BossMove::MoveLeft, BossMove::MoveRight, BossMove::Stop];
    match WeightedIndex::new([weights.move_left, weights.move_right, weights.stop]) {
        Ok(dist) => MOVES[dist.sample(rng)],
        Err(e) => {
            log::warn!("Unusable boss move weights {:?}: {}", weights, e);
            BossMove::Stop
        }
    }
}

/// Horizontal slack within which the autopilot holds still
const AUTOPILOT_DEADZONE: f32 = 4.0;

/// Demo-mode player intent: chase the nearest target column and fire when under it
pub fn autopilot_intent(state: &GameState) -> Intent {
    let ship_x = state.player.body.pos.x;
    let target = match state.phase {
        Phase::Wave => state
            .enemies
            .iter()
            .filter(|e| e.alive)
            .map(|e| (e.body.pos.x, e.body.size.x))
            .min_by(|a, b| (a.0 - ship_x).abs().total_cmp(&(b.0 - ship_x).abs())),
        Phase::BossFight => state
            .boss
            .as_ref()
            .filter(|b| b.alive)
            .map(|b| (b.body.pos.x, b.body.size.x)),
        _ => None,
    };

    let Some((target_x, target_w)) = target else {
        return Intent::default();
    };

    let dx = target_x - ship_x;
    Intent {
        move_left: dx < -AUTOPILOT_DEADZONE,
        move_right: dx > AUTOPILOT_DEADZONE,
        fire: dx.abs() < target_w / 2.0,
    }
}

//! HUD view model
//!
//! Plain data for whatever draws the status bar, the boss health bar and the
//! start/end modal. Everything is derived from [`GameState`] on demand.

use serde::Serialize;

use crate::sim::{GameState, Outcome, Phase};

pub const START_BUTTON: &str = "Start Game";
pub const WIN_MESSAGE: &str = "YOU WIN";
pub const LOSE_MESSAGE: &str = "GAME OVER";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Modal {
    /// Headline above the button; absent before the first round
    pub message: Option<&'static str>,
    pub button: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub projectile_text: String,
    pub time_text: String,
    pub boss_bar_visible: bool,
    /// Filled share of the boss health bar, in `[0, 1]`
    pub boss_bar_fill: f32,
    pub modal: Option<Modal>,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        let counters = &state.counters;
        let max_health = state.settings.boss_health.max(1) as f32;
        let health = (counters.boss_health as f32).clamp(0.0, max_health);

        let modal = (state.phase == Phase::Idle).then(|| Modal {
            message: state.last_outcome.map(|outcome| match outcome {
                Outcome::Won => WIN_MESSAGE,
                Outcome::Lost(_) => LOSE_MESSAGE,
            }),
            button: START_BUTTON,
        });

        Self {
            projectile_text: projectile_text(counters.ammo_remaining),
            time_text: time_text(counters.time_remaining_ms),
            boss_bar_visible: state.boss.is_some(),
            boss_bar_fill: health / max_health,
            modal,
        }
    }
}

pub fn projectile_text(ammo: u32) -> String {
    format!("PROJECTILE: {}", ammo)
}

/// Remaining time in seconds with one decimal
pub fn time_text(time_remaining_ms: f32) -> String {
    format!("TIME: {:.1}", time_remaining_ms * 0.001)
}

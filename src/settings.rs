//! Round tuning
//!
//! Every budget, speed and delay the simulation uses. Loaded from JSON by the
//! native runner; `Settings::default()` matches the arcade build.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Failure to load or validate settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Relative weights for the boss movement choice
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossMoveWeights {
    pub move_left: u32,
    pub move_right: u32,
    pub stop: u32,
}

impl Default for BossMoveWeights {
    fn default() -> Self {
        Self {
            move_left: 1,
            move_right: 1,
            stop: 1,
        }
    }
}

impl BossMoveWeights {
    /// Sum of all weights, or None if it does not fit in a `u32`
    pub fn total(&self) -> Option<u32> {
        self.move_left
            .checked_add(self.move_right)?
            .checked_add(self.stop)
    }
}

/// Round tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport ===
    pub view_width: f32,
    pub view_height: f32,

    // === Budgets ===
    /// Time budget per phase (ms)
    pub round_time_ms: f32,
    /// Projectiles per phase
    pub ammo: u32,
    /// Enemies in the wave
    pub enemy_count: u32,
    pub boss_health: u32,

    // === Speeds (px/s) ===
    pub ship_speed: f32,
    pub enemy_speed: f32,
    pub player_projectile_speed: f32,
    pub boss_projectile_speed: f32,
    pub particle_spread: f32,
    pub particle_fade_per_sec: f32,

    // === Cooldowns and timers (ms) ===
    pub player_fire_cooldown_ms: f32,
    pub boss_fire_cooldown_ms: f32,
    pub boss_fire_interval_ms: f64,
    pub boss_retarget_interval_ms: f64,
    pub wave_spawn_delay_ms: f64,
    pub round_end_delay_ms: f64,

    // === Effects ===
    pub particles_per_px: f32,
    pub max_particles: usize,

    // === Boss AI ===
    pub boss_moves: BossMoveWeights,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,

            round_time_ms: ROUND_TIME_MS,
            ammo: COUNT_PROJECTILE,
            enemy_count: COUNT_ENEMY,
            boss_health: BOSS_HEALTH,

            ship_speed: SHIP_SPEED,
            enemy_speed: ENEMY_SPEED,
            player_projectile_speed: PLAYER_PROJECTILE_SPEED,
            boss_projectile_speed: BOSS_PROJECTILE_SPEED,
            particle_spread: PARTICLE_SPREAD,
            particle_fade_per_sec: PARTICLE_FADE_PER_SEC,

            player_fire_cooldown_ms: PLAYER_FIRE_COOLDOWN_MS,
            boss_fire_cooldown_ms: BOSS_FIRE_COOLDOWN_MS,
            boss_fire_interval_ms: BOSS_FIRE_INTERVAL_MS,
            boss_retarget_interval_ms: BOSS_RETARGET_INTERVAL_MS,
            wave_spawn_delay_ms: WAVE_SPAWN_DELAY_MS,
            round_end_delay_ms: ROUND_END_DELAY_MS,

            particles_per_px: PARTICLES_PER_PX,
            max_particles: MAX_PARTICLES,

            boss_moves: BossMoveWeights::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject tuning the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: &str) -> SettingsError {
            SettingsError::Invalid {
                field,
                reason: reason.to_string(),
            }
        }

        let positive = [
            ("view_width", self.view_width),
            ("view_height", self.view_height),
            ("round_time_ms", self.round_time_ms),
            ("ship_speed", self.ship_speed),
            ("enemy_speed", self.enemy_speed),
            ("player_projectile_speed", self.player_projectile_speed),
            ("boss_projectile_speed", self.boss_projectile_speed),
            ("particle_fade_per_sec", self.particle_fade_per_sec),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, "must be a positive number"));
            }
        }

        let non_negative = [
            ("particle_spread", self.particle_spread),
            ("player_fire_cooldown_ms", self.player_fire_cooldown_ms),
            ("boss_fire_cooldown_ms", self.boss_fire_cooldown_ms),
            ("particles_per_px", self.particles_per_px),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, "must not be negative"));
            }
        }

        let intervals = [
            ("boss_fire_interval_ms", self.boss_fire_interval_ms),
            ("boss_retarget_interval_ms", self.boss_retarget_interval_ms),
        ];
        for (field, value) in intervals {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, "must be a positive number"));
            }
        }
        let delays = [
            ("wave_spawn_delay_ms", self.wave_spawn_delay_ms),
            ("round_end_delay_ms", self.round_end_delay_ms),
        ];
        for (field, value) in delays {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, "must not be negative"));
            }
        }

        if self.ammo == 0 {
            return Err(invalid("ammo", "must be at least 1"));
        }
        if self.enemy_count == 0 {
            return Err(invalid("enemy_count", "must be at least 1"));
        }
        if self.boss_health == 0 {
            return Err(invalid("boss_health", "must be at least 1"));
        }
        match self.boss_moves.total() {
            None => return Err(invalid("boss_moves", "weights must sum to at most 4294967295")),
            Some(0) => return Err(invalid("boss_moves", "at least one weight must be non-zero")),
            Some(_) => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "ammo": 3, "boss_health": 7 }"#).unwrap();
        assert_eq!(settings.ammo, 3);
        assert_eq!(settings.boss_health, 7);
        assert_eq!(settings.enemy_count, COUNT_ENEMY);
        assert_eq!(settings.view_width, VIEW_WIDTH);
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.boss_moves.stop = 4;
        settings.round_time_ms = 12_345.0;
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_zero_ammo() {
        let err = Settings::from_json(r#"{ "ammo": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "ammo", .. }));
    }

    #[test]
    fn test_rejects_all_zero_boss_weights() {
        let err = Settings::from_json(
            r#"{ "boss_moves": { "move_left": 0, "move_right": 0, "stop": 0 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "boss_moves", .. }));
    }

    #[test]
    fn test_rejects_overflowing_boss_weights() {
        let err = Settings::from_json(
            r#"{ "boss_moves": { "move_left": 4000000000, "move_right": 4000000000, "stop": 1 } }"#,
        )
        .unwrap_err();
        match err {
            SettingsError::Invalid { field, reason } => {
                assert_eq!(field, "boss_moves");
                assert!(reason.contains("sum"));
            }
            other => panic!("unexpected error: {other}"),
        }

        // Wrapping to zero is reported as overflow, not as all-zero
        let weights = BossMoveWeights {
            move_left: 1 << 31,
            move_right: 1 << 31,
            stop: 0,
        };
        assert_eq!(weights.total(), None);
    }

    #[test]
    fn test_rejects_negative_viewport() {
        let err = Settings::from_json(r#"{ "view_width": -1.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "view_width", .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}

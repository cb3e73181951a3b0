//! Audio cues
//!
//! The simulation only emits [`GameEvent`]s. This module maps them to sound
//! effects and keeps track of which cues a real mixer would be playing. The
//! native build has no mixer, so cues are logged and recorded instead.

use serde::Serialize;

use crate::sim::{EntityKind, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SoundEffect {
    /// Background music (looped)
    Music,
    /// Any ship fires
    Shot,
    /// Something was destroyed or the boss took a hit
    Explosion,
    /// Sting at round start and boss entry
    Start,
    /// Boss fight music (looped)
    BossFight,
    /// Round won
    Win,
    /// Round lost
    Lose,
}

impl SoundEffect {
    /// The cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::MusicStart => Some(Self::Music),
            GameEvent::ShotFired { .. } => Some(Self::Shot),
            GameEvent::BossHit { .. } => Some(Self::Explosion),
            // The killing blow already sounded through BossHit
            GameEvent::TargetDestroyed {
                kind: EntityKind::Boss,
                ..
            } => None,
            GameEvent::TargetDestroyed { .. } => Some(Self::Explosion),
            GameEvent::BossPhaseStarted => Some(Self::BossFight),
            GameEvent::RoundWon => Some(Self::Win),
            GameEvent::RoundLost { .. } => Some(Self::Lose),
            GameEvent::MusicStop | GameEvent::PhaseChanged { .. } => None,
        }
    }

    /// Mix level of the effect before master/sfx volume
    pub fn base_volume(self) -> f32 {
        match self {
            Self::Music => 0.3,
            Self::Shot | Self::Explosion | Self::BossFight => 0.2,
            Self::Start | Self::Win | Self::Lose => 0.5,
        }
    }

    pub fn is_loop(self) -> bool {
        matches!(self, Self::Music | Self::BossFight)
    }
}

/// One cue handed to the mixer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cue {
    pub effect: SoundEffect,
    pub volume: f32,
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// Loop currently playing, if any
    music: Option<SoundEffect>,
    played: Vec<Cue>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            music: None,
            played: Vec::new(),
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// The loop that is currently playing
    pub fn music(&self) -> Option<SoundEffect> {
        self.music
    }

    /// Play a sound effect.
    ///
    /// Loops replace the current loop and open with the start sting; the
    /// win and lose stings cut the music.
    pub fn play(&mut self, effect: SoundEffect) {
        match effect {
            SoundEffect::Music | SoundEffect::BossFight => {
                self.music = Some(effect);
                self.cue(SoundEffect::Start);
            }
            SoundEffect::Win | SoundEffect::Lose => self.stop_music(),
            _ => {}
        }
        self.cue(effect);
    }

    pub fn stop_music(&mut self) {
        if let Some(music) = self.music.take() {
            log::debug!("Stopping {:?}", music);
        }
    }

    fn cue(&mut self, effect: SoundEffect) {
        let volume = self.effective_volume() * effect.base_volume();
        if volume <= 0.0 {
            return;
        }
        log::debug!("Cue {:?} at {:.2}", effect, volume);
        self.played.push(Cue { effect, volume });
    }

    /// Play the cues for a batch of simulation events
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if *event == GameEvent::MusicStop {
                self.stop_music();
            } else if let Some(effect) = SoundEffect::for_event(event) {
                self.play(effect);
            }
        }
    }

    /// Take every cue played since the last call
    pub fn take_played(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.played)
    }
}

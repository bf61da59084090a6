//! Sound cues and volume mixing
//!
//! The simulation only names cues; an `AudioBackend` owned by the host
//! actually makes noise. `AudioManager` sits in between and applies the
//! player's volume settings.

use serde::{Deserialize, Serialize};

use crate::Settings;
use crate::platform::AudioBackend;

/// Sound cues the game can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Star thrown
    Fire,
    /// Looping background track
    BackgroundMusic,
}

impl SoundEffect {
    /// Asset name the host should load for this cue
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::Fire => "pew-pew",
            SoundEffect::BackgroundMusic => "background-music",
        }
    }

    pub fn is_music(&self) -> bool {
        matches!(self, SoundEffect::BackgroundMusic)
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B, settings: &Settings) -> Self {
        Self {
            backend,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
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

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume for a cue
    fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if effect.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel
    }

    /// Fire-and-forget one-shot
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(effect);
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, vol, false);
    }

    /// Start a looping track
    pub fn play_loop(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(effect);
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, vol, true);
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Backend that only logs cues (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioBackend for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32, looped: bool) {
        log::debug!(
            "♪ {} (vol {:.2}{})",
            effect.asset_name(),
            volume,
            if looped { ", looped" } else { "" }
        );
    }
}

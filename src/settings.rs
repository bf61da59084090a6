//! Game settings
//!
//! Every tunable the simulation reads lives here. Loaded from JSON; any
//! field left out of the file keeps its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Settings file could not be read
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid JSON for `Settings`
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is outside its allowed range
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Sprites ===
    pub player_size: Vec2,
    pub enemy_size: Vec2,
    pub projectile_size: Vec2,

    // === Timing ===
    /// Seconds between monster spawns
    pub spawn_interval: f32,
    /// Shortest monster traversal (seconds)
    pub enemy_min_duration: f32,
    /// Longest monster traversal (seconds)
    pub enemy_max_duration: f32,
    /// Distance a throw travels
    pub projectile_reach: f32,
    /// Seconds a throw is in flight
    pub projectile_duration: f32,
    /// Background shift per tick
    pub scroll_per_tick: f32,
    /// Seconds between autopilot throws in idle mode
    pub autopilot_interval: f32,

    // === Rules ===
    /// Hits needed to win
    pub win_threshold: u32,
    /// Fixed RNG seed; a random one is drawn when absent
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player_size: PLAYER_SIZE,
            enemy_size: ENEMY_SIZE,
            projectile_size: PROJECTILE_SIZE,

            spawn_interval: SPAWN_INTERVAL,
            enemy_min_duration: ENEMY_MIN_DURATION,
            enemy_max_duration: ENEMY_MAX_DURATION,
            projectile_reach: PROJECTILE_REACH,
            projectile_duration: PROJECTILE_DURATION,
            scroll_per_tick: SCROLL_PER_TICK,
            autopilot_interval: 0.3,

            win_threshold: WIN_THRESHOLD,
            seed: None,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    #[inline]
    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    /// Player spawn point (10% in from the left, vertically centered)
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(self.screen_width * 0.1, self.screen_height * 0.5)
    }

    /// Score label anchor (5% in from the left, vertically centered)
    pub fn score_label_pos(&self) -> Vec2 {
        Vec2::new(self.screen_width * 0.05, self.screen_height * 0.5)
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    field,
                    reason: format!("must be positive, got {value}"),
                })
            }
        }

        fn positive_size(field: &'static str, size: Vec2) -> Result<(), SettingsError> {
            positive(field, size.x)?;
            positive(field, size.y)
        }

        positive("screen_width", self.screen_width)?;
        positive("screen_height", self.screen_height)?;
        positive_size("player_size", self.player_size)?;
        positive_size("enemy_size", self.enemy_size)?;
        positive_size("projectile_size", self.projectile_size)?;
        positive("spawn_interval", self.spawn_interval)?;
        positive("enemy_min_duration", self.enemy_min_duration)?;
        positive("enemy_max_duration", self.enemy_max_duration)?;
        positive("projectile_reach", self.projectile_reach)?;
        positive("projectile_duration", self.projectile_duration)?;
        positive("autopilot_interval", self.autopilot_interval)?;

        // Tiles are one screen wide; a larger shift would skip the wrap
        positive("scroll_per_tick", self.scroll_per_tick)?;
        if self.scroll_per_tick > self.screen_width {
            return Err(SettingsError::Invalid {
                field: "scroll_per_tick",
                reason: format!(
                    "{} exceeds screen_width {}",
                    self.scroll_per_tick, self.screen_width
                ),
            });
        }

        if self.enemy_max_duration < self.enemy_min_duration {
            return Err(SettingsError::Invalid {
                field: "enemy_max_duration",
                reason: format!(
                    "{} is below enemy_min_duration {}",
                    self.enemy_max_duration, self.enemy_min_duration
                ),
            });
        }
        if self.enemy_size.y > self.screen_height {
            return Err(SettingsError::Invalid {
                field: "enemy_size",
                reason: "taller than the screen".to_string(),
            });
        }
        if self.win_threshold == 0 {
            return Err(SettingsError::Invalid {
                field: "win_threshold",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.master_volume)
            || !(0.0..=1.0).contains(&self.sfx_volume)
            || !(0.0..=1.0).contains(&self.music_volume)
        {
            return Err(SettingsError::Invalid {
                field: "volume",
                reason: "volumes must be within 0.0 - 1.0".to_string(),
            });
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }
}

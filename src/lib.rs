//! Ninja Shooter - a single-screen arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, contacts, outcome)
//! - `renderer`: Per-frame draw list handed to whatever draws the scene
//! - `platform`: Collaborator seams (audio backend, game-over screen)
//! - `audio`: Sound cues and volume mixing
//! - `settings`: Data-driven game configuration

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed frame step used by the headless runner (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Upper bound on contact substeps within one tick
    pub const MAX_CONTACT_SUBSTEPS: u32 = 32;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Sprite sizes
    pub const PLAYER_SIZE: Vec2 = Vec2::new(30.0, 40.0);
    pub const ENEMY_SIZE: Vec2 = Vec2::new(40.0, 40.0);
    pub const PROJECTILE_SIZE: Vec2 = Vec2::new(16.0, 16.0);

    /// Seconds between monster spawns
    pub const SPAWN_INTERVAL: f32 = 1.0;
    /// Monster traversal duration range (seconds)
    pub const ENEMY_MIN_DURATION: f32 = 2.0;
    pub const ENEMY_MAX_DURATION: f32 = 4.0;

    /// How far a throw travels; far enough to always leave the screen
    pub const PROJECTILE_REACH: f32 = 1000.0;
    /// Seconds a throw takes to cover `PROJECTILE_REACH`
    pub const PROJECTILE_DURATION: f32 = 2.0;

    /// Background shift per tick (world units)
    pub const SCROLL_PER_TICK: f32 = 2.0;

    /// Hits needed to win
    pub const WIN_THRESHOLD: u32 = 30;

    /// Draw order
    pub const Z_BACKGROUND: f32 = 1.0;
    pub const Z_PLAYER: f32 = 2.0;
    pub const Z_ACTOR: f32 = 3.0;
    pub const Z_SCORE: f32 = 40.0;
}

/// Unit vector pointing along `v`, or `None` when `v` has no length.
///
/// Division by a zero length is undefined, so callers get an explicit miss
/// instead of a NaN vector.
#[inline]
pub fn normalized(v: Vec2) -> Option<Vec2> {
    let len = v.length();
    if len > f32::EPSILON {
        Some(v / len)
    } else {
        None
    }
}

/// Where a throw from `origin` toward `aim` lands after travelling `reach`.
///
/// Returns `None` for aim points level with or behind the origin
/// (non-positive horizontal offset): throws only go down-range.
pub fn throw_target(origin: Vec2, aim: Vec2, reach: f32) -> Option<Vec2> {
    let offset = aim - origin;
    if offset.x <= 0.0 {
        return None;
    }
    let direction = normalized(offset)?;
    Some(origin + direction * reach)
}

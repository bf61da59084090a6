//! Game state and core simulation types
//!
//! `GameState` is the session context handed to every system; nothing in
//! the simulation lives in globals.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionCategory, ContactTracker};
use super::motion::Motion;
use super::registry::Registry;
use super::rng::SimRng;
use super::score::{Outcome, Scoreboard};
use super::spawner::Spawner;
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::{Settings, throw_target};

/// Stable entity identifier (never reused within a session)
pub type EntityId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Projectile,
    Enemy,
    BackgroundTile,
}

impl EntityKind {
    /// Collision group; only monsters and stars take part in contacts
    pub const fn category(self) -> CollisionCategory {
        match self {
            EntityKind::Projectile => CollisionCategory::Projectile,
            EntityKind::Enemy => CollisionCategory::Monster,
            EntityKind::Player | EntityKind::BackgroundTile => CollisionCategory::None,
        }
    }

    pub const fn z_order(self) -> f32 {
        match self {
            EntityKind::BackgroundTile => Z_BACKGROUND,
            EntityKind::Player => Z_PLAYER,
            EntityKind::Projectile | EntityKind::Enemy => Z_ACTOR,
        }
    }
}

/// The ninja. Exactly one per session, never destroyed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
}

/// A thrown star
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    pub motion: Motion,
}

impl Projectile {
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.x / 2.0
    }
}

/// A monster crossing right to left
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    /// Traversal; its duration is the loss deadline
    pub motion: Motion,
    /// Loses the session when the traversal completes while armed
    pub loss_armed: bool,
}

impl Enemy {
    /// Cancel the pending loss trigger
    pub fn disarm(&mut self) {
        self.loss_armed = false;
    }

    /// Traversal finished with the loss trigger still armed
    pub fn breached(&self) -> bool {
        self.loss_armed && self.motion.is_complete()
    }
}

/// One of the two scrolling backdrop tiles. `pos` is the bottom-left corner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundTile {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    pub motion: Motion,
}

/// On-screen hit counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreLabel {
    pub pos: Vec2,
    pub text: String,
}

/// Side effects for the host, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Fire-and-forget one-shot sound
    PlaySound(SoundEffect),
    /// Start a looping track
    PlayLoop(SoundEffect),
    /// Hit count changed
    ScoreChanged(u32),
    /// Session ended; emitted exactly once
    GameOver { won: bool, score: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub rng: SimRng,
    pub registry: Registry,
    pub scoreboard: Scoreboard,
    pub spawner: Spawner,
    pub contacts: ContactTracker,
    pub score_label: ScoreLabel,
    /// Seconds simulated so far
    pub clock: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seconds until the autopilot may throw again
    pub autopilot_cooldown: f32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Start a session: place the player, lay the backdrop and start the music
    pub fn new(settings: Settings, seed: u64) -> Self {
        let registry = Registry::new(
            settings.player_start(),
            settings.player_size,
            settings.screen_size(),
            settings.scroll_per_tick,
        );
        log::info!(
            "Session started with seed {} ({}x{}, win at {} hits)",
            seed,
            settings.screen_width,
            settings.screen_height,
            settings.win_threshold
        );

        Self {
            rng: SimRng::new(seed),
            registry,
            scoreboard: Scoreboard::new(settings.win_threshold),
            spawner: Spawner::new(settings.spawn_interval),
            contacts: ContactTracker::new(),
            score_label: ScoreLabel {
                pos: settings.score_label_pos(),
                text: "0".to_string(),
            },
            clock: 0.0,
            time_ticks: 0,
            autopilot_cooldown: 0.0,
            events: vec![GameEvent::PlayLoop(SoundEffect::BackgroundMusic)],
            settings,
        }
    }

    #[inline]
    pub fn hit_count(&self) -> u32 {
        self.scoreboard.hit_count()
    }

    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.scoreboard.outcome()
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Throw a star from the player toward a world-space aim point.
    ///
    /// Aim points level with or behind the player are ignored, as is any
    /// throw after the session has ended. The star joins the live set at
    /// the start of the next tick.
    pub fn fire(&mut self, aim: Vec2) -> Option<EntityId> {
        if self.outcome().is_terminal() {
            return None;
        }
        let origin = self.registry.player().pos;
        let Some(target) = throw_target(origin, aim, self.settings.projectile_reach) else {
            log::trace!("Ignoring throw toward {aim} (not down-range)");
            return None;
        };

        let id = self.registry.spawn_projectile(
            origin,
            self.settings.projectile_size,
            Motion::move_to(origin, target, self.settings.projectile_duration),
        );
        self.events.push(GameEvent::PlaySound(SoundEffect::Fire));
        log::debug!("Star {} thrown toward {}", id, target);
        Some(id)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Pending events, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Refresh the label after the hit count changes
    pub(crate) fn update_score_label(&mut self) {
        let hits = self.hit_count();
        self.score_label.text = hits.to_string();
        self.events.push(GameEvent::ScoreChanged(hits));
    }
}

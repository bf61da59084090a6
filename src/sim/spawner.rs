//! Periodic monster spawning

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::motion::Motion;
use super::registry::Registry;
use super::rng::SimRng;
use super::state::EntityId;
use crate::Settings;

/// Fixed-interval spawn timer. The first spawn is due on the first tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    interval: f32,
    accumulator: f32,
}

impl Spawner {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulator: interval,
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Advance the timer and return how many spawns fell due
    pub fn tick(&mut self, dt: f32) -> u32 {
        if self.interval <= 0.0 {
            return 0;
        }
        self.accumulator += dt;
        let mut due = 0;
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            due += 1;
        }
        due
    }
}

/// Spawn one monster just off the right edge at a random height, walking to
/// the mirrored point just off the left edge over a random duration.
pub fn spawn_enemy(registry: &mut Registry, rng: &mut SimRng, settings: &Settings) -> EntityId {
    let size = settings.enemy_size;
    let half = size / 2.0;

    let y = rng.uniform_range(half.y, settings.screen_height - half.y);
    let start = Vec2::new(settings.screen_width + half.x, y);
    let target = Vec2::new(-half.x, y);
    let duration = rng.uniform_range(settings.enemy_min_duration, settings.enemy_max_duration);

    let id = registry.spawn_enemy(start, size, Motion::move_to(start, target, duration));
    log::debug!("Monster {} spawned at y={:.1}, crossing in {:.2}s", id, y, duration);
    id
}

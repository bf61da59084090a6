//! Per-entity motion intents
//!
//! Motion is a pure function of accumulated elapsed time, so a scripted
//! move finishes on exactly the tick its duration runs out.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Linear move from `from` to `to` over `duration` seconds
    MoveTo {
        from: Vec2,
        to: Vec2,
        duration: f32,
        elapsed: f32,
    },
    /// Fixed displacement applied once per tick
    Drift { per_tick: Vec2 },
}

impl Motion {
    pub fn move_to(from: Vec2, to: Vec2, duration: f32) -> Self {
        Motion::MoveTo {
            from,
            to,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn drift(per_tick: Vec2) -> Self {
        Motion::Drift { per_tick }
    }

    /// Advance by `dt` and return the new position
    pub fn advance(&mut self, pos: Vec2, dt: f32) -> Vec2 {
        match self {
            Motion::MoveTo {
                from,
                to,
                duration,
                elapsed,
            } => {
                *elapsed = (*elapsed + dt).min(*duration);
                let t = if *duration > 0.0 {
                    *elapsed / *duration
                } else {
                    1.0
                };
                from.lerp(*to, t)
            }
            Motion::Drift { per_tick } => pos + *per_tick,
        }
    }

    /// True once a scripted move has reached its target. Drifts never finish.
    pub fn is_complete(&self) -> bool {
        match *self {
            Motion::MoveTo {
                duration, elapsed, ..
            } => elapsed >= duration,
            Motion::Drift { .. } => false,
        }
    }

    pub fn target(&self) -> Option<Vec2> {
        match *self {
            Motion::MoveTo { to, .. } => Some(to),
            Motion::Drift { .. } => None,
        }
    }

    /// Velocity in units per second (drifts report per-tick displacement)
    pub fn velocity(&self) -> Vec2 {
        match *self {
            Motion::MoveTo {
                from, to, duration, ..
            } if duration > 0.0 => (to - from) / duration,
            Motion::MoveTo { .. } => Vec2::ZERO,
            Motion::Drift { per_tick } => per_tick,
        }
    }

    /// Seconds left before a scripted move completes
    pub fn remaining(&self) -> f32 {
        match *self {
            Motion::MoveTo {
                duration, elapsed, ..
            } => (duration - elapsed).max(0.0),
            Motion::Drift { .. } => f32::INFINITY,
        }
    }
}

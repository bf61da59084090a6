//! Hit counting and the win/loss state machine

use serde::{Deserialize, Serialize};

/// Session outcome. `Won` and `Lost` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scoreboard {
    hit_count: u32,
    win_threshold: u32,
    outcome: Outcome,
}

impl Scoreboard {
    pub fn new(win_threshold: u32) -> Self {
        Self {
            hit_count: 0,
            win_threshold,
            outcome: Outcome::InProgress,
        }
    }

    pub fn hit_count(&self) -> u32 {
        self.hit_count
    }

    pub fn win_threshold(&self) -> u32 {
        self.win_threshold
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn threshold_reached(&self) -> bool {
        self.hit_count >= self.win_threshold
    }

    /// Count one resolved hit.
    ///
    /// Refused (returns false) once the session is over or the win
    /// threshold is already met, so the count never passes the threshold.
    pub fn record_hit(&mut self) -> bool {
        if self.outcome.is_terminal() || self.threshold_reached() {
            return false;
        }
        self.hit_count += 1;
        true
    }

    /// Enter a terminal outcome. Only the first call takes effect; returns
    /// true when this call performed the transition.
    pub fn conclude(&mut self, outcome: Outcome) -> bool {
        if self.outcome.is_terminal() || !outcome.is_terminal() {
            return false;
        }
        self.outcome = outcome;
        true
    }
}

//! Platform abstraction layer
//!
//! Seams to the host's collaborators:
//! - Audio output
//! - The game-over screen
//!
//! `EventRouter` drains simulation events into them once per frame.

use crate::audio::{AudioManager, SoundEffect};
use crate::sim::GameEvent;

/// Something that can play a sound cue
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32, looped: bool);
}

/// Shows the end-of-session screen
pub trait GameOverPresenter {
    fn present_game_over(&mut self, won: bool, score: u32);
}

/// Routes simulation events to collaborators
#[derive(Debug, Default)]
pub struct EventRouter {
    score: u32,
    game_over: Option<(bool, u32)>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last score reported by the simulation
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Outcome handed to the presenter, if any
    pub fn game_over(&self) -> Option<(bool, u32)> {
        self.game_over
    }

    pub fn dispatch<B, P>(
        &mut self,
        events: impl IntoIterator<Item = GameEvent>,
        audio: &mut AudioManager<B>,
        presenter: &mut P,
    ) where
        B: AudioBackend,
        P: GameOverPresenter,
    {
        for event in events {
            match event {
                GameEvent::PlaySound(effect) => audio.play(effect),
                GameEvent::PlayLoop(effect) => audio.play_loop(effect),
                GameEvent::ScoreChanged(score) => self.score = score,
                GameEvent::GameOver { won, score } => {
                    if self.game_over.is_some() {
                        log::warn!("Duplicate game over ignored");
                        continue;
                    }
                    self.game_over = Some((won, score));
                    presenter.present_game_over(won, score);
                }
            }
        }
    }
}

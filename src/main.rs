//! Ninja Shooter entry point
//!
//! Headless native runner: plays one session on autopilot at a fixed
//! timestep and prints a JSON summary.
//!
//! Usage: `ninja-shooter [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use serde::Serialize;

    use ninja_shooter::audio::{AudioManager, LogAudio};
    use ninja_shooter::consts::FRAME_DT;
    use ninja_shooter::platform::{EventRouter, GameOverPresenter};
    use ninja_shooter::renderer::build_frame;
    use ninja_shooter::sim::{GameState, Outcome, TickInput, tick};
    use ninja_shooter::Settings;

    /// Give up after this many simulated seconds
    const MAX_SESSION_SECS: f32 = 600.0;

    /// Game-over "screen" that just logs
    struct LogScreen;

    impl GameOverPresenter for LogScreen {
        fn present_game_over(&mut self, won: bool, score: u32) {
            log::info!("{} Score: {}", if won { "You Won!" } else { "You Lose :[" }, score);
        }
    }

    #[derive(Serialize)]
    struct SessionSummary {
        seed: u64,
        outcome: Outcome,
        hits: u32,
        seconds: f32,
        ticks: u64,
        live_entities: usize,
    }

    pub fn run() {
        env_logger::init();
        log::info!("Ninja Shooter (headless) starting...");

        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::load_or_default(path),
            None => Settings::default(),
        };
        let seed = settings.seed.unwrap_or_else(rand::random);

        let mut audio = AudioManager::new(LogAudio, &settings);
        let mut state = GameState::new(settings, seed);
        let mut router = EventRouter::new();
        let mut screen = LogScreen;

        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        // No wall clock: one fixed tick per simulated frame
        while !state.outcome().is_terminal() && state.clock < MAX_SESSION_SECS {
            tick(&mut state, &input, FRAME_DT);
            router.dispatch(state.drain_events(), &mut audio, &mut screen);

            if state.time_ticks % 600 == 0 {
                let frame = build_frame(&state);
                log::debug!(
                    "t={:.1}s hits={} sprites={} ({} bytes)",
                    state.clock,
                    state.hit_count(),
                    frame.sprites.len(),
                    frame.sprite_bytes().len()
                );
            }
        }

        if !state.outcome().is_terminal() {
            log::warn!("Session hit the {MAX_SESSION_SECS}s cap without an outcome");
        }

        let summary = SessionSummary {
            seed: state.seed(),
            outcome: state.outcome(),
            hits: state.hit_count(),
            seconds: state.clock,
            ticks: state.time_ticks,
            live_entities: state.registry.live_count(),
        };
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to encode session summary: {e}"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive the library directly
}

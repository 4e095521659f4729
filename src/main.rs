//! Frogger headless demo host
//!
//! Drives the simulation with a scripted input stream at a fixed host frame
//! rate and logs the signals it observes.
//!
//! Usage: `frogger [seed] [frames] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use frogger::consts::*;
    use frogger::sim::{GameState, Signal, Signals, TickInput, tick};
    use frogger::{Tuning, TuningError};
    use thiserror::Error;

    /// Host frame time; two simulation substeps per frame
    const HOST_DT: f32 = 1.0 / 60.0;

    /// Host-side game wrapper
    pub struct Game {
        pub state: GameState,
        accumulator: f32,
        input: TickInput,
        last_signals: Signals,
        frame: u64,
    }

    impl Game {
        pub fn new(seed: u64, tuning: Tuning) -> Self {
            let state = GameState::with_tuning(seed, tuning);
            let last_signals = state.signals();
            Self {
                state,
                accumulator: 0.0,
                input: TickInput::default(),
                last_signals,
                frame: 0,
            }
        }

        /// Scripted player: mostly hops forward, sidesteps now and then
        fn script_input(&mut self) {
            self.input = TickInput::default();
            match self.frame % 90 {
                0 | 30 | 60 => self.input.move_up = true,
                45 if self.frame % 270 == 45 => self.input.move_left = true,
                75 if self.frame % 270 == 165 => self.input.move_right = true,
                _ => {}
            }
        }

        pub fn update(&mut self, dt: f32) {
            self.script_input();

            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // One-shot inputs are consumed by the first substep
                self.input = TickInput::default();
            }

            self.report();
            self.frame += 1;
        }

        fn report(&mut self) {
            let signals = self.state.signals();
            for signal in Signals::edges(&self.last_signals, &signals) {
                match signal {
                    Signal::FrogDied { drowned } => log::info!(
                        "[{}] frog {} ({} lives left)",
                        self.frame,
                        if drowned { "drowned" } else { "was hit" },
                        self.state.lives
                    ),
                    Signal::GoalClaimed { total } => log::info!(
                        "[{}] goal claimed ({} of {}), score {}",
                        self.frame,
                        total,
                        self.state.zone_indices.len(),
                        self.state.score
                    ),
                    Signal::LevelWon => {
                        log::info!("[{}] level {} won", self.frame, signals.level)
                    }
                    Signal::GameOver => {
                        log::info!("[{}] game over, score {}", self.frame, self.state.score)
                    }
                    Signal::LevelStarted { level } => {
                        log::info!("[{}] level {} started", self.frame, level)
                    }
                }
            }
            self.last_signals = signals;
        }
    }

    /// Why a tuning file could not be used
    #[derive(Debug, Error)]
    pub enum LoadError {
        #[error("cannot read {path}: {source}")]
        Read {
            path: String,
            source: std::io::Error,
        },
        #[error("{path}: {source}")]
        Tuning { path: String, source: TuningError },
    }

    /// Default tuning, or the validated contents of `path`
    pub fn load_tuning(path: Option<&str>) -> Result<Tuning, LoadError> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_string(),
            source,
        })?;
        Tuning::from_json(&json).map_err(|source| LoadError::Tuning {
            path: path.to_string(),
            source,
        })
    }

    pub fn run() {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let seed = args.first().and_then(|s| s.parse().ok()).unwrap_or(12345);
        let frames: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3600);

        let tuning = match load_tuning(args.get(2).map(String::as_str)) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Invalid tuning, {e}");
                std::process::exit(1);
            }
        };

        log::info!(
            "Frogger demo: seed {}, {} frames, {} difficulty",
            seed,
            frames,
            tuning.difficulty.as_str()
        );

        let mut game = Game::new(seed, tuning);
        for _ in 0..frames {
            game.update(HOST_DT);
        }

        let state = &game.state;
        log::info!(
            "Finished on level {} with score {} (high score {}, {} lives)",
            state.level,
            state.score,
            state.high_score,
            state.lives
        );
        for (rank, entry) in state.high_scores.entries.iter().enumerate() {
            log::info!("  #{} {} (level {})", rank + 1, entry.score, entry.level);
        }
        println!("{}", state.score);
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library only on wasm; hosts embed `frogger::sim` directly
}

//! Game state and session bookkeeping
//!
//! One `GameState` is the whole simulation context. The host owns it and
//! passes it by `&mut` to [`tick`](super::tick::tick) once per frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::EntityStore;
use super::frog::Frog;
use super::grid::{Grid, Rect};
use super::level::{self, RIVER_FIRST_ROW, RIVER_LAST_ROW};
use super::signals::Signals;
use crate::highscores::HighScores;
use crate::settings::Tuning;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Every goal claimed; waiting before the next level is built
    LevelClear,
    /// Out of lives; waiting before the session restarts
    GameOver,
}

/// Where the bonus fly sits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlyState {
    /// Goal zone index (creation order), if the fly is out
    pub zone: Option<usize>,
    /// Seconds until it relocates
    pub timer: f32,
}

impl FlyState {
    pub fn new(period: f32) -> Self {
        Self {
            zone: None,
            timer: period,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub grid: Grid,
    /// River area the frog drowns in
    pub water: Rect,
    /// Every non-player entity, in creation order
    pub entities: EntityStore,
    /// The player, kept outside the entity store
    pub frog: Frog,
    /// Store indices of the goal zones, in creation order
    pub zone_indices: Vec<usize>,
    /// Store indices of the fly tokens, parallel to `zone_indices`
    pub fly_indices: Vec<usize>,
    pub fly: FlyState,
    /// Current level (1-based)
    pub level: u32,
    pub lives: u8,
    pub score: u64,
    pub high_score: u64,
    /// Goal zones still unclaimed this level
    pub win_count: u32,
    pub phase: GamePhase,
    pub paused: bool,
    /// Input freeze after a level clear or game over
    pub wait_timer: f32,
    /// Simulated seconds (pauses excluded)
    pub time: f32,
    pub high_scores: HighScores,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game and build level 1
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let grid = Grid::centered(
            Vec2::new(tuning.view_width, tuning.view_height),
            tuning.tile_unit,
            tuning.grid_cols,
            tuning.grid_rows,
        );
        let water = grid.row_span(RIVER_FIRST_ROW, RIVER_LAST_ROW);
        let spawn = grid.position(tuning.spawn_col, tuning.spawn_row);
        let frog = Frog::new(spawn, tuning.tile_unit, tuning.frog_speed_px());

        let mut state = Self {
            seed,
            grid,
            water,
            entities: EntityStore::new(),
            frog,
            zone_indices: Vec::new(),
            fly_indices: Vec::new(),
            fly: FlyState::new(tuning.fly_period),
            level: 1,
            lives: tuning.lives,
            score: 0,
            high_score: 0,
            win_count: 0,
            phase: GamePhase::Playing,
            paused: false,
            wait_timer: 0.0,
            time: 0.0,
            high_scores: HighScores::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        };

        level::create_next_level(&mut state);

        state
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_game_won(&self) -> bool {
        self.phase == GamePhase::LevelClear
    }

    /// Whether directional input reaches the frog this frame
    pub fn accepts_input(&self) -> bool {
        self.phase == GamePhase::Playing && self.lives > 0 && self.wait_timer <= 0.0
    }

    /// Add points, keeping the high score current
    pub fn add_score(&mut self, points: u64) {
        self.score += points;
        self.high_score = self.high_score.max(self.score);
    }

    /// Snapshot of the flags a host polls each frame
    pub fn signals(&self) -> Signals {
        Signals {
            level: self.level,
            frog_dead: self.frog.is_dead,
            frog_drowned: self.frog.is_drowned,
            goals_claimed: (self.zone_indices.len() as u32).saturating_sub(self.win_count),
            level_won: self.is_game_won(),
            game_over: self.is_game_over(),
        }
    }
}

//! Game tuning and difficulty presets
//!
//! Every gameplay constant lives in [`Tuning`] so hosts can load balance
//! tweaks from JSON without touching the simulation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::level::{LAYOUT_COLS, LAYOUT_ROWS};

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Starting lives for this preset
    pub fn lives(&self) -> u8 {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Normal => 3,
            Difficulty::Hard => 2,
        }
    }

    /// Multiplier applied to every lane speed
    pub fn lane_speed_multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.25,
        }
    }
}

/// Invalid tuning values
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("grid is {cols}x{rows}, level layouts are authored for {layout_cols}x{layout_rows}")]
    GridMismatch {
        cols: u32,
        rows: u32,
        layout_cols: u32,
        layout_rows: u32,
    },
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f32 },
    #[error("spawn cell ({col}, {row}) lies outside the {cols}x{rows} grid")]
    SpawnOutOfGrid { col: u32, row: u32, cols: u32, rows: u32 },
    #[error("invalid tuning json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Gameplay balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub difficulty: Difficulty,

    // === World ===
    /// Virtual view size the grid is centered in
    pub view_width: f32,
    pub view_height: f32,
    /// Side length of one grid tile in world units
    pub tile_unit: f32,
    pub grid_cols: u32,
    pub grid_rows: u32,
    pub spawn_col: u32,
    pub spawn_row: u32,

    // === Frog ===
    /// Hop speed in tiles per second
    pub frog_speed: f32,
    /// Seconds spent dead before respawning
    pub death_duration: f32,
    pub lives: u8,

    // === Lanes ===
    /// Base lane speed in tiles per second (before row factors)
    pub lane_speed: f32,
    /// Level > 1 multiplies lane speed by `level * level_speed_scale`
    pub level_speed_scale: f32,
    pub sink_period_slow: f32,
    pub sink_period_fast: f32,
    pub mouth_period: f32,

    // === Director ===
    /// Input freeze after a level is cleared
    pub win_wait: f32,
    /// Input freeze after the last life is lost
    pub game_over_wait: f32,
    /// Seconds between fly relocations
    pub fly_period: f32,
    /// Delay between consecutive goal reveals on level clear
    pub reveal_stagger: f32,

    // === Score ===
    pub score_step: u64,
    pub score_goal: u64,
    pub score_fly: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,

            view_width: 1136.0,
            view_height: 640.0,
            tile_unit: 40.0,
            grid_cols: 16,
            grid_rows: 14,
            spawn_col: 7,
            spawn_row: 13,

            frog_speed: 6.0,
            death_duration: 1.5,
            lives: 3,

            lane_speed: 1.5,
            level_speed_scale: 0.6,
            sink_period_slow: 4.0,
            sink_period_fast: 2.0,
            mouth_period: 1.5,

            win_wait: 2.0,
            game_over_wait: 3.0,
            fly_period: 4.0,
            reveal_stagger: 0.2,

            score_step: 10,
            score_goal: 50,
            score_fly: 200,
        }
    }
}

impl Tuning {
    /// Create tuning from a difficulty preset (applies preset defaults)
    pub fn from_preset(preset: Difficulty) -> Self {
        let mut tuning = Self::default();
        tuning.apply_preset(preset);
        tuning
    }

    /// Apply a difficulty preset (updates preset-dependent values)
    pub fn apply_preset(&mut self, preset: Difficulty) {
        self.difficulty = preset;
        self.lives = preset.lives();
    }

    /// Frog hop speed in world units per second
    pub fn frog_speed_px(&self) -> f32 {
        self.frog_speed * self.tile_unit
    }

    /// Lane speed for a level in world units per second
    pub fn lane_speed_px(&self, level: u32) -> f32 {
        let mut speed = self.lane_speed * self.tile_unit * self.difficulty.lane_speed_multiplier();
        if level > 1 {
            speed *= level as f32 * self.level_speed_scale;
        }
        speed
    }

    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.grid_cols != LAYOUT_COLS || self.grid_rows != LAYOUT_ROWS {
            return Err(TuningError::GridMismatch {
                cols: self.grid_cols,
                rows: self.grid_rows,
                layout_cols: LAYOUT_COLS,
                layout_rows: LAYOUT_ROWS,
            });
        }
        if self.spawn_col >= self.grid_cols || self.spawn_row >= self.grid_rows {
            return Err(TuningError::SpawnOutOfGrid {
                col: self.spawn_col,
                row: self.spawn_row,
                cols: self.grid_cols,
                rows: self.grid_rows,
            });
        }
        let positive = [
            ("tile_unit", self.tile_unit),
            ("frog_speed", self.frog_speed),
            ("death_duration", self.death_duration),
            ("lane_speed", self.lane_speed),
            ("level_speed_scale", self.level_speed_scale),
            ("sink_period_slow", self.sink_period_slow),
            ("sink_period_fast", self.sink_period_fast),
            ("mouth_period", self.mouth_period),
            ("win_wait", self.win_wait),
            ("game_over_wait", self.game_over_wait),
            ("fly_period", self.fly_period),
        ];
        for (name, value) in positive {
            if value <= 0.0 || value.is_nan() {
                return Err(TuningError::NonPositive { name, value });
            }
        }
        Ok(())
    }
}

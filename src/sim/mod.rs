//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied `dt` only, no wall clock
//! - Seeded RNG only
//! - Stable iteration order (entity insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod frog;
pub mod grid;
pub mod level;
pub mod pattern;
pub mod signals;
pub mod state;
pub mod tick;

pub use collision::{GoalClaim, update_hostile, update_platform, update_win_zone};
pub use entity::{Entity, EntityFlags, EntityKind, EntityStore, Mouth, Sink};
pub use frog::{Direction, Frog, FrogEnv, FrogState};
pub use grid::{Grid, Rect};
pub use level::{LAYOUTS, LevelLayout, create_next_level, restart_session};
pub use pattern::{RowKind, compile_row};
pub use signals::{Signal, Signals};
pub use state::{FlyState, GamePhase, GameState};
pub use tick::{TickInput, tick};

//! Frogger - A grid-based lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, player, levels)
//! - `settings`: Data-driven game balance (`Tuning`)
//! - `highscores`: Session leaderboard

pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{Difficulty, Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Forgiveness applied to the frog's radius when testing hostiles
    pub const HOSTILE_RADIUS_SCALE: f32 = 0.75;
}

/// Move `current` toward `target` by at most `max_delta`.
///
/// Lands exactly on `target` once it is within reach, so callers may compare
/// the result against `target` with `==`.
#[inline]
pub fn move_towards(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let delta = target - current;
    let dist = delta.length();
    if dist <= max_delta || dist == 0.0 {
        target
    } else {
        current + delta / dist * max_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_move_towards_lands_exactly() {
        let target = Vec2::new(10.0, 0.0);
        let mut pos = Vec2::ZERO;
        for _ in 0..10 {
            pos = move_towards(pos, target, 1.3);
        }
        assert_eq!(pos, target);
    }

    #[test]
    fn test_move_towards_zero_distance() {
        let p = Vec2::new(3.0, 4.0);
        assert_eq!(move_towards(p, p, 5.0), p);
    }

    proptest! {
        #[test]
        fn move_towards_never_overshoots(
            sx in -500.0f32..500.0,
            sy in -500.0f32..500.0,
            tx in -500.0f32..500.0,
            ty in -500.0f32..500.0,
            step in 0.01f32..50.0,
        ) {
            let start = Vec2::new(sx, sy);
            let target = Vec2::new(tx, ty);
            let next = move_towards(start, target, step);
            let before = (target - start).length();
            let after = (target - next).length();
            prop_assert!(after <= before + 1e-3);
            if before <= step {
                prop_assert_eq!(next, target);
            }
        }
    }
}

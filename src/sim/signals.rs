//! Host-facing signals
//!
//! The core keeps no event queue. Hosts snapshot [`Signals`] once per frame
//! and diff consecutive snapshots to react to deaths, claims and phase
//! changes exactly once.

use serde::{Deserialize, Serialize};

/// Flags a host polls each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Signals {
    pub level: u32,
    pub frog_dead: bool,
    pub frog_drowned: bool,
    /// Goal zones claimed so far this level
    pub goals_claimed: u32,
    pub level_won: bool,
    pub game_over: bool,
}

/// Something that just happened, derived from two snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    FrogDied { drowned: bool },
    GoalClaimed { total: u32 },
    LevelWon,
    GameOver,
    LevelStarted { level: u32 },
}

impl Signals {
    /// Rising edges between two consecutive snapshots, in a stable order
    pub fn edges(prev: &Signals, next: &Signals) -> Vec<Signal> {
        let mut out = Vec::new();
        if next.frog_dead && !prev.frog_dead {
            out.push(Signal::FrogDied {
                drowned: next.frog_drowned,
            });
        }
        // Counter drops back to zero on rebuild; only growth is a claim
        if next.level == prev.level && next.goals_claimed > prev.goals_claimed {
            out.push(Signal::GoalClaimed {
                total: next.goals_claimed,
            });
        }
        if next.level_won && !prev.level_won {
            out.push(Signal::LevelWon);
        }
        if next.game_over && !prev.game_over {
            out.push(Signal::GameOver);
        }
        let rebuilt = (prev.level_won || prev.game_over) && !next.level_won && !next.game_over;
        if next.level != prev.level || rebuilt {
            out.push(Signal::LevelStarted { level: next.level });
        }
        out
    }
}

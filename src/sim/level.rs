//! Level layouts and construction
//!
//! Each level is rebuilt from scratch: the entity store is emptied and every
//! row is recompiled from its pattern at the level's lane speed. Layouts are
//! cycled by level number.

use super::pattern::{RowKind, compile_row};
use super::state::{FlyState, GamePhase, GameState};

/// Row holding the walls, goal zones and fly tokens
pub const GOAL_ROW: u32 = 1;
pub const RIVER_FIRST_ROW: u32 = 2;
pub const RIVER_LAST_ROW: u32 = 6;
pub const ROAD_FIRST_ROW: u32 = 8;
/// Grid size every layout is authored for
pub const LAYOUT_COLS: u32 = 16;
pub const LAYOUT_ROWS: u32 = 14;

/// One moving lane: pattern plus a signed multiple of the level's lane speed
#[derive(Debug, Clone, Copy)]
pub struct LaneSpec {
    pub pattern: &'static str,
    pub speed: f32,
}

const fn lane(pattern: &'static str, speed: f32) -> LaneSpec {
    LaneSpec { pattern, speed }
}

/// A full level, top to bottom
#[derive(Debug, Clone, Copy)]
pub struct LevelLayout {
    pub walls: &'static str,
    pub goals: &'static str,
    pub flies: &'static str,
    pub river: [LaneSpec; 5],
    pub road: [LaneSpec; 5],
}

pub static LAYOUTS: [LevelLayout; 2] = [
    LevelLayout {
        walls: "W_WW_WW_WW_WW_WW",
        goals: "_G__G__G__G__G__",
        flies: "_F__F__F__F__F__",
        river: [
            lane("LLLL____LLL_____", 1.0),
            lane("TT__TT__TT__TT__", -1.2),
            lane("LLLLLL____LLLL__", 1.5),
            lane("LL___LL___LL____", 0.8),
            lane("TTT___TTT___TTT_", -1.0),
        ],
        road: [
            lane("tt______tt______", -1.2),
            lane("c____c____c_____", 1.5),
            lane("c___c___c___c___", -1.0),
            lane("c_____c_____c___", 1.2),
            lane("c___c____c______", -0.8),
        ],
    },
    LevelLayout {
        walls: "W_WW_WW_WW_WW_WW",
        goals: "_G__G__G__G__G__",
        flies: "_F__F__F__F__F__",
        river: [
            lane("CCM_____LLL_____", 1.0),
            lane("ss__TT__ff__TT__", -1.2),
            lane("LLLL____CCCM____", 1.5),
            lane("LL___LL___LL____", 1.0),
            lane("fff___TTT___sss_", -1.2),
        ],
        road: [
            lane("ttt_____tt______", -1.2),
            lane("c___c____c___.c_", 1.6),
            lane("c__c___c___c____", -1.1),
            lane("c____c____c_____", 1.4),
            lane("c__c___c____c___", -0.9),
        ],
    },
];

/// Layout used for a level (1-based)
pub fn layout_for_level(level: u32) -> &'static LevelLayout {
    &LAYOUTS[(level.max(1) as usize - 1) % LAYOUTS.len()]
}

/// Tear down the current entities and build `state.level` from its layout.
///
/// The frog survives the rebuild and is sent back to spawn.
pub fn create_next_level(state: &mut GameState) {
    state.phase = GamePhase::Playing;
    state.wait_timer = 0.0;
    state.entities.clear();

    let speed = state.tuning.lane_speed_px(state.level);
    let layout = layout_for_level(state.level);
    let grid = &state.grid;
    let tuning = &state.tuning;

    // Static goal row: walls, zones, then the fly tokens over the zones
    state
        .entities
        .extend(compile_row(grid, tuning, RowKind::Wall, GOAL_ROW, layout.walls, 0.0));
    state.zone_indices = state
        .entities
        .extend(compile_row(grid, tuning, RowKind::Goal, GOAL_ROW, layout.goals, 0.0))
        .collect();
    state.fly_indices = state
        .entities
        .extend(compile_row(grid, tuning, RowKind::Fly, GOAL_ROW, layout.flies, 0.0))
        .collect();

    for (row, lane) in (RIVER_FIRST_ROW..).zip(layout.river.iter()) {
        let row_speed = speed * lane.speed;
        state
            .entities
            .extend(compile_row(grid, tuning, RowKind::River, row, lane.pattern, row_speed));
    }
    for (row, lane) in (ROAD_FIRST_ROW..).zip(layout.road.iter()) {
        let row_speed = speed * lane.speed;
        state
            .entities
            .extend(compile_row(grid, tuning, RowKind::Road, row, lane.pattern, row_speed));
    }

    state.win_count = state.zone_indices.len() as u32;
    state.fly = FlyState::new(state.tuning.fly_period);
    state.frog.respawn();

    log::info!(
        "Level {} built: {} entities, {} goals, lane speed {:.1}",
        state.level,
        state.entities.len(),
        state.win_count,
        speed
    );
}

/// Start over from level 1 after a game over
pub fn restart_session(state: &mut GameState) {
    state.level = 1;
    state.score = 0;
    state.lives = state.tuning.lives;
    log::info!("Session restarted (high score {})", state.high_score);
    create_next_level(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{EntityFlags, EntityKind};

    #[test]
    fn test_layouts_fit_grid_width() {
        for layout in &LAYOUTS {
            for pattern in [layout.walls, layout.goals, layout.flies] {
                assert_eq!(pattern.len(), LAYOUT_COLS as usize, "{pattern}");
            }
            for lane in layout.river.iter().chain(layout.road.iter()) {
                assert_eq!(lane.pattern.len(), LAYOUT_COLS as usize, "{}", lane.pattern);
            }
        }
    }

    #[test]
    fn test_goals_line_up_with_wall_gaps() {
        for layout in &LAYOUTS {
            for ((w, g), f) in layout
                .walls
                .chars()
                .zip(layout.goals.chars())
                .zip(layout.flies.chars())
            {
                assert_eq!(w == '_', g == 'G');
                assert_eq!(g == 'G', f == 'F');
            }
        }
    }

    #[test]
    fn test_layout_cycles() {
        assert!(std::ptr::eq(layout_for_level(1), &LAYOUTS[0]));
        assert!(std::ptr::eq(layout_for_level(2), &LAYOUTS[1]));
        assert!(std::ptr::eq(layout_for_level(3), &LAYOUTS[0]));
    }

    #[test]
    fn test_rebuild_replaces_entities() {
        let mut state = GameState::new(7);
        state.entities[state.zone_indices[0]].is_win = true;
        state.win_count = 4;
        state.level = 2;
        create_next_level(&mut state);
        assert_eq!(state.win_count, 5);
        assert!(state.zone_indices.iter().all(|&i| !state.entities[i].is_win));
        assert_eq!(state.entities[state.zone_indices[0]].kind, EntityKind::WinZone);
    }

    #[test]
    fn test_row_flags_and_speeds() {
        let state = GameState::new(7);
        let base = state.tuning.lane_speed_px(1);
        let unit = state.grid.unit;
        let road_top = state.grid.position(0, ROAD_FIRST_ROW).y;
        for e in state.entities.iter() {
            match e.kind {
                EntityKind::Car => {
                    assert!(e.has(EntityFlags::MOVE | EntityFlags::KILL));
                    assert!(e.rect.y >= road_top);
                }
                EntityKind::Log | EntityKind::Turtle => {
                    assert!(e.has(EntityFlags::MOVE | EntityFlags::PLATFORM));
                    assert!(!e.has(EntityFlags::KILL));
                }
                EntityKind::Wall => assert_eq!(e.speed, 0.0),
                _ => {}
            }
            assert_eq!(e.rect.h, unit);
        }
        let top_lane = state
            .entities
            .iter()
            .find(|e| e.kind == EntityKind::Log)
            .map(|e| e.speed);
        assert_eq!(top_lane, Some(base));
    }

    #[test]
    fn test_later_levels_are_faster() {
        let mut state = GameState::new(7);
        let slow = state
            .entities
            .iter()
            .find(|e| e.kind == EntityKind::Car)
            .map(|e| e.speed.abs())
            .unwrap_or_default();
        state.level = 3;
        create_next_level(&mut state);
        let fast = state
            .entities
            .iter()
            .find(|e| e.kind == EntityKind::Car)
            .map(|e| e.speed.abs())
            .unwrap_or_default();
        assert!(fast > slow);
    }

    #[test]
    fn test_second_layout_has_crocs_and_sinkers() {
        let mut state = GameState::new(7);
        state.level = 2;
        create_next_level(&mut state);
        assert!(state.entities.iter().any(|e| e.mouth.is_some()));
        assert!(state.entities.iter().any(|e| e.sink.is_some()));
    }

    #[test]
    fn test_restart_resets_progress() {
        let mut state = GameState::new(7);
        state.level = 4;
        state.add_score(900);
        state.lives = 0;
        restart_session(&mut state);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.high_score, 900);
    }
}

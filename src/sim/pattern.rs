//! Row pattern compiler
//!
//! Lays out one grid row from a compact string, read left to right:
//! - `_` advances one tile, `.` advances half a tile, placing nothing
//! - any other character places an entity one tile wide; a run of the same
//!   character extends that entity instead of starting a new one
//!
//! River rows give some characters extra meaning: `s`/`f` are slow/fast
//! sinking turtles, `C` is a croc body and `M` a croc head whose mouth opens.

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityFlags, EntityKind, Mouth, Sink};
use super::grid::{Grid, Rect};
use crate::settings::Tuning;

/// What a row is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowKind {
    Wall,
    Goal,
    Fly,
    River,
    Road,
}

impl RowKind {
    /// Flags every entity in this row starts with
    pub fn default_flags(&self) -> EntityFlags {
        match self {
            RowKind::River => EntityFlags::MOVE | EntityFlags::PLATFORM,
            RowKind::Road => EntityFlags::MOVE | EntityFlags::KILL,
            RowKind::Wall => EntityFlags::KILL,
            RowKind::Goal | RowKind::Fly => EntityFlags::empty(),
        }
    }

    fn default_entity_kind(&self) -> EntityKind {
        match self {
            RowKind::Wall => EntityKind::Wall,
            RowKind::Goal => EntityKind::WinZone,
            RowKind::Fly => EntityKind::Fly,
            RowKind::River => EntityKind::Log,
            RowKind::Road => EntityKind::Car,
        }
    }

    /// Build a fresh one-tile entity for `ch`
    fn spawn(&self, ch: char, rect: Rect, speed: f32, tuning: &Tuning) -> Entity {
        let mut entity = Entity::new(self.default_entity_kind(), rect, speed, self.default_flags());
        match (self, ch) {
            (RowKind::River, 'T') => entity.kind = EntityKind::Turtle,
            (RowKind::River, 's') => {
                entity.kind = EntityKind::Turtle;
                entity.sink = Some(Sink::new(tuning.sink_period_slow));
            }
            (RowKind::River, 'f') => {
                entity.kind = EntityKind::Turtle;
                entity.sink = Some(Sink::new(tuning.sink_period_fast));
            }
            (RowKind::River, 'C') => entity.kind = EntityKind::Croc,
            (RowKind::River, 'M') => {
                entity.kind = EntityKind::Croc;
                entity.mouth = Some(Mouth::new(tuning.mouth_period));
            }
            (RowKind::Fly, _) => entity.visible = false,
            _ => {}
        }
        entity
    }
}

/// Compile one row pattern into entities, in left-to-right order.
///
/// Placements are not bounds-checked; anything reaching past the grid's
/// right edge is logged and kept as authored.
pub fn compile_row(
    grid: &Grid,
    tuning: &Tuning,
    kind: RowKind,
    row: u32,
    pattern: &str,
    speed: f32,
) -> Vec<Entity> {
    let origin = grid.position(0, row);
    let half = grid.unit / 2.0;

    let mut entities: Vec<Entity> = Vec::new();
    // Cursor in half tiles
    let mut cursor = 0u32;
    let mut run: Option<char> = None;

    for ch in pattern.chars() {
        match ch {
            '_' => {
                cursor += 2;
                run = None;
            }
            '.' => {
                cursor += 1;
                run = None;
            }
            _ => {
                let last = entities.last_mut().filter(|_| run == Some(ch));
                if let Some(last) = last {
                    last.rect.w += grid.unit;
                } else {
                    let rect = Rect::new(
                        origin.x + half * cursor as f32,
                        origin.y,
                        grid.unit,
                        grid.unit,
                    );
                    entities.push(kind.spawn(ch, rect, speed, tuning));
                }
                cursor += 2;
                run = Some(ch);
            }
        }
    }

    if let Some(e) = entities.iter().find(|e| e.rect.right() > grid.right()) {
        log::warn!(
            "{:?} row {} pattern {:?} places an entity past the grid edge (x={})",
            kind,
            row,
            pattern,
            e.rect.x
        );
    }
    log::debug!("Compiled {:?} row {}: {} entities", kind, row, entities.len());

    entities
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn setup() -> (Grid, Tuning) {
        let tuning = Tuning::default();
        let grid = Grid::new(Vec2::new(0.0, 0.0), 40.0, 16, 14);
        (grid, tuning)
    }

    #[test]
    fn test_run_extends_single_entity() {
        let (grid, tuning) = setup();
        let row = compile_row(&grid, &tuning, RowKind::River, 3, "_OOO_", 20.0);
        assert_eq!(row.len(), 1);
        assert_eq!(row[0].rect, Rect::new(40.0, 120.0, 120.0, 40.0));
        assert_eq!(row[0].speed, 20.0);
    }

    #[test]
    fn test_separated_entities() {
        let (grid, tuning) = setup();
        let row = compile_row(&grid, &tuning, RowKind::Road, 9, "O_O", -10.0);
        assert_eq!(row.len(), 2);
        assert_eq!(row[0].rect.w, 40.0);
        assert_eq!(row[1].rect.w, 40.0);
        assert_eq!(row[1].rect.x - row[0].rect.x, 80.0);
    }

    #[test]
    fn test_half_tile_step() {
        let (grid, tuning) = setup();
        let row = compile_row(&grid, &tuning, RowKind::Road, 9, ".cc", 0.0);
        assert_eq!(row.len(), 1);
        assert_eq!(row[0].rect.x, 20.0);
        assert_eq!(row[0].rect.w, 80.0);
    }

    #[test]
    fn test_different_chars_split() {
        let (grid, tuning) = setup();
        let row = compile_row(&grid, &tuning, RowKind::River, 2, "CCM", 15.0);
        assert_eq!(row.len(), 2);
        assert_eq!(row[0].kind, EntityKind::Croc);
        assert_eq!(row[0].rect.w, 80.0);
        assert!(row[0].mouth.is_none());
        assert!(row[1].mouth.is_some());
        assert_eq!(row[1].rect.x, 80.0);
    }

    #[test]
    fn test_default_flags_per_row() {
        let (grid, tuning) = setup();
        let river = compile_row(&grid, &tuning, RowKind::River, 2, "L", 1.0);
        assert_eq!(river[0].flags, EntityFlags::MOVE | EntityFlags::PLATFORM);
        let road = compile_row(&grid, &tuning, RowKind::Road, 9, "c", 1.0);
        assert_eq!(road[0].flags, EntityFlags::MOVE | EntityFlags::KILL);
        let wall = compile_row(&grid, &tuning, RowKind::Wall, 1, "W", 0.0);
        assert_eq!(wall[0].flags, EntityFlags::KILL);
        assert_eq!(wall[0].kind, EntityKind::Wall);
        let goal = compile_row(&grid, &tuning, RowKind::Goal, 1, "G", 0.0);
        assert!(goal[0].flags.is_empty());
        assert_eq!(goal[0].kind, EntityKind::WinZone);
    }

    #[test]
    fn test_sinking_turtles() {
        let (grid, tuning) = setup();
        let row = compile_row(&grid, &tuning, RowKind::River, 4, "TT_ss_fff", -20.0);
        assert_eq!(row.len(), 3);
        assert!(row.iter().all(|e| e.kind == EntityKind::Turtle));
        assert!(row[0].sink.is_none());
        assert_eq!(row[1].sink.map(|s| s.period), Some(tuning.sink_period_slow));
        assert_eq!(row[2].sink.map(|s| s.period), Some(tuning.sink_period_fast));
        assert_eq!(row[2].rect.w, 120.0);
    }

    #[test]
    fn test_fly_row_starts_hidden() {
        let (grid, tuning) = setup();
        let row = compile_row(&grid, &tuning, RowKind::Fly, 1, "_F__F", 0.0);
        assert_eq!(row.len(), 2);
        assert!(row.iter().all(|e| !e.visible));
    }

    #[test]
    fn test_out_of_grid_is_kept() {
        let (grid, tuning) = setup();
        let row = compile_row(&grid, &tuning, RowKind::Road, 9, "________________c", 0.0);
        assert_eq!(row.len(), 1);
        assert_eq!(row[0].rect.x, grid.right());
    }
}

//! Tile grid and axis-aligned rectangle geometry
//!
//! All entity placement goes through [`Grid::position`]: the grid stores the
//! precomputed top-left corner of every cell, indexed `row * cols + col`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Same rectangle shifted horizontally
    pub fn offset_x(&self, dx: f32) -> Self {
        Self { x: self.x + dx, ..*self }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Circle vs rectangle overlap (closest-point test)
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = Vec2::new(
            center.x.clamp(self.x, self.right()),
            center.y.clamp(self.y, self.bottom()),
        );
        closest.distance_squared(center) <= radius * radius
    }
}

/// Fixed-size grid of precomputed cell positions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    /// World position of cell (0, 0)
    pub start: Vec2,
    /// Tile side length
    pub unit: f32,
    pub cols: u32,
    pub rows: u32,
    cells: Vec<Vec2>,
}

impl Grid {
    pub fn new(start: Vec2, unit: f32, cols: u32, rows: u32) -> Self {
        let mut cells = Vec::with_capacity((cols * rows) as usize);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Vec2::new(
                    start.x + unit * col as f32,
                    start.y + unit * row as f32,
                ));
            }
        }
        Self {
            start,
            unit,
            cols,
            rows,
            cells,
        }
    }

    /// Grid centered inside a view of the given size
    pub fn centered(view: Vec2, unit: f32, cols: u32, rows: u32) -> Self {
        let start = Vec2::new(
            view.x / 2.0 - unit * cols as f32 / 2.0,
            view.y / 2.0 - unit * rows as f32 / 2.0,
        );
        Self::new(start, unit, cols, rows)
    }

    /// Top-left corner of cell (`col`, `row`).
    ///
    /// Panics if the cell lies outside the grid.
    #[inline]
    pub fn position(&self, col: u32, row: u32) -> Vec2 {
        self.cells[(row * self.cols + col) as usize]
    }

    pub fn width(&self) -> f32 {
        self.unit * self.cols as f32
    }

    pub fn height(&self) -> f32 {
        self.unit * self.rows as f32
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.start.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.start.x + self.width()
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.start.y + self.height()
    }

    /// Rectangle covering rows `first..=last` across the full grid width
    pub fn row_span(&self, first: u32, last: u32) -> Rect {
        let top = self.position(0, first);
        Rect::new(
            top.x,
            top.y,
            self.width(),
            self.unit * (last - first + 1) as f32,
        )
    }

    /// Rectangle of a single cell
    pub fn cell_rect(&self, col: u32, row: u32) -> Rect {
        let p = self.position(col, row);
        Rect::new(p.x, p.y, self.unit, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid() -> Grid {
        Grid::new(Vec2::new(248.0, 40.0), 40.0, 16, 14)
    }

    #[test]
    fn test_origin_reproduced() {
        let g = grid();
        assert_eq!(g.position(0, 0), g.start);
        assert_eq!(g.position(3, 2), g.start + Vec2::new(120.0, 80.0));
    }

    #[test]
    fn test_centered_grid() {
        let g = Grid::centered(Vec2::new(1136.0, 640.0), 40.0, 16, 14);
        assert_eq!(g.start, Vec2::new(248.0, 40.0));
        assert_eq!(g.right(), 888.0);
        assert_eq!(g.bottom(), 600.0);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_panics() {
        grid().position(0, 14);
    }

    #[test]
    fn test_row_span() {
        let g = grid();
        let water = g.row_span(2, 6);
        assert_eq!(water, Rect::new(248.0, 120.0, 640.0, 200.0));
    }

    #[test]
    fn test_rect_intersects_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Touching edges do not overlap
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_circle_overlap() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.overlaps_circle(Vec2::new(12.0, 5.0), 3.0));
        assert!(!r.overlaps_circle(Vec2::new(14.0, 5.0), 3.0));
        // Corner distance is diagonal
        assert!(!r.overlaps_circle(Vec2::new(12.5, 12.5), 3.0));
    }

    proptest! {
        #[test]
        fn adjacent_cells_one_unit_apart(col in 0u32..15, row in 0u32..13) {
            let g = grid();
            let p = g.position(col, row);
            prop_assert_eq!(g.position(col + 1, row) - p, Vec2::new(g.unit, 0.0));
            prop_assert_eq!(g.position(col, row + 1) - p, Vec2::new(0.0, g.unit));
        }

        #[test]
        fn distinct_cells_distinct_positions(
            a in (0u32..16, 0u32..14),
            b in (0u32..16, 0u32..14),
        ) {
            let g = grid();
            if a != b {
                prop_assert_ne!(g.position(a.0, a.1), g.position(b.0, b.1));
            } else {
                prop_assert_eq!(g.position(a.0, a.1), g.position(b.0, b.1));
            }
        }
    }
}

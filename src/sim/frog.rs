//! The player frog and its hop state machine
//!
//! The frog moves in whole-tile hops. A hop sets `seek_pos` and the frog
//! glides toward it; one more hop may be queued in `buffer_pos` while the
//! current one is in flight. Platforms drag the frog (and both targets)
//! sideways, and leaving the grid sideways is fatal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{Grid, Rect};
use crate::move_towards;

/// Hop direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in world space (y grows downward)
    pub fn vector(&self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Observable frog state, derived from its flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrogState {
    Idle,
    Hopping,
    HoppingWithBuffer,
    Dead,
    Drowned,
    /// Level cleared; hidden until the next level is built
    Won,
}

/// What the frog needs from the rest of the frame
#[derive(Debug, Clone, Copy)]
pub struct FrogEnv<'a> {
    pub grid: &'a Grid,
    /// River area; touching it unsupported drowns the frog
    pub water: Rect,
    /// Directional input is ignored while false
    pub accept_input: bool,
    /// Last life lost; stay dead until the session restarts
    pub game_over_pending: bool,
    pub death_duration: f32,
}

/// The player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frog {
    /// Top-left corner, authoritative
    pub pos: Vec2,
    /// Destination of the hop in flight
    pub seek_pos: Vec2,
    /// Queued next destination
    pub buffer_pos: Vec2,
    pub spawn: Vec2,
    /// Side length of the frog's square
    pub size: f32,
    pub radius: f32,
    /// Hop speed (world units per second)
    pub speed: f32,
    /// Horizontal velocity imparted by the supporting platform this frame
    pub platform_move: f32,
    pub is_moving: bool,
    pub is_move_buffered: bool,
    pub is_on_platform: bool,
    pub is_drowned: bool,
    pub is_dead: bool,
    pub is_wrapping: bool,
    pub is_hidden: bool,
    /// Seconds left before respawn
    pub death_timer: f32,
    /// Smallest y reached this life (forward progress)
    pub best_y: f32,
    /// Lifetime death count
    #[serde(default)]
    pub deaths: u32,
}

impl Frog {
    pub fn new(spawn: Vec2, size: f32, speed: f32) -> Self {
        Self {
            pos: spawn,
            seek_pos: spawn,
            buffer_pos: spawn,
            spawn,
            size,
            radius: size / 2.0,
            speed,
            platform_move: 0.0,
            is_moving: false,
            is_move_buffered: false,
            is_on_platform: false,
            is_drowned: false,
            is_dead: false,
            is_wrapping: false,
            is_hidden: false,
            death_timer: 0.0,
            best_y: spawn.y,
            deaths: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    pub fn state(&self) -> FrogState {
        if self.is_hidden {
            FrogState::Won
        } else if self.is_dead {
            if self.is_drowned {
                FrogState::Drowned
            } else {
                FrogState::Dead
            }
        } else if self.is_moving {
            if self.is_move_buffered {
                FrogState::HoppingWithBuffer
            } else {
                FrogState::Hopping
            }
        } else {
            FrogState::Idle
        }
    }

    /// Kill the frog and start the respawn countdown
    pub fn kill(&mut self, drowned: bool, death_duration: f32) {
        if self.is_dead {
            return;
        }
        self.is_dead = true;
        self.is_drowned = drowned;
        self.deaths += 1;
        self.death_timer = death_duration;
        self.is_moving = false;
        self.is_move_buffered = false;
    }

    /// Back to the spawn cell, idle and alive
    pub fn respawn(&mut self) {
        self.pos = self.spawn;
        self.seek_pos = self.spawn;
        self.buffer_pos = self.spawn;
        self.platform_move = 0.0;
        self.is_moving = false;
        self.is_move_buffered = false;
        self.is_on_platform = false;
        self.is_drowned = false;
        self.is_dead = false;
        self.is_wrapping = false;
        self.is_hidden = false;
        self.death_timer = 0.0;
        self.best_y = self.spawn.y;
    }

    /// Whether a hop landing at `p` stays inside the grid
    fn in_bounds(&self, grid: &Grid, p: Vec2) -> bool {
        p.x >= grid.left()
            && p.x + self.size <= grid.right()
            && p.y >= grid.start.y
            && p.y + self.size <= grid.bottom()
    }

    /// Run one frame of the state machine.
    ///
    /// Returns the number of new rows reached toward the goal this frame.
    pub fn update(&mut self, env: &FrogEnv, input: Option<Direction>, dt: f32) -> u32 {
        if self.is_hidden {
            return 0;
        }
        let grid = env.grid;

        // Ride the platform, hop targets included
        if self.is_on_platform {
            let dx = self.platform_move * dt;
            self.pos.x += dx;
            self.seek_pos.x += dx;
            self.buffer_pos.x += dx;
        }

        // Leaving the grid sideways wraps and kills
        let rect = self.rect();
        self.is_wrapping = rect.left() < grid.left() || rect.right() > grid.right();
        let center_x = self.center().x;
        let shift = if center_x < grid.left() - self.radius {
            grid.width()
        } else if center_x > grid.right() + self.radius {
            -grid.width()
        } else {
            0.0
        };
        if shift != 0.0 {
            self.pos.x += shift;
            self.seek_pos.x += shift;
            self.buffer_pos.x += shift;
            self.kill(false, env.death_duration);
        }

        if self.is_dead {
            self.death_timer = (self.death_timer - dt).max(0.0);
            if self.death_timer <= 0.0 && !env.game_over_pending {
                self.respawn();
            }
            return 0;
        }

        // The river has no side banks: any unsupported point in its rows drowns
        let center_y = self.center().y;
        if !self.is_on_platform && center_y >= env.water.top() && center_y <= env.water.bottom() {
            self.kill(true, env.death_duration);
            return 0;
        }

        // Platforms re-assert support every frame
        self.is_on_platform = false;

        let mut rows = 0;
        if self.is_moving && self.pos == self.seek_pos {
            if self.is_move_buffered {
                self.seek_pos = self.buffer_pos;
                self.is_move_buffered = false;
            } else {
                self.is_moving = false;
            }
            if self.pos.y < self.best_y {
                rows = ((self.best_y - self.pos.y) / grid.unit).round() as u32;
                self.best_y = self.pos.y;
            }
        }

        if env.accept_input {
            if let Some(dir) = input {
                let step = dir.vector() * grid.unit;
                let new_seek = self.pos + step;
                let new_buffer = self.seek_pos + step;

                if !self.is_moving {
                    if self.in_bounds(grid, new_seek) {
                        self.is_moving = true;
                        self.seek_pos = new_seek;
                        self.buffer_pos = new_seek;
                    }
                } else if !self.is_move_buffered
                    && self.buffer_pos != new_buffer
                    && self.in_bounds(grid, new_buffer)
                {
                    self.buffer_pos = new_buffer;
                    self.is_move_buffered = true;
                }
            }
        }

        if self.is_moving {
            self.pos = move_towards(self.pos, self.seek_pos, self.speed * dt);
        }

        rows
    }
}

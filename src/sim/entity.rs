//! Non-player entities and the store that owns them
//!
//! Every lane object (vehicles, platforms, walls, goal zones, the bonus fly)
//! is one flat [`Entity`] tagged with a kind and a set of capability flags.
//! Flags compose independently of kind: a croc head is a platform that also
//! kills while its mouth is open.

use std::ops::Range;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::grid::Rect;

bitflags! {
    /// Capability flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct EntityFlags: u8 {
        /// Advances by its speed each frame and wraps at the grid edges
        const MOVE     = 1 << 0;
        /// Carries the frog
        const PLATFORM = 1 << 1;
        /// Lethal on contact
        const KILL     = 1 << 2;
    }
}

/// Entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Car,
    Turtle,
    Log,
    Croc,
    Wall,
    WinZone,
    /// Bonus token parked on a goal zone
    Fly,
}

/// Number of sink animation frames; the last one is fully submerged
pub const SINK_FRAMES: u8 = 4;

/// Submerge cycle of a sinking turtle group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sink {
    /// Seconds per full surface -> submerged -> surface cycle
    pub period: f32,
    pub timer: f32,
    /// Current animation frame, `0..SINK_FRAMES`
    pub frame: u8,
}

impl Sink {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            timer: 0.0,
            frame: 0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.timer = (self.timer + dt) % self.period;
        let phase = self.timer / self.period;
        self.frame = ((phase * SINK_FRAMES as f32) as u8).min(SINK_FRAMES - 1);
    }

    #[inline]
    pub fn is_submerged(&self) -> bool {
        self.frame == SINK_FRAMES - 1
    }
}

/// Open/closed mouth cycle of a croc head
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mouth {
    /// Seconds spent in each state
    pub period: f32,
    pub timer: f32,
    pub open: bool,
}

impl Mouth {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            timer: 0.0,
            open: false,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.timer += dt;
        if self.timer >= self.period {
            self.timer -= self.period;
            self.open = !self.open;
        }
    }
}

/// A lane entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub rect: Rect,
    /// Signed horizontal speed (world units per second)
    pub speed: f32,
    pub flags: EntityFlags,
    /// Straddling a grid edge; also present one grid width away
    pub is_wrapping: bool,
    pub sink: Option<Sink>,
    pub mouth: Option<Mouth>,
    /// Goal zone already claimed
    pub is_win: bool,
    /// Goal zone reveal countdown after a level clear
    #[serde(default)]
    pub reveal_timer: f32,
    /// Only meaningful for the fly token
    #[serde(default)]
    pub visible: bool,
}

impl Entity {
    pub fn new(kind: EntityKind, rect: Rect, speed: f32, flags: EntityFlags) -> Self {
        Self {
            id: 0,
            kind,
            rect,
            speed,
            flags,
            is_wrapping: false,
            sink: None,
            mouth: None,
            is_win: false,
            reveal_timer: 0.0,
            visible: true,
        }
    }

    #[inline]
    pub fn has(&self, flag: EntityFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Flag entities straddling either grid edge. Runs before the frame's
    /// movement so collision sees the mirrored copy.
    pub fn update_wrapping(&mut self, grid_left: f32, grid_right: f32) {
        self.is_wrapping = self.has(EntityFlags::MOVE)
            && (self.rect.right() > grid_right || self.rect.left() < grid_left);
    }

    /// Advance by speed and wrap at most once
    pub fn advance(&mut self, dt: f32, grid_left: f32, grid_width: f32) {
        if !self.has(EntityFlags::MOVE) {
            return;
        }
        self.rect.x += self.speed * dt;
        self.wrap(grid_left, grid_width);
    }

    /// Teleport one grid width across when fully past an edge.
    /// Returns true if the entity moved.
    pub fn wrap(&mut self, grid_left: f32, grid_width: f32) -> bool {
        let grid_right = grid_left + grid_width;
        if self.rect.right() < grid_left {
            self.rect.x += grid_width;
            true
        } else if self.rect.left() > grid_right {
            self.rect.x -= grid_width;
            true
        } else {
            false
        }
    }

    /// Apparent rectangles: the real one, plus both mirrors while wrapping
    pub fn mirrors(&self, grid_width: f32) -> impl Iterator<Item = Rect> + '_ {
        let copies: &[f32] = if self.is_wrapping {
            &[0.0, 1.0, -1.0]
        } else {
            &[0.0]
        };
        copies
            .iter()
            .map(move |k| self.rect.offset_x(k * grid_width))
    }

    /// Step animation timers; an open croc mouth is lethal
    pub fn animate(&mut self, dt: f32) {
        if let Some(sink) = &mut self.sink {
            sink.advance(dt);
        }
        if let Some(mouth) = &mut self.mouth {
            mouth.advance(dt);
            self.flags.set(EntityFlags::KILL, mouth.open);
        }
        if self.reveal_timer > 0.0 {
            self.reveal_timer = (self.reveal_timer - dt).max(0.0);
        }
    }

    /// Whether the entity can currently hold the frog up
    pub fn supports_frog(&self) -> bool {
        self.has(EntityFlags::PLATFORM) && !self.sink.is_some_and(|s| s.is_submerged())
    }
}

/// Growable collection of every non-player entity, in creation order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityStore {
    entities: Vec<Entity>,
    next_id: u32,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Insert an entity, returning its index
    pub fn push(&mut self, mut entity: Entity) -> usize {
        entity.id = self.next_id;
        self.next_id += 1;
        self.entities.push(entity);
        self.entities.len() - 1
    }

    /// Insert a batch, returning the index range it occupies
    pub fn extend(&mut self, batch: impl IntoIterator<Item = Entity>) -> Range<usize> {
        let start = self.entities.len();
        for entity in batch {
            self.push(entity);
        }
        start..self.entities.len()
    }

    /// Drop every entity
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.entities.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.entities.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Entity> {
        self.entities.iter_mut()
    }

    /// Indices of every entity of a kind, in creation order
    pub fn indices_of(&self, kind: EntityKind) -> Vec<usize> {
        self.entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.kind == kind)
            .map(|(i, _)| i)
            .collect()
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for EntityStore {
    type Output = Entity;

    fn index(&self, index: usize) -> &Entity {
        &self.entities[index]
    }
}

impl std::ops::IndexMut<usize> for EntityStore {
    fn index_mut(&mut self, index: usize) -> &mut Entity {
        &mut self.entities[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LEFT: f32 = 100.0;
    const WIDTH: f32 = 640.0;
    const RIGHT: f32 = LEFT + WIDTH;

    fn car(x: f32, speed: f32) -> Entity {
        Entity::new(
            EntityKind::Car,
            Rect::new(x, 0.0, 40.0, 40.0),
            speed,
            EntityFlags::MOVE | EntityFlags::KILL,
        )
    }

    #[test]
    fn test_wrapping_flag_at_seams() {
        let mut e = car(RIGHT - 20.0, 50.0);
        e.update_wrapping(LEFT, RIGHT);
        assert!(e.is_wrapping);

        let mut e = car(LEFT - 10.0, -50.0);
        e.update_wrapping(LEFT, RIGHT);
        assert!(e.is_wrapping);

        let mut e = car(LEFT + 100.0, 50.0);
        e.update_wrapping(LEFT, RIGHT);
        assert!(!e.is_wrapping);
    }

    #[test]
    fn test_static_entities_never_wrap() {
        let mut wall = Entity::new(
            EntityKind::Wall,
            Rect::new(LEFT - 10.0, 0.0, 40.0, 40.0),
            0.0,
            EntityFlags::KILL,
        );
        wall.update_wrapping(LEFT, RIGHT);
        assert!(!wall.is_wrapping);
        wall.advance(1.0, LEFT, WIDTH);
        assert_eq!(wall.rect.x, LEFT - 10.0);
    }

    #[test]
    fn test_left_exit_wraps_right() {
        let mut e = car(LEFT - 39.0, -40.0);
        e.advance(0.25, LEFT, WIDTH);
        // right edge now at LEFT - 9, fully out: teleported one width right
        assert_eq!(e.rect.x, LEFT - 49.0 + WIDTH);
        assert!(!e.wrap(LEFT, WIDTH));
    }

    #[test]
    fn test_single_wrap_per_frame_on_huge_overshoot() {
        let start = RIGHT - 40.0;
        let mut e = car(start, 100.0);
        let dt = 7.0; // 700 units of travel, more than a grid width
        e.advance(dt, LEFT, WIDTH);
        assert_eq!(e.rect.x, start + 700.0 - WIDTH);
        // Still past the right edge; the next frame handles it
        assert!(e.rect.left() > RIGHT);
    }

    #[test]
    fn test_mirrors_only_while_wrapping() {
        let mut e = car(RIGHT - 20.0, 10.0);
        assert_eq!(e.mirrors(WIDTH).count(), 1);
        e.update_wrapping(LEFT, RIGHT);
        let rects: Vec<_> = e.mirrors(WIDTH).collect();
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[1].x, RIGHT - 20.0 + WIDTH);
        assert_eq!(rects[2].x, RIGHT - 20.0 - WIDTH);
    }

    #[test]
    fn test_sink_cycle_reaches_submerged_frame() {
        let mut sink = Sink::new(4.0);
        sink.advance(0.5);
        assert_eq!(sink.frame, 0);
        sink.advance(2.6);
        assert_eq!(sink.frame, 3);
        assert!(sink.is_submerged());
        sink.advance(1.0);
        assert!(!sink.is_submerged());
    }

    #[test]
    fn test_submerged_turtle_does_not_support() {
        let mut turtle = Entity::new(
            EntityKind::Turtle,
            Rect::new(0.0, 0.0, 80.0, 40.0),
            -30.0,
            EntityFlags::MOVE | EntityFlags::PLATFORM,
        );
        turtle.sink = Some(Sink::new(2.0));
        assert!(turtle.supports_frog());
        turtle.animate(1.6);
        assert!(!turtle.supports_frog());
    }

    #[test]
    fn test_mouth_toggles_kill() {
        let mut head = Entity::new(
            EntityKind::Croc,
            Rect::new(0.0, 0.0, 40.0, 40.0),
            30.0,
            EntityFlags::MOVE | EntityFlags::PLATFORM,
        );
        head.mouth = Some(Mouth::new(1.0));
        head.animate(0.5);
        assert!(!head.has(EntityFlags::KILL));
        head.animate(0.6);
        assert!(head.has(EntityFlags::KILL));
        head.animate(1.0);
        assert!(!head.has(EntityFlags::KILL));
    }

    #[test]
    fn test_store_assigns_ids_and_ranges() {
        let mut store = EntityStore::new();
        let first = store.push(car(0.0, 1.0));
        let range = store.extend([car(50.0, 1.0), car(100.0, 1.0)]);
        assert_eq!(first, 0);
        assert_eq!(range, 1..3);
        assert_eq!(store[2].id, 3);
        assert_eq!(store.indices_of(EntityKind::Car), vec![0, 1, 2]);
        store.clear();
        assert!(store.is_empty());
    }

    proptest! {
        #[test]
        fn wrap_is_a_fixed_point(x in (LEFT - WIDTH + 1.0)..(RIGHT + WIDTH - 41.0)) {
            let mut e = car(x, 0.0);
            e.wrap(LEFT, WIDTH);
            let settled = e.rect.x;
            prop_assert!(!e.wrap(LEFT, WIDTH));
            prop_assert_eq!(e.rect.x, settled);
        }
    }
}

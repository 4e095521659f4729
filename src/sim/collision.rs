//! Frog vs entity interactions
//!
//! Three per-entity checks run every frame: platforms carry the frog,
//! hostiles kill it, and goal zones claim it. Entities straddling a grid
//! edge are tested at both apparent positions.

use super::entity::{Entity, EntityFlags};
use super::frog::Frog;
use crate::consts::HOSTILE_RADIUS_SCALE;

/// A goal zone the frog just entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalClaim {
    /// Zone index in creation order
    pub zone: usize,
    /// The bonus fly was sitting on this zone
    pub bonus: bool,
}

/// Mark the frog as supported if it stands on `platform`.
///
/// Only ever sets `is_on_platform`; the frog clears it during its own update.
/// With several overlapping platforms the last one checked decides
/// `platform_move`.
pub fn update_platform(platform: &Entity, frog: &mut Frog, grid_width: f32) {
    if !platform.supports_frog() {
        return;
    }
    let center = frog.center();
    let hit = platform
        .mirrors(grid_width)
        .any(|rect| rect.contains_point(center));
    if !hit {
        return;
    }
    if !frog.is_on_platform && !frog.is_drowned {
        frog.is_on_platform = true;
    }
    if frog.is_on_platform {
        frog.platform_move = platform.speed;
    }
}

/// Kill the frog if it touches a lethal entity. Returns true on a kill.
pub fn update_hostile(
    hostile: &Entity,
    frog: &mut Frog,
    grid_width: f32,
    death_duration: f32,
) -> bool {
    if frog.is_dead || frog.is_hidden || !hostile.has(EntityFlags::KILL) {
        return false;
    }
    let center = frog.center();
    let radius = frog.radius * HOSTILE_RADIUS_SCALE;
    let hit = hostile
        .mirrors(grid_width)
        .any(|rect| rect.overlaps_circle(center, radius));
    if hit {
        frog.kill(false, death_duration);
    }
    hit
}

/// Claim an unclaimed goal zone the frog is standing in.
///
/// A claimed zone turns lethal so it cannot be entered twice.
pub fn update_win_zone(
    zone: &mut Entity,
    index: usize,
    frog: &Frog,
    fly_zone: Option<usize>,
) -> Option<GoalClaim> {
    if zone.is_win || frog.is_dead || frog.is_hidden {
        return None;
    }
    if !zone.rect.contains_point(frog.center()) {
        return None;
    }
    zone.is_win = true;
    zone.flags |= EntityFlags::KILL;
    Some(GoalClaim {
        zone: index,
        bonus: fly_zone == Some(index),
    })
}

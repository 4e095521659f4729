//! Per-frame simulation step
//!
//! One call to [`tick`] runs every subsystem once, in a fixed order, over
//! the entity store in insertion order:
//!
//! 1. director (phase transitions and wait timers)
//! 2. bonus fly relocation
//! 3. wrap flags and animations
//! 4. platform carry, before the frog so this frame's support is visible
//! 5. frog state machine
//! 6. hostile contacts
//! 7. goal zones
//! 8. entity movement
//! 9. life accounting

use rand::Rng;

use super::collision::{self, GoalClaim};
use super::frog::{Direction, FrogEnv};
use super::level;
use super::state::{GamePhase, GameState};

/// Already debounced, pressed-this-frame input
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    /// The direction requested this frame. Vertical wins over horizontal.
    pub fn direction(&self) -> Option<Direction> {
        if self.move_up {
            Some(Direction::Up)
        } else if self.move_down {
            Some(Direction::Down)
        } else if self.move_left {
            Some(Direction::Left)
        } else if self.move_right {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        state.paused = !state.paused;
        log::debug!("Paused: {}", state.paused);
    }
    if state.paused {
        return;
    }
    state.time += dt;

    let deaths_before = state.frog.deaths;

    update_director(state, dt);
    update_fly(state, dt);

    let grid_left = state.grid.left();
    let grid_right = state.grid.right();
    let grid_width = state.grid.width();

    for entity in state.entities.iter_mut() {
        entity.update_wrapping(grid_left, grid_right);
        entity.animate(dt);
    }

    for entity in state.entities.iter() {
        collision::update_platform(entity, &mut state.frog, grid_width);
    }

    let env = FrogEnv {
        grid: &state.grid,
        water: state.water,
        accept_input: state.accepts_input(),
        game_over_pending: state.lives == 0,
        death_duration: state.tuning.death_duration,
    };
    let rows = state.frog.update(&env, input.direction(), dt);
    if rows > 0 {
        state.add_score(rows as u64 * state.tuning.score_step);
    }

    let death_duration = state.tuning.death_duration;
    for entity in state.entities.iter() {
        if collision::update_hostile(entity, &mut state.frog, grid_width, death_duration) {
            log::debug!("Frog hit {:?} #{}", entity.kind, entity.id);
        }
    }

    let fly_zone = state.fly.zone;
    let mut claims: Vec<GoalClaim> = Vec::new();
    for (index, &slot) in state.zone_indices.iter().enumerate() {
        if let Some(claim) =
            collision::update_win_zone(&mut state.entities[slot], index, &state.frog, fly_zone)
        {
            claims.push(claim);
        }
    }
    for claim in claims {
        claim_goal(state, claim);
    }

    for entity in state.entities.iter_mut() {
        entity.advance(dt, grid_left, grid_width);
    }

    let died = state.frog.deaths.saturating_sub(deaths_before);
    if died > 0 {
        let lost = u8::try_from(died).unwrap_or(u8::MAX);
        state.lives = state.lives.saturating_sub(lost);
        log::debug!(
            "Frog {} ({} lives left)",
            if state.frog.is_drowned { "drowned" } else { "died" },
            state.lives
        );
    }

    sync_fly(state);
}

/// Phase transitions. Runs first so a level cleared last frame is noticed
/// one frame later, never mid-frame.
fn update_director(state: &mut GameState, dt: f32) {
    match state.phase {
        GamePhase::Playing => {
            if state.win_count == 0 {
                state.phase = GamePhase::LevelClear;
                state.wait_timer = state.tuning.win_wait;
                state.frog.is_hidden = true;
                let stagger = state.tuning.reveal_stagger;
                for (order, &slot) in state.zone_indices.iter().enumerate() {
                    state.entities[slot].reveal_timer = order as f32 * stagger;
                }
                log::info!("Level {} cleared (score {})", state.level, state.score);
            } else if state.lives == 0 {
                state.phase = GamePhase::GameOver;
                state.wait_timer = state.tuning.game_over_wait;
                if let Some(rank) = state.high_scores.add_score(state.score, state.level) {
                    log::info!("New high score #{}: {}", rank, state.score);
                }
                log::info!(
                    "Game over on level {} with score {}",
                    state.level,
                    state.score
                );
            }
        }
        GamePhase::LevelClear | GamePhase::GameOver => {
            state.wait_timer -= dt;
            if state.wait_timer > 0.0 {
                return;
            }
            if state.phase == GamePhase::LevelClear {
                state.level += 1;
                level::create_next_level(state);
            } else {
                level::restart_session(state);
            }
        }
    }
}

/// Move the bonus fly to a random open goal zone every `fly_period`
fn update_fly(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.fly.timer -= dt;
    if state.fly.timer > 0.0 {
        return;
    }
    state.fly.timer = state.tuning.fly_period;

    let open: Vec<usize> = state
        .zone_indices
        .iter()
        .enumerate()
        .filter(|&(_, &slot)| !state.entities[slot].is_win)
        .map(|(index, _)| index)
        .collect();
    state.fly.zone = if open.is_empty() {
        None
    } else {
        let pick = state.rng().random_range(0..open.len());
        Some(open[pick])
    };
    log::debug!("Fly moved to {:?}", state.fly.zone);
}

fn claim_goal(state: &mut GameState, claim: GoalClaim) {
    let mut points = state.tuning.score_goal;
    if claim.bonus {
        points += state.tuning.score_fly;
        state.fly.zone = None;
    }
    state.add_score(points);
    state.win_count = state.win_count.saturating_sub(1);
    state.frog.respawn();
    log::debug!(
        "Goal {} claimed{} ({} left)",
        claim.zone,
        if claim.bonus { " with fly" } else { "" },
        state.win_count
    );
}

/// Fly entities show only on the zone the fly occupies
fn sync_fly(state: &mut GameState) {
    for (index, &slot) in state.fly_indices.iter().enumerate() {
        state.entities[slot].visible = state.fly.zone == Some(index);
    }
}

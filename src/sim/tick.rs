//! Fixed timestep simulation tick
//!
//! Advances a running world by exactly one step.

use super::collision::check_all;
use super::spawn::Spawner;
use super::state::{GameEvent, GamePhase, WorldState};
use super::steering::SteeringFilter;
use crate::consts::*;
use crate::error::SimError;
use crate::speed_for_score;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Normalized head offset in [-1, 1], `None` when no face is tracked
    pub steering: Option<f32>,
}

impl TickInput {
    pub fn steer(offset: f32) -> Self {
        Self {
            steering: Some(offset),
        }
    }
}

/// Advance the world by one fixed step.
///
/// Does nothing unless the world is `Running`. Returns the events raised
/// during the step in the order they happened.
pub fn tick(
    state: &mut WorldState,
    filter: &mut SteeringFilter,
    spawner: &mut Spawner,
    input: &TickInput,
) -> Result<Vec<GameEvent>, SimError> {
    let mut events = Vec::new();
    tick_into(state, filter, spawner, input, &mut events)?;
    Ok(events)
}

/// Like [`tick`], but appends to `events` so the caller keeps whatever was
/// raised before a failing step. On error the world is left `Halted`.
pub fn tick_into(
    state: &mut WorldState,
    filter: &mut SteeringFilter,
    spawner: &mut Spawner,
    input: &TickInput,
    events: &mut Vec<GameEvent>,
) -> Result<(), SimError> {
    if state.phase != GamePhase::Running {
        return Ok(());
    }
    state.time_ticks += 1;

    // Steer
    state.steering = filter.update(input.steering);
    let lane_width = state.lane.width;
    state.player.steer(state.steering * STEER_SPEED, lane_width);

    // Scroll obstacles, pruning from the back so indices stay valid
    for i in (0..state.obstacles.len()).rev() {
        state.obstacles[i].pos.y += state.speed;
        if state.obstacles[i].pos.y > state.lane.height {
            state.obstacles.remove(i);
            state.score += AVOID_SCORE;
            events.push(GameEvent::ObstacleAvoided { score: state.score });
        }
    }

    // Spawn
    let spawned = spawner
        .maybe_spawn(state.difficulty.spawn_probability(), lane_width)
        .inspect_err(|_| {
            state.phase = GamePhase::Halted;
            state.running = false;
        })?;
    if let Some(obstacle) = spawned {
        log::debug!(
            "Spawned {} {:?} at x={:.1}",
            obstacle.kind.as_str(),
            obstacle.size,
            obstacle.pos.x
        );
        state.obstacles.push(obstacle);
    }

    // Collide
    if let Some(index) = check_all(&state.player, &state.obstacles) {
        log::info!(
            "Hit {} at tick {}, final score {}",
            state.obstacles[index].kind.as_str(),
            state.time_ticks,
            state.score
        );
        state.phase = GamePhase::GameOver;
        state.running = false;
        state.over = true;
        events.push(GameEvent::GameOver { score: state.score });
    }

    state.speed = speed_for_score(state.score);

    Ok(())
}

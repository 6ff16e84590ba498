//! Simulation engine: owns the world and drives the game state machine
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --start--> Running
//!                    |
//!                 collision
//!                    v
//!                 GameOver --start (resets first)--> Running
//! ```
//!
//! A tick that fails with an invariant violation leaves the engine `Halted`,
//! which `start` and `reset` leave the same way as `GameOver`.
//! `reset` returns any state to `Idle`. Listeners subscribe to
//! [`GameEvent`]s instead of patching the collision path.

use super::difficulty::Difficulty;
use super::spawn::{RandomSource, Spawner};
use super::state::{GameEvent, GamePhase, LaneConfig, Obstacle, WorldState};
use super::steering::{SteerDirection, SteeringFilter};
use super::tick::{TickInput, tick_into};
use crate::error::{ConfigError, SimError};

type Listener = Box<dyn FnMut(&GameEvent)>;

pub struct Engine {
    state: WorldState,
    filter: SteeringFilter,
    spawner: Spawner,
    listeners: Vec<Listener>,
}

impl Engine {
    /// Engine with a seeded PCG random source
    pub fn new(lane: LaneConfig, difficulty: Difficulty, seed: u64) -> Result<Self, ConfigError> {
        Self::with_spawner(lane, difficulty, Spawner::seeded(seed))
    }

    /// Engine drawing from a caller-supplied random source
    pub fn with_random_source(
        lane: LaneConfig,
        difficulty: Difficulty,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, ConfigError> {
        Self::with_spawner(lane, difficulty, Spawner::new(rng))
    }

    /// Engine with a fully configured spawner
    pub fn with_spawner(
        lane: LaneConfig,
        difficulty: Difficulty,
        spawner: Spawner,
    ) -> Result<Self, ConfigError> {
        lane.validate()?;
        log::info!(
            "Engine created: lane {}x{}, difficulty {}",
            lane.width,
            lane.height,
            difficulty
        );
        Ok(Self {
            state: WorldState::new(lane, difficulty),
            filter: SteeringFilter::new(),
            spawner,
            listeners: Vec::new(),
        })
    }

    /// Register a callback for every event the engine raises
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> &WorldState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn steering_direction(&self) -> Option<SteerDirection> {
        self.filter.direction()
    }

    /// Idle, Paused or GameOver -> Running. Starting after a game over resets first.
    pub fn start(&mut self) {
        match self.state.phase {
            GamePhase::Running => return,
            GamePhase::GameOver | GamePhase::Halted => self.reset(),
            GamePhase::Idle | GamePhase::Paused => {}
        }
        self.state.phase = GamePhase::Running;
        self.state.running = true;
        log::info!("Game started ({})", self.state.difficulty);
        self.emit(&[GameEvent::Started]);
    }

    /// Running -> Paused; ignored in any other state
    pub fn pause(&mut self) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        self.state.phase = GamePhase::Paused;
        self.state.running = false;
        log::info!("Game paused at score {}", self.state.score);
        self.emit(&[GameEvent::Paused]);
    }

    /// Start/pause button: pause while running, start otherwise
    pub fn toggle(&mut self) {
        if self.state.phase == GamePhase::Running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Any state -> Idle with a fresh world
    pub fn reset(&mut self) {
        self.state.reset();
        self.filter.reset();
        log::info!("Game reset");
        self.emit(&[GameEvent::Reset]);
    }

    /// Takes effect on the next spawn check
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.state.difficulty != difficulty {
            log::info!("Difficulty changed to {}", difficulty);
        }
        self.state.difficulty = difficulty;
    }

    /// Parse and apply a level name; unknown names leave the level untouched
    pub fn set_difficulty_name(&mut self, name: &str) -> Result<Difficulty, ConfigError> {
        let difficulty = name.parse::<Difficulty>().inspect_err(|e| {
            log::warn!("Rejected difficulty: {}", e);
        })?;
        self.set_difficulty(difficulty);
        Ok(difficulty)
    }

    /// Force the per-tick spawn probability, `None` restores the difficulty table
    pub fn set_spawn_override(&mut self, probability: Option<f32>) {
        self.spawner.set_probability_override(probability);
    }

    /// Append an obstacle directly, bypassing the factory
    pub fn inject_obstacle(&mut self, obstacle: Obstacle) {
        self.state.obstacles.push(obstacle);
    }

    /// Advance one fixed step with the latest steering sample.
    ///
    /// Events raised before a failing step still reach the listeners.
    pub fn tick(&mut self, sample: Option<f32>) -> Result<Vec<GameEvent>, SimError> {
        let input = TickInput { steering: sample };
        let mut events = Vec::new();
        let result = tick_into(
            &mut self.state,
            &mut self.filter,
            &mut self.spawner,
            &input,
            &mut events,
        );
        self.emit(&events);
        result.inspect_err(|e| log::error!("Simulation halted: {}", e))?;
        Ok(events)
    }

    fn emit(&mut self, events: &[GameEvent]) {
        for event in events {
            for listener in self.listeners.iter_mut() {
                listener(event);
            }
        }
    }
}

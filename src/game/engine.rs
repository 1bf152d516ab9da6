use std::time::Duration;
use tracing::{debug, info};

use super::{
    config::GameConfig,
    direction::Direction,
    error::ConfigError,
    food::{CellPicker, RandomCells},
    state::{CollisionType, GameState, GameStatus, Position, Snake},
};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn moved(ate_food: bool) -> Self {
        Self {
            terminated: false,
            info: StepInfo {
                ate_food,
                collision_type: None,
            },
        }
    }

    fn ended(ate_food: bool, collision_type: Option<CollisionType>) -> Self {
        Self {
            terminated: true,
            info: StepInfo {
                ate_food,
                collision_type,
            },
        }
    }
}

/// The snake simulation kernel.
///
/// Owns the whole game state. Drivers feed it directions and call
/// [`step`](Self::step) once per tick; renderers read [`state`](Self::state).
pub struct GameEngine<P = RandomCells> {
    config: GameConfig,
    picker: P,
    state: GameState,
    /// Direction the next step will adopt
    pending_direction: Direction,
}

impl GameEngine<RandomCells> {
    /// Create an engine that places food with the thread-local RNG
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_picker(config, RandomCells::default())
    }
}

impl<P: CellPicker> GameEngine<P> {
    /// Create an engine with a custom food source and start a fresh game
    pub fn with_picker(config: GameConfig, mut picker: P) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = Self::fresh_state(&config, &mut picker);

        Ok(Self {
            config,
            picker,
            state,
            pending_direction: Direction::Right,
        })
    }

    /// Continue from an existing state. The grid size is taken from `state`.
    ///
    /// Rejects snapshots whose snake or food break the game's invariants.
    pub fn resume(mut config: GameConfig, picker: P, state: GameState) -> Result<Self, ConfigError> {
        config.grid_width = state.grid_width;
        config.grid_height = state.grid_height;
        config.validate()?;
        state.validate()?;

        Ok(Self {
            config,
            picker,
            pending_direction: state.snake.direction,
            state,
        })
    }

    /// Start a new game on a `width` x `height` grid ticking every `initial_tick`.
    ///
    /// On error the engine keeps its previous game and configuration.
    pub fn reset(
        &mut self,
        width: usize,
        height: usize,
        initial_tick: Duration,
    ) -> Result<(), ConfigError> {
        let config = GameConfig {
            grid_width: width,
            grid_height: height,
            initial_tick,
            ..self.config.clone()
        };
        config.validate()?;

        self.config = config;
        self.restart();
        Ok(())
    }

    /// Start a new game with the current configuration
    pub fn restart(&mut self) {
        self.state = Self::fresh_state(&self.config, &mut self.picker);
        self.pending_direction = Direction::Right;
        debug!(
            width = self.config.grid_width,
            height = self.config.grid_height,
            food = ?self.state.food,
            "game reset"
        );
    }

    /// Request a new direction for the next step.
    ///
    /// Requests that would reverse the snake onto itself are ignored. The
    /// latest accepted request wins.
    pub fn set_direction(&mut self, requested: Direction) {
        if !self.state.snake.direction.is_opposite(requested) {
            self.pending_direction = requested;
        }
    }

    /// Advance the game by one tick
    pub fn step(&mut self) -> StepResult {
        if self.state.is_game_over() {
            return StepResult::ended(false, None);
        }

        self.state.snake.direction = self.pending_direction;
        let new_head = self
            .state
            .snake
            .head()
            .moved_in_direction(self.state.snake.direction);

        if let Some(collision_type) = self.check_collision(new_head) {
            self.end_game(collision_type);
            return StepResult::ended(false, Some(collision_type));
        }

        let ate_food = new_head == self.state.food;
        self.state.snake.advance(new_head, ate_food);
        self.state.steps += 1;

        if !ate_food {
            return StepResult::moved(false);
        }

        self.state.score += 1;
        let next_tick = self.config.speed_ramp.apply(self.state.tick_interval, 1);
        if next_tick != self.state.tick_interval {
            debug!(tick_ms = next_tick.as_millis() as u64, "speed up");
            self.state.tick_interval = next_tick;
        }

        match Self::spawn_food_avoid_snake(
            &mut self.picker,
            &self.state.snake,
            self.config.grid_width,
            self.config.grid_height,
        ) {
            Some(food) => {
                debug!(score = self.state.score, ?food, "food eaten");
                self.state.food = food;
                StepResult::moved(true)
            }
            None => {
                self.end_game(CollisionType::BoardFull);
                StepResult::ended(true, Some(CollisionType::BoardFull))
            }
        }
    }

    /// Read-only snapshot of the current game
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Direction the next step will move in
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    fn fresh_state(config: &GameConfig, picker: &mut P) -> GameState {
        let center = Position::new(
            (config.grid_width / 2) as i32,
            (config.grid_height / 2) as i32,
        );
        let snake = Snake::new(center, Direction::Right, 1);

        // validate() guarantees a second free cell
        let food =
            Self::spawn_food_avoid_snake(picker, &snake, config.grid_width, config.grid_height)
                .unwrap_or(center);

        GameState::new(
            snake,
            food,
            config.grid_width,
            config.grid_height,
            config.initial_tick,
        )
    }

    fn end_game(&mut self, collision_type: CollisionType) {
        self.state.status = GameStatus::GameOver;
        info!(
            score = self.state.score,
            steps = self.state.steps,
            ?collision_type,
            "game over"
        );
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !self.state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // The tail still counts: it only moves after the head is placed.
        if self.state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Rejection-sample a free cell. Returns `None` when the snake fills the grid.
    ///
    /// Expected draws grow as the board fills up; there is no upper bound.
    fn spawn_food_avoid_snake(
        picker: &mut P,
        snake: &Snake,
        width: usize,
        height: usize,
    ) -> Option<Position> {
        if snake.len() >= width * height {
            return None;
        }

        loop {
            let pos = picker.pick(width, height);
            let in_bounds = pos.x >= 0
                && (pos.x as usize) < width
                && pos.y >= 0
                && (pos.y as usize) < height;

            if in_bounds && !snake.occupies(pos) {
                return Some(pos);
            }
        }
    }
}

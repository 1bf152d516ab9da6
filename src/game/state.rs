use std::collections::HashSet;
use std::time::Duration;

use super::direction::Direction;
use super::error::ConfigError;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    pub fn manhattan_distance(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a snake whose extra segments trail straight behind the head
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if any segment, head and tail included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Push `new_head` to the front; the tail stays put only when growing
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Snake covers every cell, so no food can be placed.
    ///
    /// The food keeps its old cell, which is now under the head: the only
    /// reachable state where food and snake overlap.
    BoardFull,
}

/// Whether the kernel still advances on `step`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Complete game state, as handed to renderers
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub steps: u32,
    pub status: GameStatus,
    /// Logical delay the driver should wait between steps
    pub tick_interval: Duration,
}

impl GameState {
    /// Create a new game state
    pub fn new(
        snake: Snake,
        food: Position,
        grid_width: usize,
        grid_height: usize,
        tick_interval: Duration,
    ) -> Self {
        Self {
            snake,
            food,
            grid_width,
            grid_height,
            score: 0,
            steps: 0,
            status: GameStatus::Running,
            tick_interval,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && (pos.x as usize) < self.grid_width
            && pos.y >= 0
            && (pos.y as usize) < self.grid_height
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    /// Check the snake and food against the grid.
    ///
    /// The snake must be non-empty, inside the grid, free of overlaps and made
    /// of adjacent segments. Food must be on the grid, and off the snake while
    /// the game is running.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.snake.is_empty() {
            return Err(ConfigError::EmptySnake);
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTick);
        }

        let mut seen = HashSet::with_capacity(self.snake.len());
        for (index, pos) in self.snake.body.iter().enumerate() {
            if !self.is_in_bounds(*pos) {
                return Err(ConfigError::SegmentOutOfBounds {
                    index,
                    x: pos.x,
                    y: pos.y,
                });
            }
            if !seen.insert(*pos) {
                return Err(ConfigError::DuplicateSegment {
                    index,
                    x: pos.x,
                    y: pos.y,
                });
            }
        }

        if let Some(index) = self
            .snake
            .body
            .windows(2)
            .position(|pair| pair[0].manhattan_distance(pair[1]) != 1)
        {
            return Err(ConfigError::DetachedSegment { index });
        }

        let food = self.food;
        if !self.is_in_bounds(food) {
            return Err(ConfigError::FoodOutOfBounds {
                x: food.x,
                y: food.y,
            });
        }
        if self.is_running() && self.snake.occupies(food) {
            return Err(ConfigError::FoodOnSnake {
                x: food.x,
                y: food.y,
            });
        }

        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.grid_width * self.grid_height
    }

    /// Fraction of the grid covered by the snake
    pub fn occupancy(&self) -> f32 {
        self.snake.len() as f32 / self.cell_count() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick() -> Duration {
        Duration::from_millis(100)
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_manhattan_distance() {
        let a = Position::new(1, 1);
        assert_eq!(a.manhattan_distance(Position::new(1, 2)), 1);
        assert_eq!(a.manhattan_distance(Position::new(4, -1)), 5);
        assert_eq!(a.manhattan_distance(a), 0);
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.body[1], Position::new(4, 5));
        assert_eq!(snake.body[2], Position::new(3, 5));
        assert_eq!(snake.body_segments().len(), 2);
    }

    #[test]
    fn test_zero_length_snake_still_has_a_head() {
        let snake = Snake::new(Position::new(2, 2), Direction::Up, 0);
        assert_eq!(snake.len(), 1);
        assert!(!snake.is_empty());
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.advance(Position::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert!(!snake.occupies(Position::new(3, 5)));

        snake.advance(Position::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(7, 5));
        assert!(snake.occupies(Position::new(4, 5)));
    }

    #[test]
    fn test_occupancy_includes_head_and_tail() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(snake.occupies(Position::new(3, 5)));
        assert!(!snake.occupies(Position::new(10, 10)));
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Position::new(10, 10),
            20,
            20,
            tick(),
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
    }

    fn valid_state() -> GameState {
        GameState::new(
            Snake::new(Position::new(3, 2), Direction::Right, 3),
            Position::new(0, 0),
            6,
            5,
            tick(),
        )
    }

    #[test]
    fn test_validate_accepts_consistent_state() {
        assert_eq!(valid_state().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_empty_snake() {
        let mut state = valid_state();
        state.snake.body.clear();
        assert_eq!(state.validate(), Err(ConfigError::EmptySnake));
    }

    #[test]
    fn test_validate_rejects_zero_tick() {
        let mut state = valid_state();
        state.tick_interval = Duration::ZERO;
        assert_eq!(state.validate(), Err(ConfigError::ZeroTick));
    }

    #[test]
    fn test_validate_rejects_segment_outside_grid() {
        let state = GameState::new(
            Snake::new(Position::new(1, 2), Direction::Right, 3),
            Position::new(4, 4),
            6,
            5,
            tick(),
        );
        assert_eq!(
            state.validate(),
            Err(ConfigError::SegmentOutOfBounds {
                index: 2,
                x: -1,
                y: 2
            })
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_segment() {
        let mut state = valid_state();
        state.snake.body = vec![
            Position::new(2, 2),
            Position::new(2, 3),
            Position::new(2, 2),
        ];
        assert_eq!(
            state.validate(),
            Err(ConfigError::DuplicateSegment {
                index: 2,
                x: 2,
                y: 2
            })
        );
    }

    #[test]
    fn test_validate_rejects_detached_segments() {
        let mut state = valid_state();
        state.snake.body = vec![Position::new(2, 2), Position::new(4, 2)];
        assert_eq!(
            state.validate(),
            Err(ConfigError::DetachedSegment { index: 0 })
        );
    }

    #[test]
    fn test_validate_rejects_food_outside_grid() {
        let mut state = valid_state();
        state.food = Position::new(6, 0);
        assert_eq!(
            state.validate(),
            Err(ConfigError::FoodOutOfBounds { x: 6, y: 0 })
        );
    }

    #[test]
    fn test_validate_food_on_snake_only_matters_while_running() {
        let mut state = valid_state();
        state.food = state.snake.head();
        assert_eq!(
            state.validate(),
            Err(ConfigError::FoodOnSnake { x: 3, y: 2 })
        );

        state.status = GameStatus::GameOver;
        assert_eq!(state.validate(), Ok(()));
    }

    #[test]
    fn test_status_and_occupancy() {
        let mut state = GameState::new(
            Snake::new(Position::new(2, 0), Direction::Right, 2),
            Position::new(3, 1),
            4,
            2,
            tick(),
        );
        assert!(state.is_running());
        assert_eq!(state.cell_count(), 8);
        assert!((state.occupancy() - 0.25).abs() < f32::EPSILON);

        state.status = GameStatus::GameOver;
        assert!(state.is_game_over());
        assert!(!state.is_running());
    }
}

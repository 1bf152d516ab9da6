use thiserror::Error;

/// Precondition violations detected when a kernel is built or reset.
///
/// These are configuration mistakes, not runtime conditions: callers are
/// expected to fix their input rather than retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid width must be positive")]
    ZeroWidth,
    #[error("grid height must be positive")]
    ZeroHeight,
    #[error("grid {width}x{height} has no room for food next to the snake")]
    GridTooSmall { width: usize, height: usize },
    #[error("grid {width}x{height} does not fit in i32 coordinates")]
    GridTooLarge { width: usize, height: usize },
    #[error("tick interval must be positive")]
    ZeroTick,
    #[error("speed ramp floor must be positive")]
    ZeroRampFloor,
    #[error("snake has no segments")]
    EmptySnake,
    #[error("snake segment {index} at ({x}, {y}) is outside the grid")]
    SegmentOutOfBounds { index: usize, x: i32, y: i32 },
    #[error("snake segment {index} at ({x}, {y}) overlaps an earlier segment")]
    DuplicateSegment { index: usize, x: i32, y: i32 },
    #[error("snake segment {index} is not adjacent to the next one")]
    DetachedSegment { index: usize },
    #[error("food at ({x}, {y}) is outside the grid")]
    FoodOutOfBounds { x: i32, y: i32 },
    #[error("food at ({x}, {y}) sits on the snake")]
    FoodOnSnake { x: i32, y: i32 },
}

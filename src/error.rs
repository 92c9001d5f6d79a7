use thiserror::Error;

use crate::grid::{Cell, Direction};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero, got {width}x{height} px")]
    ZeroDimension { width: u32, height: u32 },
    #[error("cell size must be non-zero")]
    ZeroCellSize,
    #[error("grid of {width}x{height} cells has no room inside its walls")]
    GridTooSmall { width: u32, height: u32 },
    #[error("grid of {width}x{height} cells is too large")]
    GridTooLarge { width: u32, height: u32 },
    #[error("the snake needs at least one segment")]
    EmptySnake,
    #[error("segment {0} appears more than once in the snake")]
    DuplicateSegment(Cell),
    #[error("segment {0} is not adjacent to the segment before it")]
    DetachedSegment(Cell),
    #[error("initial heading {0:?} points back into the body")]
    HeadingIntoBody(Direction),
    #[error("snake segment {0} is on or beyond the wall")]
    SnakeOutOfBounds(Cell),
    #[error("apple at {0} is on or beyond the wall")]
    AppleOutOfBounds(Cell),
    #[error("apple at {0} overlaps the snake")]
    AppleOnSnake(Cell),
    #[error("tick interval must be non-zero")]
    ZeroTickInterval,
    #[error("tick decrement must be non-zero or the game never speeds up")]
    ZeroTickDecrement,
    #[error("minimum tick interval {min} ms exceeds the initial interval {initial} ms")]
    MinIntervalAboveInitial { min: u64, initial: u64 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("no free cell left for the apple")]
    NoSpaceForApple,
}

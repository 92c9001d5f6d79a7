pub mod apple;
pub mod app;
pub mod collision;
pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod input;
pub mod snake;
pub mod term;
pub mod timer;

pub use config::Config;
pub use error::{ConfigError, GameError};
pub use game::{Frame, GameOverReason, GameState, Phase, Renderer, Scheduler, SnakeGame};
pub use grid::{Cell, Direction, Grid};
pub use snake::{MoveOutcome, Snake};

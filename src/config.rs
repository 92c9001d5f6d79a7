use std::time::Duration;

use crate::error::ConfigError;
use crate::grid::{Cell, CellInt, Direction, Grid};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // Walls included
    pub grid_width_px: u32,
    pub grid_height_px: u32,
    pub cell_size_px: u32,
    pub initial_tick_interval_ms: u64,
    pub tick_decrement_ms: u64,
    pub min_tick_interval_ms: u64,
    // Head first
    pub initial_snake_body: Vec<Cell>,
    pub initial_heading: Direction,
    pub initial_apple_position: Cell,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grid_width_px: 300,
            grid_height_px: 200,
            cell_size_px: 10,
            initial_tick_interval_ms: 100,
            tick_decrement_ms: 5,
            min_tick_interval_ms: 30,
            initial_snake_body: vec![Cell::new(7, 5), Cell::new(6, 5), Cell::new(5, 5)],
            initial_heading: Direction::Right,
            initial_apple_position: Cell::new(10, 10),
        }
    }
}

impl Config {
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        if self.grid_width_px == 0 || self.grid_height_px == 0 {
            return Err(ConfigError::ZeroDimension { width: self.grid_width_px, height: self.grid_height_px });
        }

        if self.cell_size_px == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        let width = self.grid_width_px / self.cell_size_px;
        let height = self.grid_height_px / self.cell_size_px;

        if width < 3 || height < 3 {
            return Err(ConfigError::GridTooSmall { width, height });
        }

        match (CellInt::try_from(width), CellInt::try_from(height)) {
            (Ok(w), Ok(h)) => Ok(Grid::new(w, h)),
            _ => Err(ConfigError::GridTooLarge { width, height }),
        }
    }

    pub fn validate(&self) -> Result<Grid, ConfigError> {
        let grid = self.grid()?;

        if self.initial_tick_interval_ms == 0 || self.min_tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        if self.tick_decrement_ms == 0 {
            return Err(ConfigError::ZeroTickDecrement);
        }

        if self.min_tick_interval_ms > self.initial_tick_interval_ms {
            return Err(ConfigError::MinIntervalAboveInitial {
                min: self.min_tick_interval_ms,
                initial: self.initial_tick_interval_ms,
            });
        }

        if let Some(cell) = self.initial_snake_body.iter().find(|c| !grid.within_bounds(**c)) {
            return Err(ConfigError::SnakeOutOfBounds(*cell));
        }

        let apple = self.initial_apple_position;
        if !grid.within_bounds(apple) {
            return Err(ConfigError::AppleOutOfBounds(apple));
        }
        if self.initial_snake_body.contains(&apple) {
            return Err(ConfigError::AppleOnSnake(apple));
        }

        Ok(grid)
    }

    pub fn initial_tick_interval(&self) -> Duration {
        Duration::from_millis(self.initial_tick_interval_ms)
    }
}

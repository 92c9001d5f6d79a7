use crate::collision::{self, Collision};
use crate::error::ConfigError;
use crate::grid::{Cell, Direction, Grid};
use MoveOutcome::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Continued,
    AteApple,
    Collided(Collision),
}

#[derive(Clone, Debug)]
pub struct Snake {
    // Head first
    body: Vec<Cell>,
    heading: Direction,
    pending_heading: Direction,
}

impl Snake {
    pub fn new(body: Vec<Cell>, heading: Direction) -> Result<Self, ConfigError> {
        if body.is_empty() {
            return Err(ConfigError::EmptySnake);
        }

        for (i, cell) in body.iter().enumerate() {
            if body[..i].contains(cell) {
                return Err(ConfigError::DuplicateSegment(*cell));
            }
        }

        for pair in body.windows(2) {
            if pair[0].direction_from(pair[1]).is_none() {
                return Err(ConfigError::DetachedSegment(pair[1]));
            }
        }

        if body.len() > 1 && body[0].neighbor(heading) == Some(body[1]) {
            return Err(ConfigError::HeadingIntoBody(heading));
        }

        Ok(Snake { body, heading, pending_heading: heading })
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn pending_heading(&self) -> Direction {
        self.pending_heading
    }

    // Reversing straight back into the neck is ignored
    pub fn request_heading(&mut self, new_heading: Direction) {
        if new_heading != self.heading.opposite() {
            self.pending_heading = new_heading;
        }
    }

    pub fn move_step(&mut self, grid: &Grid, apple: Cell) -> MoveOutcome {
        self.heading = self.pending_heading;

        let new_head = match self.head().neighbor(self.heading) {
            Some(cell) => cell,
            None => return Collided(Collision::Wall),
        };

        if let Some(collision) = collision::classify(grid, &self.body, new_head) {
            return Collided(collision);
        }

        self.body.insert(0, new_head);

        if new_head == apple {
            AteApple
        } else {
            self.body.pop();
            Continued
        }
    }
}

use crate::grid::{Cell, Grid};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfCollision,
}

// `body` is the body before the move, so the tail still counts
pub fn classify(grid: &Grid, body: &[Cell], head: Cell) -> Option<Collision> {
    if !grid.within_bounds(head) {
        Some(Collision::Wall)
    } else if body.contains(&head) {
        Some(Collision::SelfCollision)
    } else {
        None
    }
}

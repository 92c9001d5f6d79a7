use rand::Rng;
use rand::seq::IteratorRandom;

use crate::error::GameError;
use crate::grid::{Cell, Grid};

#[derive(Clone, Debug)]
pub struct Apple {
    position: Cell,
}

impl Apple {
    pub fn new(position: Cell) -> Self {
        Apple { position }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    // Leaves the apple where it was when every inner cell is taken
    pub fn relocate<R: Rng + ?Sized>(&mut self, grid: &Grid, occupied: &[Cell], rng: &mut R) -> Result<Cell, GameError> {
        let choice = grid.inner_cells()
            .filter(|cell| !occupied.contains(cell))
            .choose(rng);

        match choice {
            Some(cell) => {
                self.position = cell;
                Ok(cell)
            },
            None => Err(GameError::NoSpaceForApple),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_relocate_avoids_occupied_cells() {
        let grid = Grid::new(6, 6);
        let mut rng = StdRng::seed_from_u64(7);
        let mut apple = Apple::new(Cell::new(1, 1));

        // Leave a single free inner cell
        let free = Cell::new(3, 2);
        let occupied: Vec<Cell> = grid.inner_cells().filter(|c| *c != free).collect();

        for _ in 0..20 {
            assert_eq!(apple.relocate(&grid, &occupied, &mut rng), Ok(free));
            assert_eq!(apple.position(), free);
        }
    }

    #[test]
    fn test_relocate_stays_inside_walls() {
        let grid = Grid::new(8, 5);
        let mut rng = StdRng::seed_from_u64(1);
        let mut apple = Apple::new(Cell::new(1, 1));
        let occupied = [Cell::new(2, 2), Cell::new(3, 2)];

        for _ in 0..200 {
            let cell = apple.relocate(&grid, &occupied, &mut rng).unwrap();
            assert!(grid.within_bounds(cell));
            assert!(!occupied.contains(&cell));
        }
    }

    #[test]
    fn test_relocate_reaches_every_free_cell() {
        let grid = Grid::new(5, 5);
        let mut rng = StdRng::seed_from_u64(99);
        let mut apple = Apple::new(Cell::new(1, 1));
        let mut seen = Vec::new();

        for _ in 0..500 {
            let cell = apple.relocate(&grid, &[], &mut rng).unwrap();
            if !seen.contains(&cell) {
                seen.push(cell);
            }
        }

        assert_eq!(seen.len(), grid.inner_cells().count());
    }

    #[test]
    fn test_relocate_on_full_grid() {
        let grid = Grid::new(5, 4);
        let mut rng = StdRng::seed_from_u64(3);
        let mut apple = Apple::new(Cell::new(2, 2));
        let occupied: Vec<Cell> = grid.inner_cells().collect();

        assert_eq!(apple.relocate(&grid, &occupied, &mut rng), Err(GameError::NoSpaceForApple));
        assert_eq!(apple.position(), Cell::new(2, 2));
    }
}

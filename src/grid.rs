use std::fmt;

use Direction::*;

pub type CellInt = u16;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    fn offset(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: CellInt,
    pub row: CellInt,
}

impl Cell {
    pub const fn new(col: CellInt, row: CellInt) -> Self {
        Cell { col, row }
    }

    // None past coordinate zero, which is wall anyway
    pub fn neighbor(self, dir: Direction) -> Option<Cell> {
        let (dc, dr) = dir.offset();
        let col = CellInt::try_from(self.col as i32 + dc).ok()?;
        let row = CellInt::try_from(self.row as i32 + dr).ok()?;
        Some(Cell { col, row })
    }

    pub fn direction_from(self, from: Cell) -> Option<Direction> {
        [Up, Down, Left, Right].iter()
            .copied()
            .find(|dir| from.neighbor(*dir) == Some(self))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

// The outermost ring of cells is wall
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: CellInt,
    height: CellInt,
}

impl Grid {
    pub fn new(width: CellInt, height: CellInt) -> Self {
        Grid { width, height }
    }

    pub fn width(&self) -> CellInt {
        self.width
    }

    pub fn height(&self) -> CellInt {
        self.height
    }

    pub fn within_bounds(&self, cell: Cell) -> bool {
        cell.col > 0 && cell.row > 0 &&
            cell.col < self.width.saturating_sub(1) && cell.row < self.height.saturating_sub(1)
    }

    pub fn is_wall(&self, cell: Cell) -> bool {
        cell.col < self.width && cell.row < self.height && !self.within_bounds(cell)
    }

    pub fn inner_cells(&self) -> impl Iterator<Item = Cell> {
        let (w, h) = (self.width, self.height);
        (1..h.saturating_sub(1))
            .flat_map(move |row| (1..w.saturating_sub(1)).map(move |col| Cell::new(col, row)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_ring_is_out_of_bounds() {
        let grid = Grid::new(10, 10);

        assert!(!grid.within_bounds(Cell::new(0, 5)));
        assert!(!grid.within_bounds(Cell::new(5, 0)));
        assert!(!grid.within_bounds(Cell::new(9, 5)));
        assert!(!grid.within_bounds(Cell::new(5, 9)));
        assert!(!grid.within_bounds(Cell::new(12, 5)));

        assert!(grid.within_bounds(Cell::new(1, 1)));
        assert!(grid.within_bounds(Cell::new(8, 8)));
    }

    #[test]
    fn test_is_wall() {
        let grid = Grid::new(10, 10);
        assert!(grid.is_wall(Cell::new(0, 0)));
        assert!(grid.is_wall(Cell::new(9, 3)));
        assert!(!grid.is_wall(Cell::new(4, 4)));
        assert!(!grid.is_wall(Cell::new(10, 3)));
    }

    #[test]
    fn test_neighbor() {
        let cell = Cell::new(3, 3);
        assert_eq!(cell.neighbor(Up), Some(Cell::new(3, 2)));
        assert_eq!(cell.neighbor(Down), Some(Cell::new(3, 4)));
        assert_eq!(cell.neighbor(Left), Some(Cell::new(2, 3)));
        assert_eq!(cell.neighbor(Right), Some(Cell::new(4, 3)));

        assert_eq!(Cell::new(0, 4).neighbor(Left), None);
        assert_eq!(Cell::new(4, 0).neighbor(Up), None);
    }

    #[test]
    fn test_direction_from() {
        assert_eq!(Cell::new(7, 5).direction_from(Cell::new(6, 5)), Some(Right));
        assert_eq!(Cell::new(6, 4).direction_from(Cell::new(6, 5)), Some(Up));
        assert_eq!(Cell::new(8, 5).direction_from(Cell::new(6, 5)), None);
        assert_eq!(Cell::new(7, 6).direction_from(Cell::new(6, 5)), None);
    }

    #[test]
    fn test_inner_cells() {
        let grid = Grid::new(5, 4);
        let cells: Vec<Cell> = grid.inner_cells().collect();

        assert_eq!(cells.len(), 6);
        assert!(cells.iter().all(|c| grid.within_bounds(*c)));
        assert_eq!(cells[0], Cell::new(1, 1));
        assert_eq!(cells[5], Cell::new(3, 2));
    }

    #[test]
    fn test_opposite() {
        for dir in [Up, Down, Left, Right].iter() {
            assert_eq!(dir.opposite().opposite(), *dir);
            assert_ne!(dir.opposite(), *dir);
        }
    }
}

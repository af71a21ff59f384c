//! Static maze representation

use super::Direction;
use crate::error::MazeError;

/// A square maze. Cells are addressed `(x, y)` with `x` the row and `y` the column.
///
/// The token starts at `(0, 0)` and must reach `(size - 1, size - 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    blocked: Vec<bool>,
}

impl Grid {
    /// Create a grid from a row-major blocked mask
    pub fn new(size: usize, blocked: Vec<bool>) -> Result<Self, MazeError> {
        if size == 0 {
            return Err(MazeError::ZeroSize);
        }
        if blocked.len() != size * size {
            return Err(MazeError::CellCount {
                expected: size * size,
                found: blocked.len(),
            });
        }
        if blocked[0] {
            return Err(MazeError::BlockedStart);
        }

        Ok(Self { size, blocked })
    }

    /// Create a grid from a 2D blocked mask
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, MazeError> {
        let size = rows.len();
        if size == 0 {
            return Err(MazeError::ZeroSize);
        }

        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != size {
                return Err(MazeError::RowLength {
                    row,
                    expected: size,
                    found: cells.len(),
                });
            }
        }

        Self::new(size, rows.into_iter().flatten().collect())
    }

    /// A grid with no blocked cells
    pub fn open(size: usize) -> Result<Self, MazeError> {
        Self::new(size, vec![false; size * size])
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        x * self.size + y
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn start(&self) -> (usize, usize) {
        (0, 0)
    }

    pub fn goal(&self) -> (usize, usize) {
        (self.size - 1, self.size - 1)
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    /// Out of bounds cells count as blocked
    pub fn is_blocked(&self, x: usize, y: usize) -> bool {
        !self.in_bounds(x, y) || self.blocked[self.index(x, y)]
    }

    pub fn is_free(&self, x: usize, y: usize) -> bool {
        !self.is_blocked(x, y)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size).flat_map(move |x| (0..self.size).map(move |y| (x, y)))
    }

    /// Free cells in row-major order
    pub fn free_cells(&self) -> Vec<(usize, usize)> {
        self.cells().filter(|&(x, y)| self.is_free(x, y)).collect()
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|&&cell| cell).count()
    }

    /// The in-bounds cell reached from `(x, y)` by `direction`, blocked or not
    pub fn neighbor(&self, x: usize, y: usize, direction: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = direction.offset();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        self.in_bounds(nx, ny).then_some((nx, ny))
    }

    /// The neighbor reached by `direction` if the token may step onto it
    pub fn open_neighbor(&self, x: usize, y: usize, direction: Direction) -> Option<(usize, usize)> {
        self.neighbor(x, y, direction)
            .filter(|&(nx, ny)| self.is_free(nx, ny))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::open(3).unwrap();
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.blocked_count(), 0);
        assert_eq!(grid.free_cells().len(), 9);
        assert_eq!(grid.goal(), (2, 2));
    }

    #[test]
    fn test_blocked_start_rejected() {
        let rows = vec![vec![true, false], vec![false, false]];
        assert_eq!(Grid::from_rows(rows), Err(MazeError::BlockedStart));
    }

    #[test]
    fn test_non_square_rejected() {
        let rows = vec![vec![false, false], vec![false]];
        assert!(matches!(
            Grid::from_rows(rows),
            Err(MazeError::RowLength { row: 1, .. })
        ));
        assert_eq!(Grid::new(0, vec![]), Err(MazeError::ZeroSize));
        assert!(matches!(
            Grid::new(2, vec![false; 3]),
            Err(MazeError::CellCount { .. })
        ));
    }

    #[test]
    fn test_neighbors() {
        let rows = vec![vec![false, false], vec![true, false]];
        let grid = Grid::from_rows(rows).unwrap();

        assert_eq!(grid.neighbor(0, 0, Direction::Up), None);
        assert_eq!(grid.neighbor(0, 0, Direction::Left), None);
        assert_eq!(grid.neighbor(0, 0, Direction::Down), Some((1, 0)));
        assert_eq!(grid.open_neighbor(0, 0, Direction::Down), None);
        assert_eq!(grid.open_neighbor(0, 0, Direction::Right), Some((0, 1)));
        assert_eq!(grid.open_neighbor(0, 1, Direction::Down), Some((1, 1)));
    }

    #[test]
    fn test_free_cells_row_major() {
        let rows = vec![vec![false, true], vec![false, false]];
        let grid = Grid::from_rows(rows).unwrap();
        assert_eq!(grid.free_cells(), vec![(0, 0), (1, 0), (1, 1)]);
        assert!(grid.is_blocked(5, 0));
    }
}

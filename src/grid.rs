use crate::direction::{Direction, LocalPattern};
use crate::error::GridError;

/// State of a single arena cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
    Untouched,
    Touched,
    Blocked,
}

/// Bounded rectangular arena.
/// Valid coordinates are `0..=max_x` by `0..=max_y`; y grows southwards.
#[derive(Clone, Debug)]
pub struct Grid {
    max_x: i32,
    max_y: i32,
    cells: Vec<CellStatus>,
}

impl Grid {
    /// Create a new arena with every cell untouched
    pub fn new(max_x: i32, max_y: i32) -> Result<Self, GridError> {
        if max_x < 0 || max_y < 0 {
            return Err(GridError::InvalidDimensions { max_x, max_y });
        }
        let size = (max_x as usize + 1) * (max_y as usize + 1);
        Ok(Grid {
            max_x,
            max_y,
            cells: vec![CellStatus::Untouched; size],
        })
    }

    /// Create an arena with specific blocked cells
    pub fn with_blocked(max_x: i32, max_y: i32, blocked: &[(i32, i32)]) -> Result<Self, GridError> {
        let mut grid = Self::new(max_x, max_y)?;
        for &(x, y) in blocked {
            grid.block(x, y)?;
        }
        Ok(grid)
    }

    pub fn max_x(&self) -> i32 {
        self.max_x
    }

    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    pub fn width(&self) -> usize {
        self.max_x as usize + 1
    }

    pub fn height(&self) -> usize {
        self.max_y as usize + 1
    }

    /// Check whether (x, y) lies inside the arena
    pub fn include(&self, x: i32, y: i32) -> bool {
        0 <= x && x <= self.max_x && 0 <= y && y <= self.max_y
    }

    /// Convert in-bounds (x, y) coordinates to a cell index
    fn get_id(&self, x: i32, y: i32) -> usize {
        x as usize + y as usize * self.width()
    }

    fn checked_id(&self, x: i32, y: i32) -> Result<usize, GridError> {
        if !self.include(x, y) {
            return Err(GridError::OutOfBounds {
                x,
                y,
                max_x: self.max_x,
                max_y: self.max_y,
            });
        }
        Ok(self.get_id(x, y))
    }

    /// Mark (x, y) as an obstacle
    pub fn block(&mut self, x: i32, y: i32) -> Result<(), GridError> {
        let id = self.checked_id(x, y)?;
        self.cells[id] = CellStatus::Blocked;
        Ok(())
    }

    /// Mark (x, y) as visited. Visiting an obstacle is an error.
    pub fn touch(&mut self, x: i32, y: i32) -> Result<(), GridError> {
        let id = self.checked_id(x, y)?;
        if self.cells[id] == CellStatus::Blocked {
            return Err(GridError::BlockedCell { x, y });
        }
        self.cells[id] = CellStatus::Touched;
        Ok(())
    }

    pub fn cell(&self, x: i32, y: i32) -> Result<CellStatus, GridError> {
        let id = self.checked_id(x, y)?;
        Ok(self.cells[id])
    }

    pub fn touched(&self, x: i32, y: i32) -> Result<bool, GridError> {
        Ok(self.cell(x, y)? == CellStatus::Touched)
    }

    pub fn blocked(&self, x: i32, y: i32) -> Result<bool, GridError> {
        Ok(self.cell(x, y)? == CellStatus::Blocked)
    }

    /// True once every cell is either visited or an obstacle
    pub fn finished(&self) -> bool {
        self.cells.iter().all(|&c| c != CellStatus::Untouched)
    }

    /// (covered cells, total cells); obstacles count as covered
    pub fn coverage(&self) -> (usize, usize) {
        let covered = self
            .cells
            .iter()
            .filter(|&&c| c != CellStatus::Untouched)
            .count();
        (covered, self.cells.len())
    }

    /// Blocked flag for each neighbour of (x, y). Off-grid neighbours count as blocked.
    pub fn local_pattern(&self, x: i32, y: i32) -> Result<LocalPattern, GridError> {
        self.checked_id(x, y)?;
        let [north, east, west, south] = Direction::ALL.map(|dir| match dir.step_from(x, y) {
            Some((nx, ny)) if self.include(nx, ny) => {
                self.cells[self.get_id(nx, ny)] == CellStatus::Blocked
            }
            _ => true,
        });
        Ok(LocalPattern::new(north, east, west, south))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_attributes() {
        let grid = Grid::new(5, 10).unwrap();
        assert_eq!(grid.max_x(), 5);
        assert_eq!(grid.max_y(), 10);
        assert_eq!(grid.width(), 6);
        assert_eq!(grid.height(), 11);
    }

    #[test]
    fn test_negative_dimensions_rejected() {
        assert_eq!(
            Grid::new(-1, 3).unwrap_err(),
            GridError::InvalidDimensions { max_x: -1, max_y: 3 }
        );
    }

    #[test]
    fn test_starts_untouched_and_unblocked() {
        let grid = Grid::new(5, 10).unwrap();
        for x in 0..=5 {
            for y in 0..=10 {
                assert_eq!(grid.touched(x, y), Ok(false));
                assert_eq!(grid.blocked(x, y), Ok(false));
            }
        }
        assert!(!grid.finished());
    }

    #[test]
    fn test_partial_touch_is_not_finished() {
        let mut grid = Grid::new(5, 10).unwrap();
        grid.touch(1, 2).unwrap();
        grid.touch(3, 4).unwrap();
        assert!(!grid.finished());
        assert_eq!(grid.coverage(), (2, 66));
    }

    #[test]
    fn test_finished_exactly_when_all_touched() {
        let mut grid = Grid::new(5, 10).unwrap();
        for x in 0..=5 {
            for y in 0..=10 {
                assert!(!grid.finished());
                grid.touch(x, y).unwrap();
            }
        }
        assert!(grid.finished());

        // Re-touching never changes the outcome
        grid.touch(0, 0).unwrap();
        assert!(grid.finished());
    }

    #[test]
    fn test_blocked_cells_count_towards_finished() {
        let mut grid = Grid::new(1, 0).unwrap();
        grid.block(0, 0).unwrap();
        assert!(!grid.finished());
        grid.touch(1, 0).unwrap();
        assert!(grid.finished());
    }

    #[test]
    fn test_include_boundaries() {
        let grid = Grid::new(5, 10).unwrap();
        assert!(grid.include(0, 0));
        assert!(grid.include(5, 0));
        assert!(grid.include(0, 10));
        assert!(grid.include(5, 10));
        assert!(grid.include(2, 3));

        assert!(!grid.include(-1, 0));
        assert!(!grid.include(5, 20));
        assert!(!grid.include(5, -1));
        assert!(!grid.include(40, 3));
        assert!(!grid.include(-6, 200));
    }

    #[test]
    fn test_out_of_bounds_operations_fail() {
        let mut grid = Grid::new(5, 10).unwrap();
        let expected = GridError::OutOfBounds { x: 6, y: 0, max_x: 5, max_y: 10 };
        assert_eq!(grid.block(6, 0), Err(expected.clone()));
        assert_eq!(grid.touch(6, 0), Err(expected.clone()));
        assert_eq!(grid.touched(6, 0), Err(expected.clone()));
        assert_eq!(grid.blocked(6, 0), Err(expected));
        assert!(grid.touch(0, -1).is_err());
    }

    #[test]
    fn test_block_is_idempotent_and_touch_refuses_blocked() {
        let mut grid = Grid::new(5, 10).unwrap();
        grid.block(2, 3).unwrap();
        grid.block(2, 3).unwrap();
        assert_eq!(grid.blocked(2, 3), Ok(true));
        assert_eq!(grid.touch(2, 3), Err(GridError::BlockedCell { x: 2, y: 3 }));
        assert_eq!(grid.cell(2, 3), Ok(CellStatus::Blocked));
    }

    #[test]
    fn test_local_pattern() {
        let grid = Grid::with_blocked(10, 10, &[(0, 1)]).unwrap();
        assert_eq!(grid.local_pattern(0, 0), Ok(LocalPattern::new(true, false, true, true)));
        assert_eq!(grid.local_pattern(5, 6), Ok(LocalPattern::new(false, false, false, false)));
    }

    #[test]
    fn test_local_pattern_rejects_off_grid_cells() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(
            grid.local_pattern(-1, 0),
            Err(GridError::OutOfBounds { x: -1, y: 0, max_x: 3, max_y: 3 })
        );
        assert!(grid.local_pattern(-5, -5).is_err());
        assert!(grid.local_pattern(i32::MAX, 0).is_err());
        assert!(grid.local_pattern(0, i32::MIN).is_err());
    }

    #[test]
    fn test_with_blocked_rejects_out_of_bounds() {
        assert!(Grid::with_blocked(3, 3, &[(1, 1), (4, 0)]).is_err());
    }
}

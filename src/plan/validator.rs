//! Replay of decoded plans against the maze

use crate::maze::{Grid, Move};
use std::fmt;

/// Checks that a move list walks the token from the start cell to the goal
pub struct PlanValidator<'g> {
    grid: &'g Grid,
}

/// Result of replaying a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Cells visited until the replay stopped
    pub path: Vec<(usize, usize)>,
    pub error_message: Option<String>,
}

impl ValidationResult {
    fn failure(path: Vec<(usize, usize)>, message: String) -> Self {
        Self {
            is_valid: false,
            path,
            error_message: Some(message),
        }
    }
}

impl<'g> PlanValidator<'g> {
    pub fn new(grid: &'g Grid) -> Self {
        Self { grid }
    }

    /// Replay `moves` from the start cell.
    ///
    /// Steps must be numbered `0, 1, 2, ...`, each move must start where the
    /// token stands and land on a free in-bounds cell, and the last position
    /// must be the goal.
    pub fn validate(&self, moves: &[Move]) -> ValidationResult {
        let mut position = self.grid.start();
        let mut path = vec![position];

        for (step, mv) in moves.iter().enumerate() {
            if mv.t != step {
                return ValidationResult::failure(path, format!("Move {} is labelled with time {}", step, mv.t));
            }
            if (mv.x, mv.y) != position {
                return ValidationResult::failure(
                    path,
                    format!(
                        "Move at time {} starts at ({}, {}) but the token is at ({}, {})",
                        step, mv.x, mv.y, position.0, position.1
                    ),
                );
            }

            match self.grid.open_neighbor(mv.x, mv.y, mv.direction) {
                Some(next) => {
                    position = next;
                    path.push(next);
                }
                None => {
                    return ValidationResult::failure(
                        path,
                        format!(
                            "Move at time {} goes {} from ({}, {}) into a wall or off the grid",
                            step, mv.direction, mv.x, mv.y
                        ),
                    );
                }
            }
        }

        if position != self.grid.goal() {
            let (gx, gy) = self.grid.goal();
            return ValidationResult::failure(
                path,
                format!(
                    "Plan ends at ({}, {}) instead of the goal ({}, {})",
                    position.0, position.1, gx, gy
                ),
            );
        }

        ValidationResult {
            is_valid: true,
            path,
            error_message: None,
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Plan Validation:")?;
        writeln!(f, "  Valid: {}", self.is_valid)?;
        writeln!(f, "  Cells visited: {}", self.path.len())?;
        if let Some(ref message) = self.error_message {
            writeln!(f, "  Error: {}", message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Direction;

    fn detour_grid() -> Grid {
        Grid::from_rows(vec![vec![false, false], vec![true, false]]).unwrap()
    }

    #[test]
    fn test_valid_plan() {
        let grid = detour_grid();
        let moves = [
            Move::new(0, 0, 0, Direction::Right),
            Move::new(1, 0, 1, Direction::Down),
        ];

        let result = PlanValidator::new(&grid).validate(&moves);
        assert!(result.is_valid, "{}", result);
        assert_eq!(result.path, vec![(0, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_wall_is_rejected() {
        let grid = detour_grid();
        let moves = [
            Move::new(0, 0, 0, Direction::Down),
            Move::new(1, 1, 0, Direction::Right),
        ];

        let result = PlanValidator::new(&grid).validate(&moves);
        assert!(!result.is_valid);
        assert_eq!(result.path, vec![(0, 0)]);
    }

    #[test]
    fn test_teleport_and_short_plans_are_rejected() {
        let grid = Grid::open(2).unwrap();
        let validator = PlanValidator::new(&grid);

        let teleport = [
            Move::new(0, 0, 0, Direction::Right),
            Move::new(1, 1, 0, Direction::Right),
        ];
        assert!(!validator.validate(&teleport).is_valid);

        let short = [Move::new(0, 0, 0, Direction::Right)];
        assert!(!validator.validate(&short).is_valid);

        let misnumbered = [
            Move::new(0, 0, 0, Direction::Right),
            Move::new(2, 0, 1, Direction::Down),
        ];
        assert!(!validator.validate(&misnumbered).is_valid);
    }

    #[test]
    fn test_empty_plan_on_single_cell() {
        let grid = Grid::open(1).unwrap();
        assert!(PlanValidator::new(&grid).validate(&[]).is_valid);
    }
}

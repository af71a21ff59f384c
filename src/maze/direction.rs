//! Move directions and decoded moves

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single-cell move of the token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions, in the order the decoder scans them
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Row and column offset of the move.
    /// `Up` decreases the row index, `Left` decreases the column index.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
        }
    }

    /// The move that undoes this one
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One step of a plan: the token standing at `(x, y)` moves `direction` at time `t`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub t: usize,
    pub x: usize,
    pub y: usize,
    pub direction: Direction,
}

impl Move {
    pub fn new(t: usize, x: usize, y: usize, direction: Direction) -> Self {
        Self { t, x, y, direction }
    }
}

/// Rendered in the `.model` file format: `@<t>: (<x>, <y>) move <direction>`
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}: ({}, {}) move {}", self.t, self.x, self.y, self.direction)
    }
}

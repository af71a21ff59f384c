//! Maze planning as SAT
//!
//! This library encodes "move a token from the top-left cell of a maze to the
//! bottom-right cell in k steps" as a CNF formula, grows k until CaDiCaL finds
//! the formula satisfiable, and decodes the model back into a move list.

pub mod config;
pub mod error;
pub mod maze;
pub mod plan;
pub mod sat;
pub mod utils;

pub use config::Settings;
pub use error::MazeError;
pub use plan::{MazeProblem, SearchOutcome, Solution};

use anyhow::Result;
use std::path::Path;

/// Search a maze file with the given settings
pub fn solve_maze<P: AsRef<Path>>(path: P, settings: Settings) -> Result<SearchOutcome> {
    MazeProblem::from_file(path, settings)?.solve()
}

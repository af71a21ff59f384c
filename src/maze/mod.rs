//! Maze model: grid, directions and file I/O

pub mod direction;
pub mod grid;
pub mod io;

pub use direction::{Direction, Move};
pub use grid::Grid;
pub use io::{create_example_mazes, list_maze_files, load_grid_from_file, maze_name, parse_grid_from_string};

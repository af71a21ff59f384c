//! Maze file loading and saving
//!
//! Format: the first non-empty line holds the decimal size `N`, followed by
//! exactly `N` lines of `N` characters each. `'1'` marks a blocked cell, any other
//! character a free one.

use super::Grid;
use crate::error::MazeError;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load a maze from a file
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read maze file: {}", path.as_ref().display()))?;

    parse_grid_from_string(&content)
        .with_context(|| format!("Failed to parse maze file: {}", path.as_ref().display()))
}

/// Parse a maze from its text representation
pub fn parse_grid_from_string(content: &str) -> Result<Grid, MazeError> {
    let mut lines: Vec<&str> = content
        .lines()
        .skip_while(|line| line.trim().is_empty())
        .collect();
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }

    let (size_line, rows) = lines.split_first().ok_or(MazeError::Empty)?;
    let size: usize = size_line
        .trim()
        .parse()
        .map_err(|_| MazeError::InvalidSize(size_line.to_string()))?;
    if size == 0 {
        return Err(MazeError::ZeroSize);
    }
    if rows.len() != size {
        return Err(MazeError::RowCount {
            expected: size,
            found: rows.len(),
        });
    }

    let mut blocked = Vec::with_capacity(size * size);
    for (row, line) in rows.iter().enumerate() {
        let length = line.chars().count();
        if length != size {
            return Err(MazeError::RowLength {
                row,
                expected: size,
                found: length,
            });
        }
        blocked.extend(line.chars().map(|ch| ch == '1'));
    }

    Grid::new(size, blocked)
}

/// Convert a maze to its text representation
pub fn grid_to_string(grid: &Grid) -> String {
    let size = grid.size();
    let mut result = String::with_capacity((size + 1) * (size + 1));
    result.push_str(&size.to_string());
    result.push('\n');

    for x in 0..size {
        for y in 0..size {
            result.push(if grid.is_blocked(x, y) { '1' } else { '0' });
        }
        result.push('\n');
    }

    result
}

/// Save a maze to a file, creating parent directories
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, grid_to_string(grid))
        .with_context(|| format!("Failed to write maze to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// The name output files are derived from: the file name, extension included
pub fn maze_name<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "maze".to_string())
}

/// List the maze files of a directory (regular files only, sorted by name)
pub fn list_maze_files<P: AsRef<Path>>(dir_path: P) -> Result<Vec<PathBuf>> {
    let dir = std::fs::read_dir(&dir_path)
        .with_context(|| format!("Failed to read directory: {}", dir_path.as_ref().display()))?;

    let mut files = Vec::new();
    for entry in dir {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Create sample maze files
pub fn create_example_mazes<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let samples: [(&str, &[&str]); 5] = [
        ("open.txt", &["000", "000", "000"]),
        ("corridor.txt", &["0000", "1110", "0000", "1110"]),
        ("detour.txt", &["00", "10"]),
        ("walled.txt", &["000", "001", "010"]),
        ("snake.txt", &["00000", "11110", "00000", "01111", "00000"]),
    ];

    for (name, rows) in samples {
        let grid = Grid::from_rows(
            rows.iter()
                .map(|row| row.chars().map(|ch| ch == '1').collect())
                .collect(),
        )
        .with_context(|| format!("Invalid sample maze {}", name))?;
        save_grid_to_file(&grid, dir.join(name))?;
    }

    Ok(())
}

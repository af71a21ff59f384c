//! Display and output formatting utilities

use crate::maze::Grid;
use crate::plan::{BatchReport, MazeStatus, Solution};

/// Format plans and batch results for the console
pub struct PlanFormatter;

impl PlanFormatter {
    /// Format a single solution for console output
    pub fn format_solution(solution: &Solution, grid: &Grid, show_path: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== {} ===\n", solution.maze_name));
        output.push_str(&format!("Moves: {}\n", solution.horizon));
        output.push_str(&format!("Horizons tried: {}\n", solution.horizons_tried));
        output.push_str(&format!("Solve Time: {:.3}s\n", solution.solve_time.as_secs_f64()));
        output.push_str(&format!(
            "CNF: {} variables, {} clauses\n",
            solution.cnf.variable_count,
            solution.cnf.clause_count()
        ));
        output.push('\n');

        output.push_str(&solution.format_model());

        if show_path {
            output.push('\n');
            output.push_str(&Self::format_grid_with_path(grid, &solution.path));
        }

        output
    }

    /// Draw the maze with the visited cells marked; `S` start, `G` goal
    pub fn format_grid_with_path(grid: &Grid, path: &[(usize, usize)]) -> String {
        let mut output = String::new();

        for x in 0..grid.size() {
            for y in 0..grid.size() {
                let symbol = if (x, y) == grid.start() {
                    'S'
                } else if (x, y) == grid.goal() {
                    'G'
                } else if grid.is_blocked(x, y) {
                    '█'
                } else if path.contains(&(x, y)) {
                    '•'
                } else {
                    '·'
                };
                output.push(symbol);
            }
            output.push('\n');
        }

        output
    }

    /// One `<maze>: <error>` line per maze that failed
    pub fn format_failures(report: &BatchReport) -> Vec<String> {
        report
            .reports
            .iter()
            .filter_map(|maze| match &maze.status {
                MazeStatus::Failed { error } => Some(format!("{}: {}", maze.name, error)),
                _ => None,
            })
            .collect()
    }

    /// Format a batch as a summary table
    pub fn format_batch_summary(report: &BatchReport) -> String {
        let mut output = String::new();

        output.push_str("Maze                 | Result    | Moves | Time(ms)\n");
        output.push_str("---------------------|-----------|-------|---------\n");

        for maze in &report.reports {
            let (result, moves) = match &maze.status {
                MazeStatus::Solved { horizon, .. } => ("solved", horizon.to_string()),
                MazeStatus::Exhausted { .. } => ("exhausted", "-".to_string()),
                MazeStatus::Failed { .. } => ("failed", "-".to_string()),
            };

            output.push_str(&format!(
                "{:20} | {:9} | {:>5} | {:>8}\n",
                truncate(&maze.name, 20),
                result,
                moves,
                maze.elapsed_ms
            ));
        }

        output.push_str(&format!(
            "\n{} solved, {} exhausted, {} failed\n",
            report.solved_count(),
            report.exhausted_count(),
            report.failed_count()
        ));

        output
    }
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Terminal color helpers
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

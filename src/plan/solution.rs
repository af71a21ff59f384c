//! Solved plans and their output files

use crate::config::{OutputConfig, OutputFormat};
use crate::maze::Move;
use crate::sat::Cnf;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A plan found for one maze
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub maze_name: String,
    /// Number of moves, the first satisfiable horizon
    pub horizon: usize,
    pub moves: Vec<Move>,
    /// Cells visited by the token, start and goal included
    pub path: Vec<(usize, usize)>,
    pub horizons_tried: usize,
    /// Formula of the satisfiable horizon
    #[serde(skip)]
    pub cnf: Cnf,
    #[serde(skip)]
    pub solve_time: Duration,
}

impl Solution {
    pub fn new(
        maze_name: String,
        horizon: usize,
        moves: Vec<Move>,
        path: Vec<(usize, usize)>,
        horizons_tried: usize,
        cnf: Cnf,
        solve_time: Duration,
    ) -> Self {
        Self {
            maze_name,
            horizon,
            moves,
            path,
            horizons_tried,
            cnf,
            solve_time,
        }
    }

    /// One `@<t>: (<x>, <y>) move <direction>` line per step
    pub fn format_model(&self) -> String {
        self.moves.iter().map(|mv| format!("{}\n", mv)).collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Write `<directory>/<maze>.model`
    pub fn write_model<P: AsRef<Path>>(&self, directory: P) -> Result<PathBuf> {
        let path = output_path(directory.as_ref(), &self.maze_name, "model")?;
        std::fs::write(&path, self.format_model())
            .with_context(|| format!("Failed to write model file: {}", path.display()))?;
        Ok(path)
    }

    /// Write `<directory>/<maze>.json`
    pub fn write_json<P: AsRef<Path>>(&self, directory: P) -> Result<PathBuf> {
        let path = output_path(directory.as_ref(), &self.maze_name, "json")?;
        std::fs::write(&path, self.to_json()?)
            .with_context(|| format!("Failed to write solution file: {}", path.display()))?;
        Ok(path)
    }

    /// Write `<directory>/<maze>.cnf`
    pub fn write_cnf<P: AsRef<Path>>(&self, directory: P) -> Result<PathBuf> {
        self.cnf.save_to_directory(directory, &self.maze_name)
    }

    /// Write every output file the configuration asks for
    pub fn save(&self, output: &OutputConfig) -> Result<Vec<PathBuf>> {
        let mut written = vec![self.write_model(&output.model_directory)?];

        if output.format == OutputFormat::Json {
            written.push(self.write_json(&output.model_directory)?);
        }
        if output.write_cnf {
            written.push(self.write_cnf(&output.cnf_directory)?);
        }

        for path in &written {
            log::debug!("{}: wrote {}", self.maze_name, path.display());
        }
        Ok(written)
    }
}

fn output_path(directory: &Path, name: &str, extension: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create directory: {}", directory.display()))?;
    Ok(directory.join(format!("{}.{}", name, extension)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Direction;
    use tempfile::tempdir;

    fn sample_solution() -> Solution {
        Solution::new(
            "detour.txt".to_string(),
            2,
            vec![
                Move::new(0, 0, 0, Direction::Right),
                Move::new(1, 0, 1, Direction::Down),
            ],
            vec![(0, 0), (0, 1), (1, 1)],
            2,
            Cnf::new(1, vec![vec![1]]),
            Duration::from_millis(5),
        )
    }

    #[test]
    fn test_model_format() {
        assert_eq!(
            sample_solution().format_model(),
            "@0: (0, 0) move right\n@1: (0, 1) move down\n"
        );
    }

    #[test]
    fn test_json_round_trip() {
        let solution = sample_solution();
        let restored = Solution::from_json(&solution.to_json().unwrap()).unwrap();

        assert_eq!(restored.moves, solution.moves);
        assert_eq!(restored.path, solution.path);
        assert!(restored.cnf.clauses.is_empty());
    }

    #[test]
    fn test_save_outputs() {
        let temp_dir = tempdir().unwrap();
        let output = OutputConfig {
            cnf_directory: temp_dir.path().join("cnf"),
            model_directory: temp_dir.path().join("result"),
            format: OutputFormat::Json,
            write_cnf: true,
        };

        let written = sample_solution().save(&output).unwrap();

        assert_eq!(written.len(), 3);
        assert!(temp_dir.path().join("result/detour.txt.model").exists());
        assert!(temp_dir.path().join("result/detour.txt.json").exists());
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("cnf/detour.txt.cnf")).unwrap(),
            "p cnf 1 1\n1 0\n"
        );
    }
}

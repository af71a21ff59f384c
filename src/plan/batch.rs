//! Solving every maze of a directory

use super::{MazeProblem, SearchOutcome};
use crate::config::Settings;
use crate::maze::{list_maze_files, maze_name};
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Outcome of one maze of a batch
#[derive(Debug, Clone, Serialize)]
pub struct MazeReport {
    pub name: String,
    pub path: PathBuf,
    pub status: MazeStatus,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MazeStatus {
    Solved {
        horizon: usize,
        outputs: Vec<PathBuf>,
    },
    Exhausted {
        horizons_tried: usize,
    },
    /// The maze could not be loaded, solved or written
    Failed {
        error: String,
    },
}

/// Outcomes of every maze of a batch, in file name order
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub reports: Vec<MazeReport>,
}

impl BatchReport {
    pub fn solved_count(&self) -> usize {
        self.count(|status| matches!(status, MazeStatus::Solved { .. }))
    }

    pub fn exhausted_count(&self) -> usize {
        self.count(|status| matches!(status, MazeStatus::Exhausted { .. }))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|status| matches!(status, MazeStatus::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&MazeStatus) -> bool) -> usize {
        self.reports.iter().filter(|report| predicate(&report.status)).count()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Runs the horizon search over maze files and writes their outputs
pub struct BatchRunner {
    settings: Settings,
}

impl BatchRunner {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Solve a single maze file, or every regular file of a directory
    pub fn run<P: AsRef<Path>>(&self, path: P) -> Result<BatchReport> {
        let path = path.as_ref();
        let files = if path.is_dir() {
            list_maze_files(path)?
        } else if path.is_file() {
            vec![path.to_path_buf()]
        } else {
            anyhow::bail!("Maze path does not exist: {}", path.display());
        };

        log::info!("Solving {} maze file(s) from {}", files.len(), path.display());
        Ok(self.run_files(&files))
    }

    /// Mazes are independent: each one is searched on its own, in parallel if enabled
    pub fn run_files(&self, files: &[PathBuf]) -> BatchReport {
        let reports: Vec<MazeReport> = if self.settings.batch.parallel {
            files.par_iter().map(|file| self.process_maze(file)).collect()
        } else {
            files.iter().map(|file| self.process_maze(file)).collect()
        };

        BatchReport { reports }
    }

    /// Search one maze and write its outputs; failures are recorded, not propagated
    pub fn process_maze(&self, path: &Path) -> MazeReport {
        let start_time = Instant::now();

        let status = match self.solve_and_save(path) {
            Ok(status) => status,
            Err(e) => {
                log::warn!("{}: {:#}", path.display(), e);
                MazeStatus::Failed {
                    error: format!("{:#}", e),
                }
            }
        };

        MazeReport {
            name: maze_name(path),
            path: path.to_path_buf(),
            status,
            elapsed_ms: start_time.elapsed().as_millis() as u64,
        }
    }

    fn solve_and_save(&self, path: &Path) -> Result<MazeStatus> {
        let problem = MazeProblem::from_file(path, self.settings.clone())?;

        match problem.solve()? {
            SearchOutcome::Solved(solution) => {
                let outputs = solution
                    .save(&self.settings.output)
                    .with_context(|| format!("Failed to save outputs of {}", problem.name()))?;

                Ok(MazeStatus::Solved {
                    horizon: solution.horizon,
                    outputs,
                })
            }
            SearchOutcome::Exhausted { horizons_tried, .. } => {
                log::warn!(
                    "{}: can't find a plan in {} steps",
                    problem.name(),
                    self.settings.search.max_horizon
                );
                Ok(MazeStatus::Exhausted { horizons_tried })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::tempdir;

    fn batch_settings(root: &Path, parallel: bool) -> Settings {
        let mut settings = Settings::default();
        settings.search.max_horizon = 12;
        settings.output.cnf_directory = root.join("cnf");
        settings.output.model_directory = root.join("result");
        settings.output.format = OutputFormat::Json;
        settings.batch.parallel = parallel;
        settings
    }

    #[test]
    fn test_directory_batch() {
        let temp_dir = tempdir().unwrap();
        let mazes = temp_dir.path().join("mazes");
        std::fs::create_dir_all(&mazes).unwrap();
        std::fs::write(mazes.join("a_open.txt"), "2\n00\n00\n").unwrap();
        std::fs::write(mazes.join("b_walled.txt"), "3\n000\n001\n010\n").unwrap();
        std::fs::write(mazes.join("c_broken.txt"), "3\n000\n").unwrap();

        for parallel in [true, false] {
            let runner = BatchRunner::new(batch_settings(temp_dir.path(), parallel));
            let report = runner.run(&mazes).unwrap();

            assert_eq!(report.reports.len(), 3);
            assert_eq!(report.solved_count(), 1);
            assert_eq!(report.exhausted_count(), 1);
            assert_eq!(report.failed_count(), 1);
            assert_eq!(report.reports[0].name, "a_open.txt");
            assert!(matches!(
                report.reports[0].status,
                MazeStatus::Solved { horizon: 2, .. }
            ));
            assert!(matches!(
                report.reports[1].status,
                MazeStatus::Exhausted { horizons_tried: 11 }
            ));
        }

        assert!(temp_dir.path().join("result/a_open.txt.model").exists());
        assert!(temp_dir.path().join("result/a_open.txt.json").exists());
        assert!(temp_dir.path().join("cnf/a_open.txt.cnf").exists());
        assert!(!temp_dir.path().join("result/b_walled.txt.model").exists());
    }

    #[test]
    fn test_single_file_and_missing_path() {
        let temp_dir = tempdir().unwrap();
        let maze = temp_dir.path().join("detour");
        std::fs::write(&maze, "2\n00\n10\n").unwrap();

        let runner = BatchRunner::new(batch_settings(temp_dir.path(), false));
        let report = runner.run(&maze).unwrap();
        assert_eq!(report.solved_count(), 1);
        assert!(report.to_json().unwrap().contains("\"status\": \"solved\""));

        assert!(runner.run(temp_dir.path().join("missing")).is_err());
    }
}

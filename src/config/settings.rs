//! Configuration settings for the maze planner

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub search: SearchConfig,
    pub encoding: EncodingConfig,
    pub output: OutputConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Exclusive upper bound on the horizons tried
    pub max_horizon: usize,
    /// First horizon tried; 0 checks the plan without moves
    pub start_horizon: usize,
    pub strategy: SearchStrategy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Rebuild solver and clauses for every horizon
    FromScratch,
    /// Keep one solver, append one time step per horizon, check the goal by assumption
    Incremental,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    /// Forbid the token from standing on a cell twice
    pub no_revisit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub cnf_directory: PathBuf,
    pub model_directory: PathBuf,
    pub format: OutputFormat,
    pub write_cnf: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Solve the mazes of a directory on the rayon thread pool
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_horizon: 100,
            start_horizon: 1,
            strategy: SearchStrategy::FromScratch,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            cnf_directory: PathBuf::from("cnf"),
            model_directory: PathBuf::from("result"),
            format: OutputFormat::Text,
            write_cnf: true,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.search.max_horizon <= self.search.start_horizon {
            anyhow::bail!(
                "max_horizon ({}) must be greater than start_horizon ({})",
                self.search.max_horizon,
                self.search.start_horizon
            );
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(max_horizon) = cli_overrides.max_horizon {
            self.search.max_horizon = max_horizon;
        }
        if let Some(start_horizon) = cli_overrides.start_horizon {
            self.search.start_horizon = start_horizon;
        }
        if cli_overrides.incremental {
            self.search.strategy = SearchStrategy::Incremental;
        }
        if cli_overrides.no_revisit {
            self.encoding.no_revisit = true;
        }
        if let Some(ref cnf_dir) = cli_overrides.cnf_dir {
            self.output.cnf_directory = cnf_dir.clone();
        }
        if let Some(ref model_dir) = cli_overrides.model_dir {
            self.output.model_directory = model_dir.clone();
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if cli_overrides.sequential {
            self.batch.parallel = false;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub max_horizon: Option<usize>,
    pub start_horizon: Option<usize>,
    pub incremental: bool,
    pub no_revisit: bool,
    pub cnf_dir: Option<PathBuf>,
    pub model_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub sequential: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.search.max_horizon, 100);
        assert_eq!(settings.search.start_horizon, 1);
        assert_eq!(settings.search.strategy, SearchStrategy::FromScratch);
        assert!(!settings.encoding.no_revisit);
        assert_eq!(settings.output.model_directory, PathBuf::from("result"));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.search.strategy = SearchStrategy::Incremental;
        settings.output.format = OutputFormat::Json;
        settings.to_file(&path).unwrap();

        assert_eq!(Settings::from_file(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let settings: Settings = serde_yaml::from_str("search:\n  max_horizon: 12\n").unwrap();
        assert_eq!(settings.search.max_horizon, 12);
        assert_eq!(settings.search.start_horizon, 1);
        assert!(settings.batch.parallel);
    }

    #[test]
    fn test_validation() {
        let mut settings = Settings::default();
        settings.search.start_horizon = 5;
        settings.search.max_horizon = 5;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            max_horizon: Some(20),
            start_horizon: Some(0),
            incremental: true,
            no_revisit: true,
            cnf_dir: Some(PathBuf::from("out/cnf")),
            sequential: true,
            ..Default::default()
        });

        assert_eq!(settings.search.max_horizon, 20);
        assert_eq!(settings.search.start_horizon, 0);
        assert_eq!(settings.search.strategy, SearchStrategy::Incremental);
        assert!(settings.encoding.no_revisit);
        assert_eq!(settings.output.cnf_directory, PathBuf::from("out/cnf"));
        assert_eq!(settings.output.model_directory, PathBuf::from("result"));
        assert!(!settings.batch.parallel);
    }
}

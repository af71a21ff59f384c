//! Configuration management for the maze planner

pub mod settings;

pub use settings::{
    BatchConfig, CliOverrides, EncodingConfig, OutputConfig, OutputFormat, SearchConfig,
    SearchStrategy, Settings,
};

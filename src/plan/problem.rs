//! Iterative deepening over the plan horizon

use super::{PlanValidator, Solution};
use crate::config::{SearchStrategy, Settings};
use crate::maze::{load_grid_from_file, maze_name, Grid};
use crate::sat::HorizonAttempt;
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;

/// A maze together with the settings used to search it
pub struct MazeProblem {
    name: String,
    grid: Grid,
    settings: Settings,
}

/// Terminal state of a horizon search
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// The first satisfiable horizon and its decoded plan
    Solved(Solution),
    /// Every horizon below `max_horizon` was unsatisfiable
    Exhausted {
        horizons_tried: usize,
        max_horizon: usize,
    },
}

impl SearchOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved(_))
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            SearchOutcome::Exhausted { .. } => None,
        }
    }

    pub fn horizon(&self) -> Option<usize> {
        self.solution().map(|solution| solution.horizon)
    }
}

impl MazeProblem {
    pub fn new(name: impl Into<String>, grid: Grid, settings: Settings) -> Self {
        Self {
            name: name.into(),
            grid,
            settings,
        }
    }

    /// Load a maze file; output files are named after it
    pub fn from_file<P: AsRef<Path>>(path: P, settings: Settings) -> Result<Self> {
        let grid = load_grid_from_file(&path).context("Failed to load maze")?;
        Ok(Self::new(maze_name(&path), grid, settings))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Encode a single horizon without solving it
    pub fn attempt(&self, horizon: usize) -> HorizonAttempt<'_> {
        HorizonAttempt::encode(&self.grid, &self.settings.encoding, horizon)
    }

    /// Try horizons `start_horizon, start_horizon + 1, ...` below `max_horizon`
    /// and stop at the first satisfiable one
    pub fn solve(&self) -> Result<SearchOutcome> {
        log::info!(
            "{}: searching {}x{} maze, horizons {}..{}",
            self.name,
            self.grid.size(),
            self.grid.size(),
            self.settings.search.start_horizon,
            self.settings.search.max_horizon
        );

        match self.settings.search.strategy {
            SearchStrategy::FromScratch => self.solve_from_scratch(),
            SearchStrategy::Incremental => self.solve_incremental(),
        }
    }

    fn solve_from_scratch(&self) -> Result<SearchOutcome> {
        let start_time = Instant::now();
        let search = &self.settings.search;
        let mut horizons_tried = 0;

        for horizon in search.start_horizon..search.max_horizon {
            horizons_tried += 1;
            let mut attempt = self.attempt(horizon);

            if attempt.solve() {
                return self
                    .finish(&attempt, horizons_tried, start_time)
                    .map(SearchOutcome::Solved);
            }
            log::debug!("{}: no plan with {} moves", self.name, horizon);
        }

        Ok(self.exhausted(horizons_tried))
    }

    fn solve_incremental(&self) -> Result<SearchOutcome> {
        let start_time = Instant::now();
        let search = &self.settings.search;
        let mut attempt = HorizonAttempt::incremental(&self.grid, &self.settings.encoding);
        let mut horizons_tried = 0;

        for horizon in search.start_horizon..search.max_horizon {
            while attempt.horizon() < horizon {
                attempt.extend();
            }
            horizons_tried += 1;

            if attempt.solve() {
                return self
                    .finish(&attempt, horizons_tried, start_time)
                    .map(SearchOutcome::Solved);
            }
            log::debug!("{}: no plan with {} moves", self.name, horizon);
        }

        Ok(self.exhausted(horizons_tried))
    }

    fn exhausted(&self, horizons_tried: usize) -> SearchOutcome {
        let max_horizon = self.settings.search.max_horizon;
        log::info!("{}: no plan below {} moves", self.name, max_horizon);

        SearchOutcome::Exhausted {
            horizons_tried,
            max_horizon,
        }
    }

    /// Decode a satisfied attempt and check the plan against the maze
    fn finish(&self, attempt: &HorizonAttempt<'_>, horizons_tried: usize, start_time: Instant) -> Result<Solution> {
        let horizon = attempt.horizon();
        let moves = attempt
            .decode_moves()
            .with_context(|| format!("Failed to decode the plan of {}", self.name))?;

        let validation = PlanValidator::new(&self.grid).validate(&moves);
        if !validation.is_valid {
            anyhow::bail!(
                "Decoded plan of {} is invalid: {}",
                self.name,
                validation.error_message.unwrap_or_default()
            );
        }

        log::info!("{}: solved with {} moves", self.name, horizon);
        log::debug!("{}", attempt.statistics());

        Ok(Solution::new(
            self.name.clone(),
            horizon,
            moves,
            validation.path,
            horizons_tried,
            attempt.cnf(),
            start_time.elapsed(),
        ))
    }
}

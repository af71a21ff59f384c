//! Horizon search, plan validation and batch driving

pub mod batch;
pub mod problem;
pub mod solution;
pub mod validator;

pub use batch::{BatchReport, BatchRunner, MazeReport, MazeStatus};
pub use problem::{MazeProblem, SearchOutcome};
pub use solution::Solution;
pub use validator::{PlanValidator, ValidationResult};

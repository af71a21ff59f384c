//! SAT encoding of the maze planning problem

pub mod constraints;
pub mod dimacs;
pub mod encoder;
pub mod recorder;
pub mod solver;
pub mod variables;

pub use constraints::{Clause, ConstraintGenerator};
pub use dimacs::Cnf;
pub use encoder::{EncodingStatistics, HorizonAttempt};
pub use recorder::ClauseRecorder;
pub use solver::{SatSolver, SolverStatistics};
pub use variables::{Domain, Fluent, Lit, Var, VariableRegistry};

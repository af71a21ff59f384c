//! SAT solver integration using CaDiCaL

use super::variables::Var;
use crate::error::MazeError;
use cadical::Solver;
use std::time::{Duration, Instant};

/// SAT solver wrapper for CaDiCaL
///
/// Clauses are given in signed DIMACS form. Model values can only be read
/// after the last `solve` call returned `true`.
pub struct SatSolver {
    solver: Solver,
    max_variable: i32,
    clause_count: usize,
    satisfied: bool,
    solve_calls: usize,
    solve_time: Duration,
}

impl SatSolver {
    /// Create a new SAT solver instance
    pub fn new() -> Self {
        Self {
            solver: Solver::new(),
            max_variable: 0,
            clause_count: 0,
            satisfied: false,
            solve_calls: 0,
            solve_time: Duration::ZERO,
        }
    }

    /// Add a single clause. An empty clause makes the formula unsatisfiable.
    pub fn add_clause(&mut self, literals: &[i32]) {
        for &literal in literals {
            self.max_variable = self.max_variable.max(literal.abs());
        }

        self.solver.add_clause(literals.iter().copied());
        self.clause_count += 1;
        self.satisfied = false;
    }

    /// Decide satisfiability of the clauses added so far
    pub fn solve(&mut self) -> bool {
        self.solve_with(&[])
    }

    /// Decide satisfiability under temporary unit assumptions
    pub fn solve_with(&mut self, assumptions: &[i32]) -> bool {
        let start_time = Instant::now();

        let result = if assumptions.is_empty() {
            self.solver.solve()
        } else {
            self.solver.solve_with(assumptions.iter().copied())
        };

        self.solve_time += start_time.elapsed();
        self.solve_calls += 1;
        self.satisfied = result == Some(true);
        self.satisfied
    }

    /// Value of a variable in the last model
    pub fn value(&self, var: Var) -> Result<bool, MazeError> {
        if !self.satisfied {
            return Err(MazeError::NoModel);
        }

        let number = var.to_dimacs();
        if number > self.max_variable {
            // Never mentioned in a clause, so any value satisfies the formula
            return Ok(false);
        }

        // cadical answers for every variable of a satisfied formula
        self.solver.value(number).ok_or(MazeError::NoModel)
    }

    /// Highest variable number seen in a clause
    pub fn variable_count(&self) -> usize {
        self.max_variable as usize
    }

    pub fn clause_count(&self) -> usize {
        self.clause_count
    }

    pub fn is_satisfied(&self) -> bool {
        self.satisfied
    }

    pub fn statistics(&self) -> SolverStatistics {
        SolverStatistics {
            variable_count: self.variable_count(),
            clause_count: self.clause_count,
            solve_calls: self.solve_calls,
            solve_time: self.solve_time,
        }
    }
}

impl Default for SatSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the solving process
#[derive(Debug, Clone)]
pub struct SolverStatistics {
    pub variable_count: usize,
    pub clause_count: usize,
    pub solve_calls: usize,
    pub solve_time: Duration,
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Solver Statistics:")?;
        writeln!(f, "  Variables: {}", self.variable_count)?;
        writeln!(f, "  Clauses: {}", self.clause_count)?;
        writeln!(f, "  Solve calls: {}", self.solve_calls)?;
        writeln!(f, "  Solve time: {:.3}s", self.solve_time.as_secs_f64())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_creation() {
        let solver = SatSolver::new();
        assert_eq!(solver.variable_count(), 0);
        assert_eq!(solver.clause_count(), 0);
        assert!(!solver.is_satisfied());
    }

    #[test]
    fn test_simple_satisfiable() {
        let mut solver = SatSolver::new();

        // x1 ∨ x2, ¬x1 ∨ x2
        solver.add_clause(&[1, 2]);
        solver.add_clause(&[-1, 2]);

        assert!(solver.solve());
        assert_eq!(solver.value(Var::new(1)), Ok(true));
    }

    #[test]
    fn test_unsatisfiable() {
        let mut solver = SatSolver::new();

        solver.add_clause(&[1]);
        solver.add_clause(&[-1]);

        assert!(!solver.solve());
        assert_eq!(solver.value(Var::new(0)), Err(MazeError::NoModel));
    }

    #[test]
    fn test_empty_clause_is_unsatisfiable() {
        let mut solver = SatSolver::new();
        solver.add_clause(&[1, 2]);
        solver.add_clause(&[]);

        assert!(!solver.solve());
        assert_eq!(solver.clause_count(), 2);
    }

    #[test]
    fn test_assumptions_are_temporary() {
        let mut solver = SatSolver::new();
        solver.add_clause(&[-1, -2]);

        assert!(!solver.solve_with(&[1, 2]));
        assert!(solver.solve_with(&[1]));
        assert_eq!(solver.value(Var::new(0)), Ok(true));
        assert_eq!(solver.value(Var::new(1)), Ok(false));
        assert!(solver.solve());
        assert_eq!(solver.statistics().solve_calls, 3);
    }

    #[test]
    fn test_value_requires_fresh_model() {
        let mut solver = SatSolver::new();
        solver.add_clause(&[1]);
        assert!(solver.solve());

        solver.add_clause(&[2]);
        assert_eq!(solver.value(Var::new(0)), Err(MazeError::NoModel));
    }

    #[test]
    fn test_model_covers_every_variable() {
        let mut solver = SatSolver::new();
        solver.add_clause(&[1, -2]);
        solver.add_clause(&[2, 3]);
        solver.add_clause(&[-1, -3]);
        assert!(solver.solve());

        let values: Vec<bool> = (0..3).map(|idx| solver.value(Var::new(idx)).unwrap()).collect();
        assert!(values[0] || !values[1]);
        assert!(values[1] || values[2]);
        assert!(!values[0] || !values[2]);

        // never mentioned in a clause
        assert_eq!(solver.value(Var::new(9)), Ok(false));
    }

    #[test]
    fn test_variable_count_tracking() {
        let mut solver = SatSolver::new();

        solver.add_clause(&[1, -5, 3]);
        assert_eq!(solver.variable_count(), 5);

        solver.add_clause(&[2, -7]);
        assert_eq!(solver.variable_count(), 7);
    }
}

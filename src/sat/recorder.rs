//! Mirror of every clause handed to the solver, kept for DIMACS export

use super::constraints::Clause;
use super::solver::SatSolver;

/// Records clauses in signed 1-based integer form while submitting them to the solver
#[derive(Debug, Default)]
pub struct ClauseRecorder {
    clauses: Vec<Vec<i32>>,
}

impl ClauseRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a clause to the solver and keep its integer form
    pub fn record(&mut self, solver: &mut SatSolver, clause: &Clause) {
        let literals = clause.to_dimacs();
        solver.add_clause(&literals);
        self.clauses.push(literals);
    }

    pub fn record_all(&mut self, solver: &mut SatSolver, clauses: &[Clause]) {
        for clause in clauses {
            self.record(solver, clause);
        }
    }

    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    pub fn clauses(&self) -> &[Vec<i32>] {
        &self.clauses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::variables::Var;

    #[test]
    fn test_record_mirrors_clause() {
        let mut solver = SatSolver::new();
        let mut recorder = ClauseRecorder::new();

        let a = Var::new(0);
        let b = Var::new(2);
        recorder.record(&mut solver, &Clause::binary(a.neg_lit(), b.pos_lit()));
        recorder.record(&mut solver, &Clause::unit(a.pos_lit()));

        assert_eq!(recorder.clauses(), &[vec![-1, 3], vec![1]]);
        assert_eq!(recorder.clause_count(), 2);
        assert_eq!(solver.clause_count(), 2);

        assert!(solver.solve());
        assert_eq!(solver.value(b), Ok(true));
    }
}

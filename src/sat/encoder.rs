//! Horizon attempts: a solver, a variable registry and a clause recorder
//! bundled for one encoding of the maze

use super::constraints::ConstraintGenerator;
use super::dimacs::Cnf;
use super::recorder::ClauseRecorder;
use super::solver::{SatSolver, SolverStatistics};
use super::variables::{Domain, Fluent, Lit, VariableRegistry, VariableStatistics};
use crate::config::EncodingConfig;
use crate::error::MazeError;
use crate::maze::{Direction, Grid, Move};

/// One encoded horizon of a maze, owning its solver and variable space
pub struct HorizonAttempt<'g> {
    generator: ConstraintGenerator<'g>,
    solver: SatSolver,
    registry: VariableRegistry,
    recorder: ClauseRecorder,
    horizon: usize,
    goal: Lit,
    goal_asserted: bool,
}

impl<'g> HorizonAttempt<'g> {
    fn with_initial_state(grid: &'g Grid, encoding: &EncodingConfig) -> Self {
        let generator = ConstraintGenerator::new(grid, encoding);
        let mut registry = VariableRegistry::new();
        let mut solver = SatSolver::new();
        let mut recorder = ClauseRecorder::new();

        let clauses = generator.initial_state_constraints(&mut registry);
        recorder.record_all(&mut solver, &clauses);
        let goal = generator.goal_literal(&mut registry, 0);

        Self {
            generator,
            solver,
            registry,
            recorder,
            horizon: 0,
            goal,
            goal_asserted: false,
        }
    }

    /// Encode a fixed horizon from scratch, with the goal as a unit clause
    pub fn encode(grid: &'g Grid, encoding: &EncodingConfig, horizon: usize) -> Self {
        let generator = ConstraintGenerator::new(grid, encoding);
        let mut registry = VariableRegistry::new();
        let mut solver = SatSolver::new();
        let mut recorder = ClauseRecorder::new();

        let clauses = generator.generate_all_constraints(&mut registry, horizon);
        recorder.record_all(&mut solver, &clauses);
        let goal = generator.goal_literal(&mut registry, horizon);

        log::trace!(
            "Encoded horizon {}: {} variables, {} clauses",
            horizon,
            registry.variable_count(),
            recorder.clause_count()
        );

        Self {
            generator,
            solver,
            registry,
            recorder,
            horizon,
            goal,
            goal_asserted: true,
        }
    }

    /// Start a growable attempt at horizon 0. The goal is checked through an
    /// assumption so that later steps can still be appended.
    pub fn incremental(grid: &'g Grid, encoding: &EncodingConfig) -> Self {
        Self::with_initial_state(grid, encoding)
    }

    /// Append the clauses of one more time step
    pub fn extend(&mut self) {
        debug_assert!(!self.goal_asserted, "cannot extend an attempt whose goal is fixed");

        let t = self.horizon + 1;
        let clauses = self.generator.step_constraints(&mut self.registry, t);
        self.recorder.record_all(&mut self.solver, &clauses);

        self.horizon = t;
        self.goal = self.generator.goal_literal(&mut self.registry, t);
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn grid(&self) -> &'g Grid {
        self.generator.grid()
    }

    /// Can the goal be reached in exactly `horizon` moves?
    pub fn solve(&mut self) -> bool {
        if self.goal_asserted {
            self.solver.solve()
        } else {
            self.solver.solve_with(&[self.goal.to_dimacs()])
        }
    }

    /// Read the move of every time step back from the model.
    ///
    /// Free cells are scanned in row-major order and directions in the order
    /// left, right, up, down; the first true action is the move of that step.
    pub fn decode_moves(&self) -> Result<Vec<Move>, MazeError> {
        if !self.solver.is_satisfied() {
            return Err(MazeError::NoModel);
        }

        let free_cells = self.grid().free_cells();
        let mut moves = Vec::with_capacity(self.horizon);

        for t in 0..self.horizon {
            'scan: for &(x, y) in &free_cells {
                for direction in Direction::ALL {
                    if self.action_value(x, y, direction, t)? {
                        moves.push(Move::new(t, x, y, direction));
                        break 'scan;
                    }
                }
            }
        }

        Ok(moves)
    }

    fn action_value(&self, x: usize, y: usize, direction: Direction, t: usize) -> Result<bool, MazeError> {
        match self.registry.lookup(&Fluent::Action { x, y, direction, t }) {
            Some(var) => self.solver.value(var),
            None => Ok(false),
        }
    }

    /// Whether the token stands on `(x, y)` at `t` in the current model
    pub fn occupied(&self, x: usize, y: usize, t: usize) -> Result<bool, MazeError> {
        let domain = Domain::Person;
        match self.registry.lookup(&Fluent::State { x, y, domain, t }) {
            Some(var) => self.solver.value(var),
            None => Ok(false),
        }
    }

    /// The formula of this attempt, goal included
    pub fn cnf(&self) -> Cnf {
        let mut clauses = self.recorder.clauses().to_vec();
        if !self.goal_asserted {
            clauses.push(vec![self.goal.to_dimacs()]);
        }

        Cnf::new(self.registry.variable_count(), clauses)
    }

    pub fn statistics(&self) -> EncodingStatistics {
        EncodingStatistics {
            horizon: self.horizon,
            variables: self.registry.statistics(),
            clause_count: self.recorder.clause_count(),
            solver: self.solver.statistics(),
        }
    }
}

/// Statistics about one encoded horizon
#[derive(Debug, Clone)]
pub struct EncodingStatistics {
    pub horizon: usize,
    pub variables: VariableStatistics,
    pub clause_count: usize,
    pub solver: SolverStatistics,
}

impl std::fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Encoding Statistics:")?;
        writeln!(f, "  Horizon: {}", self.horizon)?;
        writeln!(f, "  Total variables: {}", self.variables.total_variables)?;
        writeln!(f, "  Total clauses: {}", self.clause_count)?;
        write!(f, "{}", self.solver)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detour_grid() -> Grid {
        Grid::from_rows(vec![vec![false, false], vec![true, false]]).unwrap()
    }

    #[test]
    fn test_encode_and_decode_open_grid() {
        let grid = Grid::open(2).unwrap();
        let mut attempt = HorizonAttempt::encode(&grid, &EncodingConfig::default(), 2);

        assert!(attempt.solve());
        let moves = attempt.decode_moves().unwrap();

        assert_eq!(moves.len(), 2);
        assert_eq!((moves[0].t, moves[0].x, moves[0].y), (0, 0, 0));
        assert_eq!(moves[1].t, 1);
        assert!(attempt.occupied(1, 1, 2).unwrap());
    }

    #[test]
    fn test_detour_requires_two_steps() {
        let grid = detour_grid();

        let mut one_step = HorizonAttempt::encode(&grid, &EncodingConfig::default(), 1);
        assert!(!one_step.solve());
        assert_eq!(one_step.decode_moves(), Err(MazeError::NoModel));

        let mut two_steps = HorizonAttempt::encode(&grid, &EncodingConfig::default(), 2);
        assert!(two_steps.solve());
        assert_eq!(
            two_steps.decode_moves().unwrap(),
            vec![
                Move::new(0, 0, 0, Direction::Right),
                Move::new(1, 0, 1, Direction::Down),
            ]
        );
    }

    #[test]
    fn test_incremental_matches_from_scratch() {
        let grid = Grid::from_rows(vec![
            vec![false, false, false],
            vec![true, true, false],
            vec![false, false, false],
        ])
        .unwrap();

        let mut incremental = HorizonAttempt::incremental(&grid, &EncodingConfig::default());
        for horizon in 1..=6 {
            incremental.extend();
            let mut scratch = HorizonAttempt::encode(&grid, &EncodingConfig::default(), horizon);

            assert_eq!(incremental.horizon(), horizon);
            assert_eq!(incremental.solve(), scratch.solve(), "horizon {}", horizon);
            assert_eq!(incremental.cnf(), scratch.cnf(), "horizon {}", horizon);
        }
    }

    #[test]
    fn test_exported_cnf_gives_same_verdict() {
        let grid = detour_grid();

        for horizon in 1..=4 {
            let mut attempt = HorizonAttempt::encode(&grid, &EncodingConfig::default(), horizon);
            let verdict = attempt.solve();

            let cnf = attempt.cnf();
            let mut fresh = SatSolver::new();
            for clause in &cnf.clauses {
                fresh.add_clause(clause);
            }

            assert_eq!(fresh.solve(), verdict, "horizon {}", horizon);
            assert!(cnf
                .clauses
                .iter()
                .flatten()
                .all(|lit| lit.unsigned_abs() as usize <= cnf.variable_count));
        }
    }

    #[test]
    fn test_statistics() {
        let grid = Grid::open(2).unwrap();
        let mut attempt = HorizonAttempt::encode(&grid, &EncodingConfig::default(), 1);
        attempt.solve();

        let stats = attempt.statistics();
        assert_eq!(stats.horizon, 1);
        assert_eq!(stats.clause_count, 106);
        assert_eq!(stats.solver.solve_calls, 1);
        assert_eq!(stats.variables.total_variables, stats.solver.variable_count);
    }
}

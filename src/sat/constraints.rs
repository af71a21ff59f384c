//! Constraint generation for the maze planning encoding
//!
//! Every cell carries one state fluent per domain (`Person`, `Empty`,
//! `Blocked`) and time step, and every free cell one action fluent per
//! direction and time step. Constraints are produced one time step at a time
//! so that a horizon can be grown without regenerating its prefix:
//!
//! - the initial state fixes the token on the start cell at `t = 0`;
//! - each step `t >= 1` fixes static cells, enforces exactly one domain per
//!   cell, and ties the actions of `t - 1` to the states of `t - 1` and `t`
//!   (preconditions, effects, explanatory frame axioms, one move per step);
//! - the goal places the token on the goal cell at the final step.

use super::variables::{Domain, Lit, VariableRegistry};
use crate::config::EncodingConfig;
use crate::maze::{Direction, Grid};
use itertools::Itertools;

/// A SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<Lit>,
}

impl Clause {
    pub fn new(literals: Vec<Lit>) -> Self {
        Self { literals }
    }

    pub fn unit(literal: Lit) -> Self {
        Self {
            literals: vec![literal],
        }
    }

    pub fn binary(lit1: Lit, lit2: Lit) -> Self {
        Self {
            literals: vec![lit1, lit2],
        }
    }

    /// An empty clause can never be satisfied
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Signed 1-based integer form
    pub fn to_dimacs(&self) -> Vec<i32> {
        self.literals.iter().map(|lit| lit.to_dimacs()).collect()
    }
}

/// Generates the clauses of the maze planning problem
pub struct ConstraintGenerator<'g> {
    grid: &'g Grid,
    no_revisit: bool,
}

impl<'g> ConstraintGenerator<'g> {
    pub fn new(grid: &'g Grid, encoding: &EncodingConfig) -> Self {
        Self {
            grid,
            no_revisit: encoding.no_revisit,
        }
    }

    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    /// Generate every constraint for a plan of `horizon` steps
    pub fn generate_all_constraints(&self, vars: &mut VariableRegistry, horizon: usize) -> Vec<Clause> {
        let mut clauses = self.initial_state_constraints(vars);

        for t in 1..=horizon {
            clauses.extend(self.step_constraints(vars, t));
        }

        clauses.push(self.goal_constraint(vars, horizon));
        clauses
    }

    /// The token stands on the start cell and every other cell is empty or blocked
    pub fn initial_state_constraints(&self, vars: &mut VariableRegistry) -> Vec<Clause> {
        let mut clauses = Vec::new();
        let start = self.grid.start();

        for (x, y) in self.grid.cells() {
            let person = vars.state(x, y, Domain::Person, 0);
            if (x, y) == start {
                let empty = vars.state(x, y, Domain::Empty, 0);
                clauses.push(Clause::unit(person.pos_lit()));
                clauses.push(Clause::unit(empty.neg_lit()));
            } else if self.grid.is_free(x, y) {
                let empty = vars.state(x, y, Domain::Empty, 0);
                clauses.push(Clause::unit(empty.pos_lit()));
                clauses.push(Clause::unit(person.neg_lit()));
            } else {
                clauses.push(Clause::unit(person.neg_lit()));
            }
        }

        clauses
    }

    /// The literal "the token is on the goal cell at `horizon`"
    pub fn goal_literal(&self, vars: &mut VariableRegistry, horizon: usize) -> Lit {
        let (gx, gy) = self.grid.goal();
        vars.state(gx, gy, Domain::Person, horizon).pos_lit()
    }

    pub fn goal_constraint(&self, vars: &mut VariableRegistry, horizon: usize) -> Clause {
        Clause::unit(self.goal_literal(vars, horizon))
    }

    /// Every clause introduced by extending a plan from `t - 1` to `t` steps
    pub fn step_constraints(&self, vars: &mut VariableRegistry, t: usize) -> Vec<Clause> {
        debug_assert!(t >= 1, "step constraints start at t = 1");

        let mut clauses = self.static_domain_constraints(vars, t);
        clauses.extend(self.domain_exclusivity_constraints(vars, t));
        clauses.extend(self.action_constraints(vars, t - 1));

        if self.no_revisit {
            clauses.extend(self.no_revisit_constraints(vars, t));
        }

        clauses
    }

    /// Blocked cells stay blocked, free cells never become blocked
    fn static_domain_constraints(&self, vars: &mut VariableRegistry, t: usize) -> Vec<Clause> {
        let mut clauses = Vec::new();

        for (x, y) in self.grid.cells() {
            let blocked = vars.state(x, y, Domain::Blocked, t);
            if self.grid.is_blocked(x, y) {
                clauses.push(Clause::unit(blocked.pos_lit()));
                clauses.push(Clause::unit(vars.state(x, y, Domain::Person, t).neg_lit()));
                clauses.push(Clause::unit(vars.state(x, y, Domain::Empty, t).neg_lit()));
            } else {
                clauses.push(Clause::unit(blocked.neg_lit()));
            }
        }

        clauses
    }

    /// Exactly one domain holds for every cell
    fn domain_exclusivity_constraints(&self, vars: &mut VariableRegistry, t: usize) -> Vec<Clause> {
        let mut clauses = Vec::new();

        for (x, y) in self.grid.cells() {
            let domains: Vec<Lit> = Domain::ALL
                .iter()
                .map(|&domain| vars.state(x, y, domain, t).pos_lit())
                .collect();

            clauses.push(Clause::new(domains.clone()));
            for (a, b) in domains.iter().tuple_combinations() {
                clauses.push(Clause::binary(!*a, !*b));
            }
        }

        clauses
    }

    /// Preconditions, effects and frame axioms of the moves taken at `t`,
    /// plus the rule that exactly one move happens per step
    fn action_constraints(&self, vars: &mut VariableRegistry, t: usize) -> Vec<Clause> {
        let mut clauses = Vec::new();
        let mut step_actions = Vec::new();

        for (x, y) in self.grid.free_cells() {
            let mut leave = Vec::new();
            let mut come = Vec::new();

            for direction in Direction::ALL {
                let action = vars.action(x, y, direction, t);

                let Some((nx, ny)) = self.grid.open_neighbor(x, y, direction) else {
                    clauses.push(Clause::unit(action.neg_lit()));
                    continue;
                };

                leave.push(action.pos_lit());
                come.push(vars.action(nx, ny, direction.opposite(), t).pos_lit());

                let consequences = [
                    vars.state(x, y, Domain::Person, t),
                    vars.state(nx, ny, Domain::Empty, t),
                    vars.state(x, y, Domain::Empty, t + 1),
                    vars.state(nx, ny, Domain::Person, t + 1),
                ];
                for consequence in consequences {
                    clauses.push(Clause::binary(action.neg_lit(), consequence.pos_lit()));
                }
            }

            let person_now = vars.state(x, y, Domain::Person, t);
            let empty_now = vars.state(x, y, Domain::Empty, t);
            let person_next = vars.state(x, y, Domain::Person, t + 1);
            let empty_next = vars.state(x, y, Domain::Empty, t + 1);

            // The cell is only vacated by one of its own moves
            let mut vacated = leave.clone();
            vacated.push(person_now.neg_lit());
            vacated.push(empty_next.neg_lit());
            clauses.push(Clause::new(vacated));

            // The cell is only entered by a neighbor moving onto it
            let mut entered = come;
            entered.push(empty_now.neg_lit());
            entered.push(person_next.neg_lit());
            clauses.push(Clause::new(entered));

            step_actions.extend(leave);
        }

        clauses.push(Clause::new(step_actions.clone()));
        for (a, b) in step_actions.iter().tuple_combinations() {
            clauses.push(Clause::binary(!*a, !*b));
        }

        clauses
    }

    /// The token never stands twice on the same cell: pairs `(i, t)` for every `i < t`
    fn no_revisit_constraints(&self, vars: &mut VariableRegistry, t: usize) -> Vec<Clause> {
        let mut clauses = Vec::new();

        for (x, y) in self.grid.free_cells() {
            let later = vars.state(x, y, Domain::Person, t);
            for i in 0..t {
                let earlier = vars.state(x, y, Domain::Person, i);
                clauses.push(Clause::binary(earlier.neg_lit(), later.neg_lit()));
            }
        }

        clauses
    }
}

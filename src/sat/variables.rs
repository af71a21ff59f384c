//! Variable management for the SAT encoding

use crate::maze::Direction;
use std::collections::HashMap;
use std::fmt;
use std::ops::Not;

/// A propositional variable, identified by a 0-based index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var(u32);

impl Var {
    pub fn new(idx: u32) -> Self {
        Self(idx)
    }

    pub fn idx(self) -> u32 {
        self.0
    }

    /// The 1-based DIMACS number of the variable
    pub fn to_dimacs(self) -> i32 {
        self.0 as i32 + 1
    }

    pub fn pos_lit(self) -> Lit {
        Lit::new(self, false)
    }

    pub fn neg_lit(self) -> Lit {
        Lit::new(self, true)
    }
}

/// A variable together with a polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lit {
    var: Var,
    negated: bool,
}

impl Lit {
    pub fn new(var: Var, negated: bool) -> Self {
        Self { var, negated }
    }

    pub fn var(self) -> Var {
        self.var
    }

    pub fn is_negated(self) -> bool {
        self.negated
    }

    /// Signed DIMACS form: `±(index + 1)`, negative when negated
    pub fn to_dimacs(self) -> i32 {
        let number = self.var.to_dimacs();
        if self.negated {
            -number
        } else {
            number
        }
    }
}

impl Not for Lit {
    type Output = Lit;

    fn not(self) -> Lit {
        Lit::new(self.var, !self.negated)
    }
}

impl From<Var> for Lit {
    fn from(var: Var) -> Self {
        var.pos_lit()
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

/// What a cell holds at a given time step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Person,
    Empty,
    Blocked,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::Person, Domain::Empty, Domain::Blocked];
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Person => f.write_str("person"),
            Domain::Empty => f.write_str("empty"),
            Domain::Blocked => f.write_str("blocked"),
        }
    }
}

/// Symbolic names of the variables used in the encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fluent {
    /// Cell `(x, y)` holds `domain` at time `t`
    State {
        x: usize,
        y: usize,
        domain: Domain,
        t: usize,
    },
    /// The token standing at `(x, y)` moves `direction` at time `t`
    Action {
        x: usize,
        y: usize,
        direction: Direction,
        t: usize,
    },
}

impl fmt::Display for Fluent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fluent::State { x, y, domain, t } => write!(f, "state({}, {})={}@{}", x, y, domain, t),
            Fluent::Action { x, y, direction, t } => {
                write!(f, "action({}, {})->{}@{}", x, y, direction, t)
            }
        }
    }
}

/// Bijective mapping between fluents and variables, filled lazily
#[derive(Debug, Default)]
pub struct VariableRegistry {
    variables: HashMap<Fluent, Var>,
    fluents: Vec<Fluent>,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the variable of a fluent, allocating the next index on first use
    pub fn get_or_create(&mut self, fluent: Fluent) -> Var {
        if let Some(&var) = self.variables.get(&fluent) {
            return var;
        }

        let var = Var::new(self.fluents.len() as u32);
        self.fluents.push(fluent);
        self.variables.insert(fluent, var);
        var
    }

    pub fn state(&mut self, x: usize, y: usize, domain: Domain, t: usize) -> Var {
        self.get_or_create(Fluent::State { x, y, domain, t })
    }

    pub fn action(&mut self, x: usize, y: usize, direction: Direction, t: usize) -> Var {
        self.get_or_create(Fluent::Action { x, y, direction, t })
    }

    /// Look up a fluent without allocating
    pub fn lookup(&self, fluent: &Fluent) -> Option<Var> {
        self.variables.get(fluent).copied()
    }

    /// Reverse lookup
    pub fn fluent(&self, var: Var) -> Option<&Fluent> {
        self.fluents.get(var.idx() as usize)
    }

    pub fn variable_count(&self) -> usize {
        self.fluents.len()
    }

    pub fn statistics(&self) -> VariableStatistics {
        let state_variables = self
            .fluents
            .iter()
            .filter(|fluent| matches!(fluent, Fluent::State { .. }))
            .count();

        VariableStatistics {
            total_variables: self.fluents.len(),
            state_variables,
            action_variables: self.fluents.len() - state_variables,
        }
    }
}

/// Statistics about variable usage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableStatistics {
    pub total_variables: usize,
    pub state_variables: usize,
    pub action_variables: usize,
}

impl fmt::Display for VariableStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Variable Statistics:")?;
        writeln!(f, "  Total variables: {}", self.total_variables)?;
        writeln!(f, "  State variables: {}", self.state_variables)?;
        writeln!(f, "  Action variables: {}", self.action_variables)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_creation() {
        let mut registry = VariableRegistry::new();

        let var1 = registry.state(0, 0, Domain::Person, 0);
        let var2 = registry.action(1, 1, Direction::Up, 1);

        assert_eq!(var1, Var::new(0));
        assert_eq!(var2, Var::new(1));

        // Same fluent, same variable
        assert_eq!(registry.state(0, 0, Domain::Person, 0), var1);
        assert_eq!(registry.variable_count(), 2);
    }

    #[test]
    fn test_distinct_fluents_get_distinct_variables() {
        let mut registry = VariableRegistry::new();

        let vars: Vec<Var> = Domain::ALL
            .iter()
            .map(|&domain| registry.state(1, 2, domain, 3))
            .collect();

        assert_eq!(vars.len(), 3);
        assert_ne!(vars[0], vars[1]);
        assert_ne!(vars[1], vars[2]);
        assert_ne!(
            registry.state(1, 2, Domain::Person, 3),
            registry.state(1, 2, Domain::Person, 4)
        );
    }

    #[test]
    fn test_reverse_lookup() {
        let mut registry = VariableRegistry::new();
        let fluent = Fluent::Action {
            x: 2,
            y: 0,
            direction: Direction::Left,
            t: 5,
        };

        assert_eq!(registry.lookup(&fluent), None);
        let var = registry.get_or_create(fluent);
        assert_eq!(registry.lookup(&fluent), Some(var));
        assert_eq!(registry.fluent(var), Some(&fluent));
        assert_eq!(registry.fluent(Var::new(7)), None);
    }

    #[test]
    fn test_literal_dimacs_form() {
        let var = Var::new(4);
        assert_eq!(var.pos_lit().to_dimacs(), 5);
        assert_eq!(var.neg_lit().to_dimacs(), -5);
        assert_eq!(!var.neg_lit(), var.pos_lit());
        assert_eq!(Var::new(0).neg_lit().to_dimacs(), -1);
    }

    #[test]
    fn test_statistics() {
        let mut registry = VariableRegistry::new();

        registry.state(0, 0, Domain::Empty, 0);
        registry.state(0, 1, Domain::Empty, 0);
        registry.action(0, 0, Direction::Right, 0);

        let stats = registry.statistics();
        assert_eq!(stats.total_variables, 3);
        assert_eq!(stats.state_variables, 2);
        assert_eq!(stats.action_variables, 1);
    }
}

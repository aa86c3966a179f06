//! Constraint graph: indexes constraints by the variables they touch.

use std::collections::{HashMap, HashSet};

use super::types::{Arc, Constraint};

/// Index over a model's constraints.
///
/// Nodes are variables, edges are binary constraints. Unary constraints are
/// kept per variable. Built once per solve; read-only afterwards.
///
/// Every constraint must reference variables in `[0, n)`; validate the model
/// before building a graph.
#[derive(Debug, Clone)]
pub struct ConstraintGraph<'a> {
    constraints: &'a [Constraint],
    unary: Vec<Vec<usize>>,
    neighbors: Vec<Vec<usize>>,
    between: HashMap<(usize, usize), Vec<usize>>,
    completed_at: Vec<Vec<usize>>,
}

impl<'a> ConstraintGraph<'a> {
    /// Builds the graph for `n` variables.
    pub fn new(n: usize, constraints: &'a [Constraint]) -> Self {
        let mut unary = vec![Vec::new(); n];
        let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut between: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
        let mut completed_at = vec![Vec::new(); n];

        for (idx, c) in constraints.iter().enumerate() {
            completed_at[c.max_index()].push(idx);
            match *c {
                Constraint::Unary { var, .. } => unary[var].push(idx),
                Constraint::Binary { left, right, .. } => {
                    neighbors[left].push(right);
                    neighbors[right].push(left);
                    between.entry(edge_key(left, right)).or_default().push(idx);
                }
            }
        }

        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }

        Self {
            constraints,
            unary,
            neighbors,
            between,
            completed_at,
        }
    }

    /// Number of variables.
    pub fn num_variables(&self) -> usize {
        self.unary.len()
    }

    pub fn constraints(&self) -> &'a [Constraint] {
        self.constraints
    }

    /// Unary constraints on `var`.
    pub fn unary_on(&self, var: usize) -> impl Iterator<Item = &'a Constraint> + '_ {
        let constraints = self.constraints;
        self.unary[var].iter().map(move |&i| &constraints[i])
    }

    /// Variables sharing a binary constraint with `var`, ascending.
    pub fn neighbors(&self, var: usize) -> &[usize] {
        &self.neighbors[var]
    }

    /// Binary constraints between `a` and `b`, in either direction.
    pub fn between(&self, a: usize, b: usize) -> impl Iterator<Item = &'a Constraint> + '_ {
        let constraints = self.constraints;
        self.between
            .get(&edge_key(a, b))
            .into_iter()
            .flatten()
            .map(move |&i| &constraints[i])
    }

    /// Constraints whose highest referenced variable is `var`.
    ///
    /// These become fully checkable exactly when `var` is assigned during
    /// index-ordered search.
    pub fn completed_at(&self, var: usize) -> impl Iterator<Item = &'a Constraint> + '_ {
        let constraints = self.constraints;
        self.completed_at[var].iter().map(move |&i| &constraints[i])
    }

    /// Both directed arcs of every binary constraint, without duplicates,
    /// in constraint order.
    pub fn arcs(&self) -> Vec<Arc> {
        let mut seen = HashSet::new();
        let mut arcs = Vec::new();
        for c in self.constraints {
            if let Constraint::Binary { left, right, .. } = *c {
                for arc in [Arc::new(left, right), Arc::new(right, left)] {
                    if seen.insert(arc) {
                        arcs.push(arc);
                    }
                }
            }
        }
        arcs
    }
}

fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

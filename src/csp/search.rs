//! Backtracking search over pruned domains.
//!
//! # Algorithm
//!
//! 1. Variables are assigned in index order, values in ascending date order
//! 2. After pushing a value for variable `k`, check the constraints that
//!    became fully assigned with `k` (all others were checked earlier)
//! 3. On a violation, pop and try the next value; when variable `k` runs out
//!    of values, pop variable `k - 1` and resume its candidates
//! 4. Stop at the first complete assignment, or when variable 0 runs out
//!
//! The assignment is an explicit stack and each depth keeps a cursor into its
//! domain, so search depth does not grow the call stack.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use chrono::NaiveDate;
use log::{debug, trace};

use super::graph::ConstraintGraph;

/// How often (in nodes) the wall clock is read.
const CLOCK_INTERVAL: usize = 256;

/// Why a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A complete consistent assignment, index-aligned with the variables.
    Found(Vec<NaiveDate>),
    /// Every candidate was tried; no solution exists in these domains.
    Exhausted,
    /// The node budget ran out first.
    NodeLimit,
    /// The deadline passed first.
    Timeout,
    /// The cancellation flag was raised.
    Cancelled,
}

/// Counters from one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Tentative assignments made.
    pub nodes: usize,
    /// Dead ends: a variable ran out of candidates.
    pub backtracks: usize,
}

/// External bounds on a search. The default has none.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchLimits<'c> {
    /// Maximum nodes. 0 = no limit.
    pub max_nodes: usize,
    pub deadline: Option<Instant>,
    pub cancel: Option<&'c AtomicBool>,
}

impl SearchLimits<'_> {
    fn exceeded(&self, nodes: usize) -> Option<SearchOutcome> {
        if let Some(flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Some(SearchOutcome::Cancelled);
            }
        }
        if self.max_nodes > 0 && nodes >= self.max_nodes {
            return Some(SearchOutcome::NodeLimit);
        }
        if let Some(deadline) = self.deadline {
            if nodes % CLOCK_INTERVAL == 0 && Instant::now() >= deadline {
                return Some(SearchOutcome::Timeout);
            }
        }
        None
    }
}

/// Depth-first search for the first assignment satisfying every constraint.
///
/// `domains[i]` lists the candidates of variable `i` in the order they are
/// tried. Domains are only read.
pub fn backtrack(
    domains: &[Vec<NaiveDate>],
    graph: &ConstraintGraph<'_>,
    limits: &SearchLimits<'_>,
) -> (SearchOutcome, SearchStats) {
    let n = domains.len();
    let mut stats = SearchStats::default();
    let mut assignment: Vec<NaiveDate> = Vec::with_capacity(n);
    let mut cursor = vec![0usize; n];

    let outcome = loop {
        let k = assignment.len();
        if k == n {
            break SearchOutcome::Found(assignment);
        }

        let mut extended = false;
        while cursor[k] < domains[k].len() {
            if let Some(stop) = limits.exceeded(stats.nodes) {
                debug!("search stopped after {} nodes: {stop:?}", stats.nodes);
                return (stop, stats);
            }
            let value = domains[k][cursor[k]];
            cursor[k] += 1;
            stats.nodes += 1;

            assignment.push(value);
            if graph.completed_at(k).all(|c| c.is_satisfied_by(&assignment)) {
                extended = true;
                break;
            }
            assignment.pop();
        }
        if extended {
            continue;
        }

        stats.backtracks += 1;
        cursor[k] = 0;
        trace!("x{k} exhausted at depth {k}, backtracking");
        if assignment.pop().is_none() {
            break SearchOutcome::Exhausted;
        }
    };

    debug!(
        "search finished: {} nodes, {} backtracks, found={}",
        stats.nodes,
        stats.backtracks,
        matches!(outcome, SearchOutcome::Found(_))
    );
    (outcome, stats)
}

//! Domain pruning before search: node consistency and AC-3.
//!
//! # Algorithm (AC-3)
//!
//! 1. Seed a FIFO queue with both arcs of every binary constraint
//! 2. Pop `(head, tail)` and revise: drop each head value that no tail value
//!    supports under all constraints between the two variables
//! 3. If head lost values, enqueue `(x, head)` for every neighbor `x != tail`
//! 4. Stop when the queue is empty
//!
//! Arcs already waiting in the queue are not inserted again.
//!
//! # Reference
//!
//! Mackworth, A. K. (1977). "Consistency in Networks of Relations",
//! *Artificial Intelligence* 8(1), 99-118.

use std::collections::{HashSet, VecDeque};

use chrono::NaiveDate;
use log::{debug, trace};

use super::domain::DomainStore;
use super::graph::ConstraintGraph;
use super::types::{Arc, Constraint};

/// Counters from one AC-3 run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ac3Stats {
    /// Arcs popped and revised.
    pub revisions: usize,
    /// Values removed across all domains.
    pub removed: usize,
}

/// Removes every value that violates a unary constraint on its variable.
///
/// Returns the number of values removed.
pub fn node_consistency(store: &mut DomainStore, graph: &ConstraintGraph<'_>) -> usize {
    let mut removed = 0;
    for var in 0..graph.num_variables() {
        for c in graph.unary_on(var) {
            removed += store.retain(var, |day| c.is_satisfied(Some(day), c.bound()));
        }
    }
    debug!(
        "node consistency removed {removed} values, {} remain",
        store.total_size()
    );
    removed
}

/// Makes every binary constraint arc-consistent.
///
/// Never fails: a domain emptied here is left empty for the caller (or the
/// search) to notice.
pub fn ac3(store: &mut DomainStore, graph: &ConstraintGraph<'_>) -> Ac3Stats {
    let mut queue: VecDeque<Arc> = graph.arcs().into();
    let mut queued: HashSet<Arc> = queue.iter().copied().collect();
    let mut stats = Ac3Stats::default();

    while let Some(arc) = queue.pop_front() {
        queued.remove(&arc);
        stats.revisions += 1;

        let removed = revise(store, graph, arc);
        if removed == 0 {
            continue;
        }
        stats.removed += removed;
        trace!(
            "revise {}->{}: removed {removed}, {} left",
            arc.head,
            arc.tail,
            store.size(arc.head)
        );

        for &x in graph.neighbors(arc.head) {
            if x == arc.tail {
                continue;
            }
            let next = Arc::new(x, arc.head);
            if queued.insert(next) {
                queue.push_back(next);
            }
        }
    }

    debug!(
        "ac3 removed {} values in {} revisions, {} remain",
        stats.removed,
        stats.revisions,
        store.total_size()
    );
    stats
}

/// Drops head values without support in tail. Returns how many were dropped.
fn revise(store: &mut DomainStore, graph: &ConstraintGraph<'_>, arc: Arc) -> usize {
    let constraints: Vec<&Constraint> = graph.between(arc.head, arc.tail).collect();
    if constraints.is_empty() {
        return 0;
    }

    let head_domain = store.domain(arc.head);
    let unsupported: Vec<NaiveDate> = if arc.head == arc.tail {
        // x op x: the only possible partner of a value is itself.
        head_domain
            .iter()
            .copied()
            .filter(|&v| !constraints.iter().all(|c| c.operator().holds(v, v)))
            .collect()
    } else {
        let tail_domain = store.domain(arc.tail);
        head_domain
            .iter()
            .copied()
            .filter(|&v| {
                !tail_domain
                    .iter()
                    .any(|&w| constraints.iter().all(|c| supports(c, arc.head, v, w)))
            })
            .collect()
    };

    store.remove_all(arc.head, &unsupported)
}

/// Whether `head = v, other = w` satisfies `c`, respecting its direction.
fn supports(c: &Constraint, head: usize, v: NaiveDate, w: NaiveDate) -> bool {
    match *c {
        Constraint::Binary { left, op, .. } if left == head => op.holds(v, w),
        Constraint::Binary { op, .. } => op.holds(w, v),
        Constraint::Unary { .. } => true,
    }
}

//! Calendar-date Constraint Satisfaction Problem (CSP) solver.
//!
//! Schedules a fixed number of events (variables) onto dates from a shared
//! inclusive range, subject to unary (`x <op> date`) and binary
//! (`x <op> y`) comparison constraints.
//!
//! # Key Components
//!
//! - **Constraints**: [`Constraint`], [`Operator`] — unary and binary date comparisons
//! - **Model**: [`CspModel`] — variable count, date range, constraints
//! - **Domains**: [`DomainStore`] — per-variable candidate dates, only ever shrinking
//! - **Graph**: [`ConstraintGraph`] — constraints indexed by variable, arcs for AC-3
//! - **Propagation**: [`node_consistency`], [`ac3`] — pruning before search
//! - **Search**: [`backtrack`] — index-ordered depth-first search
//! - **Solver**: [`CspRunner`], [`solve`] — the full pipeline
//!
//! # Design
//!
//! A solve is single-threaded and owns all of its state; separate solves
//! are independent. Variable order is by index and value order is ascending
//! date, so results are deterministic: the first solution in that order is
//! returned, not an optimal one.
//!
//! # References
//!
//! Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach",
//! 4th ed., ch. 6.

mod config;
mod domain;
mod error;
mod graph;
mod model;
mod propagation;
mod search;
mod solver;
mod types;

pub use config::SolverConfig;
pub use domain::{date_range, DomainStore};
pub use error::{ModelError, ParseOperatorError};
pub use graph::ConstraintGraph;
pub use model::CspModel;
pub use propagation::{ac3, node_consistency, Ac3Stats};
pub use search::{backtrack, SearchLimits, SearchOutcome, SearchStats};
#[cfg(feature = "parallel")]
pub use solver::solve_batch;
pub use solver::{solve, CspResult, CspRunner, SolveStats, SolverStatus};
pub use types::{Arc, Constraint, Operator};

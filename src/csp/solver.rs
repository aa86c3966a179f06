//! Solver pipeline: node consistency, AC-3, then backtracking search.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use log::debug;

use super::config::SolverConfig;
use super::domain::DomainStore;
use super::error::ModelError;
use super::graph::ConstraintGraph;
use super::model::CspModel;
use super::propagation::{ac3, node_consistency};
use super::search::{backtrack, SearchLimits, SearchOutcome};
use super::types::Constraint;

/// Status of the solver after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverStatus {
    /// A satisfying assignment was found.
    Feasible,
    /// No satisfying assignment exists.
    Infeasible,
    /// Model is invalid or malformed.
    ModelInvalid,
    /// Search hit `max_nodes` before deciding.
    NodeLimit,
    /// Search hit `time_limit_ms` before deciding.
    Timeout,
    /// Cancelled externally before deciding.
    Cancelled,
}

/// Counters collected across all solver phases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveStats {
    /// Values removed by unary constraints.
    pub node_pruned: usize,
    /// Values removed by AC-3.
    pub arc_pruned: usize,
    /// Arcs revised by AC-3.
    pub arc_revisions: usize,
    /// Tentative assignments made during search.
    pub nodes: usize,
    /// Search dead ends.
    pub backtracks: usize,
    /// Total solve time in milliseconds.
    pub solve_time_ms: u64,
}

/// Result of a solver run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CspResult {
    /// Solver status.
    pub status: SolverStatus,
    /// One date per variable, present iff `status` is `Feasible`.
    pub assignment: Option<Vec<NaiveDate>>,
    pub stats: SolveStats,
}

impl CspResult {
    /// Creates a result with the given status and no assignment.
    pub fn empty(status: SolverStatus) -> Self {
        Self {
            status,
            assignment: None,
            stats: SolveStats::default(),
        }
    }

    /// Whether a satisfying assignment was found.
    pub fn is_solution_found(&self) -> bool {
        self.status == SolverStatus::Feasible
    }

    /// Whether the solver proved there is no solution.
    pub fn is_infeasible(&self) -> bool {
        self.status == SolverStatus::Infeasible
    }
}

/// Runs the full pipeline on a [`CspModel`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use u_csp::csp::{CspModel, CspRunner, Operator, SolverConfig, SolverStatus};
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
///
/// let mut model = CspModel::new(2, d(1), d(3));
/// model.add_binary(0, Operator::NotEqual, 1);
/// model.add_unary(0, Operator::Equal, d(1));
///
/// let result = CspRunner::run(&model, &SolverConfig::default());
/// assert_eq!(result.status, SolverStatus::Feasible);
/// assert_eq!(result.assignment, Some(vec![d(1), d(2)]));
/// ```
pub struct CspRunner;

impl CspRunner {
    /// Solves the model.
    pub fn run(model: &CspModel, config: &SolverConfig) -> CspResult {
        Self::run_with_cancel(model, config, None)
    }

    /// Solves the model with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag becomes `true`, search stops at the
    /// next node and the result has status `Cancelled` and no assignment.
    pub fn run_with_cancel(
        model: &CspModel,
        config: &SolverConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> CspResult {
        if let Err(e) = model.validate() {
            debug!("rejecting model: {e}");
            return CspResult::empty(SolverStatus::ModelInvalid);
        }

        let start_time = Instant::now();
        let graph = ConstraintGraph::new(model.num_variables, &model.constraints);
        let mut stats = SolveStats::default();
        let store = prune(model, &graph, config, &mut stats);

        // An emptied domain already proves infeasibility.
        if store.has_empty_domain() {
            debug!("propagation emptied a domain; skipping search");
            stats.solve_time_ms = start_time.elapsed().as_millis() as u64;
            return CspResult {
                status: SolverStatus::Infeasible,
                assignment: None,
                stats,
            };
        }

        let limits = SearchLimits {
            max_nodes: config.max_nodes,
            deadline: (config.time_limit_ms > 0)
                .then(|| start_time + Duration::from_millis(config.time_limit_ms)),
            cancel: cancel.as_deref(),
        };
        let (outcome, search_stats) = backtrack(&store.into_vecs(), &graph, &limits);
        stats.nodes = search_stats.nodes;
        stats.backtracks = search_stats.backtracks;
        stats.solve_time_ms = start_time.elapsed().as_millis() as u64;

        let (status, assignment) = match outcome {
            SearchOutcome::Found(a) => (SolverStatus::Feasible, Some(a)),
            SearchOutcome::Exhausted => (SolverStatus::Infeasible, None),
            SearchOutcome::NodeLimit => (SolverStatus::NodeLimit, None),
            SearchOutcome::Timeout => (SolverStatus::Timeout, None),
            SearchOutcome::Cancelled => (SolverStatus::Cancelled, None),
        };
        debug!(
            "solved {} variables: {status:?} in {}ms",
            model.num_variables, stats.solve_time_ms
        );

        CspResult {
            status,
            assignment,
            stats,
        }
    }

    /// Runs the preprocessing passes only and returns the pruned domains.
    ///
    /// Returns an error if the model is invalid.
    pub fn propagate(model: &CspModel, config: &SolverConfig) -> Result<DomainStore, ModelError> {
        model.validate()?;
        let graph = ConstraintGraph::new(model.num_variables, &model.constraints);
        Ok(prune(model, &graph, config, &mut SolveStats::default()))
    }
}

fn prune(
    model: &CspModel,
    graph: &ConstraintGraph<'_>,
    config: &SolverConfig,
    stats: &mut SolveStats,
) -> DomainStore {
    let mut store = DomainStore::new(model.num_variables, model.start, model.end);
    if config.node_consistency {
        stats.node_pruned = node_consistency(&mut store, graph);
    }
    if config.arc_consistency {
        let ac = ac3(&mut store, graph);
        stats.arc_pruned = ac.removed;
        stats.arc_revisions = ac.revisions;
    }
    store
}

/// Schedules `num_variables` events between `start` and `end` (inclusive).
///
/// Returns `Ok(None)` when no assignment satisfies every constraint, and an
/// error when a constraint references a missing variable or the range is
/// inverted.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use u_csp::csp::{solve, Constraint, Operator};
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
/// let constraints = [
///     Constraint::unary(0, Operator::After, d(3)),
///     Constraint::unary(0, Operator::Before, d(1)),
/// ];
/// assert_eq!(solve(1, d(1), d(3), constraints).unwrap(), None);
/// ```
pub fn solve(
    num_variables: usize,
    start: NaiveDate,
    end: NaiveDate,
    constraints: impl IntoIterator<Item = Constraint>,
) -> Result<Option<Vec<NaiveDate>>, ModelError> {
    let model = CspModel::new(num_variables, start, end).with_constraints(constraints);
    model.validate()?;
    Ok(CspRunner::run(&model, &SolverConfig::default()).assignment)
}

/// Solves independent models in parallel, one result per model, in order.
#[cfg(feature = "parallel")]
pub fn solve_batch(models: &[CspModel], config: &SolverConfig) -> Vec<CspResult> {
    use rayon::prelude::*;

    models
        .par_iter()
        .map(|model| CspRunner::run(model, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::Operator;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_empty_problem_is_feasible() {
        let model = CspModel::new(0, day(1), day(3));
        let result = CspRunner::run(&model, &SolverConfig::default());
        assert!(result.is_solution_found());
        assert_eq!(result.assignment, Some(vec![]));
    }

    #[test]
    fn test_end_to_end_pinned_order() {
        let mut model = CspModel::new(2, day(1), day(3));
        model.add_binary(0, Operator::NotEqual, 1);
        model.add_unary(0, Operator::Equal, day(1));

        let result = CspRunner::run(&model, &SolverConfig::default());
        assert_eq!(result.assignment, Some(vec![day(1), day(2)]));
        assert_eq!(result.stats.node_pruned, 2);
    }

    #[test]
    fn test_contradictory_unary_is_infeasible() {
        let mut model = CspModel::new(1, day(1), day(3));
        model.add_unary(0, Operator::After, day(3));
        model.add_unary(0, Operator::Before, day(1));

        let result = CspRunner::run(&model, &SolverConfig::default());
        assert!(result.is_infeasible());
        assert!(result.assignment.is_none());
        assert_eq!(result.stats.nodes, 0);

        // Search alone reaches the same verdict.
        let result = CspRunner::run(&model, &SolverConfig::default().search_only());
        assert!(result.is_infeasible());
        assert_eq!(result.stats.nodes, 3);
    }

    #[test]
    fn test_invalid_model_status() {
        let mut model = CspModel::new(1, day(1), day(3));
        model.add_binary(0, Operator::Before, 1);

        let result = CspRunner::run(&model, &SolverConfig::default());
        assert_eq!(result.status, SolverStatus::ModelInvalid);
        assert!(CspRunner::propagate(&model, &SolverConfig::default()).is_err());
    }

    #[test]
    fn test_propagate_binary_pruning() {
        let mut model = CspModel::new(2, day(1), day(3));
        model.add_binary(0, Operator::Before, 1);

        let store = CspRunner::propagate(&model, &SolverConfig::default()).unwrap();
        assert!(!store.contains(0, day(3)));
        assert!(!store.contains(1, day(1)));
        assert_eq!(store.total_size(), 4);
    }

    #[test]
    fn test_deterministic() {
        let mut model = CspModel::new(4, day(1), day(6));
        model.add_binary(0, Operator::Before, 1);
        model.add_binary(1, Operator::NotEqual, 2);
        model.add_binary(3, Operator::OnOrAfter, 2);
        model.add_unary(2, Operator::After, day(2));

        let config = SolverConfig::default();
        let a = CspRunner::run(&model, &config);
        let b = CspRunner::run(&model, &config);
        assert_eq!(a.assignment, b.assignment);
        assert_eq!(a.stats.nodes, b.stats.nodes);
        assert!(model.is_solution(a.assignment.as_deref().unwrap()));
    }

    #[test]
    fn test_node_limit_gives_no_partial_result() {
        let mut model = CspModel::new(3, day(1), day(2));
        model.add_binary(0, Operator::NotEqual, 1);
        model.add_binary(1, Operator::NotEqual, 2);
        model.add_binary(0, Operator::NotEqual, 2);

        let config = SolverConfig::default().with_max_nodes(2);
        let result = CspRunner::run(&model, &config);
        assert_eq!(result.status, SolverStatus::NodeLimit);
        assert!(result.assignment.is_none());
    }

    #[test]
    fn test_cancel_token() {
        let model = CspModel::new(3, day(1), day(5));
        let cancel = Arc::new(AtomicBool::new(true));
        let result = CspRunner::run_with_cancel(&model, &SolverConfig::default(), Some(cancel));
        assert_eq!(result.status, SolverStatus::Cancelled);
        assert!(result.assignment.is_none());
    }

    #[test]
    fn test_solve_rejects_bad_input() {
        let err = solve(1, day(3), day(1), []).unwrap_err();
        assert!(matches!(err, ModelError::InvalidRange { .. }));

        let err = solve(1, day(1), day(3), [Constraint::unary(1, Operator::Equal, day(1))])
            .unwrap_err();
        assert!(matches!(err, ModelError::VariableOutOfRange { index: 1, .. }));
    }

    #[test]
    fn test_solve_multi_month() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 30).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 2, 2).unwrap();
        let constraints = [
            Constraint::binary(0, Operator::Before, 1),
            Constraint::binary(1, Operator::Before, 2),
            Constraint::unary(2, Operator::OnOrAfter, NaiveDate::from_ymd_opt(2024, 2, 2).unwrap()),
        ];
        let assignment = solve(3, start, end, constraints).unwrap().unwrap();
        assert_eq!(
            assignment,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 30).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
            ]
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_solve_batch_matches_sequential() {
        let models: Vec<CspModel> = (1..=5)
            .map(|k| {
                let mut m = CspModel::new(k, day(1), day(4));
                for i in 1..k {
                    m.add_binary(i - 1, Operator::OnOrBefore, i);
                }
                m
            })
            .collect();
        let config = SolverConfig::default();
        let batch = solve_batch(&models, &config);
        assert_eq!(batch.len(), models.len());
        for (model, result) in models.iter().zip(&batch) {
            let sequential = CspRunner::run(model, &config);
            assert_eq!(result.status, sequential.status);
            assert_eq!(result.assignment, sequential.assignment);
        }
    }
}

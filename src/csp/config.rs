//! Solver configuration.

/// Configuration for [`CspRunner`](super::CspRunner).
///
/// # Examples
///
/// ```
/// use u_csp::csp::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_arc_consistency(false)
///     .with_max_nodes(10_000)
///     .with_time_limit_ms(500);
/// assert_eq!(config.max_nodes, 10_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Prune domains with unary constraints before search.
    pub node_consistency: bool,

    /// Run AC-3 over binary constraints before search.
    pub arc_consistency: bool,

    /// Maximum search nodes (tentative assignments) to visit. 0 = no limit.
    pub max_nodes: usize,

    /// Wall-clock budget for the search in milliseconds. 0 = no limit.
    pub time_limit_ms: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            node_consistency: true,
            arc_consistency: true,
            max_nodes: 0,
            time_limit_ms: 0,
        }
    }
}

impl SolverConfig {
    pub fn with_node_consistency(mut self, enabled: bool) -> Self {
        self.node_consistency = enabled;
        self
    }

    pub fn with_arc_consistency(mut self, enabled: bool) -> Self {
        self.arc_consistency = enabled;
        self
    }

    pub fn with_max_nodes(mut self, n: usize) -> Self {
        self.max_nodes = n;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Disables both preprocessing passes; search alone decides the result.
    pub fn search_only(self) -> Self {
        self.with_node_consistency(false).with_arc_consistency(false)
    }
}

//! Configuration and tuning constants for the social graph analyzer

use crate::graph::EdgeKind;

/// Floor applied to edge weights during weighted shortest-path search so
/// zero-weight edges cannot stall the frontier. Reported path weights still
/// sum the actual edge weights.
pub const WEIGHT_FLOOR: f64 = 0.001;

/// Degree centrality share of the combined node score
pub const DEGREE_WEIGHT: f64 = 0.3;

/// Betweenness centrality share of the combined node score
pub const BETWEENNESS_WEIGHT: f64 = 0.4;

/// Closeness centrality share of the combined node score
pub const CLOSENESS_WEIGHT: f64 = 0.3;

/// Max-degree over average-degree ratio above which the graph looks
/// hub-dominated
pub const HUB_DEGREE_RATIO: f64 = 4.0;

/// Fraction of the vertex count the max degree must exceed before the graph
/// counts as hub-and-spoke
pub const HUB_SIZE_FRACTION: f64 = 0.3;

/// Degree coefficient of variation below which the graph counts as
/// evenly distributed
pub const DISTRIBUTED_CV_MAX: f64 = 0.5;

/// Fraction of isolated vertices above which the graph counts as
/// disconnected
pub const ISOLATED_FRACTION_MAX: f64 = 0.5;

/// Default run parameters for an analysis pipeline
#[derive(Debug, Clone)]
pub struct Config {
    /// Minimum community size to report individually
    pub min_community_size: usize,

    /// Number of top-ranked nodes to include in reports
    pub top_k: usize,

    /// Edge kinds excluded from the visible graph
    pub hidden_kinds: Vec<EdgeKind>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_community_size: 2,
            top_k: 5,
            hidden_kinds: Vec::new(),
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(min_community_size: usize, top_k: usize) -> Self {
        Self {
            min_community_size,
            top_k,
            ..Self::default()
        }
    }

    /// Kinds that reach the visible graph, in canonical order
    pub fn visible_kinds(&self) -> Vec<EdgeKind> {
        EdgeKind::ALL
            .into_iter()
            .filter(|kind| !self.hidden_kinds.contains(kind))
            .collect()
    }
}

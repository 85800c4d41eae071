//! Graph model: people, typed weighted edges, and the multigraph itself

pub mod builder;
pub mod multigraph;

pub use builder::GraphBuilder;
pub use multigraph::SocialGraph;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The five relationship categories an edge can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Friend,
    FamiliarStranger,
    Classmate,
    Stranger,
    StudyGroup,
}

impl EdgeKind {
    /// All kinds in canonical order
    pub const ALL: [EdgeKind; 5] = [
        EdgeKind::Friend,
        EdgeKind::FamiliarStranger,
        EdgeKind::Classmate,
        EdgeKind::Stranger,
        EdgeKind::StudyGroup,
    ];

    /// Short code used by snapshot files
    pub fn code(self) -> &'static str {
        match self {
            EdgeKind::Friend => "f",
            EdgeKind::FamiliarStranger => "fs",
            EdgeKind::Classmate => "c",
            EdgeKind::Stranger => "s",
            EdgeKind::StudyGroup => "sg",
        }
    }

    /// Parse a snapshot code, case-insensitively; unknown codes are rejected
    pub fn from_code(code: &str) -> Option<EdgeKind> {
        match code.to_ascii_lowercase().as_str() {
            "f" => Some(EdgeKind::Friend),
            "fs" => Some(EdgeKind::FamiliarStranger),
            "c" => Some(EdgeKind::Classmate),
            "s" => Some(EdgeKind::Stranger),
            "sg" => Some(EdgeKind::StudyGroup),
            _ => None,
        }
    }

    /// Human-readable label attached to the first edge of each kind
    pub fn display_label(self) -> &'static str {
        match self {
            EdgeKind::Friend => "friend",
            EdgeKind::FamiliarStranger => "Familiar Stranger",
            EdgeKind::Classmate => "Classmate",
            EdgeKind::Stranger => "Stranger",
            EdgeKind::StudyGroup => "Study Groups",
        }
    }

    /// Position in `ALL`, used to address per-kind arrays
    pub fn index(self) -> usize {
        match self {
            EdgeKind::Friend => 0,
            EdgeKind::FamiliarStranger => 1,
            EdgeKind::Classmate => 2,
            EdgeKind::Stranger => 3,
            EdgeKind::StudyGroup => 4,
        }
    }
}

/// A single typed, weighted link between two people
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Relationship category
    pub kind: EdgeKind,

    /// One endpoint
    pub v1: String,

    /// The other endpoint
    pub v2: String,

    /// Interaction weight
    pub weight: f64,

    /// Display annotation, present on the first edge of each kind
    pub label: Option<String>,
}

impl Edge {
    /// Create an unlabelled edge
    pub fn new(kind: EdgeKind, v1: &str, v2: &str, weight: f64) -> Self {
        Self {
            kind,
            v1: v1.to_string(),
            v2: v2.to_string(),
            weight,
            label: None,
        }
    }

    /// The endpoint opposite `v`, if `v` is one of the two
    pub fn other_end(&self, v: &str) -> Option<&str> {
        if self.v1 == v {
            Some(&self.v2)
        } else if self.v2 == v {
            Some(&self.v1)
        } else {
            None
        }
    }

    /// Whether this edge joins `a` and `b` in either orientation
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.v1 == a && self.v2 == b) || (self.v1 == b && self.v2 == a)
    }
}

/// Per-kind edge histogram with a fixed slot per `EdgeKind`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCounts {
    counts: [usize; 5],
}

impl KindCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one edge of the given kind
    pub fn record(&mut self, kind: EdgeKind) {
        self.counts[kind.index()] += 1;
    }

    pub fn count(&self, kind: EdgeKind) -> usize {
        self.counts[kind.index()]
    }

    /// Total edges recorded across all kinds
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Kinds with their counts, in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (EdgeKind, usize)> + '_ {
        EdgeKind::ALL.iter().map(move |&kind| (kind, self.counts[kind.index()]))
    }

    /// The most frequent kind; earlier canonical order wins ties, `None`
    /// when nothing has been recorded
    pub fn dominant(&self) -> Option<EdgeKind> {
        let mut best = None;
        let mut best_count = 0;
        for kind in EdgeKind::ALL {
            let count = self.counts[kind.index()];
            if count > best_count {
                best = Some(kind);
                best_count = count;
            }
        }
        best
    }
}

/// Every parsed edge grouped by kind, including kinds hidden from the
/// visible graph
#[derive(Debug, Clone, Default)]
pub struct EdgeCatalog {
    by_kind: [Vec<Edge>; 5],
}

impl EdgeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, edge: Edge) {
        self.by_kind[edge.kind.index()].push(edge);
    }

    /// All recorded edges of one kind, in record order
    pub fn edges_for(&self, kind: EdgeKind) -> &[Edge] {
        &self.by_kind[kind.index()]
    }

    pub fn count_for(&self, kind: EdgeKind) -> usize {
        self.by_kind[kind.index()].len()
    }

    /// Total recorded edges across all kinds
    pub fn total(&self) -> usize {
        self.by_kind.iter().map(|edges| edges.len()).sum()
    }
}

/// Errors raised by graph queries
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// A query named a vertex the graph does not contain
    #[error("vertex not found: {0}")]
    VertexNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_codes_round_trip() {
        for kind in EdgeKind::ALL {
            assert_eq!(EdgeKind::from_code(kind.code()), Some(kind));
        }
    }

    #[test]
    fn kind_codes_are_case_insensitive() {
        assert_eq!(EdgeKind::from_code("FS"), Some(EdgeKind::FamiliarStranger));
        assert_eq!(EdgeKind::from_code("Sg"), Some(EdgeKind::StudyGroup));
    }

    #[test]
    fn unknown_kind_code_is_rejected() {
        assert_eq!(EdgeKind::from_code("x"), None);
        assert_eq!(EdgeKind::from_code(""), None);
        assert_eq!(EdgeKind::from_code("friend"), None);
    }

    #[test]
    fn edge_other_end() {
        let edge = Edge::new(EdgeKind::Friend, "A", "B", 2.0);
        assert_eq!(edge.other_end("A"), Some("B"));
        assert_eq!(edge.other_end("B"), Some("A"));
        assert_eq!(edge.other_end("C"), None);
    }

    #[test]
    fn edge_connects_either_orientation() {
        let edge = Edge::new(EdgeKind::Classmate, "A", "B", 1.0);
        assert!(edge.connects("A", "B"));
        assert!(edge.connects("B", "A"));
        assert!(!edge.connects("A", "C"));
    }

    #[test]
    fn dominant_kind_breaks_ties_by_canonical_order() {
        let mut counts = KindCounts::new();
        counts.record(EdgeKind::Stranger);
        counts.record(EdgeKind::Friend);
        assert_eq!(counts.dominant(), Some(EdgeKind::Friend));
    }

    #[test]
    fn dominant_kind_empty_is_none() {
        assert_eq!(KindCounts::new().dominant(), None);
    }

    #[test]
    fn catalog_groups_by_kind() {
        let mut catalog = EdgeCatalog::new();
        catalog.add(Edge::new(EdgeKind::Friend, "A", "B", 1.0));
        catalog.add(Edge::new(EdgeKind::Friend, "B", "C", 2.0));
        catalog.add(Edge::new(EdgeKind::Stranger, "A", "C", 3.0));
        assert_eq!(catalog.count_for(EdgeKind::Friend), 2);
        assert_eq!(catalog.count_for(EdgeKind::Stranger), 1);
        assert_eq!(catalog.count_for(EdgeKind::Classmate), 0);
        assert_eq!(catalog.total(), 3);
    }
}

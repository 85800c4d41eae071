//! Community detection module

pub mod detection;
pub mod metrics;

pub use detection::CommunityDetector;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::{EdgeKind, KindCounts, SocialGraph};

/// A community (connected component) of the social graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Community {
    /// Identifier after size ordering; 0 is the largest community
    pub id: usize,

    /// Members in BFS discovery order
    pub members: Vec<String>,

    /// Edges with both endpoints inside, parallel edges counted separately
    pub internal_edges: usize,

    /// Sum of internal edge weights
    pub total_weight: f64,

    kinds: KindCounts,
}

impl Community {
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Internal edges over the m(m-1)/2 possible pairs; 0.0 for singletons
    pub fn density(&self) -> f64 {
        let m = self.members.len();
        if m <= 1 {
            return 0.0;
        }
        let possible = (m * (m - 1)) as f64 / 2.0;
        self.internal_edges as f64 / possible
    }

    /// Mean internal edge weight; 0.0 when there are no internal edges
    pub fn average_weight(&self) -> f64 {
        if self.internal_edges == 0 {
            return 0.0;
        }
        self.total_weight / self.internal_edges as f64
    }

    /// The most frequent internal edge kind
    pub fn dominant_kind(&self) -> Option<EdgeKind> {
        self.kinds.dominant()
    }

    /// Per-kind histogram of internal edges
    pub fn kind_counts(&self) -> &KindCounts {
        &self.kinds
    }
}

impl fmt::Display for Community {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Community {}: {} members, {} edges, density={:.3}",
            self.id,
            self.size(),
            self.internal_edges,
            self.density()
        )
    }
}

/// The full partition produced by one detection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Communities ordered by size descending
    pub communities: Vec<Community>,

    /// Vertex id to community id, covering every vertex
    pub node_to_community: HashMap<String, usize>,
}

impl DetectionResult {
    pub fn community_count(&self) -> usize {
        self.communities.len()
    }

    /// The community a vertex belongs to, `None` for unknown vertices
    pub fn community_of(&self, node: &str) -> Option<&Community> {
        let id = *self.node_to_community.get(node)?;
        self.communities.get(id)
    }

    /// Communities with at least `min_size` members, in result order
    pub fn significant_communities(&self, min_size: usize) -> Vec<&Community> {
        self.communities
            .iter()
            .filter(|community| community.size() >= min_size)
            .collect()
    }

    /// Newman modularity of this partition over the given graph
    pub fn modularity(&self, graph: &SocialGraph) -> f64 {
        metrics::modularity(graph, self)
    }
}

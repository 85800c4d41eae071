//! Minimum spanning forest via Kruskal's algorithm

pub mod union_find;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::{Edge, EdgeKind, KindCounts, SocialGraph};
use union_find::DisjointSets;

/// One tree of the spanning forest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MstComponent {
    /// Position after size ordering; 0 is the largest tree
    pub id: usize,

    /// Member vertices in discovery order
    pub vertices: Vec<String>,

    /// Retained edges inside this tree
    pub edges: Vec<Edge>,

    /// Weight sum of the retained edges
    pub total_weight: f64,
}

impl MstComponent {
    pub fn size(&self) -> usize {
        self.vertices.len()
    }

    /// Most frequent kind among the retained edges
    pub fn dominant_kind(&self) -> Option<EdgeKind> {
        let mut counts = KindCounts::new();
        for edge in &self.edges {
            counts.record(edge.kind);
        }
        counts.dominant()
    }
}

/// Spanning forest of the whole visible graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MstResult {
    /// Retained edges in acceptance order
    pub edges: Vec<Edge>,

    /// Trees sorted by size descending, renumbered from 0
    pub components: Vec<MstComponent>,

    /// Weight sum of all retained edges
    pub total_weight: f64,

    /// Number of vertices the forest spans
    pub vertex_count: usize,
}

impl MstResult {
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// A forest with at most one tree spans a connected graph
    pub fn is_connected(&self) -> bool {
        self.components.len() <= 1
    }

    /// Kind histogram of the retained edges only
    pub fn kind_distribution(&self) -> KindCounts {
        let mut counts = KindCounts::new();
        for edge in &self.edges {
            counts.record(edge.kind);
        }
        counts
    }

    pub fn heaviest_edge(&self) -> Option<&Edge> {
        self.edges
            .iter()
            .max_by(|a, b| a.weight.total_cmp(&b.weight))
    }

    pub fn lightest_edge(&self) -> Option<&Edge> {
        self.edges
            .iter()
            .min_by(|a, b| a.weight.total_cmp(&b.weight))
    }

    /// Mean retained-edge weight; 0.0 for an edgeless forest
    pub fn average_weight(&self) -> f64 {
        if self.edges.is_empty() {
            return 0.0;
        }
        self.total_weight / self.edges.len() as f64
    }
}

impl fmt::Display for MstResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_connected() {
            write!(
                f,
                "MST: {} edges, total weight={:.1} (connected)",
                self.edge_count(),
                self.total_weight
            )
        } else {
            write!(
                f,
                "MST: {} edges, total weight={:.1} ({} components, forest)",
                self.edge_count(),
                self.total_weight,
                self.component_count()
            )
        }
    }
}

/// Kruskal's algorithm over the visible graph
pub struct MinimumSpanningForest<'g> {
    graph: &'g SocialGraph,
}

impl<'g> MinimumSpanningForest<'g> {
    pub fn new(graph: &'g SocialGraph) -> Self {
        Self { graph }
    }

    /// Compute the spanning forest. Isolated vertices become singleton
    /// trees; the invariant `edge_count == vertex_count - component_count`
    /// holds for every input.
    pub fn compute(&self) -> MstResult {
        log::debug!(
            "Computing minimum spanning forest over {} vertices and {} edges",
            self.graph.vertex_count(),
            self.graph.edge_count()
        );

        let mut candidates: Vec<(u32, u32, &Edge)> = self.graph.edges_indexed().collect();
        // Stable sort keeps insertion order among equal weights
        candidates.sort_by(|a, b| a.2.weight.total_cmp(&b.2.weight));

        let mut sets = DisjointSets::new(self.graph.vertex_capacity());
        let mut accepted: Vec<(u32, &Edge)> = Vec::new();
        let mut total_weight = 0.0;
        for (a, b, edge) in candidates {
            if sets.union(a, b) {
                total_weight += edge.weight;
                accepted.push((a, edge));
            }
        }

        // Partition vertices into trees, in vertex insertion order
        let mut roots: Vec<u32> = Vec::new();
        let mut members: HashMap<u32, Vec<String>> = HashMap::new();
        for idx in self.graph.vertex_indices() {
            let name = match self.graph.vertex_name(idx) {
                Some(name) => name.to_string(),
                None => continue,
            };
            let root = sets.find(idx);
            members
                .entry(root)
                .or_insert_with(|| {
                    roots.push(root);
                    Vec::new()
                })
                .push(name);
        }

        // Attach each retained edge to its tree
        let mut tree_edges: HashMap<u32, Vec<Edge>> = HashMap::new();
        for &(endpoint, edge) in &accepted {
            let root = sets.find(endpoint);
            tree_edges.entry(root).or_default().push(edge.clone());
        }

        let mut components: Vec<MstComponent> = roots
            .into_iter()
            .map(|root| {
                let vertices = members.remove(&root).unwrap_or_default();
                let edges = tree_edges.remove(&root).unwrap_or_default();
                let total_weight = edges.iter().map(|e| e.weight).sum();
                MstComponent {
                    id: 0,
                    vertices,
                    edges,
                    total_weight,
                }
            })
            .collect();

        // Largest tree first; stable, so equal sizes keep discovery order
        components.sort_by(|a, b| b.size().cmp(&a.size()));
        for (id, component) in components.iter_mut().enumerate() {
            component.id = id;
        }

        let edges: Vec<Edge> = accepted.into_iter().map(|(_, edge)| edge.clone()).collect();
        MstResult {
            edges,
            components,
            total_weight,
            vertex_count: self.graph.vertex_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(graph: &mut SocialGraph, kind: EdgeKind, a: &str, b: &str, weight: f64) {
        graph.add_edge(Edge::new(kind, a, b, weight));
    }

    fn weighted_triangle() -> SocialGraph {
        let mut graph = SocialGraph::new();
        add(&mut graph, EdgeKind::Friend, "A", "B", 1.0);
        add(&mut graph, EdgeKind::Friend, "B", "C", 2.0);
        add(&mut graph, EdgeKind::Friend, "A", "C", 3.0);
        graph
    }

    #[test]
    fn triangle_keeps_the_two_lightest_edges() {
        let graph = weighted_triangle();
        let result = MinimumSpanningForest::new(&graph).compute();
        assert_eq!(result.edge_count(), 2);
        assert!((result.total_weight - 3.0).abs() < 1e-10);
        assert!(result.edges.iter().any(|e| e.connects("A", "B")));
        assert!(result.edges.iter().any(|e| e.connects("B", "C")));
        assert!(!result.edges.iter().any(|e| e.connects("A", "C")));
        assert!(result.is_connected());
    }

    #[test]
    fn edge_count_invariant_holds_across_components() {
        let mut graph = SocialGraph::new();
        add(&mut graph, EdgeKind::Friend, "A", "B", 1.0);
        add(&mut graph, EdgeKind::Friend, "B", "C", 1.0);
        add(&mut graph, EdgeKind::Stranger, "D", "E", 2.0);
        graph.add_vertex("F");
        let result = MinimumSpanningForest::new(&graph).compute();
        assert_eq!(result.component_count(), 3);
        assert_eq!(
            result.edge_count(),
            result.vertex_count - result.component_count()
        );
        assert!(!result.is_connected());
    }

    #[test]
    fn components_are_sorted_by_size_and_renumbered() {
        let mut graph = SocialGraph::new();
        add(&mut graph, EdgeKind::Friend, "A", "B", 1.0);
        add(&mut graph, EdgeKind::Friend, "C", "D", 1.0);
        add(&mut graph, EdgeKind::Friend, "D", "E", 1.0);
        let result = MinimumSpanningForest::new(&graph).compute();
        let sizes: Vec<usize> = result.components.iter().map(|c| c.size()).collect();
        assert_eq!(sizes, vec![3, 2]);
        let ids: Vec<usize> = result.components.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(result.components[0].vertices, vec!["C", "D", "E"]);
    }

    #[test]
    fn isolated_vertices_become_singleton_trees() {
        let mut graph = SocialGraph::new();
        graph.add_vertex("X");
        graph.add_vertex("Y");
        let result = MinimumSpanningForest::new(&graph).compute();
        assert_eq!(result.component_count(), 2);
        assert_eq!(result.edge_count(), 0);
        assert!(result.components.iter().all(|c| c.size() == 1));
        assert!(result.components.iter().all(|c| c.edges.is_empty()));
    }

    #[test]
    fn equal_weights_accept_in_insertion_order() {
        let graph = {
            let mut graph = SocialGraph::new();
            add(&mut graph, EdgeKind::Friend, "A", "B", 1.0);
            add(&mut graph, EdgeKind::Friend, "B", "C", 1.0);
            add(&mut graph, EdgeKind::Friend, "A", "C", 1.0);
            graph
        };
        let result = MinimumSpanningForest::new(&graph).compute();
        assert!(result.edges[0].connects("A", "B"));
        assert!(result.edges[1].connects("B", "C"));
    }

    #[test]
    fn parallel_kinds_keep_only_the_lighter_edge() {
        let mut graph = SocialGraph::new();
        add(&mut graph, EdgeKind::Classmate, "A", "B", 5.0);
        add(&mut graph, EdgeKind::Friend, "A", "B", 1.0);
        let result = MinimumSpanningForest::new(&graph).compute();
        assert_eq!(result.edge_count(), 1);
        assert_eq!(result.edges[0].kind, EdgeKind::Friend);
        assert_eq!(result.kind_distribution().count(EdgeKind::Classmate), 0);
    }

    #[test]
    fn component_dominant_kind_and_weight_extremes() {
        let mut graph = SocialGraph::new();
        add(&mut graph, EdgeKind::StudyGroup, "A", "B", 1.0);
        add(&mut graph, EdgeKind::StudyGroup, "B", "C", 4.0);
        add(&mut graph, EdgeKind::Friend, "C", "D", 2.0);
        let result = MinimumSpanningForest::new(&graph).compute();
        assert_eq!(
            result.components[0].dominant_kind(),
            Some(EdgeKind::StudyGroup)
        );
        assert_eq!(result.heaviest_edge().map(|e| e.weight), Some(4.0));
        assert_eq!(result.lightest_edge().map(|e| e.weight), Some(1.0));
        assert!((result.average_weight() - 7.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn summary_reads_connected_or_forest() {
        let graph = weighted_triangle();
        let connected = MinimumSpanningForest::new(&graph).compute();
        assert_eq!(
            connected.to_string(),
            "MST: 2 edges, total weight=3.0 (connected)"
        );

        let mut split = SocialGraph::new();
        add(&mut split, EdgeKind::Friend, "A", "B", 1.0);
        add(&mut split, EdgeKind::Friend, "C", "D", 2.0);
        let forest = MinimumSpanningForest::new(&split).compute();
        assert_eq!(
            forest.to_string(),
            "MST: 2 edges, total weight=3.0 (2 components, forest)"
        );
    }

    #[test]
    fn empty_graph_yields_an_empty_forest() {
        let graph = SocialGraph::new();
        let result = MinimumSpanningForest::new(&graph).compute();
        assert_eq!(result.edge_count(), 0);
        assert_eq!(result.component_count(), 0);
        assert_eq!(result.vertex_count, 0);
        assert_eq!(result.average_weight(), 0.0);
        assert!(result.heaviest_edge().is_none());
    }
}

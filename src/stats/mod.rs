//! Whole-graph statistics

use std::cell::OnceCell;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::graph::{EdgeCatalog, EdgeKind, SocialGraph};

/// One-pass degree summary, cached per instance
struct DegreeScan {
    max: usize,
    isolated: usize,
}

/// Aggregate statistics over the visible graph and the full catalog
pub struct GraphStats<'g> {
    graph: &'g SocialGraph,
    catalog: &'g EdgeCatalog,
    degrees: OnceCell<DegreeScan>,
    weight_sum: OnceCell<f64>,
}

impl<'g> GraphStats<'g> {
    pub fn new(graph: &'g SocialGraph, catalog: &'g EdgeCatalog) -> Self {
        Self {
            graph,
            catalog,
            degrees: OnceCell::new(),
            weight_sum: OnceCell::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.vertex_count()
    }

    /// Edges in the visible graph
    pub fn visible_edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Edges across the whole catalog, hidden kinds included
    pub fn total_edge_count(&self) -> usize {
        self.catalog.total()
    }

    /// Catalog edges of one kind
    pub fn count_for(&self, kind: EdgeKind) -> usize {
        self.catalog.count_for(kind)
    }

    /// 2e / n(n-1) over the visible graph; 0.0 when n <= 1
    pub fn density(&self) -> f64 {
        let n = self.graph.vertex_count();
        if n <= 1 {
            return 0.0;
        }
        let e = self.graph.edge_count() as f64;
        2.0 * e / (n as f64 * (n - 1) as f64)
    }

    /// 2e / n; 0.0 for the empty graph
    pub fn average_degree(&self) -> f64 {
        let n = self.graph.vertex_count();
        if n == 0 {
            return 0.0;
        }
        2.0 * self.graph.edge_count() as f64 / n as f64
    }

    pub fn max_degree(&self) -> usize {
        self.degree_scan().max
    }

    /// Vertices with no visible edges
    pub fn isolated_count(&self) -> usize {
        self.degree_scan().isolated
    }

    /// Mean weight over visible edges; 0.0 when edgeless
    pub fn average_weight(&self) -> f64 {
        let edges = self.graph.edge_count();
        if edges == 0 {
            return 0.0;
        }
        self.visible_weight_sum() / edges as f64
    }

    /// The k highest-degree vertices, degree descending, ties by vertex id
    /// ascending. Keeps a min-heap of size k instead of sorting everything.
    pub fn top_nodes(&self, k: usize) -> Vec<(String, usize)> {
        if k == 0 {
            return Vec::new();
        }
        let mut heap: BinaryHeap<Reverse<(usize, Reverse<&str>)>> =
            BinaryHeap::with_capacity(k + 1);
        for vertex in self.graph.vertices() {
            heap.push(Reverse((self.graph.degree(vertex), Reverse(vertex))));
            if heap.len() > k {
                heap.pop();
            }
        }
        let mut ranked: Vec<(String, usize)> = heap
            .into_iter()
            .map(|Reverse((degree, Reverse(id)))| (id.to_string(), degree))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }

    fn degree_scan(&self) -> &DegreeScan {
        self.degrees.get_or_init(|| {
            let mut max = 0;
            let mut isolated = 0;
            for vertex in self.graph.vertices() {
                let degree = self.graph.degree(vertex);
                if degree > max {
                    max = degree;
                }
                if degree == 0 {
                    isolated += 1;
                }
            }
            DegreeScan { max, isolated }
        })
    }

    fn visible_weight_sum(&self) -> f64 {
        *self
            .weight_sum
            .get_or_init(|| self.graph.edges().map(|edge| edge.weight).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    const TOL: f64 = 1e-9;

    fn triangle() -> (SocialGraph, EdgeCatalog) {
        let mut builder = GraphBuilder::new();
        builder.add_edge(EdgeKind::Friend, "A", "B", 1.0);
        builder.add_edge(EdgeKind::Friend, "B", "C", 2.0);
        builder.add_edge(EdgeKind::Friend, "C", "A", 3.0);
        builder.build()
    }

    #[test]
    fn counts_split_visible_from_catalog() {
        let mut builder = GraphBuilder::with_visible_kinds(&[EdgeKind::Friend]);
        builder.add_edge(EdgeKind::Friend, "A", "B", 1.0);
        builder.add_edge(EdgeKind::Stranger, "A", "C", 1.0);
        let (graph, catalog) = builder.build();
        let stats = GraphStats::new(&graph, &catalog);
        assert_eq!(stats.visible_edge_count(), 1);
        assert_eq!(stats.total_edge_count(), 2);
        assert_eq!(stats.count_for(EdgeKind::Stranger), 1);
        assert_eq!(stats.count_for(EdgeKind::Classmate), 0);
    }

    #[test]
    fn density_of_a_triangle_is_one() {
        let (graph, catalog) = triangle();
        let stats = GraphStats::new(&graph, &catalog);
        assert!((stats.density() - 1.0).abs() < TOL);
    }

    #[test]
    fn density_of_a_path() {
        let mut builder = GraphBuilder::new();
        builder.add_edge(EdgeKind::Friend, "A", "B", 1.0);
        builder.add_edge(EdgeKind::Friend, "B", "C", 1.0);
        let (graph, catalog) = builder.build();
        let stats = GraphStats::new(&graph, &catalog);
        assert!((stats.density() - 2.0 / 3.0).abs() < TOL);
        assert!((stats.average_degree() - 4.0 / 3.0).abs() < TOL);
    }

    #[test]
    fn tiny_graphs_have_zero_density() {
        let mut builder = GraphBuilder::new();
        builder.add_node("A");
        let (graph, catalog) = builder.build();
        let stats = GraphStats::new(&graph, &catalog);
        assert_eq!(stats.density(), 0.0);
        assert_eq!(stats.average_degree(), 0.0);
        assert_eq!(stats.average_weight(), 0.0);
    }

    #[test]
    fn degree_scan_finds_max_and_isolated() {
        let mut builder = GraphBuilder::new();
        builder.add_edge(EdgeKind::Friend, "HUB", "B", 1.0);
        builder.add_edge(EdgeKind::Friend, "HUB", "C", 1.0);
        builder.add_edge(EdgeKind::Friend, "HUB", "D", 1.0);
        builder.add_node("LONER");
        let (graph, catalog) = builder.build();
        let stats = GraphStats::new(&graph, &catalog);
        assert_eq!(stats.max_degree(), 3);
        assert_eq!(stats.isolated_count(), 1);
        // Second call hits the cached scan
        assert_eq!(stats.max_degree(), 3);
    }

    #[test]
    fn average_weight_over_visible_edges() {
        let (graph, catalog) = triangle();
        let stats = GraphStats::new(&graph, &catalog);
        assert!((stats.average_weight() - 2.0).abs() < TOL);
    }

    #[test]
    fn top_nodes_rank_by_degree_then_id() {
        let mut builder = GraphBuilder::new();
        builder.add_edge(EdgeKind::Friend, "HUB", "D", 1.0);
        builder.add_edge(EdgeKind::Friend, "HUB", "C", 1.0);
        builder.add_edge(EdgeKind::Friend, "HUB", "B", 1.0);
        let (graph, catalog) = builder.build();
        let stats = GraphStats::new(&graph, &catalog);
        let top = stats.top_nodes(2);
        assert_eq!(
            top,
            vec![("HUB".to_string(), 3), ("B".to_string(), 1)]
        );
    }

    #[test]
    fn top_nodes_handles_degenerate_k() {
        let (graph, catalog) = triangle();
        let stats = GraphStats::new(&graph, &catalog);
        assert!(stats.top_nodes(0).is_empty());
        let all = stats.top_nodes(10);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].0, "A");
    }
}

//! Greedy graph coloring

use std::collections::{HashMap, HashSet};
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::graph::{GraphError, SocialGraph};

/// A color assignment over the graph's vertices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColoringResult {
    /// Vertex id to color index; vertices left out of a custom order are absent
    pub assignment: HashMap<String, usize>,

    /// Vertices per color, each class sorted ascending
    pub color_classes: Vec<Vec<String>>,

    /// Number of colors used
    pub chromatic_bound: usize,

    /// Number of vertices that received a color
    pub vertex_count: usize,

    /// No edge joins two same-colored endpoints
    pub valid: bool,
}

impl ColoringResult {
    pub fn color_of(&self, vertex: &str) -> Option<usize> {
        self.assignment.get(vertex).copied()
    }

    /// Members of one color class; empty for out-of-range colors
    pub fn class_for(&self, color: usize) -> &[String] {
        self.color_classes
            .get(color)
            .map(|class| class.as_slice())
            .unwrap_or(&[])
    }

    pub fn largest_class_size(&self) -> usize {
        self.color_classes
            .iter()
            .map(|class| class.len())
            .max()
            .unwrap_or(0)
    }

    pub fn smallest_class_size(&self) -> usize {
        self.color_classes
            .iter()
            .map(|class| class.len())
            .min()
            .unwrap_or(0)
    }
}

impl fmt::Display for ColoringResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Coloring: {} colors over {} vertices ({})",
            self.chromatic_bound,
            self.vertex_count,
            if self.valid { "valid" } else { "invalid" }
        )
    }
}

/// Welsh-Powell greedy coloring over a borrowed graph
pub struct GraphColoringAnalyzer<'g> {
    graph: &'g SocialGraph,
}

impl<'g> GraphColoringAnalyzer<'g> {
    pub fn new(graph: &'g SocialGraph) -> Self {
        Self { graph }
    }

    /// Color by degree descending, ties broken by vertex id ascending
    pub fn compute(&self) -> ColoringResult {
        let mut order: Vec<&str> = self.graph.vertices().collect();
        order.sort_by(|a, b| {
            self.graph
                .degree(b)
                .cmp(&self.graph.degree(a))
                .then_with(|| a.cmp(b))
        });
        self.greedy(&order)
    }

    /// Same greedy assignment with a caller-chosen vertex order. Vertices
    /// absent from the order stay uncolored; duplicates are recolored in
    /// place.
    pub fn compute_with_order(&self, order: &[&str]) -> Result<ColoringResult, GraphError> {
        for vertex in order {
            if !self.graph.contains_vertex(vertex) {
                return Err(GraphError::VertexNotFound((*vertex).to_string()));
            }
        }
        Ok(self.greedy(order))
    }

    fn greedy(&self, order: &[&str]) -> ColoringResult {
        log::debug!("Coloring {} vertices greedily", order.len());

        let mut assignment: HashMap<String, usize> = HashMap::with_capacity(order.len());
        for &vertex in order {
            let used: HashSet<usize> = self
                .graph
                .neighbors(vertex)
                .filter_map(|neighbor| assignment.get(neighbor).copied())
                .collect();
            let mut color = 0;
            while used.contains(&color) {
                color += 1;
            }
            assignment.insert(vertex.to_string(), color);
        }

        let chromatic_bound = assignment.values().copied().max().map_or(0, |c| c + 1);
        let mut color_classes: Vec<Vec<String>> = vec![Vec::new(); chromatic_bound];
        for (vertex, &color) in &assignment {
            color_classes[color].push(vertex.clone());
        }
        let color_classes: Vec<Vec<String>> = color_classes
            .into_iter()
            .map(|class| class.into_iter().sorted().collect())
            .collect();

        // Edges with an uncolored endpoint cannot invalidate the result
        let valid = self.graph.edges().all(|edge| {
            match (assignment.get(&edge.v1), assignment.get(&edge.v2)) {
                (Some(a), Some(b)) => a != b,
                _ => true,
            }
        });

        ColoringResult {
            vertex_count: assignment.len(),
            chromatic_bound,
            valid,
            color_classes,
            assignment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, EdgeKind};

    fn add(graph: &mut SocialGraph, a: &str, b: &str) {
        graph.add_edge(Edge::new(EdgeKind::Friend, a, b, 1.0));
    }

    #[test]
    fn triangle_needs_three_colors() {
        let mut graph = SocialGraph::new();
        add(&mut graph, "A", "B");
        add(&mut graph, "B", "C");
        add(&mut graph, "C", "A");
        let result = GraphColoringAnalyzer::new(&graph).compute();
        assert_eq!(result.chromatic_bound, 3);
        assert_eq!(result.vertex_count, 3);
        assert!(result.valid);
    }

    #[test]
    fn path_needs_two_colors() {
        let mut graph = SocialGraph::new();
        add(&mut graph, "A", "B");
        add(&mut graph, "B", "C");
        let result = GraphColoringAnalyzer::new(&graph).compute();
        assert_eq!(result.chromatic_bound, 2);
        // B has the highest degree so it is colored first
        assert_eq!(result.color_of("B"), Some(0));
        assert_eq!(result.class_for(1), &["A".to_string(), "C".to_string()]);
    }

    #[test]
    fn degree_ties_break_by_vertex_id() {
        let mut graph = SocialGraph::new();
        add(&mut graph, "C", "D");
        add(&mut graph, "A", "B");
        let result = GraphColoringAnalyzer::new(&graph).compute();
        // All degrees equal, so A and C are processed before their partners
        assert_eq!(result.color_of("A"), Some(0));
        assert_eq!(result.color_of("C"), Some(0));
        assert_eq!(result.color_of("B"), Some(1));
        assert_eq!(result.color_of("D"), Some(1));
        assert_eq!(result.chromatic_bound, 2);
    }

    #[test]
    fn bound_never_exceeds_max_degree_plus_one() {
        let mut graph = SocialGraph::new();
        for leaf in ["B", "C", "D", "E"] {
            add(&mut graph, "HUB", leaf);
        }
        add(&mut graph, "B", "C");
        let result = GraphColoringAnalyzer::new(&graph).compute();
        assert!(result.valid);
        assert!(result.chromatic_bound <= 5);
        assert_eq!(result.color_of("HUB"), Some(0));
    }

    #[test]
    fn edgeless_vertices_share_one_color() {
        let mut graph = SocialGraph::new();
        graph.add_vertex("A");
        graph.add_vertex("B");
        graph.add_vertex("C");
        let result = GraphColoringAnalyzer::new(&graph).compute();
        assert_eq!(result.chromatic_bound, 1);
        assert_eq!(result.largest_class_size(), 3);
        assert_eq!(result.smallest_class_size(), 3);
    }

    #[test]
    fn empty_graph_uses_no_colors() {
        let graph = SocialGraph::new();
        let result = GraphColoringAnalyzer::new(&graph).compute();
        assert_eq!(result.chromatic_bound, 0);
        assert_eq!(result.vertex_count, 0);
        assert!(result.valid);
        assert_eq!(result.to_string(), "Coloring: 0 colors over 0 vertices (valid)");
    }

    #[test]
    fn custom_order_changes_the_assignment() {
        let mut graph = SocialGraph::new();
        add(&mut graph, "A", "B");
        let analyzer = GraphColoringAnalyzer::new(&graph);
        let result = analyzer.compute_with_order(&["B", "A"]).unwrap();
        assert_eq!(result.color_of("B"), Some(0));
        assert_eq!(result.color_of("A"), Some(1));
        assert!(result.valid);
    }

    #[test]
    fn custom_order_rejects_unknown_vertices() {
        let mut graph = SocialGraph::new();
        add(&mut graph, "A", "B");
        let analyzer = GraphColoringAnalyzer::new(&graph);
        let err = analyzer.compute_with_order(&["A", "X"]).unwrap_err();
        assert_eq!(err, GraphError::VertexNotFound("X".to_string()));
    }

    #[test]
    fn omitted_vertices_stay_uncolored() {
        let mut graph = SocialGraph::new();
        add(&mut graph, "A", "B");
        add(&mut graph, "B", "C");
        let analyzer = GraphColoringAnalyzer::new(&graph);
        let result = analyzer.compute_with_order(&["A", "C"]).unwrap();
        assert_eq!(result.vertex_count, 2);
        assert_eq!(result.color_of("B"), None);
        // A and C are not adjacent, so both take color 0
        assert_eq!(result.color_of("A"), Some(0));
        assert_eq!(result.color_of("C"), Some(0));
        assert!(result.valid);
    }

    #[test]
    fn duplicate_order_entries_recolor_in_place() {
        let mut graph = SocialGraph::new();
        add(&mut graph, "A", "B");
        let analyzer = GraphColoringAnalyzer::new(&graph);
        let result = analyzer.compute_with_order(&["A", "B", "A"]).unwrap();
        assert_eq!(result.vertex_count, 2);
        assert_eq!(result.color_of("A"), Some(0));
        assert_eq!(result.color_of("B"), Some(1));
    }

    #[test]
    fn class_for_out_of_range_is_empty() {
        let mut graph = SocialGraph::new();
        add(&mut graph, "A", "B");
        let result = GraphColoringAnalyzer::new(&graph).compute();
        assert!(result.class_for(99).is_empty());
    }

    #[test]
    fn display_reports_colors_and_validity() {
        let mut graph = SocialGraph::new();
        add(&mut graph, "A", "B");
        add(&mut graph, "B", "C");
        let result = GraphColoringAnalyzer::new(&graph).compute();
        assert_eq!(result.to_string(), "Coloring: 2 colors over 3 vertices (valid)");
    }
}

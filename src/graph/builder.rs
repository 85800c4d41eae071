//! Graph construction from snapshot records

use crate::graph::{Edge, EdgeCatalog, EdgeKind, SocialGraph};

/// Incremental builder turning node and edge records into a graph plus the
/// per-kind edge catalog
pub struct GraphBuilder {
    /// Graph holding only records of visible kinds
    graph: SocialGraph,

    /// Every record regardless of visibility
    catalog: EdgeCatalog,

    /// Which kinds make it into the graph
    visible: [bool; 5],

    /// Which kinds have already received their display label
    labelled: [bool; 5],
}

impl GraphBuilder {
    /// Builder with every edge kind visible
    pub fn new() -> Self {
        Self::with_visible_kinds(&EdgeKind::ALL)
    }

    /// Builder that admits only the listed kinds into the graph; records of
    /// other kinds still land in the catalog
    pub fn with_visible_kinds(kinds: &[EdgeKind]) -> Self {
        let mut visible = [false; 5];
        for &kind in kinds {
            visible[kind.index()] = true;
        }
        Self {
            graph: SocialGraph::new(),
            catalog: EdgeCatalog::new(),
            visible,
            labelled: [false; 5],
        }
    }

    /// Add a vertex ahead of any edge naming it
    pub fn add_node(&mut self, id: &str) {
        self.graph.add_vertex(id);
    }

    /// Add one edge record. The first record of each kind carries the
    /// kind's display label; later records of that kind are unlabelled.
    pub fn add_edge(&mut self, kind: EdgeKind, v1: &str, v2: &str, weight: f64) {
        let mut edge = Edge::new(kind, v1, v2, weight);
        if !self.labelled[kind.index()] {
            edge.label = Some(kind.display_label().to_string());
            self.labelled[kind.index()] = true;
        }
        self.catalog.add(edge.clone());
        if self.visible[kind.index()] {
            self.graph.add_edge(edge);
        }
    }

    /// Finish building, yielding the visible graph and the full catalog
    pub fn build(self) -> (SocialGraph, EdgeCatalog) {
        (self.graph, self.catalog)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

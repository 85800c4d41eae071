//! Shortest-path queries over the social graph

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::WEIGHT_FLOOR;
use crate::graph::{Edge, GraphError, SocialGraph};

/// A path between two vertices: the vertex sequence, the edges walked, and
/// the sum of the actual edge weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    pub vertices: Vec<String>,
    pub edges: Vec<Edge>,
    pub total_weight: f64,
}

impl PathResult {
    /// Number of edges walked
    pub fn hop_count(&self) -> usize {
        self.edges.len()
    }
}

impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} hops, weight {:.1})",
            self.vertices.join(" -> "),
            self.hop_count(),
            self.total_weight
        )
    }
}

/// Heap entry ordered so the cheapest frontier vertex pops first
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    cost: f64,
    vertex: u32,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost.total_cmp(&other.cost) == Ordering::Equal && self.vertex == other.vertex
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap and we want the minimum cost
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Breadth-first and weighted shortest-path search
pub struct ShortestPathFinder<'g> {
    graph: &'g SocialGraph,
}

impl<'g> ShortestPathFinder<'g> {
    pub fn new(graph: &'g SocialGraph) -> Self {
        Self { graph }
    }

    /// Path with the fewest edges between two vertices, or `None` when they
    /// are disconnected. The trivial path is returned when source and
    /// target coincide.
    pub fn shortest_by_hops(
        &self,
        source: &str,
        target: &str,
    ) -> Result<Option<PathResult>, GraphError> {
        let src = self.vertex(source)?;
        let dst = self.vertex(target)?;
        if src == dst {
            return Ok(Some(self.trivial_path(src)));
        }

        let cap = self.graph.vertex_capacity();
        let mut visited = vec![false; cap];
        let mut pred: Vec<Option<(u32, &Edge)>> = vec![None; cap];
        let mut queue = VecDeque::new();
        visited[src as usize] = true;
        queue.push_back(src);

        while let Some(vertex) = queue.pop_front() {
            if vertex == dst {
                return Ok(Some(self.assemble(src, dst, &pred)));
            }
            for (next, edge) in self.graph.incident_indexed(vertex) {
                if !visited[next as usize] {
                    visited[next as usize] = true;
                    pred[next as usize] = Some((vertex, edge));
                    queue.push_back(next);
                }
            }
        }

        Ok(None)
    }

    /// Path with the smallest weight sum between two vertices. Traversal
    /// order floors each weight at `WEIGHT_FLOOR`; the reported total sums
    /// the actual weights.
    pub fn shortest_by_weight(
        &self,
        source: &str,
        target: &str,
    ) -> Result<Option<PathResult>, GraphError> {
        let src = self.vertex(source)?;
        let dst = self.vertex(target)?;
        if src == dst {
            return Ok(Some(self.trivial_path(src)));
        }

        let cap = self.graph.vertex_capacity();
        let mut dist = vec![f64::INFINITY; cap];
        let mut done = vec![false; cap];
        let mut pred: Vec<Option<(u32, &Edge)>> = vec![None; cap];
        let mut frontier = BinaryHeap::new();

        dist[src as usize] = 0.0;
        frontier.push(FrontierEntry {
            cost: 0.0,
            vertex: src,
        });

        while let Some(FrontierEntry { cost, vertex }) = frontier.pop() {
            if done[vertex as usize] {
                continue; // stale entry
            }
            done[vertex as usize] = true;
            if vertex == dst {
                break;
            }
            for (next, edge) in self.graph.incident_indexed(vertex) {
                if done[next as usize] {
                    continue;
                }
                let candidate = cost + edge.weight.max(WEIGHT_FLOOR);
                if candidate < dist[next as usize] {
                    dist[next as usize] = candidate;
                    pred[next as usize] = Some((vertex, edge));
                    frontier.push(FrontierEntry {
                        cost: candidate,
                        vertex: next,
                    });
                }
            }
        }

        if !dist[dst as usize].is_finite() {
            return Ok(None);
        }
        Ok(Some(self.assemble(src, dst, &pred)))
    }

    /// Every vertex reachable from `source`, in discovery order, the source
    /// first
    pub fn reachable_from(&self, source: &str) -> Result<Vec<String>, GraphError> {
        let src = self.vertex(source)?;
        let cap = self.graph.vertex_capacity();
        let mut visited = vec![false; cap];
        let mut order = Vec::new();
        let mut queue = VecDeque::new();
        visited[src as usize] = true;
        queue.push_back(src);

        while let Some(vertex) = queue.pop_front() {
            if let Some(name) = self.graph.vertex_name(vertex) {
                order.push(name.to_string());
            }
            for (next, _) in self.graph.incident_indexed(vertex) {
                if !visited[next as usize] {
                    visited[next as usize] = true;
                    queue.push_back(next);
                }
            }
        }

        Ok(order)
    }

    /// Whether any path joins the two vertices
    pub fn are_connected(&self, a: &str, b: &str) -> Result<bool, GraphError> {
        Ok(self.shortest_by_hops(a, b)?.is_some())
    }

    fn vertex(&self, id: &str) -> Result<u32, GraphError> {
        self.graph
            .vertex_index(id)
            .ok_or_else(|| GraphError::VertexNotFound(id.to_string()))
    }

    fn trivial_path(&self, vertex: u32) -> PathResult {
        let vertices = self
            .graph
            .vertex_name(vertex)
            .map(|name| vec![name.to_string()])
            .unwrap_or_default();
        PathResult {
            vertices,
            edges: Vec::new(),
            total_weight: 0.0,
        }
    }

    /// Walk the predecessor chain back from `dst` and reverse it
    fn assemble(&self, src: u32, dst: u32, pred: &[Option<(u32, &Edge)>]) -> PathResult {
        let mut vertices = Vec::new();
        let mut edges = Vec::new();
        let mut current = dst;
        while current != src {
            let (prev, edge) = match pred[current as usize] {
                Some(step) => step,
                None => break,
            };
            if let Some(name) = self.graph.vertex_name(current) {
                vertices.push(name.to_string());
            }
            edges.push(edge.clone());
            current = prev;
        }
        if let Some(name) = self.graph.vertex_name(src) {
            vertices.push(name.to_string());
        }
        vertices.reverse();
        edges.reverse();
        let total_weight = edges.iter().map(|e| e.weight).sum();
        PathResult {
            vertices,
            edges,
            total_weight,
        }
    }
}

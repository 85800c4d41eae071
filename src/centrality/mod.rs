//! Node centrality analysis: degree, betweenness, and closeness

pub mod topology;

pub use topology::TopologyClass;

use std::cell::OnceCell;
use std::collections::{HashMap, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{BETWEENNESS_WEIGHT, CLOSENESS_WEIGHT, DEGREE_WEIGHT};
use crate::graph::{GraphError, SocialGraph};

/// Which single metric to rank by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CentralityMetric {
    Degree,
    Betweenness,
    Closeness,
}

/// Centrality scores for a single node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityResult {
    pub node_id: String,

    /// Raw degree, parallel edges counted separately
    pub degree: usize,

    pub degree_centrality: f64,
    pub betweenness_centrality: f64,
    pub closeness_centrality: f64,
}

impl CentralityResult {
    /// Weighted blend of the three scores
    pub fn combined_score(&self) -> f64 {
        DEGREE_WEIGHT * self.degree_centrality
            + BETWEENNESS_WEIGHT * self.betweenness_centrality
            + CLOSENESS_WEIGHT * self.closeness_centrality
    }
}

impl fmt::Display for CentralityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: degree={:.3}, betweenness={:.3}, closeness={:.3}, combined={:.3}",
            self.node_id,
            self.degree_centrality,
            self.betweenness_centrality,
            self.closeness_centrality,
            self.combined_score()
        )
    }
}

/// Whole-graph centrality digest
#[derive(Debug, Clone, Serialize)]
pub struct CentralitySummary {
    pub node_count: usize,
    pub avg_degree_centrality: f64,
    pub avg_betweenness_centrality: f64,
    pub avg_closeness_centrality: f64,
    pub max_degree_centrality: f64,
    pub max_betweenness_centrality: f64,
    pub max_closeness_centrality: f64,
    pub max_degree_node: Option<String>,
    pub max_betweenness_node: Option<String>,
    pub max_closeness_node: Option<String>,
}

/// The three cached score maps, always computed together
struct CentralityScores {
    degree: HashMap<String, f64>,
    betweenness: HashMap<String, f64>,
    closeness: HashMap<String, f64>,
}

/// Degree, betweenness (Brandes), and closeness (Wasserman-Faust)
/// centrality with per-instance caching: all three maps are computed on
/// the first query and reused by every later one.
pub struct NodeCentralityAnalyzer<'g> {
    graph: &'g SocialGraph,
    scores: OnceCell<CentralityScores>,
}

impl<'g> NodeCentralityAnalyzer<'g> {
    pub fn new(graph: &'g SocialGraph) -> Self {
        Self {
            graph,
            scores: OnceCell::new(),
        }
    }

    /// Force evaluation now; queries afterwards hit the cache
    pub fn compute(&self) {
        self.ensure_computed();
    }

    /// Whether the cached scores exist yet
    pub fn is_computed(&self) -> bool {
        self.scores.get().is_some()
    }

    /// Scores for one node
    pub fn result_for(&self, node: &str) -> Result<CentralityResult, GraphError> {
        if !self.graph.contains_vertex(node) {
            return Err(GraphError::VertexNotFound(node.to_string()));
        }
        let scores = self.ensure_computed();
        Ok(self.make_result(node, scores))
    }

    /// Every node's scores, ordered by combined score descending; ties keep
    /// vertex insertion order
    pub fn ranked_results(&self) -> Vec<CentralityResult> {
        let scores = self.ensure_computed();
        let mut results: Vec<CentralityResult> = self
            .graph
            .vertices()
            .map(|vertex| self.make_result(vertex, scores))
            .collect();
        results.sort_by(|a, b| b.combined_score().total_cmp(&a.combined_score()));
        results
    }

    /// The k nodes with the highest combined scores
    pub fn top_nodes(&self, k: usize) -> Vec<CentralityResult> {
        let mut ranked = self.ranked_results();
        ranked.truncate(k);
        ranked
    }

    /// The k nodes ranked by one metric alone
    pub fn top_by_metric(&self, k: usize, metric: CentralityMetric) -> Vec<CentralityResult> {
        let scores = self.ensure_computed();
        let mut results: Vec<CentralityResult> = self
            .graph
            .vertices()
            .map(|vertex| self.make_result(vertex, scores))
            .collect();
        results.sort_by(|a, b| {
            let (x, y) = match metric {
                CentralityMetric::Degree => (a.degree_centrality, b.degree_centrality),
                CentralityMetric::Betweenness => {
                    (a.betweenness_centrality, b.betweenness_centrality)
                }
                CentralityMetric::Closeness => {
                    (a.closeness_centrality, b.closeness_centrality)
                }
            };
            y.total_cmp(&x)
        });
        results.truncate(k);
        results
    }

    /// Cached degree centrality per node
    pub fn degree_centrality(&self) -> &HashMap<String, f64> {
        &self.ensure_computed().degree
    }

    /// Cached betweenness centrality per node
    pub fn betweenness_centrality(&self) -> &HashMap<String, f64> {
        &self.ensure_computed().betweenness
    }

    /// Cached closeness centrality per node
    pub fn closeness_centrality(&self) -> &HashMap<String, f64> {
        &self.ensure_computed().closeness
    }

    /// Averages and per-metric leaders
    pub fn summary(&self) -> CentralitySummary {
        let scores = self.ensure_computed();
        let degree_leader = self.leader(&scores.degree);
        let betweenness_leader = self.leader(&scores.betweenness);
        let closeness_leader = self.leader(&scores.closeness);
        CentralitySummary {
            node_count: self.graph.vertex_count(),
            avg_degree_centrality: average(&scores.degree),
            avg_betweenness_centrality: average(&scores.betweenness),
            avg_closeness_centrality: average(&scores.closeness),
            max_degree_centrality: degree_leader.as_ref().map_or(0.0, |l| l.1),
            max_betweenness_centrality: betweenness_leader.as_ref().map_or(0.0, |l| l.1),
            max_closeness_centrality: closeness_leader.as_ref().map_or(0.0, |l| l.1),
            max_degree_node: degree_leader.map(|l| l.0),
            max_betweenness_node: betweenness_leader.map(|l| l.0),
            max_closeness_node: closeness_leader.map(|l| l.0),
        }
    }

    /// Degree-shape classification; evaluates the cache like any query
    pub fn classify_topology(&self) -> TopologyClass {
        self.ensure_computed();
        topology::classify(self.graph)
    }

    fn ensure_computed(&self) -> &CentralityScores {
        self.scores.get_or_init(|| self.compute_scores())
    }

    fn make_result(&self, node: &str, scores: &CentralityScores) -> CentralityResult {
        CentralityResult {
            node_id: node.to_string(),
            degree: self.graph.degree(node),
            degree_centrality: scores.degree.get(node).copied().unwrap_or(0.0),
            betweenness_centrality: scores.betweenness.get(node).copied().unwrap_or(0.0),
            closeness_centrality: scores.closeness.get(node).copied().unwrap_or(0.0),
        }
    }

    /// The vertex with the highest score; earlier insertion wins ties
    fn leader(&self, scores: &HashMap<String, f64>) -> Option<(String, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for vertex in self.graph.vertices() {
            let value = scores.get(vertex).copied().unwrap_or(0.0);
            let better = match best {
                Some((_, current)) => value > current,
                None => true,
            };
            if better {
                best = Some((vertex, value));
            }
        }
        best.map(|(vertex, value)| (vertex.to_string(), value))
    }

    fn compute_scores(&self) -> CentralityScores {
        log::debug!(
            "Computing centrality scores for {} vertices",
            self.graph.vertex_count()
        );
        let n = self.graph.vertex_count();
        let mut degree = HashMap::with_capacity(n);
        for vertex in self.graph.vertices() {
            let value = if n <= 1 {
                0.0
            } else {
                self.graph.degree(vertex) as f64 / (n - 1) as f64
            };
            degree.insert(vertex.to_string(), value);
        }
        CentralityScores {
            degree,
            betweenness: self.betweenness_scores(),
            closeness: self.closeness_scores(),
        }
    }

    /// Brandes' algorithm: one BFS per source counting shortest paths, then
    /// dependency accumulation in reverse BFS order
    fn betweenness_scores(&self) -> HashMap<String, f64> {
        let n = self.graph.vertex_count();
        let cap = self.graph.vertex_capacity();
        let mut raw = vec![0.0; cap];

        for source in self.graph.vertex_indices() {
            let mut stack = Vec::new();
            let mut preds: Vec<Vec<u32>> = vec![Vec::new(); cap];
            let mut sigma = vec![0.0; cap];
            let mut dist = vec![-1i32; cap];
            let mut queue = VecDeque::new();

            sigma[source as usize] = 1.0;
            dist[source as usize] = 0;
            queue.push_back(source);

            while let Some(v) = queue.pop_front() {
                stack.push(v);
                for (w, _) in self.graph.incident_indexed(v) {
                    // Parallel edges count as distinct shortest paths
                    if dist[w as usize] < 0 {
                        dist[w as usize] = dist[v as usize] + 1;
                        queue.push_back(w);
                    }
                    if dist[w as usize] == dist[v as usize] + 1 {
                        sigma[w as usize] += sigma[v as usize];
                        preds[w as usize].push(v);
                    }
                }
            }

            let mut delta = vec![0.0; cap];
            while let Some(w) = stack.pop() {
                for &v in &preds[w as usize] {
                    delta[v as usize] +=
                        sigma[v as usize] / sigma[w as usize] * (1.0 + delta[w as usize]);
                }
                if w != source {
                    raw[w as usize] += delta[w as usize];
                }
            }
        }

        // Undirected accumulation visits each pair from both endpoints; the
        // (n-1)(n-2) scale absorbs that
        let scale = if n > 2 {
            1.0 / ((n - 1) as f64 * (n - 2) as f64)
        } else {
            0.0
        };
        let mut scores = HashMap::with_capacity(n);
        for idx in self.graph.vertex_indices() {
            if let Some(name) = self.graph.vertex_name(idx) {
                scores.insert(name.to_string(), raw[idx as usize] * scale);
            }
        }
        scores
    }

    /// Wasserman-Faust closeness: reachable^2 / ((n-1) * distance sum),
    /// which stays meaningful on disconnected graphs
    fn closeness_scores(&self) -> HashMap<String, f64> {
        let n = self.graph.vertex_count();
        let cap = self.graph.vertex_capacity();
        let mut scores = HashMap::with_capacity(n);

        for source in self.graph.vertex_indices() {
            let mut dist = vec![-1i32; cap];
            let mut queue = VecDeque::new();
            dist[source as usize] = 0;
            queue.push_back(source);
            let mut reachable = 0u64;
            let mut sum_dist = 0u64;

            while let Some(v) = queue.pop_front() {
                for (w, _) in self.graph.incident_indexed(v) {
                    if dist[w as usize] < 0 {
                        dist[w as usize] = dist[v as usize] + 1;
                        reachable += 1;
                        sum_dist += dist[w as usize] as u64;
                        queue.push_back(w);
                    }
                }
            }

            let value = if reachable == 0 || sum_dist == 0 {
                0.0
            } else {
                let r = reachable as f64;
                r * r / ((n - 1) as f64 * sum_dist as f64)
            };
            if let Some(name) = self.graph.vertex_name(source) {
                scores.insert(name.to_string(), value);
            }
        }
        scores
    }
}

fn average(scores: &HashMap<String, f64>) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.values().sum::<f64>() / scores.len() as f64
}

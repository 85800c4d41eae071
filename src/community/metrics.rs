//! Partition quality metrics

use crate::community::DetectionResult;
use crate::graph::SocialGraph;

/// Newman modularity: Q = sum over communities of e_c/m - (d_c/2m)^2,
/// where e_c is the internal edge count, d_c the total member degree,
/// and m the graph's edge count. 0.0 for an edgeless graph.
pub fn modularity(graph: &SocialGraph, result: &DetectionResult) -> f64 {
    let edge_count = graph.edge_count();
    if edge_count == 0 {
        return 0.0;
    }
    let m = edge_count as f64;

    let mut q = 0.0;
    for community in &result.communities {
        let internal = community.internal_edges as f64;
        let degree_sum: f64 = community
            .members
            .iter()
            .map(|member| graph.degree(member) as f64)
            .sum();
        let fraction = degree_sum / (2.0 * m);
        q += internal / m - fraction * fraction;
    }
    q
}

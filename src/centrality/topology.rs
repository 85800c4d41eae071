//! Degree-distribution topology classification

use std::fmt;

use statrs::statistics::Statistics;

use crate::config::{
    DISTRIBUTED_CV_MAX, HUB_DEGREE_RATIO, HUB_SIZE_FRACTION, ISOLATED_FRACTION_MAX,
};
use crate::graph::SocialGraph;

/// Coarse structural shape of the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyClass {
    Trivial,
    Disconnected,
    HubAndSpoke,
    Distributed,
    Hierarchical,
}

impl fmt::Display for TopologyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TopologyClass::Trivial => "Trivial",
            TopologyClass::Disconnected => "Disconnected",
            TopologyClass::HubAndSpoke => "Hub-and-Spoke",
            TopologyClass::Distributed => "Distributed",
            TopologyClass::Hierarchical => "Hierarchical",
        };
        f.write_str(name)
    }
}

/// Classify the degree distribution. Checks run in a fixed order and the
/// first match wins.
pub fn classify(graph: &SocialGraph) -> TopologyClass {
    let n = graph.vertex_count();
    if n <= 1 {
        return TopologyClass::Trivial;
    }
    if graph.edge_count() == 0 {
        return TopologyClass::Disconnected;
    }

    let degrees: Vec<f64> = graph
        .vertices()
        .map(|vertex| graph.degree(vertex) as f64)
        .collect();
    let isolated = degrees.iter().filter(|&&degree| degree == 0.0).count();
    if isolated as f64 > ISOLATED_FRACTION_MAX * n as f64 {
        return TopologyClass::Disconnected;
    }

    let avg_degree = (&degrees).mean();
    if avg_degree == 0.0 {
        return TopologyClass::Disconnected;
    }

    let max_degree = (&degrees).max();
    if max_degree / avg_degree > HUB_DEGREE_RATIO && max_degree > HUB_SIZE_FRACTION * n as f64 {
        return TopologyClass::HubAndSpoke;
    }

    let spread = (&degrees).population_std_dev() / avg_degree;
    if spread < DISTRIBUTED_CV_MAX {
        return TopologyClass::Distributed;
    }
    TopologyClass::Hierarchical
}

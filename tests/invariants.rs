//! Property tests over randomly generated graphs

use proptest::prelude::*;

use social_graph_analyzer::centrality::NodeCentralityAnalyzer;
use social_graph_analyzer::coloring::GraphColoringAnalyzer;
use social_graph_analyzer::community::CommunityDetector;
use social_graph_analyzer::graph::{Edge, EdgeKind, SocialGraph};
use social_graph_analyzer::mst::MinimumSpanningForest;

fn arb_graph() -> impl Strategy<Value = SocialGraph> {
    prop::collection::vec((0usize..5, 0u32..8, 0u32..8, 0.0f64..10.0), 0..40).prop_map(
        |records| {
            let mut graph = SocialGraph::new();
            for (kind_idx, a, b, weight) in records {
                let kind = EdgeKind::ALL[kind_idx];
                let v1 = format!("P{}", a);
                let v2 = format!("P{}", b);
                graph.add_edge(Edge::new(kind, &v1, &v2, weight));
            }
            graph
        },
    )
}

fn arb_simple_graph() -> impl Strategy<Value = SocialGraph> {
    prop::collection::vec((0u32..8, 0u32..8), 0..20).prop_map(|pairs| {
        let mut graph = SocialGraph::new();
        for (a, b) in pairs {
            let v1 = format!("P{}", a);
            let v2 = format!("P{}", b);
            graph.add_edge(Edge::new(EdgeKind::Friend, &v1, &v2, 1.0));
        }
        graph
    })
}

proptest! {
    #[test]
    fn mst_edge_count_matches_component_structure(graph in arb_graph()) {
        let mst = MinimumSpanningForest::new(&graph).compute();
        let detection = CommunityDetector::new(&graph).detect();

        prop_assert_eq!(mst.component_count(), detection.community_count());
        prop_assert_eq!(
            mst.edge_count(),
            graph.vertex_count() - mst.component_count()
        );

        let component_total: f64 = mst.components.iter().map(|c| c.total_weight).sum();
        prop_assert!((mst.total_weight - component_total).abs() < 1e-6);
    }

    #[test]
    fn greedy_coloring_is_always_proper(graph in arb_graph()) {
        let result = GraphColoringAnalyzer::new(&graph).compute();

        prop_assert!(result.valid);
        prop_assert_eq!(result.vertex_count, graph.vertex_count());

        let max_degree = graph
            .vertices()
            .map(|v| graph.degree(v))
            .max()
            .unwrap_or(0);
        prop_assert!(result.chromatic_bound <= max_degree + 1);

        let classed: usize = result.color_classes.iter().map(|c| c.len()).sum();
        prop_assert_eq!(classed, graph.vertex_count());
    }

    #[test]
    fn path_centrality_metrics_stay_in_unit_range(graph in arb_graph()) {
        let analyzer = NodeCentralityAnalyzer::new(&graph);
        for result in analyzer.ranked_results() {
            prop_assert!((0.0..=1.0).contains(&result.betweenness_centrality));
            prop_assert!((0.0..=1.0).contains(&result.closeness_centrality));
        }
    }

    #[test]
    fn simple_graph_centrality_is_fully_normalized(graph in arb_simple_graph()) {
        let analyzer = NodeCentralityAnalyzer::new(&graph);
        for result in analyzer.ranked_results() {
            prop_assert!((0.0..=1.0).contains(&result.degree_centrality));
            prop_assert!((0.0..=1.0).contains(&result.betweenness_centrality));
            prop_assert!((0.0..=1.0).contains(&result.closeness_centrality));
        }
    }

    #[test]
    fn communities_partition_every_vertex(graph in arb_graph()) {
        let result = CommunityDetector::new(&graph).detect();

        let total: usize = result.communities.iter().map(|c| c.size()).sum();
        prop_assert_eq!(total, graph.vertex_count());
        prop_assert_eq!(result.node_to_community.len(), graph.vertex_count());

        for community in &result.communities {
            for member in &community.members {
                prop_assert_eq!(result.node_to_community.get(member), Some(&community.id));
            }
        }
    }

    #[test]
    fn modularity_stays_bounded(graph in arb_graph()) {
        let result = CommunityDetector::new(&graph).detect();
        let q = result.modularity(&graph);
        prop_assert!((-1.0..=1.0).contains(&q));
    }
}

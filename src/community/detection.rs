//! Community detection via connected components

use std::collections::{HashMap, VecDeque};

use crate::community::{Community, DetectionResult};
use crate::graph::{KindCounts, SocialGraph};

/// Breadth-first connected-component detector
pub struct CommunityDetector<'g> {
    graph: &'g SocialGraph,
}

impl<'g> CommunityDetector<'g> {
    pub fn new(graph: &'g SocialGraph) -> Self {
        Self { graph }
    }

    /// Partition every vertex into its connected component
    pub fn detect(&self) -> DetectionResult {
        log::debug!(
            "Detecting communities over {} vertices",
            self.graph.vertex_count()
        );

        let cap = self.graph.vertex_capacity();
        let mut assigned = vec![false; cap];
        let mut component = vec![usize::MAX; cap];
        let mut member_lists: Vec<Vec<String>> = Vec::new();

        // BFS from each unvisited vertex, in insertion order
        for start in self.graph.vertex_indices() {
            if assigned[start as usize] {
                continue;
            }
            let id = member_lists.len();
            let mut members = Vec::new();
            let mut queue = VecDeque::new();
            assigned[start as usize] = true;
            component[start as usize] = id;
            queue.push_back(start);

            while let Some(v) = queue.pop_front() {
                if let Some(name) = self.graph.vertex_name(v) {
                    members.push(name.to_string());
                }
                for (w, _) in self.graph.incident_indexed(v) {
                    if !assigned[w as usize] {
                        assigned[w as usize] = true;
                        component[w as usize] = id;
                        queue.push_back(w);
                    }
                }
            }
            member_lists.push(members);
        }

        // Second pass: attribute each edge to its component once
        let mut edge_counts = vec![0usize; member_lists.len()];
        let mut weights = vec![0.0f64; member_lists.len()];
        let mut kind_hists = vec![KindCounts::default(); member_lists.len()];
        for (a, _, edge) in self.graph.edges_indexed() {
            let id = component[a as usize];
            edge_counts[id] += 1;
            weights[id] += edge.weight;
            kind_hists[id].record(edge.kind);
        }

        let mut communities: Vec<Community> = member_lists
            .into_iter()
            .enumerate()
            .map(|(id, members)| Community {
                id,
                members,
                internal_edges: edge_counts[id],
                total_weight: weights[id],
                kinds: kind_hists[id].clone(),
            })
            .collect();

        // Largest first; stable, so equal sizes keep discovery order
        communities.sort_by(|a, b| b.members.len().cmp(&a.members.len()));
        for (id, community) in communities.iter_mut().enumerate() {
            community.id = id;
        }

        let mut node_to_community = HashMap::with_capacity(self.graph.vertex_count());
        for community in &communities {
            for member in &community.members {
                node_to_community.insert(member.clone(), community.id);
            }
        }

        log::debug!("Found {} communities", communities.len());
        DetectionResult {
            communities,
            node_to_community,
        }
    }
}

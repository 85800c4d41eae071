//! Results persistence module

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::{json, to_string_pretty, Value};

use crate::centrality::NodeCentralityAnalyzer;
use crate::coloring::ColoringResult;
use crate::community::DetectionResult;
use crate::config::Config;
use crate::graph::{EdgeKind, KindCounts, SocialGraph};
use crate::mst::MstResult;
use crate::stats::GraphStats;

/// Save one full analysis run to the output directory
pub fn save_results(
    graph: &SocialGraph,
    stats: &GraphStats,
    detection: &DetectionResult,
    centrality: &NodeCentralityAnalyzer,
    mst: &MstResult,
    coloring: &ColoringResult,
    config: &Config,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving analysis results to {}", output_dir);

    fs::create_dir_all(output_dir)?;

    save_summary(graph, stats, detection, centrality, config, output_dir)?;
    save_communities(detection, config.min_community_size, output_dir)?;
    save_centrality(centrality, output_dir)?;
    save_mst(mst, output_dir)?;
    save_coloring(coloring, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save graph-level summary information
fn save_summary(
    graph: &SocialGraph,
    stats: &GraphStats,
    detection: &DetectionResult,
    centrality: &NodeCentralityAnalyzer,
    config: &Config,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving summary information");

    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let top_nodes: Vec<Value> = stats
        .top_nodes(config.top_k)
        .into_iter()
        .map(|(node, degree)| json!({ "node": node, "degree": degree }))
        .collect();

    let mut per_kind = serde_json::Map::new();
    for kind in EdgeKind::ALL {
        per_kind.insert(kind.code().to_string(), json!(stats.count_for(kind)));
    }

    let summary = json!({
        "graph": {
            "node_count": stats.node_count(),
            "visible_edge_count": stats.visible_edge_count(),
            "total_edge_count": stats.total_edge_count(),
            "edges_per_kind": Value::Object(per_kind),
            "density": stats.density(),
            "average_degree": stats.average_degree(),
            "max_degree": stats.max_degree(),
            "isolated_count": stats.isolated_count(),
            "average_weight": stats.average_weight(),
            "top_nodes": top_nodes,
        },
        "topology": centrality.classify_topology().to_string(),
        "community_count": detection.community_count(),
        "modularity": detection.modularity(graph),
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save individual community information
fn save_communities(
    detection: &DetectionResult,
    min_community_size: usize,
    output_dir: &str,
) -> Result<()> {
    let significant = detection.significant_communities(min_community_size);
    log::info!(
        "Saving {} significant communities (of {})",
        significant.len(),
        detection.community_count()
    );

    let communities_dir = Path::new(output_dir).join("communities");
    fs::create_dir_all(&communities_dir)?;

    for community in &significant {
        let path = communities_dir.join(format!("community_{}.json", community.id));
        let mut file = File::create(path)?;

        let community_json = json!({
            "id": community.id,
            "size": community.size(),
            "members": community.members,
            "internal_edges": community.internal_edges,
            "total_weight": community.total_weight,
            "density": community.density(),
            "average_weight": community.average_weight(),
            "dominant_kind": community.dominant_kind().map(|k| k.display_label()),
            "kind_counts": kind_counts_json(community.kind_counts()),
        });

        file.write_all(to_string_pretty(&community_json)?.as_bytes())?;
    }

    let all_path = communities_dir.join("all_communities.json");
    let mut all_file = File::create(all_path)?;

    let all_json = json!({
        "community_count": detection.community_count(),
        "significant_count": significant.len(),
        "communities": significant.iter().map(|c| {
            json!({
                "id": c.id,
                "size": c.size(),
                "internal_edges": c.internal_edges,
                "density": c.density(),
                "dominant_kind": c.dominant_kind().map(|k| k.display_label()),
            })
        }).collect::<Vec<_>>(),
    });

    all_file.write_all(to_string_pretty(&all_json)?.as_bytes())?;

    Ok(())
}

/// Save ranked centrality results and the per-metric summary
fn save_centrality(centrality: &NodeCentralityAnalyzer, output_dir: &str) -> Result<()> {
    log::info!("Saving centrality results");

    let path = Path::new(output_dir).join("centrality.json");
    let mut file = File::create(path)?;

    let ranked: Vec<Value> = centrality
        .ranked_results()
        .into_iter()
        .map(|result| {
            json!({
                "node_id": result.node_id,
                "degree": result.degree,
                "degree_centrality": result.degree_centrality,
                "betweenness_centrality": result.betweenness_centrality,
                "closeness_centrality": result.closeness_centrality,
                "combined_score": result.combined_score(),
            })
        })
        .collect();

    let centrality_json = json!({
        "summary": centrality.summary(),
        "ranked": ranked,
    });

    file.write_all(to_string_pretty(&centrality_json)?.as_bytes())?;

    Ok(())
}

/// Save the spanning forest breakdown
fn save_mst(mst: &MstResult, output_dir: &str) -> Result<()> {
    log::info!("Saving spanning forest results");

    let path = Path::new(output_dir).join("mst.json");
    let mut file = File::create(path)?;

    let mst_json = json!({
        "total_weight": mst.total_weight,
        "edge_count": mst.edge_count(),
        "component_count": mst.component_count(),
        "vertex_count": mst.vertex_count,
        "connected": mst.is_connected(),
        "average_weight": mst.average_weight(),
        "kind_distribution": kind_counts_json(&mst.kind_distribution()),
        "components": mst.components.iter().map(|c| {
            json!({
                "id": c.id,
                "size": c.size(),
                "total_weight": c.total_weight,
                "dominant_kind": c.dominant_kind().map(|k| k.display_label()),
                "vertices": c.vertices,
            })
        }).collect::<Vec<_>>(),
    });

    file.write_all(to_string_pretty(&mst_json)?.as_bytes())?;

    Ok(())
}

/// Save the coloring digest
fn save_coloring(coloring: &ColoringResult, output_dir: &str) -> Result<()> {
    log::info!("Saving coloring results");

    let path = Path::new(output_dir).join("coloring.json");
    let mut file = File::create(path)?;

    let class_sizes: Vec<usize> = coloring
        .color_classes
        .iter()
        .map(|class| class.len())
        .collect();

    let coloring_json = json!({
        "chromatic_bound": coloring.chromatic_bound,
        "vertex_count": coloring.vertex_count,
        "valid": coloring.valid,
        "class_sizes": class_sizes,
        "largest_class_size": coloring.largest_class_size(),
        "smallest_class_size": coloring.smallest_class_size(),
    });

    file.write_all(to_string_pretty(&coloring_json)?.as_bytes())?;

    Ok(())
}

fn kind_counts_json(counts: &KindCounts) -> Value {
    let mut map = serde_json::Map::new();
    for (kind, count) in counts.iter() {
        map.insert(kind.code().to_string(), json!(count));
    }
    Value::Object(map)
}

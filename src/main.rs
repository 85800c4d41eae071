use anyhow::{anyhow, Result};
use clap::Parser;

use social_graph_analyzer::centrality::NodeCentralityAnalyzer;
use social_graph_analyzer::coloring::GraphColoringAnalyzer;
use social_graph_analyzer::community::CommunityDetector;
use social_graph_analyzer::config::Config;
use social_graph_analyzer::data::snapshot::load_snapshot;
use social_graph_analyzer::graph::EdgeKind;
use social_graph_analyzer::mst::MinimumSpanningForest;
use social_graph_analyzer::stats::GraphStats;
use social_graph_analyzer::storage;

#[derive(Parser, Debug)]
#[clap(
    name = "social-graph-analyzer",
    about = "Social interaction network analysis over typed relationship snapshots"
)]
struct Cli {
    /// Path to the input snapshot file
    #[clap(long)]
    input: String,

    /// Output directory for results
    #[clap(long, default_value = "analysis_results")]
    output_dir: String,

    /// Minimum community size to report individually
    #[clap(long, default_value = "2")]
    min_community_size: usize,

    /// Number of top-ranked nodes to include in reports
    #[clap(long, default_value = "5")]
    top_k: usize,

    /// Comma-separated edge kind codes (f, fs, c, s, sg) to hide from the graph
    #[clap(long)]
    hide: Option<String>,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn parse_hidden_kinds(raw: &str) -> Result<Vec<EdgeKind>> {
    let mut kinds = Vec::new();
    for code in raw.split(',').map(str::trim).filter(|code| !code.is_empty()) {
        let kind =
            EdgeKind::from_code(code).ok_or_else(|| anyhow!("unknown edge kind code: {}", code))?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let mut config = Config::new(args.min_community_size, args.top_k);
    if let Some(ref raw) = args.hide {
        config.hidden_kinds = parse_hidden_kinds(raw)?;
    }

    log::info!("Starting social graph analysis");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    // 1. Load snapshot
    let visible = config.visible_kinds();
    let snapshot = load_snapshot(&args.input, &visible)?;

    log::info!(
        "Loaded graph with {} nodes and {} visible edges ({} total)",
        snapshot.graph.vertex_count(),
        snapshot.graph.edge_count(),
        snapshot.catalog.total()
    );

    // 2. Graph statistics
    let stats = GraphStats::new(&snapshot.graph, &snapshot.catalog);

    log::info!(
        "Density {:.4}, average degree {:.2}, max degree {}",
        stats.density(),
        stats.average_degree(),
        stats.max_degree()
    );

    // 3. Community detection
    let detection = CommunityDetector::new(&snapshot.graph).detect();

    log::info!(
        "Found {} communities (modularity {:.4})",
        detection.community_count(),
        detection.modularity(&snapshot.graph)
    );

    // 4. Centrality and topology classification
    let centrality = NodeCentralityAnalyzer::new(&snapshot.graph);
    centrality.compute();

    log::info!("Topology: {}", centrality.classify_topology());
    for result in centrality.top_nodes(config.top_k) {
        log::info!("  {}", result);
    }

    // 5. Minimum spanning forest
    let mst = MinimumSpanningForest::new(&snapshot.graph).compute();
    log::info!("{}", mst);

    // 6. Graph coloring
    let coloring = GraphColoringAnalyzer::new(&snapshot.graph).compute();
    log::info!("{}", coloring);

    // 7. Save results
    storage::save_results(
        &snapshot.graph,
        &stats,
        &detection,
        &centrality,
        &mst,
        &coloring,
        &config,
        &args.output_dir,
    )?;

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}

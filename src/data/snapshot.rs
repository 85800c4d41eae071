//! Line-oriented snapshot parsing and loading

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::data::{EdgeRecord, Snapshot, SnapshotError, SnapshotFile};
use crate::graph::{EdgeKind, GraphBuilder};

enum Section {
    Nodes,
    Edges,
}

/// Parse snapshot text into node and edge records.
///
/// Lines reading `nodes` or `edges` (case-insensitive) switch the current
/// section and may interleave; the initial section is nodes. Blank lines
/// are skipped. A node line's first token is the vertex id. An edge line is
/// `<kind> <v1> <v2> <weight>`.
pub fn parse_snapshot<R: BufRead>(reader: R) -> Result<SnapshotFile, SnapshotError> {
    let mut parsed = SnapshotFile::default();
    let mut section = Section::Nodes;

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = number + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("nodes") {
            section = Section::Nodes;
            continue;
        }
        if trimmed.eq_ignore_ascii_case("edges") {
            section = Section::Edges;
            continue;
        }
        match section {
            Section::Nodes => {
                if let Some(id) = trimmed.split_whitespace().next() {
                    parsed.nodes.push(id.to_string());
                }
            }
            Section::Edges => {
                parsed.edges.push(parse_edge_line(trimmed, line_no)?);
            }
        }
    }

    Ok(parsed)
}

fn parse_edge_line(line: &str, line_no: usize) -> Result<EdgeRecord, SnapshotError> {
    let mut tokens = line.split_whitespace();
    let code = tokens
        .next()
        .ok_or(SnapshotError::MalformedEdge { line: line_no })?;
    let v1 = tokens
        .next()
        .ok_or(SnapshotError::MalformedEdge { line: line_no })?;
    let v2 = tokens
        .next()
        .ok_or(SnapshotError::MalformedEdge { line: line_no })?;
    let raw_weight = tokens
        .next()
        .ok_or(SnapshotError::MalformedEdge { line: line_no })?;

    let kind = EdgeKind::from_code(code).ok_or_else(|| SnapshotError::UnknownKind {
        line: line_no,
        code: code.to_string(),
    })?;
    let weight = raw_weight
        .parse::<f64>()
        .map_err(|_| SnapshotError::BadWeight {
            line: line_no,
            value: raw_weight.to_string(),
        })?;

    Ok(EdgeRecord {
        kind,
        v1: v1.to_string(),
        v2: v2.to_string(),
        weight,
    })
}

/// Read a snapshot file and build the visible graph plus the edge catalog
pub fn load_snapshot(path: &str, visible: &[EdgeKind]) -> Result<Snapshot, SnapshotError> {
    log::info!("Reading snapshot file: {}", path);
    let file = File::open(Path::new(path))?;
    let parsed = parse_snapshot(BufReader::new(file))?;
    log::info!(
        "Parsed {} node records and {} edge records",
        parsed.nodes.len(),
        parsed.edges.len()
    );
    Ok(build_snapshot(&parsed, visible))
}

/// Build the graph and catalog from already-parsed records
pub fn build_snapshot(parsed: &SnapshotFile, visible: &[EdgeKind]) -> Snapshot {
    let mut builder = GraphBuilder::with_visible_kinds(visible);
    for node in &parsed.nodes {
        builder.add_node(node);
    }
    for record in &parsed.edges {
        builder.add_edge(record.kind, &record.v1, &record.v2, record.weight);
    }
    let (graph, catalog) = builder.build();
    Snapshot { graph, catalog }
}

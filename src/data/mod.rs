//! Snapshot ingestion module

pub mod snapshot;

use thiserror::Error;

use crate::graph::{EdgeCatalog, EdgeKind, SocialGraph};

/// A parsed edge line from a snapshot file
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    pub kind: EdgeKind,
    pub v1: String,
    pub v2: String,
    pub weight: f64,
}

/// Parsed snapshot content, before graph construction
#[derive(Debug, Clone, Default)]
pub struct SnapshotFile {
    /// Vertex ids from the nodes sections, in file order
    pub nodes: Vec<String>,

    /// Edge records from the edges sections, in file order
    pub edges: Vec<EdgeRecord>,
}

/// A constructed snapshot: the visible graph plus the full edge catalog
#[derive(Debug)]
pub struct Snapshot {
    pub graph: SocialGraph,
    pub catalog: EdgeCatalog,
}

/// Errors raised while reading a snapshot file. Parse errors carry the
/// 1-based line number.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: unknown edge kind '{code}'")]
    UnknownKind { line: usize, code: String },

    #[error("line {line}: malformed edge record")]
    MalformedEdge { line: usize },

    #[error("line {line}: bad edge weight '{value}'")]
    BadWeight { line: usize, value: String },
}

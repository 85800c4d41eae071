//! Undirected multigraph over interned vertex ids

use std::collections::HashMap;

use crate::graph::{Edge, EdgeKind};

/// Arena handle for an edge slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EdgeId(u32);

#[derive(Debug, Clone)]
struct VertexSlot {
    /// Vertex id
    id: String,

    /// Handles of every live edge touching this vertex
    incident: Vec<EdgeId>,
}

#[derive(Debug, Clone)]
struct EdgeSlot {
    edge: Edge,
    a: u32,
    b: u32,
}

impl EdgeSlot {
    /// The endpoint index opposite `v`
    fn other(&self, v: u32) -> u32 {
        if self.a == v {
            self.b
        } else {
            self.a
        }
    }
}

/// Undirected multigraph of people joined by typed weighted edges.
///
/// Vertices and edges live in slot arenas addressed by `u32` indices;
/// removal leaves a tombstone so surviving indices stay stable. A vertex
/// pair may hold parallel edges of different kinds, but never two edges of
/// the same kind, and never a self-loop.
#[derive(Debug, Clone, Default)]
pub struct SocialGraph {
    /// Mapping from vertex id to arena index
    index: HashMap<String, u32>,

    /// Vertex arena; removed slots stay as tombstones
    vertex_slots: Vec<Option<VertexSlot>>,

    /// Edge arena; removed slots stay as tombstones
    edge_slots: Vec<Option<EdgeSlot>>,

    /// Live edge count
    edge_count: usize,
}

impl SocialGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live vertices
    pub fn vertex_count(&self) -> usize {
        self.index.len()
    }

    /// Number of live edges, parallel edges counted separately
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains_vertex(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Add a vertex; returns false if it was already present
    pub fn add_vertex(&mut self, id: &str) -> bool {
        if self.index.contains_key(id) {
            return false;
        }
        self.create_vertex(id);
        true
    }

    /// Remove a vertex and every edge touching it; returns false if absent
    pub fn remove_vertex(&mut self, id: &str) -> bool {
        let idx = match self.index.remove(id) {
            Some(idx) => idx,
            None => return false,
        };
        let slot = match self.vertex_slots[idx as usize].take() {
            Some(slot) => slot,
            None => return false,
        };
        for eid in slot.incident {
            if let Some(edge_slot) = self.edge_slots[eid.0 as usize].take() {
                self.edge_count -= 1;
                let other = edge_slot.other(idx);
                if let Some(other_slot) = self.vertex_slots[other as usize].as_mut() {
                    other_slot.incident.retain(|&e| e != eid);
                }
            }
        }
        true
    }

    /// Add an edge, creating missing endpoints. Self-loops and a second
    /// edge of the same kind between the same pair are rejected, returning
    /// false with the graph unchanged.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        if edge.v1 == edge.v2 {
            return false;
        }
        if self.find_edge(edge.kind, &edge.v1, &edge.v2).is_some() {
            return false;
        }
        let a = self.get_or_create_vertex(&edge.v1);
        let b = self.get_or_create_vertex(&edge.v2);
        let eid = EdgeId(self.edge_slots.len() as u32);
        self.edge_slots.push(Some(EdgeSlot { edge, a, b }));
        if let Some(slot) = self.vertex_slots[a as usize].as_mut() {
            slot.incident.push(eid);
        }
        if let Some(slot) = self.vertex_slots[b as usize].as_mut() {
            slot.incident.push(eid);
        }
        self.edge_count += 1;
        true
    }

    /// Remove the edge of the given kind between two vertices
    pub fn remove_edge(&mut self, kind: EdgeKind, a: &str, b: &str) -> Option<Edge> {
        let ai = *self.index.get(a)?;
        let bi = *self.index.get(b)?;
        let eid = self.vertex_slots[ai as usize]
            .as_ref()?
            .incident
            .iter()
            .copied()
            .find(|&eid| {
                self.edge_slots[eid.0 as usize]
                    .as_ref()
                    .map_or(false, |slot| slot.edge.kind == kind && slot.other(ai) == bi)
            })?;
        if let Some(slot) = self.vertex_slots[ai as usize].as_mut() {
            slot.incident.retain(|&e| e != eid);
        }
        if let Some(slot) = self.vertex_slots[bi as usize].as_mut() {
            slot.incident.retain(|&e| e != eid);
        }
        let removed = self.edge_slots[eid.0 as usize].take()?;
        self.edge_count -= 1;
        Some(removed.edge)
    }

    /// The edge of a given kind joining two vertices, if present
    pub fn find_edge(&self, kind: EdgeKind, a: &str, b: &str) -> Option<&Edge> {
        let ai = *self.index.get(a)?;
        let bi = *self.index.get(b)?;
        self.incident_indexed(ai)
            .find(|&(other, edge)| other == bi && edge.kind == kind)
            .map(|(_, edge)| edge)
    }

    /// Whether any edge joins the two vertices
    pub fn has_edge_between(&self, a: &str, b: &str) -> bool {
        let (ai, bi) = match (self.index.get(a), self.index.get(b)) {
            (Some(&ai), Some(&bi)) => (ai, bi),
            _ => return false,
        };
        self.incident_indexed(ai).any(|(other, _)| other == bi)
    }

    /// Degree of a vertex, parallel edges counted separately; 0 for an
    /// unknown vertex
    pub fn degree(&self, id: &str) -> usize {
        match self.index.get(id) {
            Some(&idx) => self.incident_ids(idx).len(),
            None => 0,
        }
    }

    /// Vertex ids in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.vertex_slots.iter().flatten().map(|slot| slot.id.as_str())
    }

    /// Edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edge_slots.iter().flatten().map(|slot| &slot.edge)
    }

    /// Edges touching a vertex; empty for an unknown vertex
    pub fn incident_edges<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Edge> + 'a {
        let idx = self.vertex_index(id);
        idx.into_iter()
            .flat_map(move |i| self.incident_indexed(i))
            .map(|(_, edge)| edge)
    }

    /// Neighbor ids of a vertex, one entry per incident edge; empty for an
    /// unknown vertex
    pub fn neighbors<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a str> + 'a {
        let idx = self.vertex_index(id);
        idx.into_iter().flat_map(move |i| {
            self.incident_indexed(i)
                .filter_map(move |(other, _)| self.vertex_name(other))
        })
    }

    fn create_vertex(&mut self, id: &str) -> u32 {
        let idx = self.vertex_slots.len() as u32;
        self.vertex_slots.push(Some(VertexSlot {
            id: id.to_string(),
            incident: Vec::new(),
        }));
        self.index.insert(id.to_string(), idx);
        idx
    }

    fn get_or_create_vertex(&mut self, id: &str) -> u32 {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        self.create_vertex(id)
    }

    fn incident_ids(&self, idx: u32) -> &[EdgeId] {
        match self.vertex_slots[idx as usize].as_ref() {
            Some(slot) => &slot.incident,
            None => &[],
        }
    }

    /// Exclusive upper bound on vertex arena indices, for dense per-vertex
    /// state in traversals
    pub(crate) fn vertex_capacity(&self) -> usize {
        self.vertex_slots.len()
    }

    pub(crate) fn vertex_index(&self, id: &str) -> Option<u32> {
        self.index.get(id).copied()
    }

    pub(crate) fn vertex_name(&self, idx: u32) -> Option<&str> {
        self.vertex_slots[idx as usize].as_ref().map(|slot| slot.id.as_str())
    }

    /// Live vertex indices in insertion order
    pub(crate) fn vertex_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.vertex_slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(idx, _)| idx as u32)
    }

    /// Incident edges of a live vertex, paired with the opposite endpoint
    /// index
    pub(crate) fn incident_indexed(&self, idx: u32) -> impl Iterator<Item = (u32, &Edge)> + '_ {
        self.incident_ids(idx).iter().filter_map(move |&eid| {
            self.edge_slots[eid.0 as usize]
                .as_ref()
                .map(|slot| (slot.other(idx), &slot.edge))
        })
    }

    /// Every live edge with both endpoint indices, in insertion order
    pub(crate) fn edges_indexed(&self) -> impl Iterator<Item = (u32, u32, &Edge)> + '_ {
        self.edge_slots
            .iter()
            .flatten()
            .map(|slot| (slot.a, slot.b, &slot.edge))
    }
}

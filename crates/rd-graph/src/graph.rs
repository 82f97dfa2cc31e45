//! City graph representation.
//!
//! # Data layout
//!
//! Vertices and edges live in two arenas (`Vec<Vertex>`, `Vec<Edge>`).  A
//! vertex is addressed internally by its **slot** (position in the vertex
//! arena); an edge by its [`EdgeId`] (position in the edge arena).  Two hash
//! indices translate caller-facing keys into arena positions:
//!
//! ```text
//! slots: VertexId            → vertex slot
//! pairs: (VertexId, VertexId) → EdgeId      (pair stored lower id first)
//! ```
//!
//! The adjacency cache holds, per vertex slot, the `(neighbour slot, EdgeId)`
//! pairs incident to it.  It is derived from the edge arena and rebuilt
//! entry-by-entry inside [`CityGraph::add_edge`], never edited elsewhere.
//! `edge_millis` runs parallel to the edge arena and caches each edge's
//! fixed-point cost per condition, indexed by `TrafficCondition as usize`.
//!
//! Nothing in the graph references another record by pointer, so vertices
//! and edges carry no ownership cycles.

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap as IdMap;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as IdMap;

use rd_core::{EdgeId, Point, TrafficCondition, VertexId};

use crate::describe::{self, PathDescription};
use crate::router::{DijkstraRouter, Router, ShortestPath};
use crate::{EdgeWeights, GraphError, GraphResult};

// ── Records ───────────────────────────────────────────────────────────────────

/// A map location.
///
/// `label` and `zone` are free-form attributes for presentation layers
/// (a place name, a district for colouring).  Routing ignores both.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    pub id:    VertexId,
    pub pos:   Point,
    pub label: Option<Box<str>>,
    pub zone:  Option<Box<str>>,
}

/// An undirected road segment.  `a < b` always holds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub a:       VertexId,
    pub b:       VertexId,
    pub weights: EdgeWeights,
}

impl Edge {
    /// Travel time in minutes under `condition`, identical in both directions.
    #[inline]
    pub fn cost(&self, condition: TrafficCondition) -> f64 {
        self.weights.cost(condition)
    }

    /// The endpoint that is not `from`.
    #[inline]
    pub fn other(&self, from: VertexId) -> VertexId {
        if from == self.a { self.b } else { self.a }
    }

    pub fn connects(&self, x: VertexId, y: VertexId) -> bool {
        (self.a, self.b) == ordered(x, y)
    }
}

#[derive(Copy, Clone, Debug)]
struct Adjacent {
    slot: u32,
    edge: EdgeId,
}

#[inline]
fn ordered(x: VertexId, y: VertexId) -> (VertexId, VertexId) {
    if x <= y { (x, y) } else { (y, x) }
}

// ── CityGraph ─────────────────────────────────────────────────────────────────

/// Undirected, weighted city graph.
///
/// Mutation goes through `&mut self` (`add_vertex`, `add_edge`); every query
/// takes `&self`.  Share across threads behind a read-write lock when
/// mutation and queries must interleave.
#[derive(Clone, Debug, Default)]
pub struct CityGraph {
    vertices:  Vec<Vertex>,
    slots:     IdMap<VertexId, u32>,
    edges:       Vec<Edge>,
    edge_millis: Vec<[u64; 3]>,
    pairs:       IdMap<(VertexId, VertexId), EdgeId>,
    adjacency:   Vec<Vec<Adjacent>>,
}

impl CityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for the expected number of vertices and edges to reduce
    /// reallocations when bulk-loading a map.
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            vertices:  Vec::with_capacity(vertices),
            slots:     IdMap::with_capacity_and_hasher(vertices, Default::default()),
            edges:       Vec::with_capacity(edges),
            edge_millis: Vec::with_capacity(edges),
            pairs:       IdMap::with_capacity_and_hasher(edges, Default::default()),
            adjacency:   Vec::with_capacity(vertices),
        }
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Add a vertex at `(x, y)` with no incident edges.
    pub fn add_vertex(&mut self, id: VertexId, x: f64, y: f64) -> GraphResult<()> {
        if self.slots.contains_key(&id) {
            return Err(GraphError::DuplicateVertex(id));
        }
        let slot = self.vertices.len() as u32;
        self.vertices.push(Vertex { id, pos: Point::new(x, y), label: None, zone: None });
        self.adjacency.push(Vec::new());
        self.slots.insert(id, slot);
        Ok(())
    }

    /// Attach a display name to `id`, replacing any previous one.
    pub fn set_label(&mut self, id: VertexId, label: impl Into<Box<str>>) -> GraphResult<()> {
        let slot = self.require_slot(id)?;
        self.vertices[slot].label = Some(label.into());
        Ok(())
    }

    /// Attach a zone name to `id`, replacing any previous one.
    pub fn set_zone(&mut self, id: VertexId, zone: impl Into<Box<str>>) -> GraphResult<()> {
        let slot = self.require_slot(id)?;
        self.vertices[slot].zone = Some(zone.into());
        Ok(())
    }

    /// Join `a` and `b` with an undirected edge, replacing the weights of an
    /// existing edge between the same pair.
    ///
    /// Checks run in this order and nothing is modified unless all pass:
    /// `UnknownVertex` (`a` first), `SelfLoop`, `InvalidWeight`.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId, weights: EdgeWeights) -> GraphResult<EdgeId> {
        let slot_a = self.require_slot(a)?;
        let slot_b = self.require_slot(b)?;
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }
        weights.validate()?;

        let key    = ordered(a, b);
        let millis = TrafficCondition::ALL.map(|c| weights.millis(c));
        if let Some(&edge) = self.pairs.get(&key) {
            self.edges[edge.index()].weights = weights;
            self.edge_millis[edge.index()] = millis;
            return Ok(edge);
        }

        let edge = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge { a: key.0, b: key.1, weights });
        self.edge_millis.push(millis);
        self.pairs.insert(key, edge);
        self.adjacency[slot_a].push(Adjacent { slot: slot_b as u32, edge });
        self.adjacency[slot_b].push(Adjacent { slot: slot_a as u32, edge });
        Ok(edge)
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    // ── Lookup & enumeration ──────────────────────────────────────────────

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.slot(id).map(|s| &self.vertices[s])
    }

    /// All vertices in insertion order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = &Vertex> + '_ {
        self.vertices.iter()
    }

    /// All edges in `EdgeId` order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (EdgeId(i as u32), e))
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// The edge joining `x` and `y`, in either order.
    pub fn edge_between(&self, x: VertexId, y: VertexId) -> Option<&Edge> {
        self.pairs.get(&ordered(x, y)).map(|e| &self.edges[e.index()])
    }

    /// Neighbours of `id` with the connecting edge, in edge insertion order.
    pub fn neighbours(&self, id: VertexId) -> GraphResult<impl Iterator<Item = (VertexId, &Edge)> + '_> {
        let slot = self.require_slot(id)?;
        Ok(self.adjacency[slot].iter().map(|adj| {
            (self.vertices[adj.slot as usize].id, &self.edges[adj.edge.index()])
        }))
    }

    // ── Slot-level access for routers ─────────────────────────────────────

    /// Arena slot of `id`, if present.  Slots are dense in
    /// `0..vertex_count()` and stable while the graph only grows.
    #[inline]
    pub fn slot(&self, id: VertexId) -> Option<usize> {
        self.slots.get(&id).map(|&s| s as usize)
    }

    #[inline]
    pub fn vertex_at(&self, slot: usize) -> &Vertex {
        &self.vertices[slot]
    }

    /// `(neighbour slot, EdgeId)` for every edge incident to `slot`.
    #[inline]
    pub fn adjacent(&self, slot: usize) -> impl Iterator<Item = (usize, EdgeId)> + '_ {
        self.adjacency[slot].iter().map(|adj| (adj.slot as usize, adj.edge))
    }

    /// Fixed-point edge cost in milliseconds.  Panics on an id not issued by
    /// this graph.
    #[inline]
    pub fn edge_millis(&self, edge: EdgeId, condition: TrafficCondition) -> u64 {
        self.edge_millis[edge.index()][condition as usize]
    }

    pub(crate) fn require_slot(&self, id: VertexId) -> GraphResult<usize> {
        self.slot(id).ok_or(GraphError::UnknownVertex(id))
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Fastest route from `source` to `target` under `condition`, using the
    /// default [`DijkstraRouter`].
    pub fn shortest_path(
        &self,
        source:    VertexId,
        target:    VertexId,
        condition: TrafficCondition,
    ) -> GraphResult<ShortestPath> {
        DijkstraRouter.route(self, source, target, condition)
    }

    /// Turn-by-turn narration of `path` under `condition`.
    pub fn get_path_description(
        &self,
        path:      &[VertexId],
        condition: TrafficCondition,
    ) -> GraphResult<PathDescription> {
        describe::describe_path(self, path, condition)
    }
}

//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! Dispatch code calls routing via the [`Router`] trait, so applications can
//! swap in other searches (A*, bidirectional) without touching the graph or
//! the unit registry.  The default [`DijkstraRouter`] is what
//! [`CityGraph::shortest_path`] uses.
//!
//! # Cost units
//!
//! All costs and totals are whole **milliseconds** (`u64`) internally, summed
//! from the cached edge cost for the query's [`TrafficCondition`], so the
//! cost of a route does not depend on the direction it is walked.
//! [`ShortestPath::cost`] converts back to minutes for callers.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rd_core::{TrafficCondition, VertexId};

use crate::graph::CityGraph;
use crate::weights::millis_to_minutes;
use crate::{GraphError, GraphResult};

// ── ShortestPath ──────────────────────────────────────────────────────────────

/// The result of a routing query.
///
/// Both constructors refuse an empty vertex sequence, so `source` and
/// `target` always exist.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShortestPath {
    source:   VertexId,
    target:   VertexId,
    vertices: Vec<VertexId>,
    millis:   u64,
}

impl ShortestPath {
    /// Path of one vertex and no cost.
    pub fn trivial(at: VertexId) -> Self {
        Self { source: at, target: at, vertices: vec![at], millis: 0 }
    }

    /// Build from a non-empty vertex sequence and its fixed-point cost.
    /// Returns `None` for an empty sequence.
    pub fn from_vertices(vertices: Vec<VertexId>, millis: u64) -> Option<Self> {
        let source = *vertices.first()?;
        let target = *vertices.last()?;
        Some(Self { source, target, vertices, millis })
    }

    pub fn source(&self) -> VertexId {
        self.source
    }

    pub fn target(&self) -> VertexId {
        self.target
    }

    /// Vertices to visit in order, source and target included.
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Total travel time in minutes.
    pub fn cost(&self) -> f64 {
        millis_to_minutes(self.millis)
    }

    /// Total travel time in whole milliseconds; exact, so safe to compare.
    pub fn cost_millis(&self) -> u64 {
        self.millis
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// `true` if the source and target are the same vertex.
    pub fn is_trivial(&self) -> bool {
        self.vertices.len() == 1
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so a single router can serve
/// concurrent read-only queries, including Rayon fan-out in `rd-dispatch`.
pub trait Router: Send + Sync {
    /// Compute the cheapest route from `source` to `target` under `condition`.
    ///
    /// `source == target` is a one-vertex path of cost 0.  Unknown endpoints
    /// fail with [`GraphError::UnknownVertex`] (source checked first); an
    /// unreachable target fails with [`GraphError::NoPath`].
    fn route(
        &self,
        graph:     &CityGraph,
        source:    VertexId,
        target:    VertexId,
        condition: TrafficCondition,
    ) -> GraphResult<ShortestPath>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Dijkstra's algorithm with a binary-heap frontier, O((V + E) log V).
///
/// Frontier entries with equal tentative cost are settled in ascending
/// `VertexId` order, and a vertex's predecessor only changes on a strictly
/// cheaper relaxation.  Together these make the returned path a function of
/// the graph contents alone, not of the order vertices and edges were added.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        graph:     &CityGraph,
        source:    VertexId,
        target:    VertexId,
        condition: TrafficCondition,
    ) -> GraphResult<ShortestPath> {
        dijkstra(graph, source, target, condition)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Frontier entry.  `Ord` is reversed so `BinaryHeap` (a max-heap) pops the
/// cheapest entry, and among equal costs the lowest vertex id.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct State {
    cost: u64,
    id:   VertexId,
    slot: usize,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sentinel for "no predecessor".
const NONE: usize = usize::MAX;

fn dijkstra(
    graph:     &CityGraph,
    source:    VertexId,
    target:    VertexId,
    condition: TrafficCondition,
) -> GraphResult<ShortestPath> {
    let from = graph.require_slot(source)?;
    let to   = graph.require_slot(target)?;

    if from == to {
        return Ok(ShortestPath::trivial(source));
    }

    let n = graph.vertex_count();
    // dist[s] = best known cost (ms) to reach slot s.
    let mut dist    = vec![u64::MAX; n];
    // prev[s] = slot that reached s; NONE for the source and unreached slots.
    let mut prev    = vec![NONE; n];
    let mut settled = vec![false; n];

    dist[from] = 0;

    let mut heap = BinaryHeap::new();
    heap.push(State { cost: 0, id: source, slot: from });

    while let Some(State { cost, slot, .. }) = heap.pop() {
        if settled[slot] {
            continue;
        }
        settled[slot] = true;

        if slot == to {
            return Ok(reconstruct(graph, &prev, to, cost));
        }

        for (next, edge) in graph.adjacent(slot) {
            if settled[next] {
                continue;
            }
            let new_cost = cost.saturating_add(graph.edge_millis(edge, condition));
            if new_cost < dist[next] {
                dist[next] = new_cost;
                prev[next] = slot;
                heap.push(State { cost: new_cost, id: graph.vertex_at(next).id, slot: next });
            }
        }
    }

    Err(GraphError::NoPath { from: source, to: target })
}

fn reconstruct(graph: &CityGraph, prev: &[usize], to: usize, millis: u64) -> ShortestPath {
    let mut vertices = Vec::new();
    let mut cur = to;
    loop {
        vertices.push(graph.vertex_at(cur).id);
        let p = prev[cur];
        if p == NONE {
            break;
        }
        cur = p;
    }
    vertices.reverse();
    ShortestPath {
        source: vertices[0],
        target: graph.vertex_at(to).id,
        vertices,
        millis,
    }
}

//! The `Dispatcher` — a city graph with a unit registry attached.
//!
//! # Nearest-unit selection
//!
//! ```text
//! find_nearest_unit(incident, condition):
//!   ① validate   — incident must be a graph vertex, registry non-empty
//!   ② route      — one shortest path per distinct occupied vertex → incident
//!                  (Rayon fan-out with the `parallel` feature)
//!   ③ select     — walk units in ascending UnitId order, keep the first
//!                  with the strictly lowest cost (exact integer ms)
//! ```
//!
//! Units sharing a vertex share one query.  Unreachable origins are skipped;
//! only when every origin is unreachable does the call fail.

use std::collections::BTreeMap;

use rd_core::{TrafficCondition, UnitId, VertexId};
use rd_graph::{
    CityGraph, DijkstraRouter, EdgeWeights, GraphError, PathDescription, Router, ShortestPath,
};

use crate::{DispatchError, DispatchResult, UnitRegistry};

// ── Dispatch ──────────────────────────────────────────────────────────────────

/// The unit chosen for an incident and the route it should take.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Dispatch {
    pub unit:      UnitId,
    /// Vertex the unit departs from.
    pub origin:    VertexId,
    pub condition: TrafficCondition,
    /// Route from `origin` to the incident vertex.
    pub path:      ShortestPath,
}

impl Dispatch {
    /// Estimated arrival time in minutes.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.path.cost()
    }

    pub fn incident(&self) -> VertexId {
        self.path.target()
    }
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

/// Explicit dispatch context: owns the graph, the registry, and the router
/// used for every path query.
///
/// # Example
///
/// ```
/// use rd_core::{TrafficCondition, VertexId};
/// use rd_dispatch::Dispatcher;
/// use rd_graph::{CityGraph, EdgeWeights};
///
/// let mut graph = CityGraph::new();
/// for (id, x) in [(0, 0.0), (1, 1.0), (2, 2.0)] {
///     graph.add_vertex(VertexId(id), x, 0.0)?;
/// }
/// graph.add_edge(VertexId(0), VertexId(1), EdgeWeights::new(5.0, 10.0, 20.0)?)?;
/// graph.add_edge(VertexId(1), VertexId(2), EdgeWeights::new(5.0, 10.0, 20.0)?)?;
///
/// let mut dispatch = Dispatcher::new(graph);
/// dispatch.add_unit("U1", VertexId(1))?;
/// let d = dispatch.find_nearest_unit(VertexId(2), TrafficCondition::Normal)?;
/// assert_eq!(d.unit.as_str(), "U1");
/// assert_eq!(d.cost(), 10.0);
/// # Ok::<(), rd_dispatch::DispatchError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Dispatcher<R: Router = DijkstraRouter> {
    graph:    CityGraph,
    registry: UnitRegistry,
    router:   R,
}

impl Dispatcher<DijkstraRouter> {
    /// Attach an empty registry to `graph`, routing with Dijkstra.
    pub fn new(graph: CityGraph) -> Self {
        Self::with_router(graph, DijkstraRouter)
    }
}

impl<R: Router> Dispatcher<R> {
    pub fn with_router(graph: CityGraph, router: R) -> Self {
        Self { graph, registry: UnitRegistry::new(), router }
    }

    pub fn graph(&self) -> &CityGraph {
        &self.graph
    }

    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    // ── Graph mutation ────────────────────────────────────────────────────

    pub fn add_vertex(&mut self, id: VertexId, x: f64, y: f64) -> DispatchResult<()> {
        Ok(self.graph.add_vertex(id, x, y)?)
    }

    pub fn add_edge(&mut self, a: VertexId, b: VertexId, weights: EdgeWeights) -> DispatchResult<()> {
        self.graph.add_edge(a, b, weights)?;
        Ok(())
    }

    // ── Registry mutation ─────────────────────────────────────────────────

    /// Station `unit` at `vertex`.
    ///
    /// Fails with `UnknownVertex` if the graph has no such vertex, then with
    /// `DuplicateUnit` if the unit is already stationed somewhere.
    pub fn add_unit(&mut self, unit: impl Into<UnitId>, vertex: VertexId) -> DispatchResult<()> {
        if !self.graph.contains_vertex(vertex) {
            return Err(DispatchError::UnknownVertex(vertex));
        }
        self.registry.assign(unit.into(), vertex)
    }

    /// Take `unit` off duty, returning the vertex it was stationed at.
    pub fn remove_unit(&mut self, unit: &UnitId) -> DispatchResult<VertexId> {
        self.registry.release(unit)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn shortest_path(
        &self,
        source:    VertexId,
        target:    VertexId,
        condition: TrafficCondition,
    ) -> DispatchResult<ShortestPath> {
        Ok(self.router.route(&self.graph, source, target, condition)?)
    }

    pub fn get_path_description(
        &self,
        path:      &[VertexId],
        condition: TrafficCondition,
    ) -> DispatchResult<PathDescription> {
        Ok(self.graph.get_path_description(path, condition)?)
    }

    /// Choose the unit that reaches `incident` fastest under `condition`.
    ///
    /// Ties on cost go to the lowest `UnitId`.  Errors: `UnknownVertex`
    /// (incident, or a unit stationed at a vertex the graph no longer has),
    /// `NoUnitsAvailable`, `NoReachableUnit`.
    pub fn find_nearest_unit(
        &self,
        incident:  VertexId,
        condition: TrafficCondition,
    ) -> DispatchResult<Dispatch> {
        if !self.graph.contains_vertex(incident) {
            return Err(DispatchError::UnknownVertex(incident));
        }
        if self.registry.is_empty() {
            return Err(DispatchError::NoUnitsAvailable);
        }

        let origins = self.registry.occupied_vertices();
        let routes  = self.route_from_each(&origins, incident, condition)?;

        let mut best: Option<(&UnitId, &ShortestPath)> = None;
        for (unit, origin) in self.registry.units() {
            let Some(path) = routes.get(&origin) else { continue };
            if best.is_none_or(|(_, b)| path.cost_millis() < b.cost_millis()) {
                best = Some((unit, path));
            }
        }

        let (unit, path) = best.ok_or(DispatchError::NoReachableUnit { incident })?;
        Ok(Dispatch {
            unit:   unit.clone(),
            origin: path.source(),
            condition,
            path:   path.clone(),
        })
    }

    /// Route every origin to `incident`; unreachable origins are left out.
    fn route_from_each(
        &self,
        origins:   &[VertexId],
        incident:  VertexId,
        condition: TrafficCondition,
    ) -> DispatchResult<BTreeMap<VertexId, ShortestPath>> {
        let route_one = |&origin: &VertexId| -> DispatchResult<Option<(VertexId, ShortestPath)>> {
            match self.router.route(&self.graph, origin, incident, condition) {
                Ok(path) => Ok(Some((origin, path))),
                Err(GraphError::NoPath { .. }) => Ok(None),
                Err(e) => Err(e.into()),
            }
        };

        #[cfg(not(feature = "parallel"))]
        let routed: Vec<_> = origins
            .iter()
            .map(route_one)
            .collect::<DispatchResult<_>>()?;

        #[cfg(feature = "parallel")]
        let routed: Vec<_> = {
            use rayon::prelude::*;
            origins
                .par_iter()
                .map(route_one)
                .collect::<DispatchResult<_>>()?
        };

        Ok(routed.into_iter().flatten().collect())
    }
}

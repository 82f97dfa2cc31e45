//! Thread-safe dispatcher handle.
//!
//! # Locking discipline
//!
//! One `parking_lot::RwLock` guards the whole [`Dispatcher`] (graph and
//! registry together, so a unit can never observe a half-applied graph
//! mutation):
//!
//! | Operation                                              | Lock  |
//! |--------------------------------------------------------|-------|
//! | `add_vertex`, `add_edge`, `add_unit`, `remove_unit`    | write |
//! | `shortest_path`, `get_path_description`, `find_nearest_unit`, enumeration | read |
//!
//! Each call holds its lock only for its own duration and results are
//! returned by value, so no guard escapes unless the caller asks for one via
//! [`SharedDispatcher::read`].

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use rd_core::{TrafficCondition, UnitId, VertexId};
use rd_graph::{DijkstraRouter, EdgeWeights, PathDescription, Router, ShortestPath};

use crate::{Dispatch, DispatchResult, Dispatcher};

/// Cloneable, `Send + Sync` handle to a shared [`Dispatcher`].
pub struct SharedDispatcher<R: Router = DijkstraRouter> {
    inner: Arc<RwLock<Dispatcher<R>>>,
}

impl<R: Router> Clone for SharedDispatcher<R> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<R: Router> From<Dispatcher<R>> for SharedDispatcher<R> {
    fn from(dispatcher: Dispatcher<R>) -> Self {
        Self::new(dispatcher)
    }
}

impl<R: Router> SharedDispatcher<R> {
    pub fn new(dispatcher: Dispatcher<R>) -> Self {
        Self { inner: Arc::new(RwLock::new(dispatcher)) }
    }

    /// Hold a read lock for several queries against one consistent state.
    /// Mutations block until the guard is dropped.
    pub fn read(&self) -> RwLockReadGuard<'_, Dispatcher<R>> {
        self.inner.read()
    }

    // ── Mutations (write lock) ────────────────────────────────────────────

    pub fn add_vertex(&self, id: VertexId, x: f64, y: f64) -> DispatchResult<()> {
        self.inner.write().add_vertex(id, x, y)
    }

    pub fn add_edge(&self, a: VertexId, b: VertexId, weights: EdgeWeights) -> DispatchResult<()> {
        self.inner.write().add_edge(a, b, weights)
    }

    pub fn add_unit(&self, unit: impl Into<UnitId>, vertex: VertexId) -> DispatchResult<()> {
        self.inner.write().add_unit(unit, vertex)
    }

    pub fn remove_unit(&self, unit: &UnitId) -> DispatchResult<VertexId> {
        self.inner.write().remove_unit(unit)
    }

    // ── Queries (read lock) ───────────────────────────────────────────────

    pub fn shortest_path(
        &self,
        source:    VertexId,
        target:    VertexId,
        condition: TrafficCondition,
    ) -> DispatchResult<ShortestPath> {
        self.inner.read().shortest_path(source, target, condition)
    }

    pub fn get_path_description(
        &self,
        path:      &[VertexId],
        condition: TrafficCondition,
    ) -> DispatchResult<PathDescription> {
        self.inner.read().get_path_description(path, condition)
    }

    pub fn find_nearest_unit(
        &self,
        incident:  VertexId,
        condition: TrafficCondition,
    ) -> DispatchResult<Dispatch> {
        self.inner.read().find_nearest_unit(incident, condition)
    }

    /// Snapshot of all assignments in ascending unit order.
    pub fn units(&self) -> Vec<(UnitId, VertexId)> {
        self.inner
            .read()
            .registry()
            .units()
            .map(|(u, v)| (u.clone(), v))
            .collect()
    }
}

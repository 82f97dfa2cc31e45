//! The `UnitRegistry` — which vertex each responding unit is stationed at.

use std::collections::BTreeMap;

use rd_core::{UnitId, VertexId};

use crate::{DispatchError, DispatchResult};

/// Unit → vertex assignments.
///
/// Keyed by `UnitId` in a `BTreeMap`, so iteration is always in ascending
/// unit order; nearest-unit tie-breaking relies on that.  Vertex ids are
/// stored by value and never dereferenced here: validation against a graph
/// is the caller's job (see [`Dispatcher::add_unit`]).
///
/// [`Dispatcher::add_unit`]: crate::Dispatcher::add_unit
#[derive(Clone, Debug, Default)]
pub struct UnitRegistry {
    units: BTreeMap<UnitId, VertexId>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `unit` at `vertex`.  A unit must be removed before it can be
    /// reassigned.
    pub fn assign(&mut self, unit: UnitId, vertex: VertexId) -> DispatchResult<()> {
        if let Some(&at) = self.units.get(&unit) {
            return Err(DispatchError::DuplicateUnit { unit, at });
        }
        self.units.insert(unit, vertex);
        Ok(())
    }

    /// Drop `unit`, returning the vertex it was at.
    pub fn release(&mut self, unit: &UnitId) -> DispatchResult<VertexId> {
        self.units
            .remove(unit)
            .ok_or_else(|| DispatchError::UnknownUnit(unit.clone()))
    }

    pub fn location(&self, unit: &UnitId) -> Option<VertexId> {
        self.units.get(unit).copied()
    }

    pub fn contains(&self, unit: &UnitId) -> bool {
        self.units.contains_key(unit)
    }

    /// All assignments in ascending unit order.
    pub fn units(&self) -> impl Iterator<Item = (&UnitId, VertexId)> + '_ {
        self.units.iter().map(|(u, &v)| (u, v))
    }

    /// Units stationed at `vertex`, ascending.
    pub fn units_at(&self, vertex: VertexId) -> impl Iterator<Item = &UnitId> + '_ {
        self.units
            .iter()
            .filter(move |&(_, &v)| v == vertex)
            .map(|(u, _)| u)
    }

    /// Distinct vertices hosting at least one unit, ascending.
    pub fn occupied_vertices(&self) -> Vec<VertexId> {
        let mut vertices: Vec<VertexId> = self.units.values().copied().collect();
        vertices.sort_unstable();
        vertices.dedup();
        vertices
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

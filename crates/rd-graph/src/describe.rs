//! Turn-by-turn route narration.
//!
//! Headings come from vertex coordinates, costs from edge weights.  The
//! describer only reads the graph.

use std::fmt;

use rd_core::{CompassPoint, TrafficCondition, VertexId};

use crate::graph::CityGraph;
use crate::weights::millis_to_minutes;
use crate::{GraphError, GraphResult};

/// One leg of a described route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathStep {
    pub from:    VertexId,
    pub to:      VertexId,
    pub heading: CompassPoint,
    /// Minutes for this leg.
    pub cost:    f64,
}

/// Narrated route: one step per traversed edge plus the summed cost.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathDescription {
    pub condition:  TrafficCondition,
    pub steps:      Vec<PathStep>,
    pub total_cost: f64,
}

impl fmt::Display for PathDescription {
    /// ```text
    /// From vertex 0 go east to vertex 11 (8 minutes)
    /// From vertex 11 go east to vertex 20 (11 minutes)
    /// Total time: 19 minutes
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(
                f,
                "From vertex {} go {} to vertex {} ({} minutes)",
                step.from, step.heading, step.to, step.cost,
            )?;
        }
        write!(f, "Total time: {} minutes", self.total_cost)
    }
}

/// Describe `path` under `condition`.
///
/// A one-vertex path has no steps and costs nothing.  Fails with
/// [`GraphError::EmptyPath`], [`GraphError::UnknownVertex`], or
/// [`GraphError::NotAdjacent`] when `path` is not a walk in `graph`.
pub fn describe_path(
    graph:     &CityGraph,
    path:      &[VertexId],
    condition: TrafficCondition,
) -> GraphResult<PathDescription> {
    let Some(&first) = path.first() else {
        return Err(GraphError::EmptyPath);
    };
    if !graph.contains_vertex(first) {
        return Err(GraphError::UnknownVertex(first));
    }

    let mut steps = Vec::with_capacity(path.len() - 1);
    let mut total_millis = 0u64;

    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let origin = graph.vertex(from).ok_or(GraphError::UnknownVertex(from))?;
        let dest   = graph.vertex(to).ok_or(GraphError::UnknownVertex(to))?;
        let edge   = graph
            .edge_between(from, to)
            .ok_or(GraphError::NotAdjacent { a: from, b: to })?;

        let millis = edge.weights.millis(condition);
        total_millis = total_millis.saturating_add(millis);
        steps.push(PathStep {
            from,
            to,
            heading: origin.pos.heading_to(dest.pos),
            cost: millis_to_minutes(millis),
        });
    }

    Ok(PathDescription {
        condition,
        steps,
        total_cost: millis_to_minutes(total_millis),
    })
}

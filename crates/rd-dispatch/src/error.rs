use rd_core::{UnitId, VertexId};
use rd_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("vertex {0} not found in graph")]
    UnknownVertex(VertexId),

    #[error("unit {unit} is already assigned to vertex {at}")]
    DuplicateUnit { unit: UnitId, at: VertexId },

    #[error("unit {0} is not registered")]
    UnknownUnit(UnitId),

    #[error("no units are registered")]
    NoUnitsAvailable,

    #[error("no registered unit can reach vertex {incident}")]
    NoReachableUnit { incident: VertexId },

    /// Any graph failure other than an unknown vertex, which always surfaces
    /// as [`DispatchError::UnknownVertex`].
    #[error("graph error: {0}")]
    Graph(GraphError),
}

impl From<GraphError> for DispatchError {
    fn from(e: GraphError) -> Self {
        match e {
            GraphError::UnknownVertex(v) => DispatchError::UnknownVertex(v),
            other => DispatchError::Graph(other),
        }
    }
}

pub type DispatchResult<T> = Result<T, DispatchError>;

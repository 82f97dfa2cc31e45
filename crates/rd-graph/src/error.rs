//! Graph-subsystem error type.

use thiserror::Error;

use rd_core::{TrafficCondition, VertexId};

/// Errors produced by `rd-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("vertex {0} already exists")]
    DuplicateVertex(VertexId),

    #[error("vertex {0} not found in graph")]
    UnknownVertex(VertexId),

    #[error("edge from vertex {0} to itself is not allowed")]
    SelfLoop(VertexId),

    /// `value` is `None` when the condition has no weight at all.
    #[error("invalid {condition} weight: {}", describe_weight(.value))]
    InvalidWeight {
        condition: TrafficCondition,
        value:     Option<f64>,
    },

    #[error("no path from {from} to {to}")]
    NoPath { from: VertexId, to: VertexId },

    #[error("path is empty")]
    EmptyPath,

    #[error("vertices {a} and {b} are not joined by an edge")]
    NotAdjacent { a: VertexId, b: VertexId },

    #[error("graph parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_weight(value: &Option<f64>) -> String {
    match value {
        Some(v) => format!("{v} (must be a positive number of minutes)"),
        None    => "missing".to_owned(),
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

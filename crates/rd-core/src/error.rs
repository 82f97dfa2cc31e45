//! Core error type.
//!
//! Sub-crates define their own error enums (`GraphError`, `DispatchError`);
//! this one only covers parsing of the shared value types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown traffic condition {0:?}: expected \"light\", \"normal\", or \"rush_hour\"")]
    UnknownTrafficCondition(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

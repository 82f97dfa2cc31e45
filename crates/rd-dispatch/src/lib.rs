//! `rd-dispatch` — unit registry and nearest-unit dispatch.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`registry`]   | `UnitRegistry` (unit → vertex assignments)              |
//! | [`dispatcher`] | `Dispatcher` (graph + registry + router), `Dispatch`    |
//! | [`shared`]     | `SharedDispatcher` (`Arc<RwLock<Dispatcher>>` handle)   |
//! | [`error`]      | `DispatchError`, `DispatchResult<T>`                    |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Fans nearest-unit path queries out on Rayon.            |
//! | `serde`    | Derives `Serialize` on `Dispatch`.                      |

pub mod dispatcher;
pub mod error;
pub mod registry;
pub mod shared;

#[cfg(test)]
mod tests;

pub use dispatcher::{Dispatch, Dispatcher};
pub use error::{DispatchError, DispatchResult};
pub use registry::UnitRegistry;
pub use shared::SharedDispatcher;

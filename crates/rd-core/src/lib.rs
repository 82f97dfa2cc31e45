//! `rd-core` — foundational types for the `rust_dispatch` routing engine.
//!
//! This crate is a dependency of every other `rd-*` crate.  It intentionally
//! has no `rd-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VertexId`, `EdgeId`, `UnitId`                        |
//! | [`geo`]         | `Point`, `CompassPoint`, bearing quantization         |
//! | [`traffic`]     | `TrafficCondition` enum                               |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod traffic;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{CompassPoint, Point};
pub use ids::{EdgeId, UnitId, VertexId};
pub use traffic::TrafficCondition;

//! `rd-graph` — city graph, edge weights, shortest paths, and narration.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`graph`]    | `CityGraph` (vertex/edge arenas + adjacency), `Vertex`, `Edge` |
//! | [`weights`]  | `EdgeWeights` (one positive weight per traffic condition)  |
//! | [`router`]   | `Router` trait, `ShortestPath`, `DijkstraRouter`           |
//! | [`describe`] | `PathDescription`, `PathStep`, `describe_path`             |
//! | [`loader`]   | `load_graph_csv`, `load_graph_reader`                      |
//! | [`error`]    | `GraphError`, `GraphResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the id and edge-pair indices. |
//! | `serde`   | Derives `Serialize`/`Deserialize` (`ShortestPath`: `Serialize` only). |
//!
//! # Example
//!
//! ```
//! use rd_core::{TrafficCondition, VertexId};
//! use rd_graph::{CityGraph, EdgeWeights};
//!
//! let mut g = CityGraph::new();
//! g.add_vertex(VertexId(0), 0.0, 0.0)?;
//! g.add_vertex(VertexId(1), 1.0, 0.0)?;
//! g.add_edge(VertexId(0), VertexId(1), EdgeWeights::new(5.0, 8.0, 20.0)?)?;
//!
//! let path = g.shortest_path(VertexId(0), VertexId(1), TrafficCondition::RushHour)?;
//! assert_eq!(path.cost(), 20.0);
//! # Ok::<(), rd_graph::GraphError>(())
//! ```

pub mod describe;
pub mod error;
pub mod graph;
pub mod loader;
pub mod router;
pub mod weights;


pub use describe::{describe_path, PathDescription, PathStep};
pub use error::{GraphError, GraphResult};
pub use graph::{CityGraph, Edge, Vertex};
pub use loader::{load_graph_csv, load_graph_reader};
pub use router::{DijkstraRouter, Router, ShortestPath};
pub use weights::EdgeWeights;

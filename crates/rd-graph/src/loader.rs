//! CSV map loader.
//!
//! # CSV format
//!
//! Two files.  Vertices, one row per location, with optional `name` and
//! `zone` columns copied onto [`Vertex::label`] and [`Vertex::zone`]:
//!
//! ```csv
//! id,x,y,name,zone
//! 0,0,0,Central Plaza,downtown
//! 1,2,2,,
//! ```
//!
//! Edges, one row per undirected road, weights in minutes:
//!
//! ```csv
//! a,b,light,normal,rush_hour
//! 0,1,5,8,20
//! ```
//!
//! An empty weight cell is a missing traffic condition and fails the load
//! with [`GraphError::InvalidWeight`].  Any other columns are ignored.  All
//! vertices are inserted before any edge, so edge rows may
//! reference vertices in any order.
//!
//! [`Vertex::label`]: crate::Vertex::label
//! [`Vertex::zone`]: crate::Vertex::zone

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use rd_core::{TrafficCondition, VertexId};

use crate::{CityGraph, EdgeWeights, GraphError, GraphResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct VertexRecord {
    id:   u32,
    x:    f64,
    y:    f64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    zone: Option<String>,
}

#[derive(Deserialize)]
struct EdgeRecord {
    a:         u32,
    b:         u32,
    light:     Option<f64>,
    normal:    Option<f64>,
    rush_hour: Option<f64>,
}

impl EdgeRecord {
    fn weights(&self) -> GraphResult<EdgeWeights> {
        let pairs = [
            (TrafficCondition::Light,    self.light),
            (TrafficCondition::Normal,   self.normal),
            (TrafficCondition::RushHour, self.rush_hour),
        ];
        EdgeWeights::from_pairs(pairs.into_iter().filter_map(|(c, w)| w.map(|w| (c, w))))
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`CityGraph`] from a vertex CSV file and an edge CSV file.
pub fn load_graph_csv(vertices: &Path, edges: &Path) -> GraphResult<CityGraph> {
    let vertex_file = std::fs::File::open(vertices)?;
    let edge_file   = std::fs::File::open(edges)?;
    load_graph_reader(vertex_file, edge_file)
}

/// Like [`load_graph_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `std::io::Cursor` or `&[u8]`) or for maps
/// embedded with `include_str!`.
pub fn load_graph_reader<V: Read, E: Read>(vertices: V, edges: E) -> GraphResult<CityGraph> {
    let mut graph = CityGraph::new();

    // ── Vertices ──────────────────────────────────────────────────────────
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(vertices);
    for result in rdr.deserialize::<VertexRecord>() {
        let row = result.map_err(|e| GraphError::Parse(format!("vertex row: {e}")))?;
        let id = VertexId(row.id);
        graph.add_vertex(id, row.x, row.y)?;
        if let Some(name) = row.name.filter(|n| !n.is_empty()) {
            graph.set_label(id, name)?;
        }
        if let Some(zone) = row.zone.filter(|z| !z.is_empty()) {
            graph.set_zone(id, zone)?;
        }
    }

    // ── Edges ─────────────────────────────────────────────────────────────
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(edges);
    for result in rdr.deserialize::<EdgeRecord>() {
        let row = result.map_err(|e| GraphError::Parse(format!("edge row: {e}")))?;
        let weights = row.weights()?;
        graph.add_edge(VertexId(row.a), VertexId(row.b), weights)?;
    }

    Ok(graph)
}

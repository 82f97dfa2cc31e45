//! Export the city map for the visualization layer.
//!
//! Writes `output/city/map.json`:
//!
//! ```text
//! { "vertices": [{id, pos: {x, y}, label, zone}, …],
//!   "edges":    [{a, b, weights: {light, normal, rush_hour}}, …] }
//! ```
//!
//! Run with: `cargo run -p city --bin export_map`

mod map;

use std::fs;

use anyhow::Result;
use serde::Serialize;

use rd_graph::{Edge, Vertex};

use map::build_city;

#[derive(Serialize)]
struct MapExport<'a> {
    vertices: Vec<&'a Vertex>,
    edges:    Vec<&'a Edge>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let graph = build_city()?;
    let export = MapExport {
        vertices: graph.vertices().collect(),
        edges:    graph.edges().map(|(_, e)| e).collect(),
    };

    fs::create_dir_all("output/city")?;
    let json = serde_json::to_string_pretty(&export)?;
    fs::write("output/city/map.json", &json)?;
    log::info!(
        "wrote output/city/map.json ({} vertices, {} edges)",
        export.vertices.len(),
        export.edges.len()
    );

    Ok(())
}

//! Shared four-zone city map.
//!
//! 30 locations in four bands (downtown core, inner residential, outer
//! residential, commercial/industrial) joined by 42 roads.  Each vertex row
//! names its place and its band (`zone` column) so the export can colour by
//! zone without relying on id ranges.  The map is
//! configuration: both binaries embed the CSV files under `data/` and parse
//! them through the `rd-graph` loader.
//!
//! West Hills (8) and South Vale (9) only connect to each other, so the map
//! has one detached pocket.

use rd_graph::{load_graph_reader, CityGraph, GraphResult};

const VERTICES_CSV: &str = include_str!("../data/vertices.csv");
const EDGES_CSV:    &str = include_str!("../data/edges.csv");

/// Build the city graph from the embedded map data.
pub fn build_city() -> GraphResult<CityGraph> {
    load_graph_reader(VERTICES_CSV.as_bytes(), EDGES_CSV.as_bytes())
}

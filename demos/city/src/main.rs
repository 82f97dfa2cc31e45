//! city — dispatch demo over the four-zone city map.
//!
//! Stations a handful of units, reports incidents under each traffic
//! condition, and prints the dispatch summary and turn-by-turn route for
//! each.  A batch of incidents is then reported from several threads at once
//! through a `SharedDispatcher` while another unit comes on duty.

mod map;

use std::thread;

use anyhow::Result;

use rd_core::{TrafficCondition, UnitId, VertexId};
use rd_dispatch::{Dispatch, DispatchError, Dispatcher, SharedDispatcher};

use map::build_city;

// ── Scenario ──────────────────────────────────────────────────────────────────

/// `(unit, station)` pairs placed at start-up.
const UNITS: [(&str, u32); 4] = [
    ("C1", 0),  // Central Plaza
    ("C2", 14), // Far North Heights
    ("C3", 29), // Southwest Shopping Center
    ("C4", 8),  // West Hills (detached pocket)
];

/// `(incident vertex, condition)` reports handled one at a time.
const INCIDENTS: [(u32, TrafficCondition); 4] = [
    (19, TrafficCondition::Light),
    (22, TrafficCondition::RushHour),
    (9,  TrafficCondition::Normal),
    (27, TrafficCondition::Normal),
];

/// Reports issued from separate threads against the shared dispatcher.
const CONCURRENT: [(u32, TrafficCondition); 3] = [
    (25, TrafficCondition::RushHour),
    (24, TrafficCondition::Light),
    (20, TrafficCondition::Normal),
];

// ── Output helpers ────────────────────────────────────────────────────────────

fn print_dispatch(dispatcher: &Dispatcher, hit: &Dispatch) -> Result<()> {
    println!("Dispatch summary ({} traffic)", hit.condition);
    println!("  Nearest unit:           {}", hit.unit);
    println!("  Departs from vertex:    {}", hit.origin);
    println!("  Estimated arrival time: {} minutes", hit.cost());
    println!("Route details:");
    let description = dispatcher.get_path_description(hit.path.vertices(), hit.condition)?;
    for line in description.to_string().lines() {
        println!("  {line}");
    }
    println!();
    Ok(())
}

fn print_assignments(units: &[(UnitId, VertexId)], dispatcher: &Dispatcher) {
    if units.is_empty() {
        println!("No units currently assigned");
        return;
    }
    println!("{:<8} {:<8} {:<12} {}", "Unit", "Vertex", "Position", "Location");
    println!("{}", "-".repeat(56));
    for (unit, vertex) in units {
        let Some(v) = dispatcher.graph().vertex(*vertex) else {
            println!("{:<8} {:<8} {:<12} ?", unit, vertex, "?");
            continue;
        };
        let place = v.label.as_deref().unwrap_or("-");
        println!("{:<8} {:<8} {:<12} {}", unit, vertex, v.pos.to_string(), place);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 1. Build the map.
    let graph = build_city()?;
    log::info!(
        "city map loaded: {} vertices, {} edges",
        graph.vertex_count(),
        graph.edge_count()
    );

    // 2. Station units.
    let mut dispatcher = Dispatcher::new(graph);
    for (unit, station) in UNITS {
        dispatcher.add_unit(unit, VertexId(station))?;
        log::info!("unit {unit} assigned to vertex {station}");
    }

    // 3. Report incidents one at a time.
    println!();
    for (incident, condition) in INCIDENTS {
        println!("=== Incident at vertex {incident} ===");
        match dispatcher.find_nearest_unit(VertexId(incident), condition) {
            Ok(hit) => print_dispatch(&dispatcher, &hit)?,
            Err(DispatchError::NoReachableUnit { incident }) => {
                log::warn!("no unit can reach vertex {incident}");
            }
            Err(e) => return Err(e.into()),
        }
    }

    // 4. Take C4 off duty: the detached pocket is now out of reach.
    let at = dispatcher.remove_unit(&UnitId::from("C4"))?;
    log::info!("unit C4 removed from duty at vertex {at}");
    match dispatcher.find_nearest_unit(VertexId(9), TrafficCondition::Normal) {
        Err(DispatchError::NoReachableUnit { incident }) => {
            println!("No officers can reach vertex {incident}");
            println!();
        }
        other => log::warn!("expected vertex 9 to be unreachable, got {other:?}"),
    }

    // 5. Concurrent reports against a shared dispatcher.
    let shared = SharedDispatcher::from(dispatcher);
    let hits: Vec<Result<Dispatch, DispatchError>> = thread::scope(|s| {
        let reporters: Vec<_> = CONCURRENT
            .into_iter()
            .map(|(incident, condition)| {
                let handle = shared.clone();
                s.spawn(move || handle.find_nearest_unit(VertexId(incident), condition))
            })
            .collect();
        let writer = shared.clone();
        s.spawn(move || {
            if let Err(e) = writer.add_unit("C5", VertexId(26)) {
                log::warn!("could not station C5: {e}");
            }
        });
        reporters
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    });

    println!("=== Concurrent reports ===");
    for hit in hits {
        match hit {
            Ok(hit) => println!(
                "  vertex {:<3} ← {} ({} minutes, {} traffic)",
                hit.incident(),
                hit.unit,
                hit.cost(),
                hit.condition
            ),
            Err(e) => log::warn!("report failed: {e}"),
        }
    }
    println!();

    // 6. Final assignments.
    let units = shared.units();
    print_assignments(&units, &shared.read());

    Ok(())
}

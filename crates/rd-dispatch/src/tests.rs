//! Unit tests for rd-dispatch.

#[cfg(test)]
mod helpers {
    use rd_core::VertexId;
    use rd_graph::{CityGraph, EdgeWeights};

    use crate::Dispatcher;

    pub fn w(light: f64, normal: f64, rush_hour: f64) -> EdgeWeights {
        EdgeWeights::new(light, normal, rush_hour).unwrap()
    }

    /// A=(0,0) ─ B=(1,0) ─ C=(2,0), normal weight 10 each, light 5 each.
    /// D=(5,5) is isolated.
    pub fn line_graph() -> CityGraph {
        let mut g = CityGraph::new();
        g.add_vertex(VertexId(0), 0.0, 0.0).unwrap();
        g.add_vertex(VertexId(1), 1.0, 0.0).unwrap();
        g.add_vertex(VertexId(2), 2.0, 0.0).unwrap();
        g.add_vertex(VertexId(3), 5.0, 5.0).unwrap();
        g.add_edge(VertexId(0), VertexId(1), w(5.0, 10.0, 30.0)).unwrap();
        g.add_edge(VertexId(1), VertexId(2), w(5.0, 10.0, 30.0)).unwrap();
        g
    }

    pub fn line() -> Dispatcher {
        Dispatcher::new(line_graph())
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod registry {
    use rd_core::{UnitId, VertexId};

    use super::helpers::line;
    use crate::{DispatchError, UnitRegistry};

    #[test]
    fn add_and_remove() {
        let mut d = line();
        d.add_unit("U1", VertexId(1)).unwrap();
        assert_eq!(d.registry().location(&UnitId::from("U1")), Some(VertexId(1)));
        assert_eq!(d.remove_unit(&UnitId::from("U1")).unwrap(), VertexId(1));
        assert!(d.registry().is_empty());
    }

    #[test]
    fn unknown_vertex_rejected() {
        let mut d = line();
        let err = d.add_unit("U1", VertexId(40)).unwrap_err();
        assert!(matches!(err, DispatchError::UnknownVertex(VertexId(40))));
        assert!(d.registry().is_empty());
    }

    #[test]
    fn duplicate_unit_rejected() {
        let mut d = line();
        d.add_unit("U1", VertexId(0)).unwrap();
        let err = d.add_unit("U1", VertexId(2)).unwrap_err();
        assert!(matches!(err, DispatchError::DuplicateUnit { at: VertexId(0), .. }));
        // Assignment unchanged.
        assert_eq!(d.registry().location(&UnitId::from("U1")), Some(VertexId(0)));
    }

    #[test]
    fn reassign_after_remove() {
        let mut d = line();
        d.add_unit("U1", VertexId(0)).unwrap();
        d.remove_unit(&UnitId::from("U1")).unwrap();
        d.add_unit("U1", VertexId(2)).unwrap();
        assert_eq!(d.registry().location(&UnitId::from("U1")), Some(VertexId(2)));
    }

    #[test]
    fn remove_unknown_unit() {
        let mut d = line();
        let err = d.remove_unit(&UnitId::from("ghost")).unwrap_err();
        assert!(matches!(err, DispatchError::UnknownUnit(u) if u.as_str() == "ghost"));
    }

    #[test]
    fn enumeration_is_ordered() {
        let mut reg = UnitRegistry::new();
        reg.assign("C2".into(), VertexId(5)).unwrap();
        reg.assign("A1".into(), VertexId(5)).unwrap();
        reg.assign("B7".into(), VertexId(1)).unwrap();

        let names: Vec<&str> = reg.units().map(|(u, _)| u.as_str()).collect();
        assert_eq!(names, ["A1", "B7", "C2"]);

        let at5: Vec<&str> = reg.units_at(VertexId(5)).map(UnitId::as_str).collect();
        assert_eq!(at5, ["A1", "C2"]);

        assert_eq!(reg.occupied_vertices(), [VertexId(1), VertexId(5)]);
        assert_eq!(reg.len(), 3);
        assert!(reg.contains(&UnitId::from("B7")));
    }
}

// ── Nearest unit ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod nearest {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rd_core::{TrafficCondition, UnitId, VertexId};
    use rd_graph::{CityGraph, DijkstraRouter, GraphResult, Router, ShortestPath};

    use super::helpers::{line, line_graph, w};
    use crate::{DispatchError, Dispatcher};

    #[test]
    fn single_unit_next_door() {
        let mut d = line();
        d.add_unit("U1", VertexId(1)).unwrap();
        let hit = d.find_nearest_unit(VertexId(2), TrafficCondition::Normal).unwrap();
        assert_eq!(hit.unit.as_str(), "U1");
        assert_eq!(hit.origin, VertexId(1));
        assert_eq!(hit.cost(), 10.0);
        assert_eq!(hit.path.vertices(), [VertexId(1), VertexId(2)]);
        assert_eq!(hit.incident(), VertexId(2));
        assert_eq!(hit.condition, TrafficCondition::Normal);
    }

    #[test]
    fn empty_registry() {
        let d = line();
        let err = d.find_nearest_unit(VertexId(0), TrafficCondition::Light).unwrap_err();
        assert!(matches!(err, DispatchError::NoUnitsAvailable));
    }

    #[test]
    fn unknown_incident_checked_before_empty_registry() {
        let d = line();
        let err = d.find_nearest_unit(VertexId(99), TrafficCondition::Normal).unwrap_err();
        assert!(matches!(err, DispatchError::UnknownVertex(VertexId(99))));
    }

    #[test]
    fn picks_cheapest_unit() {
        let mut d = line();
        d.add_unit("far", VertexId(0)).unwrap();
        d.add_unit("near", VertexId(1)).unwrap();
        let hit = d.find_nearest_unit(VertexId(2), TrafficCondition::RushHour).unwrap();
        assert_eq!(hit.unit.as_str(), "near");
        assert_eq!(hit.cost(), 30.0);
    }

    #[test]
    fn unit_at_incident_costs_nothing() {
        let mut d = line();
        d.add_unit("B", VertexId(0)).unwrap();
        d.add_unit("Z", VertexId(2)).unwrap();
        let hit = d.find_nearest_unit(VertexId(2), TrafficCondition::Normal).unwrap();
        assert_eq!(hit.unit.as_str(), "Z");
        assert!(hit.path.is_trivial());
        assert_eq!(hit.cost(), 0.0);
    }

    #[test]
    fn tie_goes_to_lowest_unit_id() {
        let mut d = line();
        // Both 10 minutes from vertex 1.
        d.add_unit("U9", VertexId(0)).unwrap();
        d.add_unit("U2", VertexId(2)).unwrap();
        let hit = d.find_nearest_unit(VertexId(1), TrafficCondition::Normal).unwrap();
        assert_eq!(hit.unit.as_str(), "U2");
        assert_eq!(hit.origin, VertexId(2));
    }

    #[test]
    fn fractional_tie_goes_to_lowest_unit_id() {
        // 0 ─0.1─ 1 ─0.2─ 2 ─0.3─ 3 ─0.3─ 4 ─0.2─ 5 ─0.1─ 6, incident at 3.
        // "A" sums 0.1 + 0.2 + 0.3, "B" sums 0.3 + 0.2 + 0.1: both 0.6.
        let mut g = CityGraph::new();
        for id in 0..7 {
            g.add_vertex(VertexId(id), f64::from(id), 0.0).unwrap();
        }
        for (a, minutes) in [(0, 0.1), (1, 0.2), (2, 0.3), (3, 0.3), (4, 0.2), (5, 0.1)] {
            g.add_edge(VertexId(a), VertexId(a + 1), w(minutes, minutes, minutes)).unwrap();
        }
        let mut d = Dispatcher::new(g);
        d.add_unit("B", VertexId(6)).unwrap();
        d.add_unit("A", VertexId(0)).unwrap();

        let hit = d.find_nearest_unit(VertexId(3), TrafficCondition::Normal).unwrap();
        assert_eq!(hit.unit.as_str(), "A");
        assert_eq!(hit.cost(), 0.6);
    }

    #[test]
    fn tie_at_same_vertex() {
        let mut d = line();
        d.add_unit("beta", VertexId(0)).unwrap();
        d.add_unit("alpha", VertexId(0)).unwrap();
        let hit = d.find_nearest_unit(VertexId(2), TrafficCondition::Light).unwrap();
        assert_eq!(hit.unit.as_str(), "alpha");
        assert_eq!(hit.cost(), 10.0);
    }

    #[test]
    fn unreachable_units_skipped() {
        let mut d = line();
        d.add_unit("island", VertexId(3)).unwrap();
        d.add_unit("mainland", VertexId(0)).unwrap();
        let hit = d.find_nearest_unit(VertexId(2), TrafficCondition::Normal).unwrap();
        assert_eq!(hit.unit.as_str(), "mainland");
    }

    #[test]
    fn no_reachable_unit() {
        let mut d = line();
        d.add_unit("island", VertexId(3)).unwrap();
        let err = d.find_nearest_unit(VertexId(0), TrafficCondition::Normal).unwrap_err();
        assert!(matches!(err, DispatchError::NoReachableUnit { incident: VertexId(0) }));
    }

    #[test]
    fn never_worse_than_any_other_unit() {
        let mut g = line_graph();
        g.add_vertex(VertexId(4), 1.0, 1.0).unwrap();
        g.add_edge(VertexId(4), VertexId(0), w(3.0, 4.0, 40.0)).unwrap();
        g.add_edge(VertexId(4), VertexId(2), w(9.0, 4.0, 4.0)).unwrap();
        let mut d = Dispatcher::new(g);
        for (unit, v) in [("a", 0), ("b", 1), ("c", 2), ("d", 4)] {
            d.add_unit(unit, VertexId(v)).unwrap();
        }

        for incident in [0, 1, 2, 4] {
            for c in TrafficCondition::ALL {
                let hit = d.find_nearest_unit(VertexId(incident), c).unwrap();
                for (_, origin) in d.registry().units() {
                    let other = d.shortest_path(origin, VertexId(incident), c).unwrap();
                    assert!(hit.cost() <= other.cost(), "incident {incident} under {c}");
                }
            }
        }
    }

    #[test]
    fn condition_changes_choice() {
        let mut g = line_graph();
        g.add_vertex(VertexId(4), 1.0, 1.0).unwrap();
        // Unit at 4 is slow in light traffic but unaffected by rush hour.
        g.add_edge(VertexId(4), VertexId(2), w(12.0, 12.0, 12.0)).unwrap();
        let mut d = Dispatcher::new(g);
        d.add_unit("line", VertexId(1)).unwrap();
        d.add_unit("bypass", VertexId(4)).unwrap();

        let light = d.find_nearest_unit(VertexId(2), TrafficCondition::Light).unwrap();
        assert_eq!(light.unit.as_str(), "line");
        let rush = d.find_nearest_unit(VertexId(2), TrafficCondition::RushHour).unwrap();
        assert_eq!(rush.unit.as_str(), "bypass");
    }

    #[test]
    fn removed_unit_no_longer_dispatched() {
        let mut d = line();
        d.add_unit("near", VertexId(1)).unwrap();
        d.add_unit("far", VertexId(0)).unwrap();
        d.remove_unit(&UnitId::from("near")).unwrap();
        let hit = d.find_nearest_unit(VertexId(2), TrafficCondition::Normal).unwrap();
        assert_eq!(hit.unit.as_str(), "far");
        assert_eq!(hit.cost(), 20.0);
    }

    #[test]
    fn description_of_dispatch_route() {
        let mut d = line();
        d.add_unit("U1", VertexId(0)).unwrap();
        let hit = d.find_nearest_unit(VertexId(2), TrafficCondition::Normal).unwrap();
        let text = d
            .get_path_description(hit.path.vertices(), hit.condition)
            .unwrap()
            .to_string();
        assert!(text.starts_with("From vertex 0 go east to vertex 1"));
        assert!(text.ends_with("Total time: 20 minutes"));
    }

    /// Dijkstra wrapper counting how many queries it serves.
    #[derive(Default)]
    struct CountingRouter {
        calls: AtomicUsize,
    }

    impl Router for CountingRouter {
        fn route(
            &self,
            graph:     &CityGraph,
            source:    VertexId,
            target:    VertexId,
            condition: TrafficCondition,
        ) -> GraphResult<ShortestPath> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            DijkstraRouter.route(graph, source, target, condition)
        }
    }

    #[test]
    fn one_query_per_occupied_vertex() {
        let mut d = Dispatcher::with_router(line_graph(), CountingRouter::default());
        for unit in ["a", "b", "c"] {
            d.add_unit(unit, VertexId(0)).unwrap();
        }
        d.add_unit("d", VertexId(1)).unwrap();
        d.find_nearest_unit(VertexId(2), TrafficCondition::Normal).unwrap();
        assert_eq!(d.router().calls.load(Ordering::Relaxed), 2);
    }
}

// ── Shared handle ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod shared {
    use std::thread;

    use rd_core::{TrafficCondition, UnitId, VertexId};

    use super::helpers::{line, w};
    use crate::{DispatchError, SharedDispatcher};

    #[test]
    fn mutations_visible_to_clones() {
        let shared = SharedDispatcher::from(line());
        let other = shared.clone();
        shared.add_vertex(VertexId(10), 3.0, 0.0).unwrap();
        shared.add_edge(VertexId(2), VertexId(10), w(1.0, 2.0, 3.0)).unwrap();
        other.add_unit("U1", VertexId(10)).unwrap();

        let hit = shared.find_nearest_unit(VertexId(0), TrafficCondition::Normal).unwrap();
        assert_eq!(hit.unit.as_str(), "U1");
        assert_eq!(hit.cost(), 22.0);
        assert_eq!(other.units(), [(UnitId::from("U1"), VertexId(10))]);
    }

    #[test]
    fn unknown_vertex_has_one_shape() {
        let shared = SharedDispatcher::from(line());
        assert!(matches!(
            shared.add_edge(VertexId(0), VertexId(50), w(1.0, 1.0, 1.0)),
            Err(DispatchError::UnknownVertex(VertexId(50)))
        ));
        assert!(matches!(
            shared.shortest_path(VertexId(51), VertexId(0), TrafficCondition::Normal),
            Err(DispatchError::UnknownVertex(VertexId(51)))
        ));
        assert!(matches!(
            shared.get_path_description(&[VertexId(0), VertexId(52)], TrafficCondition::Normal),
            Err(DispatchError::UnknownVertex(VertexId(52)))
        ));
        assert!(matches!(
            shared.add_unit("U1", VertexId(53)),
            Err(DispatchError::UnknownVertex(VertexId(53)))
        ));
    }

    #[test]
    fn errors_pass_through() {
        let shared = SharedDispatcher::from(line());
        assert!(matches!(
            shared.remove_unit(&UnitId::from("nobody")),
            Err(DispatchError::UnknownUnit(_))
        ));
        assert!(matches!(
            shared.add_vertex(VertexId(0), 0.0, 0.0),
            Err(DispatchError::Graph(rd_graph::GraphError::DuplicateVertex(_)))
        ));
    }

    #[test]
    fn concurrent_readers_agree() {
        let shared = SharedDispatcher::from(line());
        shared.add_unit("U1", VertexId(0)).unwrap();
        shared.add_unit("U2", VertexId(2)).unwrap();

        let expected = shared.find_nearest_unit(VertexId(1), TrafficCondition::Normal).unwrap();

        thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let h = shared.clone();
                    s.spawn(move || {
                        (0..50)
                            .map(|_| h.find_nearest_unit(VertexId(1), TrafficCondition::Normal).unwrap())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            for handle in handles {
                for hit in handle.join().unwrap() {
                    assert_eq!(hit, expected);
                }
            }
        });
    }

    #[test]
    fn readers_and_writer_interleave() {
        let shared = SharedDispatcher::from(line());
        shared.add_unit("base", VertexId(0)).unwrap();

        thread::scope(|s| {
            let writer = shared.clone();
            s.spawn(move || {
                for i in 0..20 {
                    writer.add_unit(format!("extra-{i}"), VertexId(1)).unwrap();
                }
            });
            for _ in 0..4 {
                let reader = shared.clone();
                s.spawn(move || {
                    for _ in 0..50 {
                        let hit = reader.find_nearest_unit(VertexId(2), TrafficCondition::Normal).unwrap();
                        // Either only "base" (20 min) or an extra unit at vertex 1 (10 min).
                        assert!(hit.cost() == 20.0 || hit.cost() == 10.0);
                    }
                });
            }
        });

        assert_eq!(shared.units().len(), 21);
    }

    #[test]
    fn read_guard_spans_queries() {
        let shared = SharedDispatcher::from(line());
        let guard = shared.read();
        let p = guard.shortest_path(VertexId(0), VertexId(2), TrafficCondition::Light).unwrap();
        let d = guard.get_path_description(p.vertices(), TrafficCondition::Light).unwrap();
        assert_eq!(d.total_cost, p.cost());
    }
}

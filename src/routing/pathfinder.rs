//! Route search over the connector graph
//!
//! The search walks buildings depth-first through connectors, keeping the
//! shortest building sequence found. A revisit of a building already on
//! the best route can still improve it: the prefix that reached it faster
//! is spliced onto the best route's tail. The result is a building chain;
//! materialization turns it into hatch-level waypoints.

use ahash::AHashSet;

use crate::connection::connector::Connector;
use crate::connection::graph::ConnectorGraph;
use crate::core::error::{AuroraError, Result};
use crate::core::types::{BuildingId, ConnectorId};
use crate::routing::path::{BuildingLocation, InteriorPath, Waypoint};
use crate::settlement::building::Settlement;

/// Finds walkable interior routes for one settlement.
pub struct PathFinder<'a> {
    settlement: &'a Settlement,
    graph: &'a ConnectorGraph,
}

impl<'a> PathFinder<'a> {
    pub fn new(settlement: &'a Settlement, graph: &'a ConnectorGraph) -> Self {
        Self { settlement, graph }
    }

    /// Whether any connector route joins the two buildings.
    pub fn has_valid_path(&self, from: BuildingId, to: BuildingId) -> bool {
        let reachable = RouteSearch::new(self.graph, from, to).run().is_some();
        if !reachable {
            tracing::debug!("no connector route between {:?} and {:?}", from, to);
        }
        reachable
    }

    /// Shortest interior path between two positions, or `None` when the
    /// buildings are not connected.
    pub fn shortest_path(
        &self,
        origin: BuildingLocation,
        destination: BuildingLocation,
    ) -> Result<Option<InteriorPath>> {
        self.settlement.building(origin.building)?;
        self.settlement.building(destination.building)?;
        let Some(route) = RouteSearch::new(self.graph, origin.building, destination.building).run()
        else {
            tracing::debug!(
                "no route from {:?} to {:?}",
                origin.building,
                destination.building
            );
            return Ok(None);
        };
        Ok(Some(self.materialize(&route, origin, destination)?))
    }

    /// Expand a building chain into waypoints: origin, then per boundary a
    /// connector crossing, a stop at each pass-through building's center,
    /// and finally the destination.
    fn materialize(
        &self,
        route: &[BuildingId],
        origin: BuildingLocation,
        destination: BuildingLocation,
    ) -> Result<InteriorPath> {
        let mut waypoints = vec![Waypoint::Inside(origin)];
        for pair in route.windows(2) {
            let (current, next) = (pair[0], pair[1]);
            if current == next {
                continue;
            }
            let (id, connector) = self
                .graph
                .between(current, next)
                .next()
                .ok_or(AuroraError::RouteGap { from: current, to: next })?;
            push_crossing(&mut waypoints, id, connector, current)?;
            if next != destination.building {
                let through = self.settlement.building(next)?;
                waypoints.push(Waypoint::Inside(BuildingLocation::new(
                    next,
                    through.footprint.position,
                )));
            }
        }
        waypoints.push(Waypoint::Inside(destination));
        Ok(InteriorPath::from_waypoints(waypoints))
    }
}

/// Waypoints for one connector crossing, walking out of `from`.
///
/// A split connector is three stops, hatch to center to far hatch; a
/// flush one is just the shared center.
fn push_crossing(
    waypoints: &mut Vec<Waypoint>,
    id: ConnectorId,
    connector: &Connector,
    from: BuildingId,
) -> Result<()> {
    if connector.is_split() {
        let (near, far) = connector.ends_for_travel(from)?;
        waypoints.push(Waypoint::Hatch { connector: id, hatch: *near });
        waypoints.push(Waypoint::ConnectorCenter { connector: id, position: connector.position() });
        waypoints.push(Waypoint::Hatch { connector: id, hatch: *far });
    } else {
        waypoints.push(Waypoint::ConnectorCenter { connector: id, position: connector.position() });
    }
    Ok(())
}

/// One depth-first search for the shortest building chain.
///
/// `visited` is global across the whole search. A visited building is
/// never expanded again; re-encountering one only feeds the splice
/// improvement. Neighbor order follows connector id order, so results are
/// deterministic for a given graph history.
struct RouteSearch<'a> {
    graph: &'a ConnectorGraph,
    start: BuildingId,
    target: BuildingId,
    visited: AHashSet<BuildingId>,
    route: Vec<BuildingId>,
    best: Option<Vec<BuildingId>>,
}

enum Step {
    Enter(BuildingId),
    Retreat,
}

impl<'a> RouteSearch<'a> {
    fn new(graph: &'a ConnectorGraph, start: BuildingId, target: BuildingId) -> Self {
        Self {
            graph,
            start,
            target,
            visited: AHashSet::new(),
            route: Vec::new(),
            best: None,
        }
    }

    /// The shortest chain from start to target, endpoints included.
    fn run(mut self) -> Option<Vec<BuildingId>> {
        if self.start == self.target {
            return Some(vec![self.start, self.target]);
        }
        let mut stack = vec![Step::Enter(self.start)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(building) => self.enter(building, &mut stack),
                Step::Retreat => {
                    self.route.pop();
                }
            }
        }
        self.best
    }

    fn enter(&mut self, building: BuildingId, stack: &mut Vec<Step>) {
        if self.visited.contains(&building) {
            self.splice_shortcut(building);
            return;
        }
        if let Some(best) = &self.best {
            if self.route.len() >= best.len() {
                return;
            }
        }
        self.visited.insert(building);
        self.route.push(building);
        stack.push(Step::Retreat);
        if building == self.target {
            if self.best.as_ref().map_or(true, |best| self.route.len() < best.len()) {
                self.best = Some(self.route.clone());
            }
            return;
        }
        let mut neighbors = Vec::new();
        for (_, connector) in self.graph.touching(building) {
            let [a, b] = connector.buildings();
            neighbors.push(if a == building { b } else { a });
        }
        // Reversed push keeps expansion in connector id order off the stack.
        for next in neighbors.into_iter().rev() {
            stack.push(Step::Enter(next));
        }
    }

    /// A shorter prefix just reached a building on the best route; graft
    /// the best route's tail onto it.
    fn splice_shortcut(&mut self, building: BuildingId) {
        let Some(best) = &self.best else { return };
        let Some(at) = best.iter().position(|&b| b == building) else { return };
        if self.route.len() < at {
            let mut improved = self.route.clone();
            improved.extend_from_slice(&best[at..]);
            self.best = Some(improved);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::hatch::Hatch;
    use crate::settlement::building::BuildingKind;
    use crate::settlement::template::BuildingTemplate;
    use glam::DVec2;

    fn habitat(id: &str, x: f64, y: f64) -> BuildingTemplate {
        BuildingTemplate {
            id: id.to_string(),
            name: id.to_string(),
            kind: BuildingKind::Habitat,
            width: 9.0,
            length: 9.0,
            position: DVec2::new(x, y),
            facing: 0.0,
            connections: Vec::new(),
        }
    }

    fn settle(templates: &[BuildingTemplate]) -> Settlement {
        let mut settlement = Settlement::new("Routing Test");
        for t in templates {
            settlement.add_building(t).unwrap();
        }
        settlement
    }

    fn join(graph: &mut ConnectorGraph, a: BuildingId, ap: DVec2, b: BuildingId, bp: DVec2) {
        graph
            .add(Connector::link(Hatch::new(a, ap, 0.0), Hatch::new(b, bp, 0.0)))
            .unwrap();
    }

    /// Chain a-b-c-d-e plus a direct a-d connector.
    fn shortcut_graph(direct_first: bool) -> (Settlement, ConnectorGraph) {
        let settlement = settle(&[
            habitat("a", 0.0, 0.0),
            habitat("b", 0.0, 10.0),
            habitat("c", 0.0, 20.0),
            habitat("d", 0.0, 30.0),
            habitat("e", 0.0, 40.0),
        ]);
        let ids: Vec<BuildingId> = settlement.iter().map(|b| b.id).collect();
        let mut graph = ConnectorGraph::new();
        let direct =
            |g: &mut ConnectorGraph| join(g, ids[0], DVec2::new(3.0, 4.5), ids[3], DVec2::new(3.0, 25.5));
        if direct_first {
            direct(&mut graph);
        }
        for i in 0..4 {
            let y = 10.0 * i as f64;
            join(&mut graph, ids[i], DVec2::new(0.0, y + 4.5), ids[i + 1], DVec2::new(0.0, y + 5.5));
        }
        if !direct_first {
            direct(&mut graph);
        }
        (settlement, graph)
    }

    #[test]
    fn test_search_same_building_is_trivial() {
        let settlement = settle(&[habitat("a", 0.0, 0.0)]);
        let graph = ConnectorGraph::new();
        let a = settlement.by_plan_id("a").unwrap().id;
        let route = RouteSearch::new(&graph, a, a).run().unwrap();
        assert_eq!(route, vec![a, a]);
    }

    #[test]
    fn test_search_linear_chain() {
        let settlement = settle(&[
            habitat("a", 0.0, 0.0),
            habitat("b", 0.0, 10.0),
            habitat("c", 0.0, 20.0),
        ]);
        let ids: Vec<BuildingId> = settlement.iter().map(|b| b.id).collect();
        let mut graph = ConnectorGraph::new();
        join(&mut graph, ids[0], DVec2::new(0.0, 4.5), ids[1], DVec2::new(0.0, 5.5));
        join(&mut graph, ids[1], DVec2::new(0.0, 14.5), ids[2], DVec2::new(0.0, 15.5));
        let route = RouteSearch::new(&graph, ids[0], ids[2]).run().unwrap();
        assert_eq!(route, vec![ids[0], ids[1], ids[2]]);
    }

    #[test]
    fn test_search_unreachable_is_none() {
        let settlement = settle(&[habitat("a", 0.0, 0.0), habitat("b", 0.0, 50.0)]);
        let ids: Vec<BuildingId> = settlement.iter().map(|b| b.id).collect();
        let graph = ConnectorGraph::new();
        assert!(RouteSearch::new(&graph, ids[0], ids[1]).run().is_none());
    }

    #[test]
    fn test_search_splices_late_shortcut() {
        // The long chain is explored first; the direct connector is only
        // seen on a revisit, and still wins through the splice.
        let (settlement, graph) = shortcut_graph(false);
        let ids: Vec<BuildingId> = settlement.iter().map(|b| b.id).collect();
        let route = RouteSearch::new(&graph, ids[0], ids[4]).run().unwrap();
        assert_eq!(route, vec![ids[0], ids[3], ids[4]]);
    }

    #[test]
    fn test_search_takes_early_shortcut() {
        let (settlement, graph) = shortcut_graph(true);
        let ids: Vec<BuildingId> = settlement.iter().map(|b| b.id).collect();
        let route = RouteSearch::new(&graph, ids[0], ids[4]).run().unwrap();
        assert_eq!(route, vec![ids[0], ids[3], ids[4]]);
    }

    #[test]
    fn test_has_valid_path() {
        let settlement = settle(&[
            habitat("a", 0.0, 0.0),
            habitat("b", 0.0, 10.0),
            habitat("lone", 80.0, 80.0),
        ]);
        let ids: Vec<BuildingId> = settlement.iter().map(|b| b.id).collect();
        let mut graph = ConnectorGraph::new();
        join(&mut graph, ids[0], DVec2::new(0.0, 4.5), ids[1], DVec2::new(0.0, 5.5));
        let finder = PathFinder::new(&settlement, &graph);
        assert!(finder.has_valid_path(ids[0], ids[1]));
        assert!(finder.has_valid_path(ids[1], ids[1]));
        assert!(!finder.has_valid_path(ids[0], ids[2]));
    }

    #[test]
    fn test_shortest_path_waypoints() {
        // a-b split, b-c flush: seven waypoints, cursor already past the
        // origin.
        let settlement = settle(&[
            habitat("a", 0.0, 0.0),
            habitat("b", 0.0, 10.0),
            habitat("c", 0.0, 20.0),
        ]);
        let ids: Vec<BuildingId> = settlement.iter().map(|b| b.id).collect();
        let mut graph = ConnectorGraph::new();
        join(&mut graph, ids[0], DVec2::new(0.0, 4.5), ids[1], DVec2::new(0.0, 5.5));
        join(&mut graph, ids[1], DVec2::new(0.0, 15.0), ids[2], DVec2::new(0.0, 15.0));
        let finder = PathFinder::new(&settlement, &graph);

        let origin = BuildingLocation::new(ids[0], DVec2::new(0.0, -2.0));
        let destination = BuildingLocation::new(ids[2], DVec2::new(0.0, 22.0));
        let path = finder.shortest_path(origin, destination).unwrap().unwrap();

        let wps = path.waypoints();
        assert_eq!(wps.len(), 7);
        assert_eq!(wps[0], Waypoint::Inside(origin));
        assert!(matches!(wps[1], Waypoint::Hatch { hatch, .. } if hatch.position == DVec2::new(0.0, 4.5)));
        assert!(matches!(wps[2], Waypoint::ConnectorCenter { position, .. } if position == DVec2::new(0.0, 5.0)));
        assert!(matches!(wps[3], Waypoint::Hatch { hatch, .. } if hatch.position == DVec2::new(0.0, 5.5)));
        assert_eq!(
            wps[4],
            Waypoint::Inside(BuildingLocation::new(ids[1], DVec2::new(0.0, 10.0)))
        );
        assert!(matches!(wps[5], Waypoint::ConnectorCenter { position, .. } if position == DVec2::new(0.0, 15.0)));
        assert_eq!(wps[6], Waypoint::Inside(destination));

        assert_eq!(path.next_stop(), Some(&wps[1]));
        assert!((path.total_length() - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_shortest_path_within_one_building() {
        let settlement = settle(&[habitat("a", 0.0, 0.0)]);
        let graph = ConnectorGraph::new();
        let a = settlement.by_plan_id("a").unwrap().id;
        let finder = PathFinder::new(&settlement, &graph);
        let origin = BuildingLocation::new(a, DVec2::new(-1.0, 0.0));
        let destination = BuildingLocation::new(a, DVec2::new(2.0, 4.0));
        let path = finder.shortest_path(origin, destination).unwrap().unwrap();
        assert_eq!(path.waypoints().len(), 2);
        assert_eq!(path.next_stop(), Some(&Waypoint::Inside(destination)));
        assert!((path.total_length() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_shortest_path_disconnected_is_none() {
        let settlement = settle(&[habitat("a", 0.0, 0.0), habitat("b", 0.0, 50.0)]);
        let ids: Vec<BuildingId> = settlement.iter().map(|b| b.id).collect();
        let graph = ConnectorGraph::new();
        let finder = PathFinder::new(&settlement, &graph);
        let path = finder
            .shortest_path(
                BuildingLocation::new(ids[0], DVec2::ZERO),
                BuildingLocation::new(ids[1], DVec2::new(0.0, 50.0)),
            )
            .unwrap();
        assert!(path.is_none());
    }

    #[test]
    fn test_shortest_path_unknown_building_errors() {
        let settlement = settle(&[habitat("a", 0.0, 0.0)]);
        let graph = ConnectorGraph::new();
        let finder = PathFinder::new(&settlement, &graph);
        let err = finder.shortest_path(
            BuildingLocation::new(BuildingId(77), DVec2::ZERO),
            BuildingLocation::new(BuildingId(0), DVec2::ZERO),
        );
        assert!(matches!(err, Err(AuroraError::BuildingNotFound(BuildingId(77)))));
    }
}

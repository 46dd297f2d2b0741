//! Connector graph construction
//!
//! Two paths populate the graph. The template pass runs at founding: every
//! declared connection becomes a placed hatch stub, and stubs are matched
//! pairwise across buildings. The perimeter scan runs when a building is
//! added afterwards: its caps and sides are probed for neighbor walls in
//! reach, and connectors are inferred from the contact points.

use ahash::AHashMap;
use glam::DVec2;
use ordered_float::OrderedFloat;

use crate::connection::connector::Connector;
use crate::connection::graph::ConnectorGraph;
use crate::connection::hatch::Hatch;
use crate::core::config::{
    CAP_REACH_MARGIN, CAP_SWEEP_LIMIT, CAP_SWEEP_STEP, SIDE_PROBE_REACH, SIDE_SCAN_STEP,
};
use crate::core::error::{AuroraError, Result};
use crate::core::types::BuildingId;
use crate::settlement::building::{Building, Settlement};
use crate::settlement::template::{
    BuildingTemplate, CardinalFace, ConnectionRequest, HatchAnchor, SettlementPlan,
};
use crate::spatial::geometry::{normalize_facing, BuildingSide};

/// An unmatched half of a declared connection.
#[derive(Debug, Clone)]
struct Stub {
    owner: BuildingId,
    owner_plan: String,
    target: BuildingId,
    target_plan: String,
    position: DVec2,
    facing: f64,
}

/// Builds connector graphs for one settlement.
pub struct GraphBuilder<'a> {
    settlement: &'a Settlement,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(settlement: &'a Settlement) -> Self {
        Self { settlement }
    }

    /// Template pass: resolve every declared connection into a connector.
    pub fn build(&self, templates: &[BuildingTemplate]) -> Result<ConnectorGraph> {
        let mut graph = ConnectorGraph::new();
        let stubs = self.collect_stubs(templates)?;
        self.match_stubs(stubs, &mut graph)?;
        tracing::info!(
            "resolved {} declared connections for '{}'",
            graph.len(),
            self.settlement.name
        );
        Ok(graph)
    }

    /// Perimeter scan for a building added after founding. Returns whether
    /// any connector was created.
    pub fn attach(&self, graph: &mut ConnectorGraph, building: BuildingId) -> Result<bool> {
        let building = self.settlement.building(building)?;
        if !building.kind.is_pressurized() {
            return Ok(false);
        }
        let mut created = false;
        if building.kind.is_passage() {
            let hl = building.footprint.half_length();
            created |=
                self.sweep_cap(graph, building, BuildingSide::Front, DVec2::new(0.0, hl))?;
            created |=
                self.sweep_cap(graph, building, BuildingSide::Back, DVec2::new(0.0, -hl))?;
        }
        created |= self.scan_side(graph, building, BuildingSide::Front)?;
        created |= self.scan_side(graph, building, BuildingSide::Back)?;
        created |= self.scan_side(graph, building, BuildingSide::Left)?;
        created |= self.scan_side(graph, building, BuildingSide::Right)?;
        Ok(created)
    }

    fn collect_stubs(&self, templates: &[BuildingTemplate]) -> Result<Vec<Stub>> {
        let mut stubs = Vec::new();
        for template in templates {
            let owner = self.settlement.by_plan_id(&template.id)?;
            for request in &template.connections {
                let target = self.settlement.by_plan_id(&request.target)?;
                stubs.push(self.resolve_stub(owner, template, request, target)?);
            }
        }
        Ok(stubs)
    }

    /// Place one declared connection as a hatch stub on its owner's wall.
    fn resolve_stub(
        &self,
        owner: &Building,
        template: &BuildingTemplate,
        request: &ConnectionRequest,
        target: &Building,
    ) -> Result<Stub> {
        let fp = &owner.footprint;
        let (local, facing) = match request.anchor {
            HatchAnchor::Face(face) => face_placement(owner, face)?,
            HatchAnchor::Offset(offset) => {
                let facing = match fp.local_edge(offset) {
                    Some(side) => hatch_facing(fp.facing, side),
                    None => {
                        tracing::debug!(
                            "offset {} on '{}' sits on no wall; hatch facing defaults to 0",
                            offset,
                            template.id
                        );
                        0.0
                    }
                };
                (offset, facing)
            }
        };
        Ok(Stub {
            owner: owner.id,
            owner_plan: template.id.clone(),
            target: target.id,
            target_plan: request.target.clone(),
            position: fp.to_settlement(local),
            facing,
        })
    }

    /// Pair up stubs: each one against the nearest unconsumed counterpart
    /// declared in the opposite direction. Ties go to the counterpart
    /// declared first. A stub with no counterpart at all is a plan defect.
    fn match_stubs(&self, stubs: Vec<Stub>, graph: &mut ConnectorGraph) -> Result<()> {
        let mut open: Vec<Option<Stub>> = stubs.into_iter().map(Some).collect();
        let mut by_pair: AHashMap<(BuildingId, BuildingId), Vec<usize>> = AHashMap::new();
        for (i, stub) in open.iter().enumerate() {
            if let Some(s) = stub.as_ref() {
                by_pair.entry((s.owner, s.target)).or_default().push(i);
            }
        }

        for i in 0..open.len() {
            let Some(stub) = open[i].take() else { continue };
            let best = by_pair
                .get(&(stub.target, stub.owner))
                .and_then(|candidates| {
                    candidates
                        .iter()
                        .filter_map(|&j| {
                            open[j].as_ref().map(|s| {
                                (j, s.clone(), OrderedFloat(s.position.distance(stub.position)))
                            })
                        })
                        .min_by_key(|entry| entry.2)
                });
            let Some((j, counterpart, distance)) = best else {
                return Err(AuroraError::UnmatchedConnection {
                    settlement: self.settlement.name.clone(),
                    plan_id: stub.owner_plan,
                    target: stub.target_plan,
                    position: stub.position,
                });
            };
            open[j] = None;
            tracing::debug!(
                "matched '{}' to '{}' across {:.2} m",
                stub.owner_plan,
                counterpart.owner_plan,
                distance.0
            );
            let connector = Connector::link(
                Hatch::new(stub.owner, stub.position, stub.facing),
                Hatch::new(counterpart.owner, counterpart.position, counterpart.facing),
            );
            graph.add(connector)?;
        }
        Ok(())
    }

    /// Fan probes out from a corridor cap until one lands a connection.
    fn sweep_cap(
        &self,
        graph: &mut ConnectorGraph,
        building: &Building,
        side: BuildingSide,
        cap: DVec2,
    ) -> Result<bool> {
        let reach = building.footprint.half_width() + CAP_REACH_MARGIN;
        let mut angle = 0.0;
        let mut offset = 1.0;
        let mut step = 0.0;
        while step <= CAP_SWEEP_LIMIT {
            offset *= -1.0;
            angle += offset * step;
            if self.try_connection(graph, building, side, cap, reach, angle, false)? {
                return Ok(true);
            }
            step += CAP_SWEEP_STEP;
        }
        Ok(false)
    }

    /// Zig-zag a side from its middle outward, probing at every sample.
    /// Several samples may land connectors to different neighbors.
    fn scan_side(
        &self,
        graph: &mut ConnectorGraph,
        building: &Building,
        side: BuildingSide,
    ) -> Result<bool> {
        let fp = &building.footprint;
        let (span, fixed) = match side {
            BuildingSide::Front => (fp.width, fp.half_length()),
            BuildingSide::Back => (fp.width, -fp.half_length()),
            BuildingSide::Left => (fp.length, fp.half_width()),
            BuildingSide::Right => (fp.length, -fp.half_width()),
        };
        let mut created = false;
        let mut along = 0.0;
        let mut offset = 1.0;
        let mut step = 0.0;
        while step < span {
            offset *= -1.0;
            along += offset * step;
            let local = match side {
                BuildingSide::Front | BuildingSide::Back => DVec2::new(along, fixed),
                BuildingSide::Left | BuildingSide::Right => DVec2::new(fixed, along),
            };
            created |=
                self.try_connection(graph, building, side, local, SIDE_PROBE_REACH, 0.0, true)?;
            step += SIDE_SCAN_STEP;
        }
        Ok(created)
    }

    /// One probe attempt from a local point on the building's side.
    ///
    /// The probe runs from the point along the side's outward normal,
    /// swung by `sweep` degrees. The first candidate neighbor whose wall
    /// the probe crosses gets the connector, at the crossing nearest the
    /// probe origin. With `check_range` on, an existing hatch within
    /// `Hatch::WIDTH` of either endpoint kills the whole attempt.
    fn try_connection(
        &self,
        graph: &mut ConnectorGraph,
        building: &Building,
        side: BuildingSide,
        local: DVec2,
        reach: f64,
        sweep: f64,
        check_range: bool,
    ) -> Result<bool> {
        let fp = &building.footprint;
        let swept = DVec2::from_angle(sweep.to_radians()).rotate(side.outward() * reach);
        let origin = fp.to_settlement(local);
        let tip = fp.to_settlement(local + swept);

        if check_range && hatch_nearby(graph, building.id, origin) {
            return Ok(false);
        }

        for candidate in self.settlement.pressurized() {
            if candidate.id == building.id {
                continue;
            }
            if graph.between(building.id, candidate.id).next().is_some() {
                continue;
            }
            let Some(contact) = candidate
                .footprint
                .boundary_crossings(origin, tip)
                .into_iter()
                .min_by_key(|p| OrderedFloat(p.distance(origin)))
            else {
                continue;
            };
            if check_range && hatch_nearby(graph, candidate.id, contact) {
                return Ok(false);
            }
            let connector = Connector::link(
                Hatch::new(building.id, origin, hatch_facing_at(building, origin)?),
                Hatch::new(candidate.id, contact, hatch_facing_at(candidate, contact)?),
            );
            graph.add(connector)?;
            tracing::debug!(
                "inferred connector between '{}' and '{}'",
                building.name,
                candidate.name
            );
            return Ok(true);
        }
        Ok(false)
    }
}

/// Found a settlement: place every planned building, then resolve the
/// declared connections into its connector graph.
pub fn found_settlement(plan: &SettlementPlan) -> Result<(Settlement, ConnectorGraph)> {
    let mut settlement = Settlement::new(plan.name.clone());
    for template in &plan.buildings {
        settlement.add_building(template)?;
    }
    let graph = GraphBuilder::new(&settlement).build(&plan.buildings)?;
    tracing::info!(
        "founded '{}' with {} buildings and {} connectors",
        settlement.name,
        settlement.len(),
        graph.len()
    );
    Ok((settlement, graph))
}

/// Hatch offset and facing for a symbolic face, by cardinal building
/// facing. Faces on non-cardinal buildings are undefined and flagged.
fn face_placement(building: &Building, face: CardinalFace) -> Result<(DVec2, f64)> {
    let fp = &building.footprint;
    let (hw, hl) = (fp.half_width(), fp.half_length());
    let facing = normalize_facing(fp.facing);
    let placement = if facing == 0.0 {
        match face {
            CardinalFace::North => (DVec2::new(0.0, hl), 0.0),
            CardinalFace::East => (DVec2::new(-hw, 0.0), 90.0),
            CardinalFace::South => (DVec2::new(0.0, -hl), 0.0),
            CardinalFace::West => (DVec2::new(hw, 0.0), 90.0),
        }
    } else if facing == 90.0 {
        match face {
            CardinalFace::North => (DVec2::new(hw, 0.0), 0.0),
            CardinalFace::East => (DVec2::new(0.0, hl), 90.0),
            CardinalFace::South => (DVec2::new(-hw, 0.0), 0.0),
            CardinalFace::West => (DVec2::new(0.0, -hl), 90.0),
        }
    } else if facing == 180.0 {
        match face {
            CardinalFace::North => (DVec2::new(0.0, -hl), 0.0),
            CardinalFace::East => (DVec2::new(hw, 0.0), 90.0),
            CardinalFace::South => (DVec2::new(0.0, hl), 0.0),
            CardinalFace::West => (DVec2::new(-hw, 0.0), 90.0),
        }
    } else if facing == 270.0 {
        match face {
            CardinalFace::North => (DVec2::new(-hw, 0.0), 0.0),
            CardinalFace::East => (DVec2::new(0.0, -hl), 90.0),
            CardinalFace::South => (DVec2::new(hw, 0.0), 0.0),
            CardinalFace::West => (DVec2::new(0.0, hl), 90.0),
        }
    } else {
        return Err(AuroraError::UnsupportedFacing {
            building: building.id,
            facing: fp.facing,
        });
    };
    Ok(placement)
}

/// Facing of a hatch mounted on the given side of a building.
fn hatch_facing(building_facing: f64, side: BuildingSide) -> f64 {
    let raw = match side {
        BuildingSide::Front => building_facing,
        BuildingSide::Back => building_facing + 180.0,
        BuildingSide::Left => building_facing + 270.0,
        BuildingSide::Right => building_facing + 90.0,
    };
    normalize_facing(raw)
}

/// Facing for a hatch at a settlement-frame point on a building's wall.
/// A point on no wall means the probe geometry went inconsistent.
fn hatch_facing_at(building: &Building, point: DVec2) -> Result<f64> {
    let side = building
        .footprint
        .boundary_side(point)
        .ok_or(AuroraError::OffFootprint {
            building: building.id,
            position: point,
        })?;
    Ok(hatch_facing(building.footprint.facing, side))
}

/// Whether any hatch already mounted on this building sits within a hatch
/// width of the point.
fn hatch_nearby(graph: &ConnectorGraph, building: BuildingId, point: DVec2) -> bool {
    graph.touching(building).any(|(_, c)| {
        c.hatch_on(building)
            .map(|h| h.position.distance(point) < Hatch::WIDTH)
            .unwrap_or(false)
    })
}

//! Connectors: hatch pairs joining adjacent buildings

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::connection::hatch::Hatch;
use crate::core::config::POSITION_EPSILON;
use crate::core::error::{AuroraError, Result};
use crate::core::types::BuildingId;

/// A pressurized joint between two buildings.
///
/// Flush connectors have both hatches snapped to one shared coordinate
/// (adjoining walls in contact); split connectors keep their hatches apart
/// and put the connector's own position at the midpoint of the gap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Connector {
    ends: [Hatch; 2],
    position: DVec2,
    split: bool,
}

impl Connector {
    /// Join two hatch placements into a connector.
    ///
    /// Placements closer than `POSITION_EPSILON` collapse to a flush joint
    /// at the first placement's coordinate.
    pub fn link(a: Hatch, b: Hatch) -> Self {
        if a.position.distance(b.position) < POSITION_EPSILON {
            let snapped = Hatch::new(b.building, a.position, b.facing);
            Self { ends: [a, snapped], position: a.position, split: false }
        } else {
            Self {
                position: (a.position + b.position) / 2.0,
                ends: [a, b],
                split: true,
            }
        }
    }

    pub fn ends(&self) -> &[Hatch; 2] {
        &self.ends
    }

    /// Settlement-frame center: the shared hatch coordinate when flush,
    /// the midpoint of the two hatches when split.
    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn is_split(&self) -> bool {
        self.split
    }

    pub fn buildings(&self) -> [BuildingId; 2] {
        [self.ends[0].building, self.ends[1].building]
    }

    pub fn touches(&self, building: BuildingId) -> bool {
        self.ends[0].building == building || self.ends[1].building == building
    }

    pub fn joins(&self, a: BuildingId, b: BuildingId) -> bool {
        (self.ends[0].building == a && self.ends[1].building == b)
            || (self.ends[0].building == b && self.ends[1].building == a)
    }

    /// The hatch mounted on the given building.
    pub fn hatch_on(&self, building: BuildingId) -> Result<&Hatch> {
        self.ends
            .iter()
            .find(|h| h.building == building)
            .ok_or(AuroraError::NotAConnectorEnd(building))
    }

    /// The building at the opposite end from the one given.
    pub fn other_building(&self, building: BuildingId) -> Result<BuildingId> {
        match self.ends {
            [a, b] if a.building == building => Ok(b.building),
            [a, b] if b.building == building => Ok(a.building),
            _ => Err(AuroraError::NotAConnectorEnd(building)),
        }
    }

    /// Both hatches ordered for travel out of the given building.
    pub fn ends_for_travel(&self, from: BuildingId) -> Result<(&Hatch, &Hatch)> {
        match &self.ends {
            [a, b] if a.building == from => Ok((a, b)),
            [a, b] if b.building == from => Ok((b, a)),
            _ => Err(AuroraError::NotAConnectorEnd(from)),
        }
    }
}

impl PartialEq for Connector {
    /// End order does not matter: (a, b) equals (b, a).
    fn eq(&self, other: &Self) -> bool {
        let [sa, sb] = &self.ends;
        let [oa, ob] = &other.ends;
        (end_eq(sa, oa) && end_eq(sb, ob)) || (end_eq(sa, ob) && end_eq(sb, oa))
    }
}

fn end_eq(a: &Hatch, b: &Hatch) -> bool {
    a.building == b.building && a == b
}

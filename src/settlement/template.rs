//! Settlement plans: building templates and their declared connections
//!
//! A plan is the founding document for a settlement: every building with
//! its footprint, plus the connections the designers drew between plan ids.
//! Plans are plain serde data and load from JSON.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::settlement::building::BuildingKind;
use crate::spatial::geometry::Footprint;

/// Symbolic face of a building footprint, as plans name them.
///
/// Faces are resolved through the face table for buildings at cardinal
/// facings; the names come from the plan format, not from the settlement
/// axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardinalFace {
    North,
    East,
    South,
    West,
}

/// Where on the owning building's boundary a declared hatch sits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HatchAnchor {
    /// A symbolic face, valid only for cardinal building facings.
    Face(CardinalFace),
    /// An explicit building-local offset on the boundary.
    Offset(DVec2),
}

/// One declared connection from a template toward another planned building.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionRequest {
    /// Plan id of the building to connect to.
    pub target: String,
    pub anchor: HatchAnchor,
}

/// A planned building: identity, footprint, and declared connections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingTemplate {
    /// Plan id, unique within the plan.
    pub id: String,
    pub name: String,
    pub kind: BuildingKind,
    pub width: f64,
    pub length: f64,
    pub position: DVec2,
    #[serde(default)]
    pub facing: f64,
    #[serde(default)]
    pub connections: Vec<ConnectionRequest>,
}

impl BuildingTemplate {
    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.width, self.length, self.position, self.facing)
    }
}

/// A whole settlement plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementPlan {
    pub name: String,
    pub buildings: Vec<BuildingTemplate>,
}

impl SettlementPlan {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

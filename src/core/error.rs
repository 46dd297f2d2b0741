use glam::DVec2;
use thiserror::Error;

use crate::core::types::{BuildingId, ConnectorId};

#[derive(Error, Debug)]
pub enum AuroraError {
    #[error("Building not found: {0:?}")]
    BuildingNotFound(BuildingId),

    #[error("Connector not found: {0:?}")]
    ConnectorNotFound(ConnectorId),

    #[error("Connector already present in graph")]
    DuplicateConnector,

    #[error("Building {0:?} is not an end of this connector")]
    NotAConnectorEnd(BuildingId),

    #[error("Settlement '{settlement}': plan id '{plan_id}' does not resolve to a building")]
    UnknownPlanId { settlement: String, plan_id: String },

    #[error("Settlement '{settlement}': plan id '{plan_id}' declared more than once")]
    DuplicatePlanId { settlement: String, plan_id: String },

    #[error(
        "Settlement '{settlement}': connection from '{plan_id}' toward '{target}' \
         at {position} has no counterpart"
    )]
    UnmatchedConnection {
        settlement: String,
        plan_id: String,
        target: String,
        position: DVec2,
    },

    #[error("Building {building:?} faces {facing} degrees; face-named connections need a cardinal facing")]
    UnsupportedFacing { building: BuildingId, facing: f64 },

    #[error("Point {position} lies on no side of building {building:?}")]
    OffFootprint { building: BuildingId, position: DVec2 },

    #[error("No connector between route neighbors {from:?} and {to:?}")]
    RouteGap { from: BuildingId, to: BuildingId },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AuroraError>;

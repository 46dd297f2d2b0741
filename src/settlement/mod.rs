//! Settlement layer - buildings, plans, and the directory

pub mod building;
pub mod template;

pub use building::{Building, BuildingKind, Settlement};
pub use template::{
    BuildingTemplate, CardinalFace, ConnectionRequest, HatchAnchor, SettlementPlan,
};

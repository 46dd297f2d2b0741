pub mod config;
pub mod error;
pub mod types;

pub use error::{AuroraError, Result};
pub use types::{BuildingId, ConnectorId, SettlementId};

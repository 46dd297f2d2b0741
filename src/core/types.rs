//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for settlements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SettlementId(pub Uuid);

impl SettlementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SettlementId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for buildings within a settlement
///
/// Ids are handed out by the settlement directory in placement order and
/// stay valid for the directory's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildingId(pub u32);

impl BuildingId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Unique identifier for connectors within a graph's arena
///
/// Removal tombstones the arena slot, so an id is never reissued for a
/// different connector within one graph's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectorId(pub u32);

impl ConnectorId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

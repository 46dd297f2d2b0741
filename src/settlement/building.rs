//! Buildings and the settlement directory

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{AuroraError, Result};
use crate::core::types::{BuildingId, SettlementId};
use crate::settlement::template::BuildingTemplate;
use crate::spatial::geometry::Footprint;

/// What a building is for, and whether crews can live and walk in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    Habitat,
    Laboratory,
    Greenhouse,
    Workshop,
    Corridor,
    Depot,
}

impl BuildingKind {
    /// Pressurized buildings hold atmosphere. Only they join the connector
    /// graph and carry interior traffic.
    pub fn is_pressurized(&self) -> bool {
        !matches!(self, BuildingKind::Depot)
    }

    /// Passage structures exist to join other buildings end to end; the
    /// perimeter scan probes their caps before their sides.
    pub fn is_passage(&self) -> bool {
        matches!(self, BuildingKind::Corridor)
    }
}

/// A placed building.
#[derive(Debug, Clone)]
pub struct Building {
    pub id: BuildingId,
    /// Plan id this building was placed under.
    pub plan_id: String,
    pub name: String,
    pub kind: BuildingKind,
    pub footprint: Footprint,
}

/// Building directory for one settlement.
///
/// Owns the buildings, hands out ids in placement order, and keeps the
/// plan-id index used to resolve declared connections. Iteration order is
/// placement order, which the perimeter scan and route search rely on for
/// determinism.
#[derive(Debug, Clone)]
pub struct Settlement {
    pub id: SettlementId,
    pub name: String,
    buildings: Vec<Building>,
    plan_index: AHashMap<String, BuildingId>,
}

impl Settlement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SettlementId::new(),
            name: name.into(),
            buildings: Vec::new(),
            plan_index: AHashMap::new(),
        }
    }

    /// Place a building described by a template.
    pub fn add_building(&mut self, template: &BuildingTemplate) -> Result<BuildingId> {
        if self.plan_index.contains_key(&template.id) {
            return Err(AuroraError::DuplicatePlanId {
                settlement: self.name.clone(),
                plan_id: template.id.clone(),
            });
        }
        let id = BuildingId(self.buildings.len() as u32);
        self.plan_index.insert(template.id.clone(), id);
        self.buildings.push(Building {
            id,
            plan_id: template.id.clone(),
            name: template.name.clone(),
            kind: template.kind,
            footprint: template.footprint(),
        });
        Ok(id)
    }

    pub fn get(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(id.0 as usize)
    }

    /// Lookup that treats a missing building as a caller error.
    pub fn building(&self, id: BuildingId) -> Result<&Building> {
        self.get(id).ok_or(AuroraError::BuildingNotFound(id))
    }

    /// Resolve a plan id, with the diagnostic the template pass reports.
    pub fn by_plan_id(&self, plan_id: &str) -> Result<&Building> {
        self.plan_index
            .get(plan_id)
            .and_then(|&id| self.get(id))
            .ok_or_else(|| AuroraError::UnknownPlanId {
                settlement: self.name.clone(),
                plan_id: plan_id.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    /// All buildings in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &Building> + '_ {
        self.buildings.iter()
    }

    /// Pressurized buildings in placement order.
    pub fn pressurized(&self) -> impl Iterator<Item = &Building> + '_ {
        self.buildings.iter().filter(|b| b.kind.is_pressurized())
    }
}

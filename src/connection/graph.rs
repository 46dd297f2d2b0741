//! The settlement's connector graph

use serde::{Deserialize, Serialize};

use crate::connection::connector::Connector;
use crate::core::error::{AuroraError, Result};
use crate::core::types::{BuildingId, ConnectorId};

/// Arena-backed set of connectors.
///
/// Removal tombstones the slot, so ids handed out earlier stay valid for
/// the graph's lifetime. Iteration runs in insertion order, which keeps
/// the perimeter scan and route search deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectorGraph {
    slots: Vec<Option<Connector>>,
    live: usize,
}

impl ConnectorGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connector. A duplicate, by connector equality, is rejected
    /// rather than silently ignored.
    pub fn add(&mut self, connector: Connector) -> Result<ConnectorId> {
        if self.contains(&connector) {
            return Err(AuroraError::DuplicateConnector);
        }
        let id = ConnectorId(self.slots.len() as u32);
        self.slots.push(Some(connector));
        self.live += 1;
        Ok(id)
    }

    /// Remove a connector by id. Removing the same id twice fails the
    /// second time.
    pub fn remove(&mut self, id: ConnectorId) -> Result<Connector> {
        let slot = self
            .slots
            .get_mut(id.0 as usize)
            .ok_or(AuroraError::ConnectorNotFound(id))?;
        match slot.take() {
            Some(connector) => {
                self.live -= 1;
                Ok(connector)
            }
            None => Err(AuroraError::ConnectorNotFound(id)),
        }
    }

    pub fn get(&self, id: ConnectorId) -> Option<&Connector> {
        self.slots.get(id.0 as usize).and_then(|slot| slot.as_ref())
    }

    /// Membership by value, end order ignored.
    pub fn contains(&self, connector: &Connector) -> bool {
        self.iter().any(|(_, c)| c == connector)
    }

    /// Number of live connectors.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Live connectors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ConnectorId, &Connector)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|c| (ConnectorId(i as u32), c)))
    }

    /// Connectors with the building at either end.
    pub fn touching(
        &self,
        building: BuildingId,
    ) -> impl Iterator<Item = (ConnectorId, &Connector)> + '_ {
        self.iter().filter(move |(_, c)| c.touches(building))
    }

    /// Connectors joining the two buildings, in either end order.
    pub fn between(
        &self,
        a: BuildingId,
        b: BuildingId,
    ) -> impl Iterator<Item = (ConnectorId, &Connector)> + '_ {
        self.iter().filter(move |(_, c)| c.joins(a, b))
    }

    /// Drop every connector touching a demolished building. Returns how
    /// many went.
    pub fn remove_all_touching(&mut self, building: BuildingId) -> usize {
        let mut removed = 0;
        for slot in &mut self.slots {
            if slot.as_ref().is_some_and(|c| c.touches(building)) {
                *slot = None;
                removed += 1;
            }
        }
        self.live -= removed;
        removed
    }
}

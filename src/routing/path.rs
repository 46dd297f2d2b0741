//! Interior paths: waypoint sequences with a walk cursor

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::connection::hatch::Hatch;
use crate::core::types::{BuildingId, ConnectorId};

/// A point inside a specific building.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingLocation {
    pub building: BuildingId,
    pub position: DVec2,
}

impl BuildingLocation {
    pub fn new(building: BuildingId, position: DVec2) -> Self {
        Self { building, position }
    }
}

/// One stop along an interior path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Waypoint {
    /// A position on some building's floor.
    Inside(BuildingLocation),
    /// Passing through a hatch of a split connector.
    Hatch { connector: ConnectorId, hatch: Hatch },
    /// The center of a connector, the actual crossing point.
    ConnectorCenter { connector: ConnectorId, position: DVec2 },
}

impl Waypoint {
    pub fn position(&self) -> DVec2 {
        match self {
            Waypoint::Inside(location) => location.position,
            Waypoint::Hatch { hatch, .. } => hatch.position,
            Waypoint::ConnectorCenter { position, .. } => *position,
        }
    }
}

/// A walkable route between two interior positions.
///
/// The cursor starts on the second waypoint: construction advances it once
/// past the origin, so `next_stop` immediately names where to walk first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteriorPath {
    waypoints: Vec<Waypoint>,
    cursor: usize,
}

impl InteriorPath {
    pub(crate) fn from_waypoints(waypoints: Vec<Waypoint>) -> Self {
        let mut path = Self { waypoints, cursor: 0 };
        path.advance();
        path
    }

    /// The waypoint the walker is heading for.
    pub fn next_stop(&self) -> Option<&Waypoint> {
        self.waypoints.get(self.cursor)
    }

    /// The waypoints not yet reached, starting with `next_stop`.
    pub fn remaining(&self) -> &[Waypoint] {
        &self.waypoints[self.cursor..]
    }

    /// Move the cursor to the next waypoint. Stops at the last one.
    pub fn advance(&mut self) {
        if self.cursor + 1 < self.waypoints.len() {
            self.cursor += 1;
        }
    }

    /// Whether the cursor sits on the final waypoint.
    pub fn at_end(&self) -> bool {
        self.cursor + 1 >= self.waypoints.len()
    }

    /// Straight-line length summed over consecutive waypoints.
    pub fn total_length(&self) -> f64 {
        self.waypoints
            .windows(2)
            .map(|pair| pair[0].position().distance(pair[1].position()))
            .sum()
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

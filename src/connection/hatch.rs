//! Hatches: the doorway panels at connector ends

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::core::types::BuildingId;

/// A doorway on one building's boundary.
///
/// Two hatches are equal when they sit at the same coordinate with the
/// same facing; the building back-reference stays out of equality so a
/// connector compares the same from either side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hatch {
    pub building: BuildingId,
    /// Settlement-frame position of the hatch center.
    pub position: DVec2,
    /// Degrees clockwise from settlement north.
    pub facing: f64,
}

impl Hatch {
    /// Hatch aperture width (meters).
    pub const WIDTH: f64 = 0.6;
    /// Hatch aperture depth (meters).
    pub const LENGTH: f64 = 0.6;

    pub fn new(building: BuildingId, position: DVec2, facing: f64) -> Self {
        Self { building, position, facing }
    }
}

impl PartialEq for Hatch {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.facing == other.facing
    }
}

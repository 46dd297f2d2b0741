//! Footprint geometry in the settlement frame
//!
//! Buildings are rectangles in their own frame: origin at the footprint
//! center, +y toward the building front. A facing (degrees clockwise from
//! settlement north) and a settlement position place the rectangle on the
//! plane. Everything here is pure f64 math; hatch snapping compares at
//! `POSITION_EPSILON`, which is far below f32 resolution at outpost scale.

use geo::line_intersection::{line_intersection, LineIntersection};
use geo::{coord, Line};
use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::{INTERIOR_WALL_CLEARANCE, POSITION_EPSILON};

/// Normalize a facing into [0, 360).
pub fn normalize_facing(facing: f64) -> f64 {
    facing.rem_euclid(360.0)
}

/// Which wall of a footprint a boundary point lies on.
///
/// Front is the +y wall in the building frame. Left is the +x wall, which
/// looks inverted but matches the facing convention: a facing-90 building
/// has its front toward -x, so its +x wall trails on the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingSide {
    Front,
    Back,
    Left,
    Right,
}

impl BuildingSide {
    /// Unit outward normal in the building frame.
    pub fn outward(&self) -> DVec2 {
        match self {
            BuildingSide::Front => DVec2::Y,
            BuildingSide::Back => DVec2::NEG_Y,
            BuildingSide::Left => DVec2::X,
            BuildingSide::Right => DVec2::NEG_X,
        }
    }
}

/// Dimensions and placement of one building's rectangular footprint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Extent along the building-frame x axis (meters).
    pub width: f64,
    /// Extent along the building-frame y axis (meters).
    pub length: f64,
    /// Settlement-frame position of the footprint center.
    pub position: DVec2,
    /// Degrees clockwise from settlement north.
    pub facing: f64,
}

impl Footprint {
    pub fn new(width: f64, length: f64, position: DVec2, facing: f64) -> Self {
        Self { width, length, position, facing }
    }

    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    pub fn half_length(&self) -> f64 {
        self.length / 2.0
    }

    /// Map a building-local point into the settlement frame.
    pub fn to_settlement(&self, local: DVec2) -> DVec2 {
        DVec2::from_angle(self.facing.to_radians()).rotate(local) + self.position
    }

    /// Map a settlement-frame point into the building frame.
    pub fn to_local(&self, point: DVec2) -> DVec2 {
        DVec2::from_angle(-self.facing.to_radians()).rotate(point - self.position)
    }

    /// Footprint corners in the settlement frame.
    pub fn corners(&self) -> [DVec2; 4] {
        let (hw, hl) = (self.half_width(), self.half_length());
        [
            self.to_settlement(DVec2::new(hw, hl)),
            self.to_settlement(DVec2::new(-hw, hl)),
            self.to_settlement(DVec2::new(-hw, -hl)),
            self.to_settlement(DVec2::new(hw, -hl)),
        ]
    }

    /// The four boundary wall segments.
    pub fn walls(&self) -> [Line<f64>; 4] {
        let c = self.corners();
        [seg(c[0], c[1]), seg(c[1], c[2]), seg(c[2], c[3]), seg(c[3], c[0])]
    }

    /// Points where a probe segment crosses the footprint boundary.
    ///
    /// Collinear contact, a probe running along a wall, yields nothing.
    pub fn boundary_crossings(&self, from: DVec2, to: DVec2) -> Vec<DVec2> {
        let probe = seg(from, to);
        let mut points = Vec::new();
        for wall in self.walls() {
            if let Some(LineIntersection::SinglePoint { intersection, .. }) =
                line_intersection(probe, wall)
            {
                points.push(DVec2::new(intersection.x, intersection.y));
            }
        }
        points
    }

    /// Classify which wall a building-local point sits on, if any.
    ///
    /// Front/back win at corners; the scan's hatch-facing rules rely on
    /// that precedence.
    pub fn local_edge(&self, local: DVec2) -> Option<BuildingSide> {
        if (local.y - self.half_length()).abs() < POSITION_EPSILON {
            Some(BuildingSide::Front)
        } else if (local.y + self.half_length()).abs() < POSITION_EPSILON {
            Some(BuildingSide::Back)
        } else if (local.x - self.half_width()).abs() < POSITION_EPSILON {
            Some(BuildingSide::Left)
        } else if (local.x + self.half_width()).abs() < POSITION_EPSILON {
            Some(BuildingSide::Right)
        } else {
            None
        }
    }

    /// Classify which wall a settlement-frame boundary point sits on.
    pub fn boundary_side(&self, point: DVec2) -> Option<BuildingSide> {
        self.local_edge(self.to_local(point))
    }

    /// Uniform random interior point, holding off the walls where the
    /// footprint has room for it.
    pub fn random_interior_position<R: Rng>(&self, rng: &mut R) -> DVec2 {
        let local = DVec2::new(
            sample_span(rng, self.half_width() - INTERIOR_WALL_CLEARANCE),
            sample_span(rng, self.half_length() - INTERIOR_WALL_CLEARANCE),
        );
        self.to_settlement(local)
    }
}

fn sample_span<R: Rng>(rng: &mut R, half_span: f64) -> f64 {
    if half_span > 0.0 {
        rng.gen_range(-half_span..=half_span)
    } else {
        0.0
    }
}

fn seg(a: DVec2, b: DVec2) -> Line<f64> {
    Line::new(coord! { x: a.x, y: a.y }, coord! { x: b.x, y: b.y })
}

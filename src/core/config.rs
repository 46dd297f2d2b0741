//! Connectivity and routing constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

/// Distance (meters) under which two positions count as the same point.
///
/// Decides whether a connector is flush (hatch placements collapse to one
/// shared coordinate) or split (distinct hatches bridged at their midpoint),
/// and which wall of a footprint a boundary point belongs to. Well below
/// any plan coordinate grid, well above f64 noise at settlement scale.
pub const POSITION_EPSILON: f64 = 1e-7;

/// Sample spacing (meters) when scanning a building side for neighbors.
///
/// The scan zig-zags outward from the middle of each side in steps of this
/// size. Keep it above `Hatch::WIDTH` or adjacent samples could place
/// overlapping hatches faster than the overlap guard rejects them.
pub const SIDE_SCAN_STEP: f64 = 1.0;

/// Probe reach (meters) for side scans.
///
/// A neighbor wall further out than this cannot take a plain side hatch;
/// it would need a corridor between the two buildings instead.
pub const SIDE_PROBE_REACH: f64 = 1.0;

/// Extra probe reach (meters) past a corridor's half-width at its end caps.
pub const CAP_REACH_MARGIN: f64 = 0.2;

/// Angular step (degrees) of the end-cap sweep.
///
/// Cap probes fan out from straight ahead in alternating steps of this
/// size, covering 0, +10, -10, ... out to +/-90 degrees.
pub const CAP_SWEEP_STEP: f64 = 10.0;

/// Upper bound (degrees) of the end-cap sweep accumulator.
pub const CAP_SWEEP_LIMIT: f64 = 180.0;

/// Clearance (meters) kept from the walls when picking random interior
/// points. Narrow footprints that cannot honor it collapse to their
/// center line.
pub const INTERIOR_WALL_CLEARANCE: f64 = 1.5;

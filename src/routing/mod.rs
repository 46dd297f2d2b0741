//! Interior routing between building positions

pub mod path;
pub mod pathfinder;

pub use path::{BuildingLocation, InteriorPath, Waypoint};
pub use pathfinder::PathFinder;

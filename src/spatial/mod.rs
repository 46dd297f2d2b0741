//! Settlement-plane geometry

pub mod geometry;

pub use geometry::{normalize_facing, BuildingSide, Footprint};

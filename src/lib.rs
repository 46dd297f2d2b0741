//! Aurora Outpost - Frontier Settlement Connectivity

pub mod connection;
pub mod core;
pub mod routing;
pub mod settlement;
pub mod spatial;

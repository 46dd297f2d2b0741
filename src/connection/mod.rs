//! Connectors between pressurized buildings

pub mod builder;
pub mod connector;
pub mod graph;
pub mod hatch;

pub use builder::{found_settlement, GraphBuilder};
pub use connector::Connector;
pub use graph::ConnectorGraph;
pub use hatch::Hatch;

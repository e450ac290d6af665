//! Static transit network model.
//!
//! Stations, their line memberships, and the declared connections between
//! them. A [`Network`] is validated once at load time and never changes;
//! disruptions are layered on top by the [`crate::disruption`] module.

mod dataset;
mod error;
mod graph;
mod lines;
mod topology;

pub use dataset::Dataset;
pub use error::TopologyError;
pub use graph::{Edge, Graph, StationIndex};
pub use lines::Direction;
pub use topology::{Connection, Network};

//! Service disruptions layered over the static network.
//!
//! An [`Overlay`] records closed stations, lines closed at particular
//! stations, and a delay factor. [`effective_graph`] turns the network plus
//! an overlay into the graph that path searches run on.

mod effective;
mod error;
mod overlay;

pub use effective::effective_graph;
pub use error::DisruptionError;
pub use overlay::Overlay;

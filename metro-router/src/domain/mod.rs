//! Domain types for the transit router.
//!
//! Identifiers validate themselves at construction, so code receiving a
//! `StationId` or `LineId` can assume it is non-blank.

mod criterion;
mod route;
mod station;

pub use criterion::Criterion;
pub use route::{Route, RouteStep};
pub use station::{InvalidId, LineId, Station, StationId, TransportMode};

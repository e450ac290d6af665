//! Route planning over a disrupted network.
//!
//! This module implements the routing engine: Dijkstra search with a
//! pluggable criterion, alternative routes by knocking out edges of the
//! primary route, and resilience analysis by closing candidate stations.
//!
//! [`Engine`] ties these together with a network and its current
//! disruptions.

mod alternatives;
mod config;
mod engine;
mod guidance;
mod reach;
mod resilience;
mod search;


pub use config::RouterConfig;
pub use engine::Engine;
pub use guidance::{LineAssessment, assess_closed_station};
pub use reach::Reachability;
pub use resilience::{ResilienceReport, StationCriticality};
pub use search::{Endpoint, RouteError, edge_weight};

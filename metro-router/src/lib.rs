//! Multi-modal metro routing engine.
//!
//! Finds routes through a transit network under live disruptions (closed
//! stations, lines closed at a station, system-wide delays), suggests
//! alternative routes, and measures how much each station's closure would
//! disconnect the network.

pub mod disruption;
pub mod domain;
pub mod network;
pub mod planner;
pub mod web;

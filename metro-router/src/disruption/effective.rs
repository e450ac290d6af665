//! Effective graph derivation.

use tracing::debug;

use super::overlay::Overlay;
use crate::network::{Graph, Network};

/// Derive the graph routing actually runs on.
///
/// This is a pure function of the network and overlay: it always starts from
/// the network's pristine graph, so nothing compounds between calls.
///
/// 1. Every edge's time becomes `round(base_time * delay_factor)`.
/// 2. Each closed station loses its outgoing edges and every edge pointing
///    to it.
/// 3. For each station with closed lines, its outgoing edges on those lines
///    are dropped, as are edges from other stations arriving at it on those
///    lines.
///
/// Full closures are applied before line closures, so line entries on a
/// closed station have nothing left to remove.
pub fn effective_graph(network: &Network, overlay: &Overlay) -> Graph {
    let mut graph = network.static_graph().clone();

    let factor = overlay.delay_factor();
    if factor != 1.0 {
        graph.for_each_edge_mut(|edge| {
            edge.time = (f64::from(edge.time) * factor).round() as u32;
        });
    }

    for station in overlay.closed_stations() {
        let Some(closed) = network.index_of(station.as_str()) else {
            continue;
        };
        let outgoing = graph.clear_station(closed);
        let inbound = graph.retain_edges(|_, e| e.to != closed);
        debug!(
            station = %station,
            outgoing,
            inbound,
            "removed edges of closed station"
        );
    }

    for (station, lines) in overlay.closed_station_lines() {
        let Some(at) = network.index_of(station.as_str()) else {
            continue;
        };
        let removed = graph.retain_edges(|from, e| {
            let touches_station = from == at || e.to == at;
            !(touches_station && lines.contains(&e.line))
        });
        debug!(
            station = %station,
            lines = ?lines,
            removed,
            "removed edges of closed lines"
        );
    }

    graph
}

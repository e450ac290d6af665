//! Network fragility analysis.
//!
//! For each candidate station, close it and count how many station pairs
//! that could previously reach each other no longer can. Every pair is a
//! full path search, so this is only meant for networks of tens of
//! stations.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use super::search::PathFinder;
use crate::disruption::{Overlay, effective_graph};
use crate::domain::{Criterion, StationId};
use crate::network::{Graph, Network, StationIndex};

/// How much a single station's closure disconnects the network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationCriticality {
    pub station: StationId,

    /// Outgoing edges the station had before being closed.
    pub original_connections: usize,

    /// Pairs of other stations that were connected and no longer are.
    pub affected_routes: usize,

    /// Pairs of other stations considered.
    pub total_pairs: usize,

    /// `affected_routes / total_pairs`, or 0 when there are no pairs.
    ///
    /// Only pairs that were connected before the closure and exclude the
    /// closed station count, over `(n-1)(n-2)/2` pairs. Counting every
    /// failing pair over `n(n-1)/2` instead would include trips to or from
    /// the closed station and pairs that were already disconnected, giving
    /// higher numbers.
    pub criticality: f64,
}

/// Criticality of each analyzed station, in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResilienceReport {
    pub stations: Vec<StationCriticality>,
}

impl ResilienceReport {
    /// The station whose closure disconnects the most pairs.
    pub fn most_critical(&self) -> Option<&StationCriticality> {
        self.stations
            .iter()
            .max_by(|a, b| a.affected_routes.cmp(&b.affected_routes))
    }
}

/// Unordered station pairs that have a route under the given graph.
fn connected_pairs(
    network: &Network,
    overlay: &Overlay,
    graph: &Graph,
    skip: Option<StationIndex>,
) -> HashSet<(usize, usize)> {
    let finder = PathFinder::new(network, overlay, graph);
    let stations = network.stations();
    let mut pairs = HashSet::new();

    for i in 0..stations.len() {
        for j in (i + 1)..stations.len() {
            if skip.is_some_and(|s| s.0 == i || s.0 == j) {
                continue;
            }
            if finder
                .shortest_path(stations[i].id.as_str(), stations[j].id.as_str(), Criterion::Time)
                .is_ok()
            {
                pairs.insert((i, j));
            }
        }
    }

    pairs
}

/// Analyze how closing each of `critical` would affect connectivity.
///
/// Each station is closed on top of the current `overlay`; the caller's
/// overlay and graph are never modified. Unknown stations are skipped.
pub(crate) fn analyze_resilience<S: AsRef<str>>(
    network: &Network,
    overlay: &Overlay,
    graph: &Graph,
    critical: &[S],
) -> ResilienceReport {
    let baseline = connected_pairs(network, overlay, graph, None);
    let others = network.len().saturating_sub(1);
    let total_pairs = others * others.saturating_sub(1) / 2;

    let mut report = ResilienceReport::default();

    for name in critical {
        let name = name.as_ref();
        let Some(index) = network.index_of(name) else {
            warn!(station = name, "skipping unknown station in resilience analysis");
            continue;
        };

        let mut scenario = overlay.clone();
        scenario.close_station(network, name);
        let scenario_graph = effective_graph(network, &scenario);
        let still_connected = connected_pairs(network, &scenario, &scenario_graph, Some(index));

        let affected_routes = baseline
            .iter()
            .filter(|(i, j)| *i != index.0 && *j != index.0)
            .filter(|pair| !still_connected.contains(pair))
            .count();

        let criticality = if total_pairs == 0 {
            0.0
        } else {
            affected_routes as f64 / total_pairs as f64
        };

        debug!(
            station = name,
            affected_routes,
            total_pairs,
            criticality,
            "station analyzed"
        );

        report.stations.push(StationCriticality {
            station: network.station_at(index).id.clone(),
            original_connections: graph.edges_from(index).len(),
            affected_routes,
            total_pairs,
            criticality,
        });
    }

    report
}

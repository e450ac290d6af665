//! Reachability queries used when a route is blocked.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use serde::Serialize;

use super::search::RouteError;
use crate::domain::StationId;
use crate::network::{Graph, Network, StationIndex};

/// Stations reachable from an origin, and the one furthest away by time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reachability {
    /// Furthest reachable station; the origin itself if nothing else is.
    pub farthest: StationId,

    /// Travel time to `farthest` in seconds.
    pub time: u64,

    /// Every reachable station, origin included, sorted by name.
    pub reached: Vec<StationId>,
}

impl Reachability {
    /// True if `station` was reached.
    pub fn reaches(&self, station: &str) -> bool {
        self.reached.iter().any(|s| s.as_str() == station)
    }
}

/// Explore everything reachable from `start` by travel time.
///
/// Unlike route search this does not filter on accessibility: closed
/// stations have no edges in an effective graph, so they cannot be passed
/// through anyway. Ties for the furthest station go to the one reached
/// first.
pub(crate) fn farthest_reachable(
    network: &Network,
    graph: &Graph,
    start: &str,
) -> Result<Reachability, RouteError> {
    let source = network
        .index_of(start)
        .ok_or_else(|| RouteError::UnknownStation(start.to_string()))?;

    let mut distance = vec![u64::MAX; network.len()];
    let mut visited = vec![false; network.len()];
    let mut heap: BinaryHeap<Reverse<(u64, StationIndex)>> = BinaryHeap::new();

    distance[source.0] = 0;
    heap.push(Reverse((0, source)));

    let mut farthest = (source, 0u64);
    let mut reached = Vec::new();

    while let Some(Reverse((time, station))) = heap.pop() {
        if visited[station.0] {
            continue;
        }
        visited[station.0] = true;
        reached.push(network.station_at(station).id.clone());

        if time > farthest.1 {
            farthest = (station, time);
        }

        for edge in graph.edges_from(station) {
            let next = time + u64::from(edge.time);
            if next < distance[edge.to.0] {
                distance[edge.to.0] = next;
                heap.push(Reverse((next, edge.to)));
            }
        }
    }

    reached.sort();

    Ok(Reachability {
        farthest: network.station_at(farthest.0).id.clone(),
        time: farthest.1,
        reached,
    })
}

//! Dijkstra shortest-path search.
//!
//! Searches run over an effective graph (see [`crate::disruption`]) and
//! minimize the weight chosen by a [`Criterion`]. The heap entry for each
//! candidate carries its whole path so far, so the winning entry holds the
//! route without a predecessor walk.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use tracing::trace;

use crate::disruption::Overlay;
use crate::domain::{Criterion, LineId, Route, RouteStep, StationId};
use crate::network::{Edge, Graph, Network, StationIndex};

/// Which end of a requested route an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Origin,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Origin => f.write_str("origin"),
            Endpoint::Destination => f.write_str("destination"),
        }
    }
}

/// Error from route search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Station is not part of the network
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// Station exists but is closed, or all of its lines are closed
    #[error("{endpoint} station {station} is closed")]
    StationClosed {
        station: StationId,
        endpoint: Endpoint,
    },

    /// Search exhausted the graph without reaching the destination
    #[error("no route from {from} to {to}")]
    NoRouteFound { from: StationId, to: StationId },
}

/// Edge weight under a criterion.
///
/// `Transfers` weighs every edge as 1, so it minimizes the number of hops.
pub fn edge_weight(edge: &Edge, criterion: Criterion) -> u64 {
    match criterion {
        Criterion::Time => u64::from(edge.time),
        Criterion::Cost => u64::from(edge.cost),
        Criterion::Transfers => 1,
    }
}

/// Heap entry: a station reached with some accumulated weight.
#[derive(Debug)]
struct Candidate {
    weight: u64,
    /// Insertion order, so equal weights pop first-in first-out.
    seq: u64,
    station: StationIndex,
    path: Vec<StationIndex>,
    lines: Vec<LineId>,
    transfers: usize,
}

// BinaryHeap is a max-heap; flip the comparison to pop the lightest entry.
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl Eq for Candidate {}

/// Shortest-path search over one graph.
///
/// The graph is usually the engine's effective graph, but may be any graph
/// derived from it (for example with an edge removed). It must index the
/// same stations as `network`. Station accessibility is always judged
/// against `overlay`.
pub(crate) struct PathFinder<'a> {
    network: &'a Network,
    overlay: &'a Overlay,
    graph: &'a Graph,
}

impl<'a> PathFinder<'a> {
    /// Create a path finder.
    pub(crate) fn new(network: &'a Network, overlay: &'a Overlay, graph: &'a Graph) -> Self {
        Self {
            network,
            overlay,
            graph,
        }
    }

    /// Resolve a route endpoint, checking it exists and is accessible.
    fn endpoint(&self, station: &str, endpoint: Endpoint) -> Result<StationIndex, RouteError> {
        let index = self
            .network
            .index_of(station)
            .ok_or_else(|| RouteError::UnknownStation(station.to_string()))?;

        if !self.overlay.is_station_accessible(self.network, station) {
            return Err(RouteError::StationClosed {
                station: self.network.station_at(index).id.clone(),
                endpoint,
            });
        }

        Ok(index)
    }

    /// Find the route from `start` to `end` minimizing `criterion`.
    ///
    /// When `start == end` the result is a trivial route: the single station,
    /// no steps, zero totals.
    ///
    /// # Errors
    ///
    /// - [`RouteError::UnknownStation`] if either endpoint is not in the network
    /// - [`RouteError::StationClosed`] if either endpoint is inaccessible
    /// - [`RouteError::NoRouteFound`] if the destination cannot be reached
    pub(crate) fn shortest_path(
        &self,
        start: &str,
        end: &str,
        criterion: Criterion,
    ) -> Result<Route, RouteError> {
        let source = self.endpoint(start, Endpoint::Origin)?;
        let target = self.endpoint(end, Endpoint::Destination)?;

        let n = self.network.len();
        let accessible: Vec<bool> = self
            .network
            .stations()
            .iter()
            .map(|s| self.overlay.is_station_accessible(self.network, s.id.as_str()))
            .collect();
        let mut distance = vec![u64::MAX; n];
        let mut visited = vec![false; n];
        let mut heap = BinaryHeap::new();
        let mut seq = 0u64;

        distance[source.0] = 0;
        heap.push(Candidate {
            weight: 0,
            seq,
            station: source,
            path: vec![source],
            lines: Vec::new(),
            transfers: 0,
        });

        while let Some(current) = heap.pop() {
            if visited[current.station.0] {
                continue;
            }
            visited[current.station.0] = true;

            if current.station == target {
                trace!(
                    from = start,
                    to = end,
                    criterion = %criterion,
                    weight = current.weight,
                    hops = current.path.len() - 1,
                    line_changes = current.transfers,
                    "route found"
                );
                return self.build_route(&current, criterion);
            }

            for edge in self.graph.edges_from(current.station) {
                let next = edge.to;
                if visited[next.0] || !accessible[next.0] {
                    continue;
                }

                let weight = distance[current.station.0] + edge_weight(edge, criterion);
                if weight >= distance[next.0] {
                    continue;
                }
                distance[next.0] = weight;

                let changed_line = current.lines.last().is_some_and(|last| *last != edge.line);
                let mut path = current.path.clone();
                path.push(next);
                let mut lines = current.lines.clone();
                lines.push(edge.line.clone());

                seq += 1;
                heap.push(Candidate {
                    weight,
                    seq,
                    station: next,
                    path,
                    lines,
                    transfers: current.transfers + usize::from(changed_line),
                });
            }
        }

        Err(RouteError::NoRouteFound {
            from: self.network.station_at(source).id.clone(),
            to: self.network.station_at(target).id.clone(),
        })
    }

    /// Turn the winning heap entry into a route.
    ///
    /// Each consecutive pair of stations is looked up again in the graph and
    /// the first matching edge is reported. Where two lines connect the same
    /// pair, that may not be the edge the search actually used.
    fn build_route(&self, winner: &Candidate, criterion: Criterion) -> Result<Route, RouteError> {
        let mut steps = Vec::with_capacity(winner.path.len().saturating_sub(1));
        let mut lines: Vec<LineId> = Vec::new();
        let mut total_time = 0u64;
        let mut total_cost = 0u64;
        let mut transfers = 0;
        let mut previous_line: Option<&LineId> = None;

        for pair in winner.path.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let edge = self
                .graph
                .find_edge(from, to)
                .ok_or_else(|| RouteError::NoRouteFound {
                    from: self.network.station_at(from).id.clone(),
                    to: self.network.station_at(to).id.clone(),
                })?;

            let is_transfer = previous_line.is_some_and(|prev| *prev != edge.line);
            if is_transfer {
                transfers += 1;
            }
            previous_line = Some(&edge.line);

            total_time += u64::from(edge.time);
            total_cost += u64::from(edge.cost);
            if !lines.contains(&edge.line) {
                lines.push(edge.line.clone());
            }

            steps.push(RouteStep {
                from: self.network.station_at(from).id.clone(),
                to: self.network.station_at(to).id.clone(),
                line: edge.line.clone(),
                time: edge.time,
                cost: edge.cost,
                is_transfer,
            });
        }

        Ok(Route {
            path: winner
                .path
                .iter()
                .map(|i| self.network.station_at(*i).id.clone())
                .collect(),
            steps,
            total_time,
            total_cost,
            transfers,
            lines,
            weight: winner.weight,
            criterion,
        })
    }
}

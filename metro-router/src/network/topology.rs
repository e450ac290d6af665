//! Static network description and graph construction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::TopologyError;
use super::graph::{Edge, Graph, StationIndex};
use crate::domain::{LineId, Station, StationId, TransportMode};

/// A declared connection between two stations on one line.
///
/// Datasets usually declare each segment once; travel is bidirectional, so
/// the built graph contains both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from: StationId,
    pub to: StationId,
    /// Base travel time in seconds.
    pub time: u32,
    pub line: LineId,
}

/// Connection with endpoints resolved to indices.
#[derive(Debug, Clone)]
struct ResolvedConnection {
    from: StationIndex,
    to: StationIndex,
    time: u32,
    line: LineId,
}

/// Immutable transit network: stations, their lines, and connections.
///
/// Construction validates the topology, so every connection endpoint is
/// guaranteed to be a declared station.
#[derive(Debug, Clone)]
pub struct Network {
    stations: Vec<Station>,
    index: HashMap<StationId, StationIndex>,
    connections: Vec<Connection>,
    resolved: Vec<ResolvedConnection>,
    graph: Graph,
}

impl Network {
    /// Build and validate a network.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - A station name is declared twice
    /// - A station has no lines
    /// - A connection references an undeclared station
    pub fn new(stations: Vec<Station>, connections: Vec<Connection>) -> Result<Self, TopologyError> {
        let mut index = HashMap::with_capacity(stations.len());
        for (i, station) in stations.iter().enumerate() {
            if station.lines.is_empty() {
                return Err(TopologyError::NoLines(station.id.clone()));
            }
            if index.insert(station.id.clone(), StationIndex(i)).is_some() {
                return Err(TopologyError::DuplicateStation(station.id.clone()));
            }
        }

        let mut resolved = Vec::with_capacity(connections.len());
        for conn in &connections {
            let lookup = |id: &StationId| {
                index
                    .get(id)
                    .copied()
                    .ok_or_else(|| TopologyError::UnknownStation {
                        station: id.clone(),
                        line: conn.line.clone(),
                    })
            };
            let from = lookup(&conn.from)?;
            let to = lookup(&conn.to)?;

            for (i, id) in [(from, &conn.from), (to, &conn.to)] {
                if !stations[i.0].serves(conn.line.as_str()) {
                    warn!(
                        station = %id,
                        line = %conn.line,
                        "connection uses a line the station does not list"
                    );
                }
            }

            resolved.push(ResolvedConnection {
                from,
                to,
                time: conn.time,
                line: conn.line.clone(),
            });
        }

        let mut network = Self {
            stations,
            index,
            connections,
            resolved,
            graph: Graph::default(),
        };
        network.graph = network.build_graph();

        debug!(
            stations = network.stations.len(),
            connections = network.connections.len(),
            edges = network.graph.edge_count(),
            "network loaded"
        );

        Ok(network)
    }

    /// Build the bidirectional adjacency structure.
    ///
    /// Each declared connection yields two edges. An edge's cost is the base
    /// fare of its *destination* station's mode, so the two directions of a
    /// connection between different modes cost different amounts.
    pub fn build_graph(&self) -> Graph {
        let mut graph = Graph::with_stations(self.stations.len());
        for conn in &self.resolved {
            graph.add_edge(
                conn.from,
                Edge {
                    to: conn.to,
                    line: conn.line.clone(),
                    time: conn.time,
                    cost: self.stations[conn.to.0].mode.base_cost(),
                },
            );
            graph.add_edge(
                conn.to,
                Edge {
                    to: conn.from,
                    line: conn.line.clone(),
                    time: conn.time,
                    cost: self.stations[conn.from.0].mode.base_cost(),
                },
            );
        }
        graph
    }

    /// The pristine graph, with no disruptions applied.
    pub fn static_graph(&self) -> &Graph {
        &self.graph
    }

    /// All stations in declaration order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Station ids sorted alphabetically.
    pub fn station_ids_sorted(&self) -> Vec<&StationId> {
        let mut ids: Vec<&StationId> = self.stations.iter().map(|s| &s.id).collect();
        ids.sort();
        ids
    }

    /// Declared connections, in declaration order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Base time of the slowest declared connection; 0 with no connections.
    pub fn longest_connection_time(&self) -> u32 {
        self.connections.iter().map(|c| c.time).max().unwrap_or(0)
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// True if the network has no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Look up a station by name.
    pub fn station(&self, id: &str) -> Option<&Station> {
        self.index_of(id).map(|i| &self.stations[i.0])
    }

    /// Index of a station by name.
    pub fn index_of(&self, id: &str) -> Option<StationIndex> {
        self.index.get(id).copied()
    }

    /// Station at an index.
    ///
    /// # Panics
    ///
    /// Panics if `index` did not come from this network.
    pub fn station_at(&self, index: StationIndex) -> &Station {
        &self.stations[index.0]
    }

    /// Lines serving a station; empty for unknown stations.
    pub fn station_lines(&self, id: &str) -> &[LineId] {
        self.station(id).map(|s| s.lines.as_slice()).unwrap_or(&[])
    }

    /// True if `line` serves station `id`.
    pub fn station_belongs_to_line(&self, id: &str, line: &str) -> bool {
        self.station(id).is_some_and(|s| s.serves(line))
    }

    /// Flat fare for a transport mode.
    pub fn base_cost(mode: TransportMode) -> u32 {
        mode.base_cost()
    }
}

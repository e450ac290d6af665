//! Adjacency-list graph over station indices.

use serde::Serialize;

use crate::domain::LineId;

/// Position of a station in its network's declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StationIndex(pub usize);

/// A directed, weighted edge on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Destination station.
    pub to: StationIndex,
    /// Line this edge belongs to.
    pub line: LineId,
    /// Travel time in seconds.
    pub time: u32,
    /// Fare for this edge, keyed by the destination's mode.
    pub cost: u32,
}

/// Outgoing edges per station, indexed by [`StationIndex`].
///
/// Edge order within a station is the order edges were added, which makes
/// "first matching edge" lookups deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    /// Create a graph with `n` stations and no edges.
    pub fn with_stations(n: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); n],
        }
    }

    /// Number of stations (including those with no edges).
    pub fn station_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Append an outgoing edge. Out-of-range origins are ignored.
    pub fn add_edge(&mut self, from: StationIndex, edge: Edge) {
        if let Some(edges) = self.adjacency.get_mut(from.0) {
            edges.push(edge);
        }
    }

    /// Outgoing edges of a station (empty for out-of-range indices).
    pub fn edges_from(&self, station: StationIndex) -> &[Edge] {
        self.adjacency
            .get(station.0)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First edge from `from` to `to`, on any line.
    pub fn find_edge(&self, from: StationIndex, to: StationIndex) -> Option<&Edge> {
        self.edges_from(from).iter().find(|e| e.to == to)
    }

    /// Iterate over every station and its outgoing edges.
    pub fn iter(&self) -> impl Iterator<Item = (StationIndex, &[Edge])> {
        self.adjacency
            .iter()
            .enumerate()
            .map(|(i, edges)| (StationIndex(i), edges.as_slice()))
    }

    /// Mutate every edge in place.
    pub fn for_each_edge_mut(&mut self, mut f: impl FnMut(&mut Edge)) {
        for edges in &mut self.adjacency {
            edges.iter_mut().for_each(&mut f);
        }
    }

    /// Keep only edges for which `keep(origin, edge)` returns true.
    ///
    /// Returns the number of edges removed.
    pub fn retain_edges(&mut self, mut keep: impl FnMut(StationIndex, &Edge) -> bool) -> usize {
        let mut removed = 0;
        for (i, edges) in self.adjacency.iter_mut().enumerate() {
            let before = edges.len();
            edges.retain(|e| keep(StationIndex(i), e));
            removed += before - edges.len();
        }
        removed
    }

    /// Drop every outgoing edge of `station`. Returns the number removed.
    pub fn clear_station(&mut self, station: StationIndex) -> usize {
        self.adjacency
            .get_mut(station.0)
            .map(|edges| std::mem::take(edges).len())
            .unwrap_or(0)
    }

    /// Remove all edges between `a` and `b`, in both directions and on every
    /// line. Returns the number removed.
    pub fn remove_connection(&mut self, a: StationIndex, b: StationIndex) -> usize {
        self.retain_edges(|from, e| !((from == a && e.to == b) || (from == b && e.to == a)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(to: usize, line: &str, time: u32) -> Edge {
        Edge {
            to: StationIndex(to),
            line: LineId::new(line).unwrap(),
            time,
            cost: 2650,
        }
    }

    fn triangle() -> Graph {
        let mut g = Graph::with_stations(3);
        g.add_edge(StationIndex(0), edge(1, "X", 10));
        g.add_edge(StationIndex(1), edge(0, "X", 10));
        g.add_edge(StationIndex(1), edge(2, "Y", 20));
        g.add_edge(StationIndex(2), edge(1, "Y", 20));
        g.add_edge(StationIndex(0), edge(2, "Z", 50));
        g.add_edge(StationIndex(2), edge(0, "Z", 50));
        g
    }

    #[test]
    fn counts() {
        let g = triangle();
        assert_eq!(g.station_count(), 3);
        assert_eq!(g.edge_count(), 6);
        assert_eq!(g.edges_from(StationIndex(0)).len(), 2);
        assert!(g.edges_from(StationIndex(9)).is_empty());
    }

    #[test]
    fn find_edge_returns_first_match() {
        let mut g = triangle();
        g.add_edge(StationIndex(0), edge(1, "W", 1));

        let e = g.find_edge(StationIndex(0), StationIndex(1)).unwrap();
        assert_eq!(e.line.as_str(), "X");
        assert!(g.find_edge(StationIndex(0), StationIndex(0)).is_none());
    }

    #[test]
    fn remove_connection_both_directions() {
        let mut g = triangle();
        assert_eq!(g.remove_connection(StationIndex(0), StationIndex(1)), 2);
        assert!(g.find_edge(StationIndex(0), StationIndex(1)).is_none());
        assert!(g.find_edge(StationIndex(1), StationIndex(0)).is_none());
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn clear_station_only_outgoing() {
        let mut g = triangle();
        assert_eq!(g.clear_station(StationIndex(2)), 2);
        assert!(g.edges_from(StationIndex(2)).is_empty());
        assert!(g.find_edge(StationIndex(1), StationIndex(2)).is_some());
        assert_eq!(g.clear_station(StationIndex(7)), 0);
    }

    #[test]
    fn for_each_edge_mut_touches_all() {
        let mut g = triangle();
        g.for_each_edge_mut(|e| e.time *= 2);
        assert_eq!(g.find_edge(StationIndex(0), StationIndex(2)).unwrap().time, 100);
        assert_eq!(g.find_edge(StationIndex(2), StationIndex(1)).unwrap().time, 40);
    }
}

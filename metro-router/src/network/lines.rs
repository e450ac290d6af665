//! Line ordering.
//!
//! Lines are not stored as ordered station lists; the order is recovered by
//! following the line's declared connections from its first declared
//! segment.

use std::collections::HashSet;

use super::topology::Network;
use crate::domain::StationId;

/// Direction of travel along a line's declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the end of the line.
    Forward,
    /// Towards the start of the line.
    Backward,
}

impl Network {
    /// Stations of a line in travel order.
    ///
    /// Starts at the origin of the first declared connection on `line` and
    /// repeatedly follows the first connection leaving the current station.
    /// Stations declared before that origin are not included; cycles stop at
    /// the first repeated station. Unknown lines yield an empty list.
    pub fn stations_in_line(&self, line: &str) -> Vec<StationId> {
        let segments: Vec<_> = self
            .connections()
            .iter()
            .filter(|c| c.line.as_str() == line)
            .collect();

        let Some(first) = segments.first() else {
            return Vec::new();
        };

        let mut order = vec![first.from.clone()];
        let mut seen: HashSet<&StationId> = HashSet::from([&first.from]);
        let mut current = &first.from;

        while let Some(next) = segments.iter().find(|c| &c.from == current) {
            if !seen.insert(&next.to) {
                break;
            }
            order.push(next.to.clone());
            current = &next.to;
        }

        order
    }

    /// The station next to `station` on `line` in the given direction.
    ///
    /// Returns `None` if the station is not on the line or is at its end.
    pub fn neighbour_in_line(
        &self,
        station: &str,
        line: &str,
        direction: Direction,
    ) -> Option<StationId> {
        let order = self.stations_in_line(line);
        let pos = order.iter().position(|s| s.as_str() == station)?;

        match direction {
            Direction::Forward => order.get(pos + 1).cloned(),
            Direction::Backward => pos.checked_sub(1).and_then(|i| order.get(i).cloned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(ids: &[StationId]) -> Vec<&str> {
        ids.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn line_order_follows_connections() {
        let network = Network::medellin().unwrap();
        let k = network.stations_in_line("K");
        assert_eq!(
            names(&k),
            vec!["Acevedo", "Andalucía", "Popular", "Santo Domingo"]
        );

        let a = network.stations_in_line("A");
        assert_eq!(a.len(), 21);
        assert_eq!(a.first().map(|s| s.as_str()), Some("Niquía"));
        assert_eq!(a.last().map(|s| s.as_str()), Some("La Estrella"));
    }

    #[test]
    fn unknown_line_is_empty() {
        let network = Network::medellin().unwrap();
        assert!(network.stations_in_line("Z").is_empty());
    }

    #[test]
    fn neighbours() {
        let network = Network::medellin().unwrap();
        assert_eq!(
            network
                .neighbour_in_line("Popular", "K", Direction::Forward)
                .map(|s| s.to_string()),
            Some("Santo Domingo".to_string())
        );
        assert_eq!(
            network
                .neighbour_in_line("Popular", "K", Direction::Backward)
                .map(|s| s.to_string()),
            Some("Andalucía".to_string())
        );
        assert!(
            network
                .neighbour_in_line("Santo Domingo", "K", Direction::Forward)
                .is_none()
        );
        assert!(
            network
                .neighbour_in_line("Acevedo", "K", Direction::Backward)
                .is_none()
        );
        assert!(
            network
                .neighbour_in_line("Bello", "K", Direction::Forward)
                .is_none()
        );
    }
}

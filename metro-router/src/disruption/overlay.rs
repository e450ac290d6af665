//! Closure and delay state layered over a static network.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::error::DisruptionError;
use crate::domain::{LineId, StationId};
use crate::network::Network;

/// Current disruptions: closed stations, closed lines at stations, and a
/// system-wide delay factor.
///
/// The overlay only records state. The effective graph is derived from it by
/// [`super::effective_graph`], always starting from the pristine network, so
/// applying the same overlay twice gives the same graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    closed_stations: BTreeSet<StationId>,
    closed_station_lines: BTreeMap<StationId, BTreeSet<LineId>>,
    closed_lines: BTreeSet<LineId>,
    delay_factor: f64,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            closed_stations: BTreeSet::new(),
            closed_station_lines: BTreeMap::new(),
            closed_lines: BTreeSet::new(),
            delay_factor: 1.0,
        }
    }
}

impl Overlay {
    /// An overlay with no disruptions and a delay factor of 1.0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stations closed entirely.
    pub fn closed_stations(&self) -> &BTreeSet<StationId> {
        &self.closed_stations
    }

    /// Lines closed at individual stations.
    pub fn closed_station_lines(&self) -> &BTreeMap<StationId, BTreeSet<LineId>> {
        &self.closed_station_lines
    }

    /// Lines closed network-wide. Nothing sets these yet; closures are
    /// scoped per station via [`Overlay::close_station_line`].
    pub fn closed_lines(&self) -> &BTreeSet<LineId> {
        &self.closed_lines
    }

    /// Multiplier applied to every edge's travel time.
    pub fn delay_factor(&self) -> f64 {
        self.delay_factor
    }

    /// True if nothing is closed and the delay factor is 1.0.
    pub fn is_clear(&self) -> bool {
        self.closed_stations.is_empty()
            && self.closed_station_lines.is_empty()
            && self.closed_lines.is_empty()
            && self.delay_factor == 1.0
    }

    /// Set the delay factor. Replaces, never multiplies, the current value.
    ///
    /// The factor must be finite, non-negative, and small enough that the
    /// network's longest connection still fits in a `u32` of seconds once
    /// delayed.
    pub fn set_delay_factor(&mut self, network: &Network, factor: f64) -> Result<(), DisruptionError> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(DisruptionError::InvalidDelayFactor(factor));
        }
        let longest = network.longest_connection_time();
        if (f64::from(longest) * factor).round() > f64::from(u32::MAX) {
            return Err(DisruptionError::DelayOverflow { factor, longest });
        }
        self.delay_factor = factor;
        Ok(())
    }

    /// Close a station entirely. Unknown stations are ignored.
    ///
    /// Returns true if the overlay changed.
    pub fn close_station(&mut self, network: &Network, station: &str) -> bool {
        match network.station(station) {
            Some(s) => self.closed_stations.insert(s.id.clone()),
            None => false,
        }
    }

    /// Reopen a fully closed station. Returns true if the overlay changed.
    pub fn open_station(&mut self, station: &str) -> bool {
        self.closed_stations.remove(station)
    }

    /// Close one line at a station.
    ///
    /// The station is not required to serve the line; the entry is stored
    /// and filtered on regardless. Returns true if the overlay changed.
    pub fn close_station_line(&mut self, station: &str, line: &str) -> Result<bool, DisruptionError> {
        let station = StationId::new(station)?;
        let line = LineId::new(line)?;
        Ok(self
            .closed_station_lines
            .entry(station)
            .or_default()
            .insert(line))
    }

    /// Reopen one line at a station, dropping the station's entry once no
    /// closed lines remain. Returns true if the overlay changed.
    pub fn open_station_line(&mut self, station: &str, line: &str) -> bool {
        let Some(lines) = self.closed_station_lines.get_mut(station) else {
            return false;
        };
        let removed = lines.remove(line);
        if lines.is_empty() {
            self.closed_station_lines.remove(station);
        }
        removed
    }

    /// Clear every closure and reset the delay factor to 1.0.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether a station can be used as an origin, destination or
    /// intermediate stop.
    ///
    /// A station is accessible unless it is fully closed, or every line it
    /// serves is closed at it. A station with closed-line entries but no
    /// known lines (not in `network`) is inaccessible.
    pub fn is_station_accessible(&self, network: &Network, station: &str) -> bool {
        if self.closed_stations.contains(station) {
            return false;
        }

        match self.closed_station_lines.get(station) {
            Some(closed) => network
                .station_lines(station)
                .iter()
                .any(|line| !closed.contains(line)),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Station, TransportMode};
    use crate::network::Connection;

    fn network() -> Network {
        let station = |id: &str, lines: &[&str]| Station {
            id: StationId::new(id).unwrap(),
            lines: lines.iter().map(|l| LineId::new(*l).unwrap()).collect(),
            mode: TransportMode::Metro,
        };
        Network::new(
            vec![station("A", &["X"]), station("M", &["P", "Q"])],
            vec![Connection {
                from: StationId::new("A").unwrap(),
                to: StationId::new("M").unwrap(),
                time: 60,
                line: LineId::new("X").unwrap(),
            }],
        )
        .unwrap()
    }

    #[test]
    fn default_is_clear() {
        let overlay = Overlay::new();
        assert!(overlay.is_clear());
        assert_eq!(overlay.delay_factor(), 1.0);
    }

    #[test]
    fn delay_factor_replaces() {
        let network = network();
        let mut overlay = Overlay::new();
        overlay.set_delay_factor(&network, 1.5).unwrap();
        overlay.set_delay_factor(&network, 1.5).unwrap();
        assert_eq!(overlay.delay_factor(), 1.5);
        overlay.set_delay_factor(&network, 0.0).unwrap();
        assert_eq!(overlay.delay_factor(), 0.0);
    }

    #[test]
    fn invalid_delay_factor_rejected() {
        let network = network();
        let mut overlay = Overlay::new();
        overlay.set_delay_factor(&network, 2.0).unwrap();

        assert!(overlay.set_delay_factor(&network, -0.1).is_err());
        assert!(overlay.set_delay_factor(&network, f64::NAN).is_err());
        assert!(overlay.set_delay_factor(&network, f64::INFINITY).is_err());
        assert_eq!(overlay.delay_factor(), 2.0);
    }

    #[test]
    fn delay_that_overflows_travel_time_rejected() {
        // Longest connection is 60s.
        let network = network();
        let mut overlay = Overlay::new();
        let limit = f64::from(u32::MAX) / 60.0;

        assert!(overlay.set_delay_factor(&network, limit * 0.99).is_ok());
        assert_eq!(
            overlay.set_delay_factor(&network, limit * 2.0),
            Err(DisruptionError::DelayOverflow {
                factor: limit * 2.0,
                longest: 60,
            })
        );
        assert_eq!(overlay.delay_factor(), limit * 0.99);
    }

    #[test]
    fn close_station_is_idempotent() {
        let network = network();
        let mut overlay = Overlay::new();
        assert!(overlay.close_station(&network, "A"));
        assert!(!overlay.close_station(&network, "A"));
        assert_eq!(overlay.closed_stations().len(), 1);
    }

    #[test]
    fn close_unknown_station_is_noop() {
        let network = network();
        let mut overlay = Overlay::new();
        assert!(!overlay.close_station(&network, "Nowhere"));
        assert!(overlay.is_clear());
    }

    #[test]
    fn open_station_line_drops_empty_entry() {
        let mut overlay = Overlay::new();
        overlay.close_station_line("M", "P").unwrap();
        overlay.close_station_line("M", "Q").unwrap();
        assert_eq!(overlay.closed_station_lines()["M"].len(), 2);

        assert!(overlay.open_station_line("M", "P"));
        assert!(overlay.closed_station_lines().contains_key("M"));
        assert!(overlay.open_station_line("M", "Q"));
        assert!(!overlay.closed_station_lines().contains_key("M"));
        assert!(!overlay.open_station_line("M", "Q"));
    }

    #[test]
    fn close_station_line_rejects_blank() {
        let mut overlay = Overlay::new();
        assert!(overlay.close_station_line("", "P").is_err());
        assert!(overlay.close_station_line("M", " ").is_err());
        assert!(overlay.is_clear());
    }

    #[test]
    fn accessibility_rules() {
        let network = network();
        let mut overlay = Overlay::new();
        assert!(overlay.is_station_accessible(&network, "M"));

        overlay.close_station_line("M", "P").unwrap();
        assert!(overlay.is_station_accessible(&network, "M"));

        overlay.close_station_line("M", "Q").unwrap();
        assert!(!overlay.is_station_accessible(&network, "M"));

        overlay.close_station(&network, "A");
        assert!(!overlay.is_station_accessible(&network, "A"));
    }

    #[test]
    fn closing_unserved_line_keeps_station_accessible() {
        let network = network();
        let mut overlay = Overlay::new();
        overlay.close_station_line("A", "Q").unwrap();
        assert!(overlay.is_station_accessible(&network, "A"));
    }

    #[test]
    fn unknown_station_with_entry_is_inaccessible() {
        let network = network();
        let mut overlay = Overlay::new();
        assert!(overlay.is_station_accessible(&network, "Ghost"));
        overlay.close_station_line("Ghost", "X").unwrap();
        assert!(!overlay.is_station_accessible(&network, "Ghost"));
    }

    #[test]
    fn reset_clears_everything() {
        let network = network();
        let mut overlay = Overlay::new();
        overlay.close_station(&network, "A");
        overlay.close_station_line("M", "P").unwrap();
        overlay.set_delay_factor(&network, 3.0).unwrap();
        assert!(!overlay.is_clear());

        overlay.reset();
        assert!(overlay.is_clear());
        assert_eq!(overlay, Overlay::default());
    }
}

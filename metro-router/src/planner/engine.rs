//! The routing engine: a network, its current disruptions, and the graph
//! derived from them.

use tracing::info;

use super::alternatives::{AlternativesRequest, alternative_routes};
use super::config::RouterConfig;
use super::guidance::{LineAssessment, assess_closed_station};
use super::reach::{Reachability, farthest_reachable};
use super::resilience::{ResilienceReport, analyze_resilience};
use super::search::{PathFinder, RouteError};
use crate::disruption::{DisruptionError, Overlay, effective_graph};
use crate::domain::{Criterion, LineId, Route};
use crate::network::{Graph, Network};

/// Routing engine for one disruption scenario.
///
/// Queries borrow the engine immutably; disruption changes borrow it mutably
/// and rebuild the effective graph before returning, so a query never sees
/// a half-applied change. Create one engine per scenario to compare
/// scenarios side by side.
#[derive(Debug, Clone)]
pub struct Engine {
    network: Network,
    config: RouterConfig,
    overlay: Overlay,
    graph: Graph,
}

impl Engine {
    /// Create an engine with no disruptions.
    pub fn new(network: Network, config: RouterConfig) -> Self {
        let overlay = Overlay::new();
        let graph = effective_graph(&network, &overlay);
        Self {
            network,
            config,
            overlay,
            graph,
        }
    }

    /// The static network.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Router configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Current disruptions.
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// The graph routes are currently computed on.
    pub fn effective_graph(&self) -> &Graph {
        &self.graph
    }

    fn rebuild(&mut self) {
        self.graph = effective_graph(&self.network, &self.overlay);
        info!(
            closed_stations = self.overlay.closed_stations().len(),
            stations_with_closed_lines = self.overlay.closed_station_lines().len(),
            delay_factor = self.overlay.delay_factor(),
            edges = self.graph.edge_count(),
            "effective graph rebuilt"
        );
    }

    /// Lines serving a station; empty for unknown stations.
    pub fn station_lines(&self, station: &str) -> &[LineId] {
        self.network.station_lines(station)
    }

    /// Whether a station can currently be used.
    pub fn is_station_accessible(&self, station: &str) -> bool {
        self.overlay.is_station_accessible(&self.network, station)
    }

    // ========== Disruptions ==========

    /// Set the system-wide delay factor (not cumulative).
    ///
    /// Rejected factors leave the engine unchanged.
    pub fn apply_delay_factor(&mut self, factor: f64) -> Result<(), DisruptionError> {
        self.overlay.set_delay_factor(&self.network, factor)?;
        self.rebuild();
        Ok(())
    }

    /// Close a station entirely. Unknown stations are ignored.
    pub fn close_station(&mut self, station: &str) {
        self.overlay.close_station(&self.network, station);
        self.rebuild();
    }

    /// Reopen a fully closed station.
    pub fn open_station(&mut self, station: &str) {
        self.overlay.open_station(station);
        self.rebuild();
    }

    /// Close one line at a station, leaving its other lines running.
    pub fn close_station_line(&mut self, station: &str, line: &str) -> Result<(), DisruptionError> {
        self.overlay.close_station_line(station, line)?;
        self.rebuild();
        Ok(())
    }

    /// Reopen one line at a station.
    pub fn open_station_line(&mut self, station: &str, line: &str) {
        self.overlay.open_station_line(station, line);
        self.rebuild();
    }

    /// Clear all closures and reset the delay factor to 1.0.
    pub fn reset_all_closures(&mut self) {
        self.overlay.reset();
        self.rebuild();
    }

    // ========== Queries ==========

    /// Best route from `start` to `end` under `criterion`.
    pub fn find_shortest_path(
        &self,
        start: &str,
        end: &str,
        criterion: Criterion,
    ) -> Result<Route, RouteError> {
        PathFinder::new(&self.network, &self.overlay, &self.graph).shortest_path(start, end, criterion)
    }

    /// The best route followed by sufficiently different alternatives, at
    /// most `max_routes` in total.
    pub fn find_alternative_routes(
        &self,
        start: &str,
        end: &str,
        criterion: Criterion,
        max_routes: usize,
    ) -> Result<Vec<Route>, RouteError> {
        let request = AlternativesRequest {
            start,
            end,
            criterion,
            max_routes,
            threshold: self.config.diversity_threshold,
        };
        alternative_routes(&self.network, &self.overlay, &self.graph, &request)
    }

    /// How much closing each of `critical` would disconnect the network.
    pub fn analyze_resilience<S: AsRef<str>>(&self, critical: &[S]) -> ResilienceReport {
        analyze_resilience(&self.network, &self.overlay, &self.graph, critical)
    }

    /// Everything reachable from `start`, and the furthest station by time.
    pub fn farthest_accessible_station(&self, start: &str) -> Result<Reachability, RouteError> {
        farthest_reachable(&self.network, &self.graph, start)
    }

    /// True if no route currently exists between two open stations.
    ///
    /// Unknown or closed endpoints are errors, not "blocked".
    pub fn is_direct_route_blocked(&self, start: &str, end: &str) -> Result<bool, RouteError> {
        match self.find_shortest_path(start, end, self.config.default_criterion) {
            Ok(_) => Ok(false),
            Err(RouteError::NoRouteFound { .. }) => Ok(true),
            Err(e) => Err(e),
        }
    }

    /// Per shared line of `start` and `end`, whether `closed` cuts the line
    /// between them and how far a rider can get.
    pub fn closure_guidance(&self, start: &str, end: &str, closed: &str) -> Vec<LineAssessment> {
        assess_closed_station(&self.network, start, end, closed)
    }
}

//! Data transfer objects for web requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::disruption::Overlay;
use crate::domain::{Criterion, Route, RouteStep, Station, TransportMode};

/// Request for the best route between two stations.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Origin station name
    pub from: String,

    /// Destination station name
    pub to: String,

    /// Optimization criterion (`time`, `cost`, `transfers`, or their
    /// Spanish names). Defaults to the router's configured criterion.
    pub criterion: Option<String>,
}

impl RouteRequest {
    /// Resolve the requested criterion, falling back to `default`.
    pub fn criterion_or(&self, default: Criterion) -> Criterion {
        self.criterion
            .as_deref()
            .map_or(default, Criterion::from_name)
    }
}

/// Request for a route plus alternatives.
#[derive(Debug, Deserialize)]
pub struct AlternativesRequest {
    pub from: String,
    pub to: String,
    pub criterion: Option<String>,

    /// Total routes wanted, primary included
    pub max_routes: Option<usize>,
}

impl AlternativesRequest {
    /// Resolve the requested criterion, falling back to `default`.
    pub fn criterion_or(&self, default: Criterion) -> Criterion {
        self.criterion
            .as_deref()
            .map_or(default, Criterion::from_name)
    }
}

/// One step of a route.
#[derive(Debug, Serialize, PartialEq)]
pub struct StepResult {
    pub from: String,
    pub to: String,
    pub line: String,

    /// Seconds
    pub time: u32,

    pub cost: u32,
    pub is_transfer: bool,
}

impl From<&RouteStep> for StepResult {
    fn from(step: &RouteStep) -> Self {
        Self {
            from: step.from.to_string(),
            to: step.to.to_string(),
            line: step.line.to_string(),
            time: step.time,
            cost: step.cost,
            is_transfer: step.is_transfer,
        }
    }
}

/// A route in responses.
#[derive(Debug, Serialize, PartialEq)]
pub struct RouteResult {
    /// Stations visited, origin first
    pub path: Vec<String>,

    pub steps: Vec<StepResult>,

    /// Total travel time in seconds
    pub total_time: u64,

    /// Total fare
    pub total_cost: u64,

    pub transfers: usize,

    /// Lines used, in order of first use
    pub lines: Vec<String>,

    /// Criterion the route was optimized for
    pub criterion: Criterion,
}

impl RouteResult {
    /// Convert a planner route for display.
    pub fn from_route(route: &Route) -> Self {
        Self {
            path: route.path.iter().map(|s| s.to_string()).collect(),
            steps: route.steps.iter().map(StepResult::from).collect(),
            total_time: route.total_time,
            total_cost: route.total_cost,
            transfers: route.transfers,
            lines: route.lines.iter().map(|l| l.to_string()).collect(),
            criterion: route.criterion,
        }
    }
}

/// Response for an alternatives request; the best route comes first.
#[derive(Debug, Serialize)]
pub struct AlternativesResponse {
    pub routes: Vec<RouteResult>,
}

/// A station in listings.
#[derive(Debug, Serialize, PartialEq)]
pub struct StationResult {
    pub id: String,
    pub lines: Vec<String>,
    pub mode: TransportMode,

    /// False when closed, or when every line at the station is closed
    pub accessible: bool,
}

impl StationResult {
    /// Convert a station, given its current accessibility.
    pub fn from_station(station: &Station, accessible: bool) -> Self {
        Self {
            id: station.id.to_string(),
            lines: station.lines.iter().map(|l| l.to_string()).collect(),
            mode: station.mode,
            accessible,
        }
    }
}

/// Response listing every station.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
}

/// Lines serving one station.
#[derive(Debug, Serialize)]
pub struct StationLinesResponse {
    pub station: String,
    pub lines: Vec<String>,
}

/// Request to set the system-wide delay factor.
#[derive(Debug, Deserialize)]
pub struct DelayRequest {
    /// Multiplier applied to every base travel time (1.0 = no delay)
    pub factor: f64,
}

/// Current disruption state.
#[derive(Debug, Serialize, PartialEq)]
pub struct DisruptionsResponse {
    pub closed_stations: Vec<String>,

    /// Closed lines per station
    pub closed_station_lines: BTreeMap<String, Vec<String>>,

    pub delay_factor: f64,
}

impl DisruptionsResponse {
    /// Snapshot an overlay.
    pub fn from_overlay(overlay: &Overlay) -> Self {
        Self {
            closed_stations: overlay
                .closed_stations()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            closed_station_lines: overlay
                .closed_station_lines()
                .iter()
                .map(|(station, lines)| {
                    (
                        station.to_string(),
                        lines.iter().map(|l| l.to_string()).collect(),
                    )
                })
                .collect(),
            delay_factor: overlay.delay_factor(),
        }
    }
}

/// Request for a resilience analysis.
#[derive(Debug, Deserialize)]
pub struct ResilienceRequest {
    /// Stations to close one at a time
    pub stations: Vec<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineId, StationId};
    use crate::network::{Connection, Network};

    fn sid(s: &str) -> StationId {
        StationId::new(s).unwrap()
    }

    fn lid(s: &str) -> LineId {
        LineId::new(s).unwrap()
    }

    fn make_test_route() -> Route {
        Route {
            path: vec![sid("Niquía"), sid("Bello"), sid("Madera")],
            steps: vec![
                RouteStep {
                    from: sid("Niquía"),
                    to: sid("Bello"),
                    line: lid("A"),
                    time: 108,
                    cost: 2650,
                    is_transfer: false,
                },
                RouteStep {
                    from: sid("Bello"),
                    to: sid("Madera"),
                    line: lid("A"),
                    time: 144,
                    cost: 2650,
                    is_transfer: false,
                },
            ],
            total_time: 252,
            total_cost: 5300,
            transfers: 0,
            lines: vec![lid("A")],
            weight: 252,
            criterion: Criterion::Time,
        }
    }

    #[test]
    fn route_result_from_route() {
        let result = RouteResult::from_route(&make_test_route());

        assert_eq!(result.path, vec!["Niquía", "Bello", "Madera"]);
        assert_eq!(result.steps.len(), 2);
        assert_eq!(result.steps[1].from, "Bello");
        assert_eq!(result.steps[1].time, 144);
        assert_eq!(result.total_time, 252);
        assert_eq!(result.total_cost, 5300);
        assert_eq!(result.lines, vec!["A"]);
    }

    #[test]
    fn route_result_serializes_criterion_lowercase() {
        let json = serde_json::to_value(RouteResult::from_route(&make_test_route())).unwrap();
        assert_eq!(json["criterion"], "time");
        assert_eq!(json["steps"][0]["line"], "A");
    }

    #[test]
    fn criterion_parsing_in_requests() {
        let req: RouteRequest =
            serde_json::from_str(r#"{"from": "A", "to": "B", "criterion": "costo"}"#).unwrap();
        assert_eq!(req.criterion_or(Criterion::Time), Criterion::Cost);

        let req: RouteRequest = serde_json::from_str(r#"{"from": "A", "to": "B"}"#).unwrap();
        assert_eq!(req.criterion_or(Criterion::Transfers), Criterion::Transfers);

        let req: RouteRequest =
            serde_json::from_str(r#"{"from": "A", "to": "B", "criterion": "fastest"}"#).unwrap();
        assert_eq!(req.criterion_or(Criterion::Cost), Criterion::Time);
    }

    #[test]
    fn disruptions_snapshot() {
        let network = Network::new(
            vec![
                Station {
                    id: sid("A"),
                    lines: vec![lid("X"), lid("Y")],
                    mode: TransportMode::Metro,
                },
                Station {
                    id: sid("B"),
                    lines: vec![lid("X")],
                    mode: TransportMode::Bus,
                },
            ],
            vec![Connection {
                from: sid("A"),
                to: sid("B"),
                time: 60,
                line: lid("X"),
            }],
        )
        .unwrap();

        let mut overlay = Overlay::new();
        overlay.close_station(&network, "B");
        overlay.close_station_line("A", "Y").unwrap();
        overlay.set_delay_factor(&network, 1.25).unwrap();

        let snapshot = DisruptionsResponse::from_overlay(&overlay);
        assert_eq!(snapshot.closed_stations, vec!["B"]);
        assert_eq!(
            snapshot.closed_station_lines.get("A"),
            Some(&vec!["Y".to_string()])
        );
        assert_eq!(snapshot.delay_factor, 1.25);

        let station = StationResult::from_station(&network.stations()[1], false);
        assert_eq!(station.id, "B");
        assert_eq!(station.mode, TransportMode::Bus);
        assert!(!station.accessible);
    }
}

//! Route results.
//!
//! A `Route` is produced fresh by every successful path search and is never
//! modified afterwards. It carries the visited stations, one step per edge
//! traversed, and totals derived from those steps.

use std::collections::HashSet;

use serde::Serialize;

use super::{Criterion, LineId, StationId};

/// One edge of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteStep {
    pub from: StationId,
    pub to: StationId,
    pub line: LineId,
    /// Travel time in seconds, after delays.
    pub time: u32,
    pub cost: u32,
    /// True when this step is on a different line from the previous step.
    pub is_transfer: bool,
}

/// A complete route between two stations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Stations visited, origin first.
    pub path: Vec<StationId>,

    /// Edges traversed, parallel to consecutive pairs of `path`.
    pub steps: Vec<RouteStep>,

    /// Sum of step times in seconds.
    pub total_time: u64,

    /// Sum of step costs.
    pub total_cost: u64,

    /// Number of line changes.
    pub transfers: usize,

    /// Distinct lines used, in order of first use.
    pub lines: Vec<LineId>,

    /// Accumulated weight under `criterion` (what the search minimized).
    pub weight: u64,

    /// Criterion the route was optimized for.
    pub criterion: Criterion,
}

impl Route {
    /// Returns the origin station.
    pub fn origin(&self) -> Option<&StationId> {
        self.path.first()
    }

    /// Returns the destination station.
    pub fn destination(&self) -> Option<&StationId> {
        self.path.last()
    }

    /// True if the route has no steps (origin equals destination).
    pub fn is_trivial(&self) -> bool {
        self.steps.is_empty()
    }

    /// True if the route passes through `station`, endpoints included.
    pub fn visits(&self, station: &str) -> bool {
        self.path.iter().any(|s| s.as_str() == station)
    }

    /// Jaccard similarity of the two routes' visited-station sets.
    ///
    /// Returns 1.0 for two empty paths.
    pub fn similarity(&self, other: &Route) -> f64 {
        let a: HashSet<&StationId> = self.path.iter().collect();
        let b: HashSet<&StationId> = other.path.iter().collect();

        let union = a.union(&b).count();
        if union == 0 {
            return 1.0;
        }
        let intersection = a.intersection(&b).count();
        intersection as f64 / union as f64
    }

    /// True if `other` shares few enough stations with this route.
    ///
    /// `threshold` is the minimum fraction of difference required: with 0.3
    /// the routes count as different when similarity is below 0.7.
    pub fn is_different_from(&self, other: &Route, threshold: f64) -> bool {
        self.similarity(other) < 1.0 - threshold
    }
}

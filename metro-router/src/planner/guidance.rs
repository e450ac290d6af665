//! Guidance for trips affected by a closed station.
//!
//! When a closure breaks a trip along a single line, riders need to know how
//! far along that line they can still get. This works purely on line order
//! and does not consult the effective graph.

use serde::Serialize;

use crate::domain::{LineId, StationId};
use crate::network::Network;

/// How a closed station affects travel between two stations on one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineAssessment {
    /// Line shared by origin and destination.
    pub line: LineId,

    /// True if the closed station lies between origin and destination.
    pub blocked: bool,

    /// Last station reachable before the closure when blocked; the
    /// destination otherwise. `None` when the closure is at the origin.
    pub last_accessible: Option<StationId>,
}

/// Assess every line serving both `start` and `end`.
///
/// Lines on which either endpoint cannot be located in line order are left
/// out.
pub fn assess_closed_station(
    network: &Network,
    start: &str,
    end: &str,
    closed: &str,
) -> Vec<LineAssessment> {
    let end_lines = network.station_lines(end);

    network
        .station_lines(start)
        .iter()
        .filter(|line| end_lines.contains(*line))
        .filter_map(|line| {
            let order = network.stations_in_line(line.as_str());
            let position = |s: &str| order.iter().position(|o| o.as_str() == s);

            let from = position(start)?;
            let to = position(end)?;
            let (low, high) = (from.min(to), from.max(to));

            match position(closed) {
                Some(at) if (low..=high).contains(&at) => {
                    let last = if from < to {
                        at.checked_sub(1)
                    } else {
                        Some(at + 1)
                    };
                    Some(LineAssessment {
                        line: line.clone(),
                        blocked: true,
                        last_accessible: last.and_then(|i| order.get(i).cloned()),
                    })
                }
                _ => Some(LineAssessment {
                    line: line.clone(),
                    blocked: false,
                    last_accessible: Some(order[to].clone()),
                }),
            }
        })
        .collect()
}

//! Network loading error types.

use crate::domain::{LineId, StationId};

/// Errors raised while loading or validating a static network.
///
/// All of these are fatal at load time: a network that fails validation is
/// never handed to the router.
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    /// A connection references a station that was never declared
    #[error("connection on line {line} references undeclared station {station}")]
    UnknownStation { station: StationId, line: LineId },

    /// The same station name is declared twice
    #[error("station {0} is declared more than once")]
    DuplicateStation(StationId),

    /// A station is served by no line at all
    #[error("station {0} has no lines")]
    NoLines(StationId),

    /// Dataset file could not be read
    #[error("failed to read network dataset: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset is not valid JSON or has the wrong shape
    #[error("failed to parse network dataset: {0}")]
    Json(#[from] serde_json::Error),
}

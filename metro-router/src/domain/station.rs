//! Station and line identifier types.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when an identifier is empty or blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} identifier: {reason}")]
pub struct InvalidId {
    kind: &'static str,
    reason: &'static str,
}

fn validate(kind: &'static str, s: &str) -> Result<(), InvalidId> {
    if s.trim().is_empty() {
        return Err(InvalidId {
            kind,
            reason: "cannot be empty",
        });
    }
    Ok(())
}

/// A station name, unique within a network.
///
/// Station names are free-form (e.g. "Parque Berrío", "Prado (Bus)"); the
/// only requirement is that they are not blank.
///
/// # Examples
///
/// ```
/// use metro_router::domain::StationId;
///
/// let id = StationId::new("San Antonio").unwrap();
/// assert_eq!(id.as_str(), "San Antonio");
///
/// assert!(StationId::new("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationId(String);

impl StationId {
    /// Create a station id, rejecting blank names.
    pub fn new(s: impl Into<String>) -> Result<Self, InvalidId> {
        let s = s.into();
        validate("station", &s)?;
        Ok(StationId(s))
    }

    /// Returns the station name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StationId {
    type Error = InvalidId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        StationId::new(s)
    }
}

impl From<StationId> for String {
    fn from(id: StationId) -> Self {
        id.0
    }
}

impl Borrow<str> for StationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A line identifier such as `"A"`, `"1"` or `"T"`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LineId(String);

impl LineId {
    /// Create a line id, rejecting blank names.
    pub fn new(s: impl Into<String>) -> Result<Self, InvalidId> {
        let s = s.into();
        validate("line", &s)?;
        Ok(LineId(s))
    }

    /// Returns the line id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LineId {
    type Error = InvalidId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        LineId::new(s)
    }
}

impl From<LineId> for String {
    fn from(id: LineId) -> Self {
        id.0
    }
}

impl Borrow<str> for LineId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transport mode of a station. Only used to derive the flat fare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Metro,
    Bus,
    Cable,
    #[serde(alias = "tranvia")]
    Tram,
}

impl TransportMode {
    /// Flat fare charged for travelling *to* a station of this mode.
    pub fn base_cost(self) -> u32 {
        match self {
            TransportMode::Metro => 2650,
            TransportMode::Bus => 2950,
            TransportMode::Cable => 2650,
            TransportMode::Tram => 2650,
        }
    }
}

/// A station in the network.
///
/// Stations are reference data: created once when the network is loaded and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    /// Unique station name.
    pub id: StationId,

    /// Lines serving this station, in declaration order.
    pub lines: Vec<LineId>,

    /// Transport mode, used for fares.
    pub mode: TransportMode,
}

impl Station {
    /// Returns true if more than one line serves this station.
    pub fn is_multimodal(&self) -> bool {
        self.lines.len() > 1
    }

    /// Returns true if `line` serves this station.
    pub fn serves(&self, line: &str) -> bool {
        self.lines.iter().any(|l| l.as_str() == line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn station(id: &str, lines: &[&str], mode: TransportMode) -> Station {
        Station {
            id: StationId::new(id).unwrap(),
            lines: lines.iter().map(|l| LineId::new(*l).unwrap()).collect(),
            mode,
        }
    }

    #[test]
    fn reject_blank_ids() {
        assert!(StationId::new("").is_err());
        assert!(StationId::new(" \t").is_err());
        assert!(LineId::new("").is_err());
        assert!(StationId::new("Prado (Bus)").is_ok());
        assert!(LineId::new("1").is_ok());
    }

    #[test]
    fn error_display() {
        let err = StationId::new("").unwrap_err();
        assert_eq!(err.to_string(), "invalid station identifier: cannot be empty");

        let err = LineId::new("").unwrap_err();
        assert_eq!(err.to_string(), "invalid line identifier: cannot be empty");
    }

    #[test]
    fn display_and_debug() {
        let id = StationId::new("Poblado").unwrap();
        assert_eq!(format!("{id}"), "Poblado");
        assert_eq!(format!("{id:?}"), "StationId(Poblado)");

        let line = LineId::new("A").unwrap();
        assert_eq!(format!("{line:?}"), "LineId(A)");
    }

    #[test]
    fn lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(StationId::new("Bello").unwrap(), 1);
        assert_eq!(map.get("Bello"), Some(&1));
        assert_eq!(map.get("Madera"), None);
    }

    #[test]
    fn serde_as_plain_string() {
        let id: StationId = serde_json::from_str("\"Acevedo\"").unwrap();
        assert_eq!(id.as_str(), "Acevedo");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"Acevedo\"");

        assert!(serde_json::from_str::<StationId>("\"\"").is_err());
    }

    #[test]
    fn mode_costs() {
        assert_eq!(TransportMode::Metro.base_cost(), 2650);
        assert_eq!(TransportMode::Bus.base_cost(), 2950);
        assert_eq!(TransportMode::Cable.base_cost(), 2650);
        assert_eq!(TransportMode::Tram.base_cost(), 2650);
    }

    #[test]
    fn mode_accepts_spanish_tram() {
        let mode: TransportMode = serde_json::from_str("\"tranvia\"").unwrap();
        assert_eq!(mode, TransportMode::Tram);
        let mode: TransportMode = serde_json::from_str("\"tram\"").unwrap();
        assert_eq!(mode, TransportMode::Tram);
    }

    #[test]
    fn multimodal_and_serves() {
        let acevedo = station("Acevedo", &["A", "K", "P"], TransportMode::Metro);
        assert!(acevedo.is_multimodal());
        assert!(acevedo.serves("K"));
        assert!(!acevedo.serves("B"));

        let bello = station("Bello", &["A"], TransportMode::Metro);
        assert!(!bello.is_multimodal());
    }
}

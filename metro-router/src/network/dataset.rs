//! JSON dataset loading.
//!
//! A dataset is a JSON object with a `stations` array and a `connections`
//! array:
//!
//! ```json
//! {
//!   "stations": [{"id": "Bello", "lines": ["A"], "mode": "metro"}],
//!   "connections": [{"from": "Niquía", "to": "Bello", "time": 108, "line": "A"}]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::TopologyError;
use super::topology::{Connection, Network};
use crate::domain::Station;

/// Bundled Medellín metro network.
const MEDELLIN: &str = include_str!("../../data/medellin.json");

/// Raw dataset as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub stations: Vec<Station>,
    pub connections: Vec<Connection>,
}

impl Network {
    /// Build a network from a parsed dataset.
    pub fn from_dataset(dataset: Dataset) -> Result<Self, TopologyError> {
        Network::new(dataset.stations, dataset.connections)
    }

    /// Parse and validate a network from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, TopologyError> {
        let dataset: Dataset = serde_json::from_str(json)?;
        Network::from_dataset(dataset)
    }

    /// Read, parse and validate a network from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TopologyError> {
        let json = std::fs::read_to_string(path)?;
        Network::from_json_str(&json)
    }

    /// The bundled Medellín network (metro lines A and B, bus lines 1 and 2,
    /// cable lines H, J, K, M and P, and tram line T).
    pub fn medellin() -> Result<Self, TopologyError> {
        Network::from_json_str(MEDELLIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn bundled_dataset_loads() {
        let network = Network::medellin().unwrap();
        assert_eq!(network.len(), 71);
        assert_eq!(network.connections().len(), 86);
        assert_eq!(network.static_graph().edge_count(), 172);

        let lines: Vec<&str> = network
            .station_lines("San Antonio")
            .iter()
            .map(|l| l.as_str())
            .collect();
        assert_eq!(lines, vec!["A", "B", "T"]);
    }

    #[test]
    fn bundled_dataset_tram_mode() {
        let network = Network::medellin().unwrap();
        let station = network.station("Miraflores").unwrap();
        assert_eq!(station.mode, crate::domain::TransportMode::Tram);
        assert!(station.is_multimodal());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "stations": [
                    {{"id": "A", "lines": ["X"], "mode": "metro"}},
                    {{"id": "B", "lines": ["X"], "mode": "bus"}}
                ],
                "connections": [{{"from": "A", "to": "B", "time": 90, "line": "X"}}]
            }}"#
        )
        .unwrap();

        let network = Network::load(file.path()).unwrap();
        assert_eq!(network.len(), 2);
        assert_eq!(network.static_graph().edge_count(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Network::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, TopologyError::Io(_)));
    }

    #[test]
    fn malformed_json_is_json_error() {
        let err = Network::from_json_str("{\"stations\": [").unwrap_err();
        assert!(matches!(err, TopologyError::Json(_)));

        let err = Network::from_json_str(r#"{"stations": [{"id": "", "lines": ["A"], "mode": "metro"}], "connections": []}"#)
            .unwrap_err();
        assert!(matches!(err, TopologyError::Json(_)));
    }

    #[test]
    fn undeclared_endpoint_in_json() {
        let json = r#"{
            "stations": [{"id": "A", "lines": ["X"], "mode": "metro"}],
            "connections": [{"from": "A", "to": "B", "time": 90, "line": "X"}]
        }"#;
        let err = Network::from_json_str(json).unwrap_err();
        assert!(matches!(err, TopologyError::UnknownStation { .. }));
    }
}

//! Static topology and coordinate tables.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::NetworkError;

/// Embedded reference topology: six Washington Metro lines.
const REFERENCE_TOPOLOGY: &str = include_str!("../../data/reference_topology.json");

/// One line as an ordered list of station names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSpec {
    pub color: String,
    /// Terminus at the start of `stations`.
    pub terminus_a: String,
    /// Terminus at the end of `stations`.
    pub terminus_b: String,
    pub stations: Vec<String>,
}

/// Location of a named station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationCoordinate {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// The static tables a [`super::Network`] is built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    pub lines: Vec<LineSpec>,
    pub coordinates: Vec<StationCoordinate>,
}

impl Topology {
    /// The embedded reference topology.
    pub fn reference() -> Result<Self, NetworkError> {
        Self::from_json(REFERENCE_TOPOLOGY)
    }

    pub fn from_json(json: &str) -> Result<Self, NetworkError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a topology from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, NetworkError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reference_has_six_lines() {
        let topology = Topology::reference().unwrap();
        assert_eq!(topology.lines.len(), 6);
        assert_eq!(topology.coordinates.len(), 98);

        let colors: Vec<_> = topology.lines.iter().map(|l| l.color.as_str()).collect();
        assert_eq!(
            colors,
            vec!["Green", "Red", "Orange", "Silver", "Yellow", "Blue"]
        );
    }

    #[test]
    fn reference_termini_are_line_ends() {
        let topology = Topology::reference().unwrap();
        for line in &topology.lines {
            assert_eq!(line.stations.first(), Some(&line.terminus_a));
            assert_eq!(line.stations.last(), Some(&line.terminus_b));
        }
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("topology.json");
        std::fs::write(
            &path,
            r#"{
                "lines": [
                    { "color": "Red", "terminus_a": "A", "terminus_b": "B", "stations": ["A", "B"] }
                ],
                "coordinates": [
                    { "name": "A", "lat": 38.0, "lon": -77.0 },
                    { "name": "B", "lat": 38.1, "lon": -77.0 }
                ]
            }"#,
        )
        .unwrap();

        let topology = Topology::from_path(&path).unwrap();
        assert_eq!(topology.lines.len(), 1);
        assert_eq!(topology.coordinates[1].name, "B");
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = Topology::from_path("/nonexistent/topology.json");
        assert!(matches!(result, Err(NetworkError::Io(_))));
    }

    #[test]
    fn malformed_json_is_json_error() {
        let result = Topology::from_json("{ \"lines\": 3 }");
        assert!(matches!(result, Err(NetworkError::Json(_))));
    }
}

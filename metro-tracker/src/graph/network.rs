//! The station graph together with station coordinates.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::domain::{Coordinate, StationId};

use super::error::NetworkError;
use super::topology::Topology;
use super::StationGraph;

/// A built transit network: topology plus a coordinate for every station.
#[derive(Debug, Clone)]
pub struct Network {
    graph: StationGraph,
    /// Indexed by `StationId`.
    coordinates: Vec<Coordinate>,
}

impl Network {
    /// Build a network from topology tables.
    ///
    /// Every station named by a line must have a coordinate. Coordinates for
    /// stations no line serves are ignored.
    pub fn build(topology: &Topology) -> Result<Self, NetworkError> {
        let mut graph = StationGraph::new();
        for line in &topology.lines {
            graph.add_line(&line.stations, &line.color, &line.terminus_a, &line.terminus_b)?;
        }

        let mut by_name: HashMap<&str, Coordinate> = HashMap::new();
        for entry in &topology.coordinates {
            if graph.station_id(&entry.name).is_none() {
                warn!(station = %entry.name, "ignoring coordinate for unknown station");
                continue;
            }
            by_name.insert(&entry.name, Coordinate::new(entry.lat, entry.lon));
        }

        let coordinates = graph
            .station_ids()
            .map(|id| {
                let name = graph.name(id);
                by_name
                    .get(name)
                    .copied()
                    .ok_or_else(|| NetworkError::MissingCoordinate(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            stations = graph.len(),
            lines = graph.line_count(),
            "network loaded"
        );

        Ok(Self { graph, coordinates })
    }

    /// The embedded reference network.
    pub fn reference() -> Result<Self, NetworkError> {
        Self::build(&Topology::reference()?)
    }

    pub fn graph(&self) -> &StationGraph {
        &self.graph
    }

    pub fn coordinate(&self, id: StationId) -> Coordinate {
        self.coordinates[id.index()]
    }

    /// Distance in miles between two stations.
    pub fn miles_between(&self, a: StationId, b: StationId) -> f64 {
        self.coordinate(a).miles_to(&self.coordinate(b))
    }

    /// Distance in miles from a position to a station.
    pub fn miles_to(&self, from: &Coordinate, station: StationId) -> f64 {
        from.miles_to(&self.coordinate(station))
    }

    /// The station nearest to `position`, over every known station.
    pub fn closest_station(&self, position: &Coordinate) -> Option<StationId> {
        self.graph
            .station_ids()
            .map(|id| (id, self.miles_to(position, id)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }
}

//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, StationId};
use crate::graph::Network;
use crate::motion::MotionSample;
use crate::navigation::PositionFix;
use crate::planner::TripPlan;
use crate::tracker::TrackerView;

/// A station with its position and the lines calling there.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Line colours in the order the topology lists them
    pub lines: Vec<String>,
}

impl StationResult {
    pub fn from_station(network: &Network, id: StationId) -> Self {
        let graph = network.graph();
        let coordinate = network.coordinate(id);
        Self {
            name: graph.name(id).to_string(),
            lat: coordinate.lat,
            lon: coordinate.lon,
            lines: graph
                .lines_at(id)
                .iter()
                .map(|line| graph.line_name(line).to_string())
                .collect(),
        }
    }
}

/// Response listing every station.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
}

/// Query for planning a route.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Origin station name
    pub from: String,

    /// Destination station name
    pub to: String,
}

/// One ride of a planned route.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    pub board: String,
    pub alight: String,

    /// Line to take, e.g. "Blue/Silver Downtown Largo Train"
    pub line: String,

    pub hops: usize,
}

/// A planned route.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Station names from origin to destination inclusive
    pub stations: Vec<String>,

    /// Hops plus switch penalties
    pub weight: u32,

    pub switches: usize,

    pub hops: usize,

    /// Rides in order; empty when origin equals destination
    pub segments: Vec<SegmentResult>,

    /// Stations where a ride ends, ending with the destination
    pub schedule: Vec<String>,
}

impl RouteResponse {
    pub fn from_plan(network: &Network, plan: &TripPlan) -> Self {
        let graph = network.graph();
        let name = |id: StationId| graph.name(id).to_string();

        Self {
            stations: plan.route.stations.iter().map(|id| name(*id)).collect(),
            weight: plan.route.weight,
            switches: plan.route.switches,
            hops: plan.route.hops(),
            segments: plan
                .itinerary
                .segments()
                .iter()
                .map(|segment| SegmentResult {
                    board: name(segment.board),
                    alight: name(segment.alight),
                    line: segment.label(graph),
                    hops: segment.hops,
                })
                .collect(),
            schedule: plan.schedule.iter().map(name).collect(),
        }
    }
}

/// Request to start tracking a trip.
#[derive(Debug, Deserialize)]
pub struct StartTripRequest {
    pub from: String,
    pub to: String,

    /// Current position, if known; otherwise the first fix is used
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl StartTripRequest {
    /// Starting position when both coordinates were given.
    pub fn start(&self) -> Option<Coordinate> {
        self.lat.zip(self.lon).map(|(lat, lon)| Coordinate::new(lat, lon))
    }
}

/// Response for a started trip.
#[derive(Debug, Serialize)]
pub struct StartTripResponse {
    pub route: RouteResponse,
    pub status: TrackerView,
}

/// A position report from the device.
#[derive(Debug, Deserialize)]
pub struct FixRequest {
    pub lat: f64,
    pub lon: f64,

    /// Ground speed in m/s (defaults to 0)
    pub speed: Option<f64>,

    /// Defaults to the time the request arrives
    pub timestamp: Option<DateTime<Utc>>,
}

impl FixRequest {
    pub fn into_fix(self, now: DateTime<Utc>) -> PositionFix {
        PositionFix::new(
            Coordinate::new(self.lat, self.lon),
            self.speed.unwrap_or(0.0),
            self.timestamp.unwrap_or(now),
        )
    }
}

/// An inertial reading from the device.
#[derive(Debug, Deserialize)]
pub struct MotionRequest {
    /// Device-frame user acceleration in g
    pub acceleration: [f64; 3],

    /// Row-major device-to-reference rotation; identity when absent
    pub rotation: Option<[[f64; 3]; 3]>,

    /// Defaults to the time the request arrives
    pub timestamp: Option<DateTime<Utc>>,
}

impl MotionRequest {
    pub fn into_sample(self, now: DateTime<Utc>) -> MotionSample {
        let timestamp = self.timestamp.unwrap_or(now);
        match self.rotation {
            Some(rotation) => MotionSample::new(self.acceleration, rotation, timestamp),
            None => MotionSample::unrotated(self.acceleration, timestamp),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

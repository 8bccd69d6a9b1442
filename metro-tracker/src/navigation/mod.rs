//! Live navigation along a planned trip.
//!
//! Each position fix drives one tick of the [`Navigator`]. A tick compares
//! the distance to the next station by satellite fix and by dead reckoning
//! against fixed thresholds, then arrives, approaches, or checks whether the
//! traveler has already passed stops.

mod alert;
mod config;
mod state;
mod status;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::Coordinate;

pub use alert::{Alert, AlertKind};
pub use config::NavigationConfig;
pub use state::{Navigator, TickOutcome};
pub use status::{StatusView, SwitchSummary};

/// One position report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    pub coordinate: Coordinate,

    /// Instantaneous ground speed, m/s.
    pub speed_mps: f64,

    pub timestamp: DateTime<Utc>,
}

impl PositionFix {
    pub fn new(coordinate: Coordinate, speed_mps: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            coordinate,
            speed_mps,
            timestamp,
        }
    }
}

/// Where the traveler is relative to the next station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavStatus {
    Traveling,
    Approaching,
    Arriving,
    /// The remaining path is empty.
    Reached,
}

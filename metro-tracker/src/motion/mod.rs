//! Inertial dead reckoning.
//!
//! Integrates filtered, globally-oriented acceleration into a running
//! distance since the last station boundary. Navigation reads it through
//! [`DeadReckoning`] so tests can substitute a scripted source.

mod config;
mod estimator;
mod filter;

use chrono::{DateTime, Utc};
use nalgebra::{Matrix3, Vector3};
use serde::Serialize;

use crate::domain::meters_to_miles;

pub use config::{EstimatorConfig, GRAVITY};
pub use estimator::Estimator;

/// One inertial reading.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionSample {
    /// Device-frame user acceleration, in g.
    pub acceleration: Vector3<f64>,

    /// Device-to-reference rotation.
    pub rotation: Matrix3<f64>,

    pub timestamp: DateTime<Utc>,
}

impl MotionSample {
    /// Build a sample from plain arrays; `rotation` is row-major.
    pub fn new(acceleration: [f64; 3], rotation: [[f64; 3]; 3], timestamp: DateTime<Utc>) -> Self {
        Self {
            acceleration: Vector3::from(acceleration),
            rotation: Matrix3::from_fn(|r, c| rotation[r][c]),
            timestamp,
        }
    }

    /// A sample already in the reference frame.
    pub fn unrotated(acceleration: [f64; 3], timestamp: DateTime<Utc>) -> Self {
        Self {
            acceleration: Vector3::from(acceleration),
            rotation: Matrix3::identity(),
            timestamp,
        }
    }
}

/// Consistent view of the estimator at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MotionSnapshot {
    /// Metres travelled since the last reset.
    pub distance_m: f64,

    /// Current speed, m/s.
    pub speed_mps: f64,
}

impl MotionSnapshot {
    pub fn distance_miles(&self) -> f64 {
        meters_to_miles(self.distance_m)
    }
}

/// A source of distance travelled since the last boundary.
pub trait DeadReckoning {
    fn snapshot(&self) -> MotionSnapshot;

    /// Zero the distance accumulator.
    fn reset(&mut self);
}

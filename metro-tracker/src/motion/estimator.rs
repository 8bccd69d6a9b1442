//! Dead-reckoning estimator.

use chrono::{DateTime, Utc};
use nalgebra::Vector3;
use tracing::{debug, trace};

use super::config::EstimatorConfig;
use super::filter::{HighPassFilter, LowPassFilter};
use super::{DeadReckoning, MotionSample, MotionSnapshot};

/// Running velocity and distance estimate.
///
/// Per sample: rotate into the reference frame, convert g to m/s², reject
/// shakes, low-pass then high-pass filter, integrate into velocity, clamp
/// small components, decay when still, accumulate distance.
#[derive(Debug, Clone)]
pub struct Estimator {
    config: EstimatorConfig,
    low_pass: LowPassFilter,
    high_pass: HighPassFilter,
    /// Last acceleration that passed shake rejection (m/s²).
    last_acceleration: Vector3<f64>,
    velocity: Vector3<f64>,
    distance_m: f64,
    last_timestamp: Option<DateTime<Utc>>,
}

impl Estimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            low_pass: LowPassFilter::new(config.smoothing_alpha),
            high_pass: HighPassFilter::new(config.smoothing_alpha),
            config,
            last_acceleration: Vector3::zeros(),
            velocity: Vector3::zeros(),
            distance_m: 0.0,
            last_timestamp: None,
        }
    }

    /// Feed one sample and return the updated snapshot.
    ///
    /// Samples with no elapsed time since the previous one (including the
    /// first) update the filters but add no displacement.
    pub fn update(&mut self, sample: &MotionSample) -> MotionSnapshot {
        let dt = self
            .last_timestamp
            .and_then(|last| (sample.timestamp - last).num_microseconds())
            .map_or(0.0, |us| us as f64 / 1e6);
        self.last_timestamp = Some(sample.timestamp);

        let global = sample.rotation * sample.acceleration * self.config.gravity;
        let raw = self.reject_shake(global);

        let smoothed = self.low_pass.update(raw);
        let filtered = self.high_pass.update(smoothed, raw);

        if dt > 0.0 {
            self.integrate(filtered, dt);
        }

        self.snapshot()
    }

    fn reject_shake(&mut self, acceleration: Vector3<f64>) -> Vector3<f64> {
        let accepted = match self.config.shake_threshold {
            Some(threshold)
                if (acceleration.norm() - self.last_acceleration.norm()).abs() >= threshold =>
            {
                trace!(magnitude = acceleration.norm(), "shake rejected");
                Vector3::zeros()
            }
            _ => acceleration,
        };
        self.last_acceleration = accepted;
        accepted
    }

    fn integrate(&mut self, filtered: Vector3<f64>, dt: f64) {
        self.velocity += filtered * dt;

        let floor = self.config.velocity_noise_floor;
        self.velocity.apply(|v| {
            if v.abs() < floor {
                *v = 0.0;
            }
        });

        let still = self
            .config
            .stillness_threshold
            .is_some_and(|threshold| filtered.norm() < threshold);
        if still {
            self.velocity *= (1.0 - dt * self.config.stillness_decay_rate).max(0.0);
        }

        self.distance_m += self.velocity.norm() * dt;
    }

    /// Current velocity in the reference frame, m/s.
    pub fn velocity(&self) -> Vector3<f64> {
        self.velocity
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new(EstimatorConfig::default())
    }
}

impl DeadReckoning for Estimator {
    fn snapshot(&self) -> MotionSnapshot {
        MotionSnapshot {
            distance_m: self.distance_m,
            speed_mps: self.velocity.norm(),
        }
    }

    fn reset(&mut self) {
        debug!(distance_m = self.distance_m, "estimator reset");
        self.distance_m = 0.0;
    }
}

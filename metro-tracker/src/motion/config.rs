//! Estimator configuration.

/// Standard gravity, m/s² per g.
pub const GRAVITY: f64 = 9.81;

/// Tuning for the dead-reckoning estimator.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorConfig {
    /// Smoothing factor shared by the low- and high-pass filters.
    pub smoothing_alpha: f64,

    /// Multiplier from sensor units (g) to m/s².
    pub gravity: f64,

    /// Velocity components below this magnitude (m/s) are zeroed.
    pub velocity_noise_floor: f64,

    /// Filtered acceleration (m/s²) below which the rider is assumed still.
    /// `None` disables stillness decay.
    pub stillness_threshold: Option<f64>,

    /// Fraction of velocity shed per second while still.
    pub stillness_decay_rate: f64,

    /// Jump in acceleration magnitude (m/s²) between consecutive samples
    /// treated as the device being shaken. `None` disables rejection.
    pub shake_threshold: Option<f64>,
}

impl EstimatorConfig {
    /// Disable (or set) the stillness threshold.
    pub fn with_stillness_threshold(mut self, threshold: Option<f64>) -> Self {
        self.stillness_threshold = threshold;
        self
    }

    /// Disable (or set) shake rejection.
    pub fn with_shake_threshold(mut self, threshold: Option<f64>) -> Self {
        self.shake_threshold = threshold;
        self
    }

    pub fn with_velocity_noise_floor(mut self, floor: f64) -> Self {
        self.velocity_noise_floor = floor;
        self
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: 0.1,
            gravity: GRAVITY,
            velocity_noise_floor: 0.01,
            stillness_threshold: Some(0.05),
            stillness_decay_rate: 0.5,
            shake_threshold: Some(0.5 * GRAVITY),
        }
    }
}

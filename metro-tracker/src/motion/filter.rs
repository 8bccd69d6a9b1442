//! First-order smoothing filters over 3-vectors.

use nalgebra::Vector3;

/// Exponential moving average. Starts from zero.
#[derive(Debug, Clone)]
pub(super) struct LowPassFilter {
    alpha: f64,
    last_output: Vector3<f64>,
}

impl LowPassFilter {
    pub(super) fn new(alpha: f64) -> Self {
        Self {
            alpha,
            last_output: Vector3::zeros(),
        }
    }

    pub(super) fn update(&mut self, input: Vector3<f64>) -> Vector3<f64> {
        self.last_output = input * self.alpha + self.last_output * (1.0 - self.alpha);
        self.last_output
    }
}

/// Subtracts a fraction of the smoothed signal and the previous raw input,
/// removing slow bias.
#[derive(Debug, Clone)]
pub(super) struct HighPassFilter {
    alpha: f64,
    previous_raw: Vector3<f64>,
}

impl HighPassFilter {
    pub(super) fn new(alpha: f64) -> Self {
        Self {
            alpha,
            previous_raw: Vector3::zeros(),
        }
    }

    /// Filter `smoothed`, then remember `raw` for the next sample.
    pub(super) fn update(&mut self, smoothed: Vector3<f64>, raw: Vector3<f64>) -> Vector3<f64> {
        let filtered = smoothed - (smoothed + self.previous_raw) * self.alpha;
        self.previous_raw = raw;
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_pass_converges() {
        let mut lp = LowPassFilter::new(0.1);
        let input = Vector3::new(1.0, -2.0, 0.0);
        let first = lp.update(input);
        assert!((first.x - 0.1).abs() < 1e-12);

        let mut out = first;
        for _ in 0..200 {
            out = lp.update(input);
        }
        assert!((out - input).norm() < 1e-6);
    }

    #[test]
    fn high_pass_uses_previous_raw() {
        let mut hp = HighPassFilter::new(0.1);
        let raw = Vector3::new(2.0, 0.0, 0.0);
        // No previous raw yet: 1.0 - 0.1 * 1.0.
        let first = hp.update(Vector3::new(1.0, 0.0, 0.0), raw);
        assert!((first.x - 0.9).abs() < 1e-12);
        // Previous raw is now 2.0: 1.0 - 0.1 * 3.0.
        let second = hp.update(Vector3::new(1.0, 0.0, 0.0), raw);
        assert!((second.x - 0.7).abs() < 1e-12);
    }
}

//! Navigation thresholds.

use chrono::TimeDelta;

/// Distances (miles) at which a station counts as reached or near, by
/// satellite fix and by dead reckoning.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationConfig {
    pub arrived_miles: f64,
    pub approach_miles: f64,

    /// Remaining dead-reckoned leg distance that counts as arrived.
    pub arrived_motion_miles: f64,
    pub approach_motion_miles: f64,

    /// How long an alert stays on display.
    pub alert_display: TimeDelta,

    /// Stations listed in the upcoming-stations preview.
    pub preview_len: usize,
}

impl NavigationConfig {
    /// Override the satellite-fix thresholds.
    pub fn with_thresholds(mut self, arrived_miles: f64, approach_miles: f64) -> Self {
        self.arrived_miles = arrived_miles;
        self.approach_miles = approach_miles;
        self
    }

    pub fn with_alert_display(mut self, alert_display: TimeDelta) -> Self {
        self.alert_display = alert_display;
        self
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            arrived_miles: 0.25,
            approach_miles: 0.75,
            arrived_motion_miles: 0.0,
            approach_motion_miles: 0.45,
            alert_display: TimeDelta::seconds(3),
            preview_len: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = NavigationConfig::default();
        assert_eq!(config.arrived_miles, 0.25);
        assert_eq!(config.approach_miles, 0.75);
        assert_eq!(config.approach_motion_miles, 0.45);
        assert_eq!(config.alert_display, TimeDelta::seconds(3));
    }

    #[test]
    fn with_thresholds() {
        let config = NavigationConfig::default()
            .with_thresholds(0.1, 0.5)
            .with_alert_display(TimeDelta::milliseconds(50));
        assert_eq!(config.arrived_miles, 0.1);
        assert_eq!(config.approach_miles, 0.5);
        assert_eq!(config.alert_display, TimeDelta::milliseconds(50));
        assert_eq!(config.preview_len, 5);
    }
}

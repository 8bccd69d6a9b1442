//! Display strings recomputed on every tick.

use serde::Serialize;

use crate::domain::mps_to_mph;

/// Round to three decimal places for display.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// One upcoming switch instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchSummary {
    /// `Take the <label> until <station> Station`.
    pub instruction: String,

    /// Stops until the switch. `None` for the final ride.
    pub stops_away: Option<usize>,
}

/// Everything the traveler's screen shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusView {
    pub headline: String,
    pub gps_distance: String,
    pub motion_distance: String,
    pub gps_speed: String,
    pub motion_speed: String,
    pub motion_traveled: String,
    pub next_stations: String,
    pub switches: Vec<SwitchSummary>,
    pub stops_away: String,
}

impl StatusView {
    pub(super) fn with_speeds(headline: String, gps_mps: f64, motion_mps: f64) -> Self {
        Self {
            headline,
            gps_speed: format!("(GPS) Traveling at {} mph", round3(mps_to_mph(gps_mps))),
            motion_speed: format!("(Motion) Traveling at {} mph", round3(mps_to_mph(motion_mps))),
            ..Self::default()
        }
    }

    pub(super) fn set_distances(&mut self, gps_miles: f64, motion_miles: Option<f64>, traveled_miles: f64) {
        self.gps_distance = format!("(GPS) {} miles away", round3(gps_miles));
        self.motion_distance = match motion_miles {
            Some(miles) => format!("(Motion) {} miles away", round3(miles)),
            None => "(Motion) unknown".to_string(),
        };
        self.motion_traveled = format!("(Motion) {} miles traveled", round3(traveled_miles));
    }
}

pub(super) fn headline_going(station: &str) -> String {
    format!("Going to {station} Station")
}

pub(super) fn headline_approaching(station: &str) -> String {
    format!("About to Arrive at {station} Station")
}

pub(super) fn headline_arriving(station: &str) -> String {
    format!("Arriving at {station} Station")
}

pub(super) const HEADLINE_REACHED: &str = "Destination Reached!";

/// `A -> B -> ... -> Z`, listing at most `count` stations before the last.
pub(super) fn preview(names: &[&str], count: usize) -> String {
    let Some((last, ahead)) = names.split_last() else {
        return String::new();
    };

    let mut parts: Vec<&str> = ahead.iter().take(count).copied().collect();
    if ahead.len() > count {
        parts.push("...");
    }
    parts.push(*last);
    parts.join(" -> ")
}

pub(super) fn stops_away(stops: usize, destination: &str) -> String {
    format!("{stops} stops away from {destination}")
}

pub(super) fn switch_instruction(label: &str, station: &str) -> String {
    format!("Take the {label} until {station} Station")
}

//! Transient traveler alerts.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

/// What prompted an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Reached a station with no switch left on the trip.
    Arrived,
    /// Reached a switch point; change lines here.
    Switch,
    /// Reached a station; a switch is still pending further on.
    SwitchPending,
    /// The next station is a switch point.
    GetReady,
    /// Stops were skipped because a station further ahead is closest.
    Rerouted,
}

/// An alert with a display window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub body: String,
    pub raised_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(
        kind: AlertKind,
        title: impl Into<String>,
        body: impl Into<String>,
        raised_at: DateTime<Utc>,
        display: TimeDelta,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            body: body.into(),
            raised_at,
            expires_at: raised_at + display,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

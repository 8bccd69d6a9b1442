//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cache::CachedPlanner;
use crate::motion::EstimatorConfig;
use crate::navigation::NavigationConfig;
use crate::notify::{FanOut, Notifier};
use crate::tracker::{TrackerConfig, TrackerHandle};

/// Settings applied to every trip the server tracks.
#[derive(Debug, Clone, Default)]
pub struct TripSettings {
    pub navigation: NavigationConfig,
    pub estimator: EstimatorConfig,
    pub tracker: TrackerConfig,
}

/// Shared application state.
///
/// The server tracks at most one trip at a time.
#[derive(Clone)]
pub struct AppState {
    /// Cached route planner over the loaded network
    pub planner: Arc<CachedPlanner>,

    /// Where trip alerts are delivered
    pub notifier: Arc<FanOut<Notifier>>,

    /// Per-trip configuration
    pub settings: Arc<TripSettings>,

    /// The trip being tracked, if any
    pub trip: Arc<Mutex<Option<TrackerHandle>>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(planner: CachedPlanner, notifier: FanOut<Notifier>, settings: TripSettings) -> Self {
        Self {
            planner: Arc::new(planner),
            notifier: Arc::new(notifier),
            settings: Arc::new(settings),
            trip: Arc::new(Mutex::new(None)),
        }
    }
}

//! Caching layer for trip plans.
//!
//! The network never changes while the server runs, so a plan for a given
//! (origin, destination) pair is reusable until it ages out. Plans are keyed
//! by resolved station ids, not by the names the caller typed.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::StationId;
use crate::graph::Network;
use crate::planner::{PlanError, Planner, PlannerConfig, TripPlan};

/// Cache key: (origin, destination).
type PlanKey = (StationId, StationId);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 1024,
        }
    }
}

/// Route planner with memoised results.
pub struct CachedPlanner {
    network: Arc<Network>,
    config: PlannerConfig,
    plans: MokaCache<PlanKey, Arc<TripPlan>>,
}

impl CachedPlanner {
    /// Create a new cached planner.
    pub fn new(network: Arc<Network>, config: PlannerConfig, cache_config: &CacheConfig) -> Self {
        let plans = MokaCache::builder()
            .time_to_live(cache_config.ttl)
            .max_capacity(cache_config.max_capacity)
            .build();

        Self {
            network,
            config,
            plans,
        }
    }

    pub fn network(&self) -> &Arc<Network> {
        &self.network
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan a trip between two named stations, using the cache if possible.
    pub async fn plan(&self, from: &str, to: &str) -> Result<Arc<TripPlan>, PlanError> {
        let planner = Planner::new(self.network.graph(), &self.config);
        let key = (planner.resolve(from)?, planner.resolve(to)?);

        // Try cache first
        if let Some(cached) = self.plans.get(&key).await {
            debug!(from, to, "plan cache hit");
            return Ok(cached);
        }

        let route = planner.route_between(key.0, key.1)?;
        let plan = Arc::new(planner.trip_for(route));

        self.plans.insert(key, Arc::clone(&plan)).await;

        Ok(plan)
    }

    /// Get cache statistics.
    pub fn entry_count(&self) -> u64 {
        self.plans.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.plans.invalidate_all();
    }
}

//! Planner configuration.

/// Weight added to a route each time the rider must change lines.
pub const DEFAULT_SWITCH_PENALTY: u32 = 100;

/// How routes are searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// Dijkstra over (station, valid lines) states.
    #[default]
    LabelSearch,

    /// Breadth-first enumeration of every simple path. Exponential in the
    /// branching factor; only usable on small networks.
    Exhaustive,
}

/// Configuration parameters for route search.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Weight added per line switch. Each hop adds 1.
    pub switch_penalty: u32,

    /// Search algorithm.
    pub strategy: SearchStrategy,

    /// Maximum partial paths the exhaustive search may expand before
    /// giving up.
    pub max_expansions: usize,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(switch_penalty: u32, strategy: SearchStrategy, max_expansions: usize) -> Self {
        Self {
            switch_penalty,
            strategy,
            max_expansions,
        }
    }

    /// Use a different search strategy.
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            switch_penalty: DEFAULT_SWITCH_PENALTY,
            strategy: SearchStrategy::LabelSearch,
            max_expansions: 1_000_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.switch_penalty, 100);
        assert_eq!(config.strategy, SearchStrategy::LabelSearch);
        assert_eq!(config.max_expansions, 1_000_000);
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::new(50, SearchStrategy::Exhaustive, 10);

        assert_eq!(config.switch_penalty, 50);
        assert_eq!(config.strategy, SearchStrategy::Exhaustive);
        assert_eq!(config.max_expansions, 10);
    }

    #[test]
    fn with_strategy() {
        let config = PlannerConfig::default().with_strategy(SearchStrategy::Exhaustive);
        assert_eq!(config.strategy, SearchStrategy::Exhaustive);
        assert_eq!(config.switch_penalty, DEFAULT_SWITCH_PENALTY);
    }
}

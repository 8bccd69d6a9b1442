//! Minimum switch-weighted route search.
//!
//! The default strategy runs Dijkstra over `(station, valid lines)` states.
//! Carrying the set of lines valid since the last switch in the state lets
//! the search charge the switch penalty exactly as [`path_cost`] does, so the
//! optimum matches the exhaustive enumeration at polynomial cost.

use pathfinding::prelude::dijkstra;
use tracing::debug;

use crate::domain::{LineSet, StationId};
use crate::graph::StationGraph;

use super::bfs::find_exhaustive;
use super::config::{PlannerConfig, SearchStrategy};
use super::itinerary::Itinerary;
use super::schedule::SwitchSchedule;
use super::weight::{PathCost, path_cost, step};

/// Error from route planning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// A requested station is not in the graph
    #[error("station not found: {0}")]
    StationNotFound(String),

    /// The stations exist but are not connected
    #[error("no path from {from} to {to}")]
    NoPathFound { from: String, to: String },

    /// The exhaustive search gave up
    #[error("route search exceeded {expansions} expansions")]
    SearchLimitExceeded { expansions: usize },
}

/// A chosen route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Stations from origin to destination inclusive.
    pub stations: Vec<StationId>,

    /// Hops plus switch penalties.
    pub weight: u32,

    /// Number of line switches.
    pub switches: usize,
}

impl Route {
    /// Number of hops (stations minus one).
    pub fn hops(&self) -> usize {
        self.stations.len().saturating_sub(1)
    }
}

/// Everything needed to start tracking a trip.
#[derive(Debug, Clone)]
pub struct TripPlan {
    pub route: Route,
    pub itinerary: Itinerary,
    pub schedule: SwitchSchedule,
}

/// Dijkstra search state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct LabelState {
    station: StationId,
    /// Lines valid since the last switch; empty before the first hop.
    lines: LineSet,
}

/// Route planner over a station graph.
pub struct Planner<'a> {
    graph: &'a StationGraph,
    config: &'a PlannerConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a StationGraph, config: &'a PlannerConfig) -> Self {
        Self { graph, config }
    }

    /// Resolve a station name.
    pub fn resolve(&self, name: &str) -> Result<StationId, PlanError> {
        self.graph
            .station_id(name)
            .ok_or_else(|| PlanError::StationNotFound(name.to_string()))
    }

    /// Find the minimum-weight route between two named stations.
    pub fn route(&self, from: &str, to: &str) -> Result<Route, PlanError> {
        let from_id = self.resolve(from)?;
        let to_id = self.resolve(to)?;
        self.route_between(from_id, to_id)
    }

    /// Find the minimum-weight route between two stations.
    pub fn route_between(&self, from: StationId, to: StationId) -> Result<Route, PlanError> {
        let found = match self.config.strategy {
            SearchStrategy::LabelSearch => self.label_search(from, to),
            SearchStrategy::Exhaustive => find_exhaustive(self.graph, from, to, self.config)?,
        };

        let Some((stations, cost)) = found else {
            return Err(PlanError::NoPathFound {
                from: self.graph.name(from).to_string(),
                to: self.graph.name(to).to_string(),
            });
        };

        debug!(
            from = self.graph.name(from),
            to = self.graph.name(to),
            weight = cost.weight,
            switches = cost.switches,
            strategy = ?self.config.strategy,
            "route planned"
        );

        Ok(Route {
            stations,
            weight: cost.weight,
            switches: cost.switches,
        })
    }

    /// Plan a route and derive its itinerary and switch schedule.
    pub fn plan_trip(&self, from: &str, to: &str) -> Result<TripPlan, PlanError> {
        let route = self.route(from, to)?;
        Ok(self.trip_for(route))
    }

    /// Derive the itinerary and switch schedule for a route.
    pub fn trip_for(&self, route: Route) -> TripPlan {
        let itinerary = Itinerary::from_path(self.graph, &route.stations);
        let schedule = SwitchSchedule::from_itinerary(self.graph, &itinerary);
        TripPlan {
            route,
            itinerary,
            schedule,
        }
    }

    fn label_search(&self, from: StationId, to: StationId) -> Option<(Vec<StationId>, PathCost)> {
        let penalty = self.config.switch_penalty;
        let start = LabelState {
            station: from,
            lines: LineSet::EMPTY,
        };

        let (states, weight) = dijkstra(
            &start,
            |state| {
                self.graph
                    .neighbors(state.station)
                    .map(|(next, labels)| {
                        let hop: LineSet = labels.iter().map(|l| l.line).collect();
                        let taken = step(state.lines, hop, penalty);
                        (
                            LabelState {
                                station: next,
                                lines: taken.lines,
                            },
                            taken.cost,
                        )
                    })
                    .collect::<Vec<_>>()
            },
            |state| state.station == to,
        )?;

        let stations: Vec<StationId> = states.iter().map(|s| s.station).collect();
        let cost = path_cost(self.graph, &stations, penalty);
        debug_assert_eq!(cost.weight, weight);
        Some((stations, cost))
    }
}

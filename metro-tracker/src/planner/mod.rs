//! Route planner.
//!
//! Answers: "what is the least-effort way from this station to that one?"
//! A route costs one per hop plus a penalty for every line switch. The
//! chosen route is then cut into ride segments, and the segment ends become
//! the switch schedule that navigation follows.

mod bfs;
mod config;
mod itinerary;
mod schedule;
mod search;
mod weight;

#[cfg(test)]
mod search_tests;

pub use config::{DEFAULT_SWITCH_PENALTY, PlannerConfig, SearchStrategy};
pub use itinerary::{Itinerary, RideSegment};
pub use schedule::SwitchSchedule;
pub use search::{PlanError, Planner, Route, TripPlan};
pub use weight::{PathCost, path_cost};

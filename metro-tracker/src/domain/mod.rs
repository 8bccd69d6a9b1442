//! Domain types for the metro tracker.
//!
//! Small value types shared by the graph, planner and navigation layers:
//! interned ids, label sets and geographic coordinates.

mod geo;
mod ids;

pub use geo::{Coordinate, EARTH_RADIUS_MILES, METERS_PER_MILE, meters_to_miles, mps_to_mph};
pub use ids::{LineId, LineSet, MAX_LABELS, StationId, TerminusId, TerminusSet};

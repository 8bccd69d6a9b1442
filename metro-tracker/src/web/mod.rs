//! Web layer for the metro tracker.
//!
//! A JSON API for planning routes and for feeding a live trip with position
//! fixes and motion samples.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, TripSettings};

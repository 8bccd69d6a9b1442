//! Metro route planner and live trip tracker.
//!
//! Plans the route between two stations that minimises line switches, then
//! follows the traveler along it, fusing GPS fixes with inertial dead
//! reckoning to announce arrivals, upcoming switches and reroutes.

pub mod cache;
pub mod config;
pub mod domain;
pub mod graph;
pub mod motion;
pub mod navigation;
pub mod notify;
pub mod planner;
pub mod tracker;
pub mod web;

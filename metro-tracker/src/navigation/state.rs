//! The navigation state machine.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::{Coordinate, StationId};
use crate::graph::Network;
use crate::motion::{DeadReckoning, MotionSnapshot};
use crate::planner::{SwitchSchedule, TripPlan};

use super::alert::{Alert, AlertKind};
use super::config::NavigationConfig;
use super::status::{
    HEADLINE_REACHED, StatusView, SwitchSummary, headline_approaching, headline_arriving,
    headline_going, preview, stops_away, switch_instruction,
};
use super::{NavStatus, PositionFix};

/// Result of one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub status: NavStatus,
    pub view: StatusView,
    pub alert: Option<Alert>,
}

/// Tracks progress along a trip.
///
/// The remaining path starts with the origin; the first arrival is at the
/// station the traveler boards from.
#[derive(Debug, Clone)]
pub struct Navigator {
    network: Arc<Network>,
    remaining: VecDeque<StationId>,
    schedule: SwitchSchedule,
    config: NavigationConfig,
    /// Miles from the last boundary to the next station. Unknown until the
    /// first fix when the trip starts without a position.
    leg_miles: Option<f64>,
    status: NavStatus,
    /// Switch point already warned about while approaching.
    warned: Option<StationId>,
}

impl Navigator {
    pub fn new(
        network: Arc<Network>,
        plan: &TripPlan,
        config: NavigationConfig,
        start: Option<Coordinate>,
    ) -> Self {
        let remaining: VecDeque<StationId> = plan.route.stations.iter().copied().collect();
        let leg_miles = match (start, remaining.front()) {
            (Some(position), Some(head)) => Some(network.miles_to(&position, *head)),
            _ => None,
        };
        let status = if remaining.is_empty() {
            NavStatus::Reached
        } else {
            NavStatus::Traveling
        };

        Self {
            network,
            remaining,
            schedule: plan.schedule.clone(),
            config,
            leg_miles,
            status,
            warned: None,
        }
    }

    pub fn status(&self) -> NavStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn next_station(&self) -> Option<StationId> {
        self.remaining.front().copied()
    }

    /// Stations still ahead, next station first.
    pub fn remaining(&self) -> impl Iterator<Item = StationId> + '_ {
        self.remaining.iter().copied()
    }

    pub fn remaining_len(&self) -> usize {
        self.remaining.len()
    }

    pub fn schedule(&self) -> &SwitchSchedule {
        &self.schedule
    }

    pub fn leg_miles(&self) -> Option<f64> {
        self.leg_miles
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Process one position fix.
    pub fn tick<M: DeadReckoning + ?Sized>(
        &mut self,
        fix: &PositionFix,
        motion: &mut M,
        now: DateTime<Utc>,
    ) -> TickOutcome {
        let Some(head) = self.next_station() else {
            self.status = NavStatus::Reached;
            return reached(fix, motion.snapshot(), None);
        };

        let network = Arc::clone(&self.network);
        let graph = network.graph();
        let d_gps = network.miles_to(&fix.coordinate, head);
        let leg = *self.leg_miles.get_or_insert(d_gps);
        let d_motion = leg - motion.snapshot().distance_miles();

        let (status, headline, alert) =
            if d_gps <= self.config.arrived_miles || d_motion <= self.config.arrived_motion_miles {
                let alert = self.arrive(&network, head, motion, now);
                (NavStatus::Arriving, headline_arriving(graph.name(head)), Some(alert))
            } else if d_gps <= self.config.approach_miles
                || d_motion <= self.config.approach_motion_miles
            {
                let alert = self.get_ready(&network, head, now);
                (NavStatus::Approaching, headline_approaching(graph.name(head)), alert)
            } else {
                let alert = self.reroute(&network, fix, motion, now);
                let next = self.next_station().unwrap_or(head);
                (NavStatus::Traveling, headline_going(graph.name(next)), alert)
            };

        debug!(
            station = graph.name(head),
            ?status,
            d_gps,
            d_motion,
            "navigation tick"
        );

        if self.remaining.is_empty() {
            self.status = NavStatus::Reached;
            info!("destination reached");
            return reached(fix, motion.snapshot(), alert);
        }

        self.status = status;
        TickOutcome {
            status,
            view: self.view(headline, fix, motion.snapshot()),
            alert,
        }
    }

    /// Pop the head, advance the schedule if it was a switch point, start the
    /// next leg.
    fn arrive<M: DeadReckoning + ?Sized>(
        &mut self,
        network: &Network,
        head: StationId,
        motion: &mut M,
        now: DateTime<Utc>,
    ) -> Alert {
        let graph = network.graph();
        let name = graph.name(head);
        let pending = self.schedule.has_pending_switch();

        let (kind, body) = match self.schedule.head() {
            Some(switch_at) if pending && switch_at == head => {
                let next = self.schedule.next_line().unwrap_or_default();
                (AlertKind::Switch, format!("Switch to {next}"))
            }
            Some(switch_at) if pending => {
                let stops = self.stops_to(switch_at).unwrap_or_default();
                (
                    AlertKind::SwitchPending,
                    format!(
                        "Switching Trains at {} with {stops} stops away!",
                        graph.name(switch_at)
                    ),
                )
            }
            _ => {
                let destination = self.remaining.back().copied().unwrap_or(head);
                (
                    AlertKind::Arrived,
                    stops_away(self.remaining.len() - 1, graph.name(destination)),
                )
            }
        };

        self.schedule.discard(head);
        self.remaining.pop_front();
        self.leg_miles = self
            .next_station()
            .map(|next| network.miles_between(head, next));
        motion.reset();

        info!(station = name, ?kind, remaining = self.remaining.len(), "arrived");
        Alert::new(
            kind,
            format!("Arrived at {name} Station"),
            body,
            now,
            self.config.alert_display,
        )
    }

    /// Warn once when the station being approached is a switch point.
    fn get_ready(&mut self, network: &Network, head: StationId, now: DateTime<Utc>) -> Option<Alert> {
        if self.schedule.head() != Some(head) || self.warned == Some(head) {
            return None;
        }
        let next = self.schedule.next_line()?;
        self.warned = Some(head);

        let name = network.graph().name(head);
        debug!(station = name, "approaching switch point");
        Some(Alert::new(
            AlertKind::GetReady,
            format!("About to arrive at {name} Station"),
            format!("Get ready to switch to {next}"),
            now,
            self.config.alert_display,
        ))
    }

    /// Skip ahead if a later station on the path is the closest one.
    fn reroute<M: DeadReckoning + ?Sized>(
        &mut self,
        network: &Network,
        fix: &PositionFix,
        motion: &mut M,
        now: DateTime<Utc>,
    ) -> Option<Alert> {
        let closest = network.closest_station(&fix.coordinate)?;
        let skip = self.remaining.iter().position(|s| *s == closest)?;
        if skip == 0 {
            return None;
        }

        for _ in 0..skip {
            if let Some(passed) = self.remaining.pop_front() {
                self.schedule.discard(passed);
            }
        }
        self.leg_miles = Some(network.miles_to(&fix.coordinate, closest));
        motion.reset();

        let name = network.graph().name(closest);
        info!(station = name, skipped = skip, "closer station found");
        Some(Alert::new(
            AlertKind::Rerouted,
            "Closer station found!",
            format!("Changing next Station to {name}"),
            now,
            self.config.alert_display,
        ))
    }

    fn stops_to(&self, station: StationId) -> Option<usize> {
        self.remaining.iter().position(|s| *s == station)
    }

    fn view(&self, headline: String, fix: &PositionFix, motion: MotionSnapshot) -> StatusView {
        let graph = self.network.graph();
        let mut view = StatusView::with_speeds(headline, fix.speed_mps, motion.speed_mps);

        if let Some(head) = self.next_station() {
            let traveled = motion.distance_miles();
            view.set_distances(
                self.network.miles_to(&fix.coordinate, head),
                self.leg_miles.map(|leg| leg - traveled),
                traveled,
            );
        }

        let names: Vec<&str> = self.remaining.iter().map(|s| graph.name(*s)).collect();
        view.next_stations = preview(&names, self.config.preview_len);

        let last = self.schedule.len().saturating_sub(1);
        view.switches = self
            .schedule
            .iter()
            .enumerate()
            .map(|(i, station)| SwitchSummary {
                instruction: switch_instruction(
                    self.schedule.label(station).unwrap_or_default(),
                    graph.name(station),
                ),
                stops_away: if i < last { self.stops_to(station) } else { None },
            })
            .collect();

        if let Some(destination) = self.remaining.back() {
            view.stops_away = stops_away(self.remaining.len() - 1, graph.name(*destination));
        }

        view
    }
}

fn reached(fix: &PositionFix, motion: MotionSnapshot, alert: Option<Alert>) -> TickOutcome {
    TickOutcome {
        status: NavStatus::Reached,
        view: StatusView::with_speeds(HEADLINE_REACHED.to_string(), fix.speed_mps, motion.speed_mps),
        alert,
    }
}

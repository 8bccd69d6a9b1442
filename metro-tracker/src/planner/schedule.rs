//! Switch schedule.
//!
//! The ordered stations where the rider ends a ride, ending with the
//! destination, each paired with the label of the line to take from the
//! previous boundary. Navigation consumes the schedule from the front.

use std::collections::{HashMap, VecDeque};

use crate::domain::StationId;
use crate::graph::StationGraph;

use super::itinerary::Itinerary;

/// Pending ride boundaries for a trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwitchSchedule {
    stops: VecDeque<StationId>,
    /// Line to ride *into* each stop.
    labels: HashMap<StationId, String>,
}

impl SwitchSchedule {
    /// Build the schedule from an itinerary.
    pub fn from_itinerary(graph: &StationGraph, itinerary: &Itinerary) -> Self {
        let mut schedule = Self::default();
        for segment in itinerary.segments() {
            schedule.stops.push_back(segment.alight);
            schedule.labels.insert(segment.alight, segment.label(graph));
        }
        schedule
    }

    /// Next boundary the rider will reach.
    pub fn head(&self) -> Option<StationId> {
        self.stops.front().copied()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// True while at least one line switch is still ahead.
    pub fn has_pending_switch(&self) -> bool {
        self.stops.len() > 1
    }

    /// True if `station` is a pending switch point (not the destination).
    pub fn is_switch_point(&self, station: StationId) -> bool {
        self.has_pending_switch()
            && self
                .stops
                .iter()
                .take(self.stops.len() - 1)
                .any(|s| *s == station)
    }

    /// Label of the line to board at the head.
    pub fn next_line(&self) -> Option<&str> {
        self.stops.get(1).and_then(|s| self.label(*s))
    }

    /// Label of the line that runs into `station`.
    pub fn label(&self, station: StationId) -> Option<&str> {
        self.labels.get(&station).map(String::as_str)
    }

    /// Drop the head.
    pub fn advance(&mut self) -> Option<StationId> {
        self.stops.pop_front()
    }

    /// Drop the head if it is `station`.
    pub fn discard(&mut self, station: StationId) -> bool {
        if self.head() == Some(station) {
            self.stops.pop_front();
            true
        } else {
            false
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = StationId> + '_ {
        self.stops.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (StationGraph, SwitchSchedule) {
        let mut graph = StationGraph::new();
        graph.add_line(&["A", "B", "C"], "Red", "A", "C").unwrap();
        graph.add_line(&["C", "D", "E"], "Blue", "C", "E").unwrap();
        graph.add_line(&["E", "F"], "Green", "E", "F").unwrap();
        let path: Vec<_> = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .map(|n| graph.station_id(n).unwrap())
            .collect();
        let itinerary = Itinerary::from_path(&graph, &path);
        let schedule = SwitchSchedule::from_itinerary(&graph, &itinerary);
        (graph, schedule)
    }

    #[test]
    fn one_entry_per_segment() {
        let (graph, schedule) = setup();
        let stops: Vec<_> = schedule.iter().map(|s| graph.name(s)).collect();
        assert_eq!(stops, vec!["C", "E", "F"]);
        assert!(schedule.has_pending_switch());
    }

    #[test]
    fn next_line_is_label_of_second_entry() {
        let (_, schedule) = setup();
        assert_eq!(schedule.next_line(), Some("Blue E Train"));
    }

    #[test]
    fn switch_points_exclude_destination() {
        let (graph, schedule) = setup();
        let id = |n| graph.station_id(n).unwrap();
        assert!(schedule.is_switch_point(id("C")));
        assert!(schedule.is_switch_point(id("E")));
        assert!(!schedule.is_switch_point(id("F")));
        assert!(!schedule.is_switch_point(id("B")));
    }

    #[test]
    fn discard_only_pops_the_head() {
        let (graph, mut schedule) = setup();
        let id = |n| graph.station_id(n).unwrap();
        assert!(!schedule.discard(id("E")));
        assert_eq!(schedule.len(), 3);
        assert!(schedule.discard(id("C")));
        assert_eq!(schedule.head(), Some(id("E")));
    }

    #[test]
    fn advancing_to_the_end() {
        let (_, mut schedule) = setup();
        schedule.advance();
        schedule.advance();
        assert!(!schedule.has_pending_switch());
        assert_eq!(schedule.next_line(), None);
        schedule.advance();
        assert!(schedule.is_empty());
        assert_eq!(schedule.advance(), None);
    }

    #[test]
    fn at_destination_is_empty() {
        let (graph, _) = setup();
        let schedule = SwitchSchedule::from_itinerary(&graph, &Itinerary::AtDestination);
        assert!(schedule.is_empty());
        assert_eq!(schedule.head(), None);
    }
}

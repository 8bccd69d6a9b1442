//! Planner tests against the reference network.

use std::sync::OnceLock;

use proptest::prelude::*;

use super::*;
use crate::domain::StationId;
use crate::graph::{Network, StationGraph};

fn network() -> &'static Network {
    static NETWORK: OnceLock<Network> = OnceLock::new();
    NETWORK.get_or_init(|| Network::reference().unwrap())
}

fn graph() -> &'static StationGraph {
    network().graph()
}

fn plan(from: &str, to: &str) -> TripPlan {
    let config = PlannerConfig::default();
    Planner::new(graph(), &config).plan_trip(from, to).unwrap()
}

fn names(stations: &[StationId]) -> Vec<&'static str> {
    stations.iter().map(|s| graph().name(*s)).collect()
}

#[test]
fn rosslyn_to_metro_center_is_one_ride() {
    let trip = plan("Rosslyn", "Metro Center");

    assert_eq!(
        names(&trip.route.stations),
        vec![
            "Rosslyn",
            "Foggy Bottom-GWU",
            "Farragut West",
            "McPherson Sq",
            "Metro Center"
        ]
    );
    assert_eq!(trip.route.weight, 4);
    assert_eq!(trip.route.switches, 0);
    assert_eq!(trip.itinerary.segments().len(), 1);
    assert!(!trip.schedule.has_pending_switch());
}

#[test]
fn red_to_blue_switches_once() {
    let trip = plan("Shady Grove", "Franconia-Springfield");

    assert_eq!(trip.route.weight, 128);
    assert_eq!(trip.route.hops(), 28);
    assert_eq!(trip.route.switches, 1);

    let segments = trip.itinerary.segments();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].label(graph()), "Red Glenmont Train");
    assert_eq!(graph().name(segments[0].alight), "Metro Center");
    assert_eq!(
        names(&trip.schedule.iter().collect::<Vec<_>>()),
        vec!["Metro Center", "Franconia-Springfield"]
    );
}

#[test]
fn end_to_end_across_the_core() {
    let config = PlannerConfig::default();
    let planner = Planner::new(graph(), &config);

    assert_eq!(planner.route("Glenmont", "Huntington").unwrap().weight, 122);
    assert_eq!(planner.route("Ashburn", "Branch Ave").unwrap().weight, 131);
}

#[test]
fn shared_trunk_keeps_every_colour() {
    // Rosslyn to Metro Center is served by Orange, Silver and Blue.
    let trip = plan("Rosslyn", "Metro Center");
    let segment = &trip.itinerary.segments()[0];
    assert_eq!(segment.lines.len(), 3);
}

#[test]
fn same_station_is_at_destination() {
    let trip = plan("Pentagon", "Pentagon");
    assert_eq!(trip.route.weight, 0);
    assert_eq!(trip.itinerary, Itinerary::AtDestination);
    assert!(trip.schedule.is_empty());
}

#[test]
fn unknown_station_is_reported() {
    let config = PlannerConfig::default();
    let result = Planner::new(graph(), &config).route("Atlantis", "Rosslyn");
    assert_eq!(result, Err(PlanError::StationNotFound("Atlantis".into())));
}

fn station_pair() -> impl Strategy<Value = (StationId, StationId)> {
    let n = graph().len();
    (0..n, 0..n).prop_map(|(a, b)| {
        let ids: Vec<StationId> = graph().station_ids().collect();
        (ids[a], ids[b])
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_pair_has_a_route((from, to) in station_pair()) {
        let config = PlannerConfig::default();
        let route = Planner::new(graph(), &config).route_between(from, to);
        prop_assert!(route.is_ok());
    }

    #[test]
    fn strategies_find_equal_weights((from, to) in station_pair()) {
        let label = PlannerConfig::default();
        let exhaustive = PlannerConfig::default().with_strategy(SearchStrategy::Exhaustive);

        let a = Planner::new(graph(), &label).route_between(from, to).unwrap();
        let b = Planner::new(graph(), &exhaustive).route_between(from, to).unwrap();
        prop_assert_eq!(a.weight, b.weight);
    }

    #[test]
    fn weight_is_hops_plus_penalties((from, to) in station_pair()) {
        let config = PlannerConfig::default();
        let route = Planner::new(graph(), &config).route_between(from, to).unwrap();

        prop_assert_eq!(
            route.weight as usize,
            route.hops() + route.switches * DEFAULT_SWITCH_PENALTY as usize
        );
        prop_assert_eq!(path_cost(graph(), &route.stations, DEFAULT_SWITCH_PENALTY).weight, route.weight);
    }

    #[test]
    fn segments_cover_the_route((from, to) in station_pair()) {
        let config = PlannerConfig::default();
        let planner = Planner::new(graph(), &config);
        let trip = planner.trip_for(planner.route_between(from, to).unwrap());
        let segments = trip.itinerary.segments();

        let hops: usize = segments.iter().map(|s| s.hops).sum();
        prop_assert_eq!(hops, trip.route.hops());
        prop_assert_eq!(trip.schedule.len(), segments.len());
        if let Some(last) = segments.last() {
            prop_assert_eq!(last.alight, to);
            prop_assert_eq!(segments[0].board, from);
        }
        for pair in segments.windows(2) {
            prop_assert_eq!(pair[0].alight, pair[1].board);
        }
    }
}

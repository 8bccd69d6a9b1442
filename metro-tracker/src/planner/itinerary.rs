//! Itinerary segmentation.
//!
//! Splits a station path into ride segments. A segment continues while at
//! least one terminus (direction of travel) has been valid for every hop
//! since boarding; the first hop that shares no terminus with that set
//! starts a new segment at the station where it begins.

use std::collections::HashMap;

use crate::domain::{LineSet, StationId, TerminusId, TerminusSet};
use crate::graph::StationGraph;

/// One ride between two switch points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideSegment {
    pub board: StationId,
    pub alight: StationId,
    /// Lines running on both the first and the last hop of the segment.
    pub lines: LineSet,
    /// Termini that validated the most hops of the segment.
    pub toward: TerminusSet,
    pub hops: usize,
}

impl RideSegment {
    /// Human-readable line to board, e.g. `"Blue/Silver Downtown Largo Train"`.
    pub fn label(&self, graph: &StationGraph) -> String {
        let parts: Vec<String> = self
            .toward
            .iter()
            .map(|terminus| {
                let colors: Vec<&str> = self
                    .lines
                    .intersection(graph.lines_serving(terminus))
                    .iter()
                    .map(|line| graph.line_name(line))
                    .collect();
                let name = graph.terminus_name(terminus);
                if colors.is_empty() {
                    name.to_string()
                } else {
                    format!("{} {}", colors.join("/"), name)
                }
            })
            .collect();

        format!("{} Train", parts.join(" or "))
    }
}

/// A path broken into rides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Itinerary {
    /// Origin and destination are the same station.
    AtDestination,

    /// Rides in travel order; each boards where the previous one alights.
    Rides(Vec<RideSegment>),
}

impl Itinerary {
    /// Segment a path of adjacent stations.
    pub fn from_path(graph: &StationGraph, path: &[StationId]) -> Self {
        if path.len() <= 1 {
            return Itinerary::AtDestination;
        }

        let mut segments = Vec::new();
        let mut open = OpenSegment::start(graph, path[0], path[1]);

        for i in 0..path.len() - 1 {
            let hop = graph.directions_between(path[i], path[i + 1]);
            // i > 0 here: the first hop always matches the directions it opened with.
            if !open.allowed.intersects(hop) {
                segments.push(open.close(graph, path[i - 1], path[i]));
                open = OpenSegment::start(graph, path[i], path[i + 1]);
            }
            open.record(hop);
        }

        let n = path.len();
        segments.push(open.close(graph, path[n - 2], path[n - 1]));

        Itinerary::Rides(segments)
    }

    pub fn segments(&self) -> &[RideSegment] {
        match self {
            Itinerary::AtDestination => &[],
            Itinerary::Rides(segments) => segments,
        }
    }

    /// Stations where a ride ends, in order. The last is the destination.
    pub fn boundaries(&self) -> impl Iterator<Item = StationId> + '_ {
        self.segments().iter().map(|s| s.alight)
    }

    /// Number of line switches (segments minus one).
    pub fn switch_count(&self) -> usize {
        self.segments().len().saturating_sub(1)
    }
}

/// A segment being accumulated.
struct OpenSegment {
    board: StationId,
    /// Termini valid on every hop so far.
    allowed: TerminusSet,
    /// Hops each terminus validated.
    freq: HashMap<TerminusId, usize>,
    start_lines: LineSet,
    hops: usize,
}

impl OpenSegment {
    fn start(graph: &StationGraph, board: StationId, next: StationId) -> Self {
        Self {
            board,
            allowed: graph.directions_between(board, next),
            freq: HashMap::new(),
            start_lines: graph.lines_between(board, next),
            hops: 0,
        }
    }

    fn record(&mut self, hop: TerminusSet) {
        for terminus in hop.iter() {
            *self.freq.entry(terminus).or_insert(0) += 1;
        }
        self.allowed = self.allowed.intersection(hop);
        self.hops += 1;
    }

    /// Close the segment at `alight`, reached from `prev`.
    fn close(self, graph: &StationGraph, prev: StationId, alight: StationId) -> RideSegment {
        let end_lines = graph.lines_between(prev, alight);
        let mut lines = self.start_lines.intersection(end_lines);
        if lines.is_empty() {
            // Same direction name on different colours (shared terminus).
            lines = self.start_lines.union(end_lines);
        }

        let max = self.freq.values().copied().max().unwrap_or(0);
        let toward = self
            .freq
            .iter()
            .filter(|(_, count)| **count == max)
            .map(|(terminus, _)| *terminus)
            .collect();

        RideSegment {
            board: self.board,
            alight,
            lines,
            toward,
            hops: self.hops,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> StationGraph {
        let mut graph = StationGraph::new();
        graph.add_line(&["A", "B", "C", "D"], "Red", "A", "D").unwrap();
        graph.add_line(&["C", "E", "F"], "Blue", "C", "F").unwrap();
        graph.add_line(&["G", "B", "C", "H"], "Green", "G", "H").unwrap();
        graph
    }

    fn path(graph: &StationGraph, names: &[&str]) -> Vec<StationId> {
        names.iter().map(|n| graph.station_id(n).unwrap()).collect()
    }

    #[test]
    fn single_station_is_at_destination() {
        let g = graph();
        let itinerary = Itinerary::from_path(&g, &path(&g, &["A"]));
        assert_eq!(itinerary, Itinerary::AtDestination);
        assert!(itinerary.segments().is_empty());
        assert_eq!(itinerary.switch_count(), 0);
    }

    #[test]
    fn one_line_is_one_segment() {
        let g = graph();
        let itinerary = Itinerary::from_path(&g, &path(&g, &["A", "B", "C", "D"]));
        let segments = itinerary.segments();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].board, g.station_id("A").unwrap());
        assert_eq!(segments[0].alight, g.station_id("D").unwrap());
        assert_eq!(segments[0].hops, 3);
        assert_eq!(segments[0].label(&g), "Red D Train");
    }

    #[test]
    fn forced_switch_gives_two_segments() {
        let g = graph();
        let p = path(&g, &["A", "B", "C", "E", "F"]);
        let itinerary = Itinerary::from_path(&g, &p);
        let segments = itinerary.segments();

        assert_eq!(segments.len(), 2);
        assert_eq!(itinerary.switch_count(), 1);
        assert_eq!(segments[0].alight, g.station_id("C").unwrap());
        assert_eq!(segments[1].board, g.station_id("C").unwrap());
        assert_eq!(segments[0].label(&g), "Red D Train");
        assert_eq!(segments[1].label(&g), "Blue F Train");

        let hops: usize = segments.iter().map(|s| s.hops).sum();
        assert_eq!(hops, p.len() - 1);
    }

    #[test]
    fn shared_trunk_keeps_both_directions() {
        // B-C is served by Red toward D and Green toward H.
        let g = graph();
        let itinerary = Itinerary::from_path(&g, &path(&g, &["B", "C"]));
        let segment = &itinerary.segments()[0];
        assert_eq!(segment.toward.len(), 2);
        assert_eq!(segment.lines.len(), 2);
        assert_eq!(segment.label(&g), "Red D or Green H Train");
    }

    #[test]
    fn most_frequent_direction_wins() {
        // G-B only validates "toward H"; B-C validates D and H. H counts 2.
        let g = graph();
        let itinerary = Itinerary::from_path(&g, &path(&g, &["G", "B", "C"]));
        let segment = &itinerary.segments()[0];
        assert_eq!(segment.toward.len(), 1);
        assert_eq!(segment.label(&g), "Green H Train");
    }

    #[test]
    fn boundaries_end_at_destination() {
        let g = graph();
        let itinerary = Itinerary::from_path(&g, &path(&g, &["A", "B", "C", "E", "F"]));
        let boundaries: Vec<_> = itinerary.boundaries().collect();
        assert_eq!(
            boundaries,
            vec![g.station_id("C").unwrap(), g.station_id("F").unwrap()]
        );
    }
}

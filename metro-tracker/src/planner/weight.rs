//! Route weighting.
//!
//! A route costs 1 per hop plus a fixed penalty each time the next hop shares
//! no line with the lines that have been valid since the last switch.

use crate::domain::{LineSet, StationId};
use crate::graph::StationGraph;

/// Weight and switch count of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathCost {
    pub weight: u32,
    pub switches: usize,
}

/// Result of taking one hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Step {
    /// Lines valid after the hop.
    pub lines: LineSet,
    /// Weight of the hop, including any switch penalty.
    pub cost: u32,
    pub switched: bool,
}

/// Take a hop served by `hop` while `valid` lines are active.
///
/// `valid` is empty before the first hop.
pub(crate) fn step(valid: LineSet, hop: LineSet, penalty: u32) -> Step {
    if valid.is_empty() {
        Step {
            lines: hop,
            cost: 1,
            switched: false,
        }
    } else if valid.intersects(hop) {
        Step {
            lines: valid.intersection(hop),
            cost: 1,
            switched: false,
        }
    } else {
        Step {
            lines: hop,
            cost: 1 + penalty,
            switched: true,
        }
    }
}

/// Weigh a path of adjacent stations.
pub fn path_cost(graph: &StationGraph, path: &[StationId], penalty: u32) -> PathCost {
    let mut valid = LineSet::EMPTY;
    let mut cost = PathCost {
        weight: 0,
        switches: 0,
    };

    for pair in path.windows(2) {
        let next = step(valid, graph.lines_between(pair[0], pair[1]), penalty);
        valid = next.lines;
        cost.weight += next.cost;
        if next.switched {
            cost.switches += 1;
        }
    }

    cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LineId;

    fn graph() -> StationGraph {
        // Red: A-B-C-D, Blue: C-E, Green: B-C (shares B-C with Red)
        let mut graph = StationGraph::new();
        graph.add_line(&["A", "B", "C", "D"], "Red", "A", "D").unwrap();
        graph.add_line(&["C", "E"], "Blue", "C", "E").unwrap();
        graph.add_line(&["B", "C", "F"], "Green", "B", "F").unwrap();
        graph
    }

    fn path(graph: &StationGraph, names: &[&str]) -> Vec<StationId> {
        names.iter().map(|n| graph.station_id(n).unwrap()).collect()
    }

    #[test]
    fn first_hop_costs_one() {
        let hop = LineSet::single(LineId(2));
        let s = step(LineSet::EMPTY, hop, 100);
        assert_eq!(s.cost, 1);
        assert_eq!(s.lines, hop);
        assert!(!s.switched);
    }

    #[test]
    fn shared_line_narrows() {
        let valid: LineSet = [LineId(0), LineId(1)].into_iter().collect();
        let hop: LineSet = [LineId(1), LineId(2)].into_iter().collect();
        let s = step(valid, hop, 100);
        assert_eq!(s.cost, 1);
        assert_eq!(s.lines, LineSet::single(LineId(1)));
    }

    #[test]
    fn disjoint_lines_switch() {
        let s = step(LineSet::single(LineId(0)), LineSet::single(LineId(3)), 100);
        assert_eq!(s.cost, 101);
        assert!(s.switched);
        assert_eq!(s.lines, LineSet::single(LineId(3)));
    }

    #[test]
    fn single_line_weight_is_hop_count() {
        let g = graph();
        let cost = path_cost(&g, &path(&g, &["A", "B", "C", "D"]), 100);
        assert_eq!(cost.weight, 3);
        assert_eq!(cost.switches, 0);
    }

    #[test]
    fn switch_adds_penalty() {
        let g = graph();
        let cost = path_cost(&g, &path(&g, &["A", "B", "C", "E"]), 100);
        assert_eq!(cost.weight, 103);
        assert_eq!(cost.switches, 1);
    }

    #[test]
    fn narrowing_then_switch() {
        // B-C is Red+Green, C-F is Green only: narrows, no switch.
        let g = graph();
        let cost = path_cost(&g, &path(&g, &["B", "C", "F"]), 100);
        assert_eq!(cost.weight, 2);

        // A-B is Red only, so B-C narrows to Red and C-F (Green) is a switch.
        let cost = path_cost(&g, &path(&g, &["A", "B", "C", "F"]), 100);
        assert_eq!(cost.weight, 103);
        assert_eq!(cost.switches, 1);
    }

    #[test]
    fn trivial_paths_are_free() {
        let g = graph();
        assert_eq!(path_cost(&g, &[], 100).weight, 0);
        assert_eq!(path_cost(&g, &path(&g, &["A"]), 100).weight, 0);
    }
}

//! Exhaustive breadth-first route search.
//!
//! Enumerates every simple path from the origin, one hop per round, and keeps
//! the cheapest path that reaches the destination. Ties go to the path found
//! first. The number of simple paths grows exponentially with branching, so
//! the search is bounded by `max_expansions`.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::domain::StationId;
use crate::graph::StationGraph;

use super::config::PlannerConfig;
use super::search::PlanError;
use super::weight::{PathCost, path_cost};

/// Run the exhaustive search.
///
/// Returns `Ok(None)` when no path reaches `to`.
pub(super) fn find_exhaustive(
    graph: &StationGraph,
    from: StationId,
    to: StationId,
    config: &PlannerConfig,
) -> Result<Option<(Vec<StationId>, PathCost)>, PlanError> {
    let mut queue: VecDeque<Vec<StationId>> = VecDeque::from([vec![from]]);
    let mut best: Option<(Vec<StationId>, PathCost)> = None;
    let mut expansions = 0;
    let mut completed = 0;

    while let Some(path) = queue.pop_front() {
        expansions += 1;
        if expansions > config.max_expansions {
            return Err(PlanError::SearchLimitExceeded { expansions });
        }

        let Some(&tail) = path.last() else {
            continue;
        };

        if tail == to {
            completed += 1;
            let cost = path_cost(graph, &path, config.switch_penalty);
            trace!(weight = cost.weight, hops = path.len() - 1, "completed path");
            if best.as_ref().is_none_or(|(_, b)| cost.weight < b.weight) {
                best = Some((path, cost));
            }
            // A simple path cannot leave the destination and come back.
            continue;
        }

        for (next, _) in graph.neighbors(tail) {
            if !path.contains(&next) {
                let mut extended = path.clone();
                extended.push(next);
                queue.push_back(extended);
            }
        }
    }

    debug!(expansions, completed, "exhaustive search complete");

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> StationGraph {
        // Red runs A-B-C-D; Blue runs A-E-D. Two ways from A to D.
        let mut graph = StationGraph::new();
        graph.add_line(&["A", "B", "C", "D"], "Red", "A", "D").unwrap();
        graph.add_line(&["A", "E", "D"], "Blue", "A", "D").unwrap();
        graph
    }

    fn id(graph: &StationGraph, name: &str) -> StationId {
        graph.station_id(name).unwrap()
    }

    #[test]
    fn picks_cheapest_path() {
        let graph = ring();
        let config = PlannerConfig::default();
        let (path, cost) = find_exhaustive(&graph, id(&graph, "A"), id(&graph, "D"), &config)
            .unwrap()
            .unwrap();
        assert_eq!(path, vec![id(&graph, "A"), id(&graph, "E"), id(&graph, "D")]);
        assert_eq!(cost.weight, 2);
    }

    #[test]
    fn origin_equals_destination() {
        let graph = ring();
        let config = PlannerConfig::default();
        let a = id(&graph, "A");
        let (path, cost) = find_exhaustive(&graph, a, a, &config).unwrap().unwrap();
        assert_eq!(path, vec![a]);
        assert_eq!(cost.weight, 0);
    }

    #[test]
    fn unreachable_returns_none() {
        let mut graph = ring();
        graph.add_line(&["X", "Y"], "Green", "X", "Y").unwrap();
        let config = PlannerConfig::default();
        let result = find_exhaustive(&graph, id(&graph, "A"), id(&graph, "Y"), &config).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn expansion_limit() {
        let graph = ring();
        let config = PlannerConfig {
            max_expansions: 2,
            ..PlannerConfig::default()
        };
        let result = find_exhaustive(&graph, id(&graph, "A"), id(&graph, "D"), &config);
        assert!(matches!(
            result,
            Err(PlanError::SearchLimitExceeded { expansions: 3 })
        ));
    }

    #[test]
    fn ties_go_to_first_found() {
        // Two single-line routes of equal weight: via B (Red) and via E (Blue).
        let mut graph = StationGraph::new();
        graph.add_line(&["A", "B", "D"], "Red", "A", "D").unwrap();
        graph.add_line(&["A", "E", "D"], "Blue", "A", "D").unwrap();
        let config = PlannerConfig::default();
        let (path, _) = find_exhaustive(&graph, id(&graph, "A"), id(&graph, "D"), &config)
            .unwrap()
            .unwrap();
        // B was added as A's neighbour before E.
        assert_eq!(path[1], id(&graph, "B"));
    }
}

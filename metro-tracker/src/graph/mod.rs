//! Station/line graph.
//!
//! Stations live in an arena indexed by [`StationId`]; edges are stored on
//! the departing station as `(neighbour, labels)` pairs. Each label says
//! which line runs over the edge and which terminus it is heading toward.
//! The graph is built once from the topology table and only read afterwards.

mod error;
mod network;
mod topology;

use std::collections::{BTreeSet, HashMap, VecDeque};

use crate::domain::{LineId, LineSet, MAX_LABELS, StationId, TerminusId, TerminusSet};

pub use error::{GraphError, NetworkError};
pub use network::Network;
pub use topology::{LineSpec, StationCoordinate, Topology};

/// One line running over an edge, heading toward a terminus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeLabel {
    pub line: LineId,
    pub toward: TerminusId,
}

/// A station and its outgoing edges.
#[derive(Debug, Clone)]
pub struct Station {
    name: String,
    /// Outgoing edges in insertion order.
    edges: Vec<(StationId, BTreeSet<EdgeLabel>)>,
}

impl Station {
    fn new(name: String) -> Self {
        Self {
            name,
            edges: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn labels_mut(&mut self, to: StationId) -> &mut BTreeSet<EdgeLabel> {
        let pos = match self.edges.iter().position(|(id, _)| *id == to) {
            Some(pos) => pos,
            None => {
                self.edges.push((to, BTreeSet::new()));
                self.edges.len() - 1
            }
        };
        &mut self.edges[pos].1
    }
}

/// The station graph.
#[derive(Debug, Clone, Default)]
pub struct StationGraph {
    stations: Vec<Station>,
    by_name: HashMap<String, StationId>,
    lines: Vec<String>,
    termini: Vec<String>,
    /// Lines serving each terminus, indexed by `TerminusId`.
    terminus_lines: Vec<LineSet>,
}

impl StationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line running through `stations` in order.
    ///
    /// Travelling from `stations[i - 1]` to `stations[i]` is labelled as
    /// heading toward `terminus_b`; the reverse direction heads toward
    /// `terminus_a`. Edges shared with earlier lines accumulate labels.
    pub fn add_line<S: AsRef<str>>(
        &mut self,
        stations: &[S],
        color: &str,
        terminus_a: &str,
        terminus_b: &str,
    ) -> Result<(), GraphError> {
        if stations.is_empty() {
            return Err(GraphError::EmptyLine {
                color: color.to_string(),
            });
        }

        let line = self.intern_line(color)?;
        let toward_a = self.intern_terminus(terminus_a)?;
        let toward_b = self.intern_terminus(terminus_b)?;
        self.terminus_lines[toward_a.index()].insert(line);
        self.terminus_lines[toward_b.index()].insert(line);

        let mut prev: Option<StationId> = None;
        for name in stations {
            let cur = self.intern_station(name.as_ref())?;
            if let Some(prev) = prev {
                self.stations[prev.index()].labels_mut(cur).insert(EdgeLabel {
                    line,
                    toward: toward_b,
                });
                self.stations[cur.index()].labels_mut(prev).insert(EdgeLabel {
                    line,
                    toward: toward_a,
                });
            }
            prev = Some(cur);
        }

        Ok(())
    }

    fn intern_station(&mut self, name: &str) -> Result<StationId, GraphError> {
        if let Some(id) = self.by_name.get(name) {
            return Ok(*id);
        }
        let raw = u16::try_from(self.stations.len()).map_err(|_| GraphError::TooManyStations)?;
        let id = StationId(raw);
        self.stations.push(Station::new(name.to_string()));
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    fn intern_line(&mut self, color: &str) -> Result<LineId, GraphError> {
        if let Some(pos) = self.lines.iter().position(|l| l == color) {
            return Ok(LineId(pos as u8));
        }
        if self.lines.len() >= MAX_LABELS {
            return Err(GraphError::TooManyLines);
        }
        self.lines.push(color.to_string());
        Ok(LineId((self.lines.len() - 1) as u8))
    }

    fn intern_terminus(&mut self, name: &str) -> Result<TerminusId, GraphError> {
        if let Some(pos) = self.termini.iter().position(|t| t == name) {
            return Ok(TerminusId(pos as u8));
        }
        if self.termini.len() >= MAX_LABELS {
            return Err(GraphError::TooManyTermini);
        }
        self.termini.push(name.to_string());
        self.terminus_lines.push(LineSet::EMPTY);
        Ok(TerminusId((self.termini.len() - 1) as u8))
    }

    /// Look up a station by name.
    pub fn station_id(&self, name: &str) -> Option<StationId> {
        self.by_name.get(name).copied()
    }

    pub fn station(&self, id: StationId) -> &Station {
        &self.stations[id.index()]
    }

    /// Name of a station.
    pub fn name(&self, id: StationId) -> &str {
        &self.stations[id.index()].name
    }

    /// All station ids in insertion order.
    pub fn station_ids(&self) -> impl Iterator<Item = StationId> + '_ {
        (0..self.stations.len()).map(|i| StationId(i as u16))
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line_name(&self, id: LineId) -> &str {
        &self.lines[id.index()]
    }

    pub fn terminus_name(&self, id: TerminusId) -> &str {
        &self.termini[id.index()]
    }

    /// Lines that terminate at the given terminus (either end).
    pub fn lines_serving(&self, terminus: TerminusId) -> LineSet {
        self.terminus_lines[terminus.index()]
    }

    /// Neighbours of a station with their edge labels.
    pub fn neighbors(
        &self,
        id: StationId,
    ) -> impl Iterator<Item = (StationId, &BTreeSet<EdgeLabel>)> + '_ {
        self.stations[id.index()]
            .edges
            .iter()
            .map(|(to, labels)| (*to, labels))
    }

    /// Labels on the edge `from -> to`, if the stations are adjacent.
    pub fn labels(&self, from: StationId, to: StationId) -> Option<&BTreeSet<EdgeLabel>> {
        self.stations[from.index()]
            .edges
            .iter()
            .find(|(id, _)| *id == to)
            .map(|(_, labels)| labels)
    }

    /// Lines running over the edge `from -> to` (empty if not adjacent).
    pub fn lines_between(&self, from: StationId, to: StationId) -> LineSet {
        self.labels(from, to)
            .map(|labels| labels.iter().map(|l| l.line).collect())
            .unwrap_or_default()
    }

    /// Every line calling at a station.
    pub fn lines_at(&self, id: StationId) -> LineSet {
        self.neighbors(id)
            .flat_map(|(_, labels)| labels.iter().map(|l| l.line))
            .collect()
    }

    /// Termini reachable by riding over the edge `from -> to`.
    pub fn directions_between(&self, from: StationId, to: StationId) -> TerminusSet {
        self.labels(from, to)
            .map(|labels| labels.iter().map(|l| l.toward).collect())
            .unwrap_or_default()
    }

    /// True if every station can reach every other station.
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.station_ids().next() else {
            return true;
        };
        let mut seen = vec![false; self.stations.len()];
        seen[start.index()] = true;
        let mut queue = VecDeque::from([start]);
        let mut reached = 1;
        while let Some(id) = queue.pop_front() {
            for (next, _) in self.neighbors(id) {
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }
        reached == self.stations.len()
    }
}

//! Graph and network construction errors.

/// Errors raised while building the station graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A line was declared with no stations
    #[error("line {color} has no stations")]
    EmptyLine { color: String },

    /// More line colours than a `LineSet` can hold
    #[error("too many lines (at most 64 are supported)")]
    TooManyLines,

    /// More termini than a `TerminusSet` can hold
    #[error("too many termini (at most 64 are supported)")]
    TooManyTermini,

    /// Station ids are 16-bit
    #[error("too many stations")]
    TooManyStations,
}

/// Errors raised while loading a topology and building a [`super::Network`].
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// Topology file could not be read
    #[error("failed to read topology: {0}")]
    Io(#[from] std::io::Error),

    /// Topology file is not valid JSON
    #[error("invalid topology JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A line could not be added to the graph
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A station in the graph has no coordinate entry
    #[error("no coordinate for station {0}")]
    MissingCoordinate(String),
}

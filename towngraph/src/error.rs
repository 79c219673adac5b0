use thiserror::Error;

/// Graph construction error.
#[derive(Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum GraphError {
    #[error("invalid route token: {token:?}")]
    Format { token: String },

    #[error("route from {town:?} to itself is not allowed")]
    SelfLoop { town: String },

    #[error("duplicate route {from:?} -> {to:?}")]
    DuplicateEdge { from: String, to: String },
}

/// Query argument error.
///
/// Returning one of these errors never affects the graph, subsequent
/// queries can be answered as usual.
#[derive(Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum QueryError {
    #[error("provide exactly one of exact stops ({exact:?}) or max stops ({max:?})")]
    InvalidStopLimit {
        exact: Option<usize>,
        max: Option<usize>,
    },

    #[error("a path needs at least two towns, got {len}")]
    PathTooShort { len: usize },
}

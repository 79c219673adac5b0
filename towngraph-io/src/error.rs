use std::io;

use thiserror::Error;
use towngraph::GraphError;

/// Route list IO error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Error in file IO.
    #[error("error reading route list")]
    IO(#[from] io::Error),

    /// Route list parsing error.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Route list parsing errors.
#[derive(Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum ParseError {
    /// A route could not be parsed or added to the graph.
    #[error("line {line}: {source}")]
    Route { line: usize, source: GraphError },

    /// The route list does not contain any routes.
    #[error("route list is empty")]
    Empty,
}

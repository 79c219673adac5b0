//! Directed graphs of towns connected by one-way routes.
//!
//! A [`Graph`] is built once from edge tokens such as `AB5` and then
//! answers route queries: the distance along a path, the number of
//! trips within a stop limit, the shortest distance between two towns
//! and the number of routes below a distance.

pub mod api;

mod error;
pub use crate::error::{GraphError, QueryError};

pub mod graph;
pub use crate::graph::{Graph, GraphBuilder, DEFAULT_ROUTES};

mod graph_algo;
pub use crate::graph_algo::{shortest_path, BoundedWalk, WalkBound, WalkStep};

mod query;
pub use crate::query::StopLimit;

pub mod town;
pub use crate::town::{parse_path, Route, Town, Weight};

//! Route queries.

use log::trace;
use petgraph::visit::{EdgeRef, Walker};
use petgraph::Direction;

use crate::error::QueryError;
use crate::graph::Graph;
use crate::graph_algo::{shortest_path, BoundedWalk, WalkBound};
use crate::town::Weight;

/// Constraint on the number of stops of a trip.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StopLimit {
    /// Trips with exactly this number of stops.
    Exact(usize),

    /// Trips with at least one and at most this number of stops.
    Max(usize),
}

impl StopLimit {
    /// Construct a stop limit from optional bounds.
    ///
    /// Exactly one of the bounds must be given.
    ///
    /// ```
    /// use towngraph::StopLimit;
    ///
    /// assert_eq!(StopLimit::from_bounds(None, Some(3)), Ok(StopLimit::Max(3)));
    /// assert!(StopLimit::from_bounds(Some(4), Some(3)).is_err());
    /// ```
    pub fn from_bounds(exact: Option<usize>, max: Option<usize>) -> Result<Self, QueryError> {
        match (exact, max) {
            (Some(exact), None) => Ok(StopLimit::Exact(exact)),
            (None, Some(max)) => Ok(StopLimit::Max(max)),
            (exact, max) => Err(QueryError::InvalidStopLimit { exact, max }),
        }
    }

    fn stops(self) -> usize {
        match self {
            StopLimit::Exact(stops) | StopLimit::Max(stops) => stops,
        }
    }

    fn admits(self, stops: usize) -> bool {
        match self {
            StopLimit::Exact(exact) => stops == exact,
            StopLimit::Max(max) => stops <= max,
        }
    }
}

impl Graph {
    /// Total distance when following `path` town by town.
    ///
    /// Returns `None` if there is no direct route for some pair of
    /// consecutive towns, or when the path has fewer than two towns.
    /// Distances saturate at `Weight::MAX`.
    pub fn distance_along<S>(&self, path: &[S]) -> Option<Weight>
    where
        S: AsRef<str>,
    {
        if path.len() < 2 {
            return None;
        }

        path.windows(2).try_fold(0, |distance: Weight, leg| {
            self.weight(leg[0].as_ref(), leg[1].as_ref())
                .map(|weight| distance.saturating_add(weight))
        })
    }

    /// Count the trips from `start` to `end` that satisfy the stop limit.
    ///
    /// A trip may pass through the same town or follow the same route
    /// several times. Staying at `start` is never a trip, not even when
    /// `start` and `end` are the same town.
    pub fn count_trips_by_stops(&self, start: &str, end: &str, limit: StopLimit) -> usize {
        trace!("Counting trips {} -> {} with {:?}", start, end, limit);

        let (start, end) = match (self.node(start), self.node(end)) {
            (Some(start), Some(end)) => (start, end),
            _ => return 0,
        };

        BoundedWalk::new(start, WalkBound::Hops(limit.stops()))
            .iter(self.get_ref())
            .filter(|step| step.node == end && step.hops > 0 && limit.admits(step.hops))
            .count()
    }

    /// Length of the shortest route from `start` to `end`.
    ///
    /// When `start` and `end` are the same town, this is the length of
    /// the shortest round trip that leaves `start` and returns to it.
    /// Returns `None` if there is no such route or if either town is
    /// not part of the graph.
    pub fn shortest_distance(&self, start: &str, end: &str) -> Option<Weight> {
        trace!("Shortest distance {} -> {}", start, end);

        let start = self.node(start)?;
        let end = self.node(end)?;
        let graph = self.get_ref();

        if start != end {
            return shortest_path(graph, start, end);
        }

        graph
            .edges_directed(start, Direction::Outgoing)
            .filter_map(|edge| {
                shortest_path(graph, edge.target(), start)
                    .map(|back| edge.weight().saturating_add(back))
            })
            .min()
    }

    /// Count the routes from `start` to `end` that are shorter than
    /// `max_distance`.
    ///
    /// A route may pass through the same town or follow the same route
    /// several times. Staying at `start` is never a route.
    pub fn count_routes_by_max_distance(
        &self,
        start: &str,
        end: &str,
        max_distance: Weight,
    ) -> usize {
        trace!(
            "Counting routes {} -> {} shorter than {}",
            start,
            end,
            max_distance
        );

        let (start, end) = match (self.node(start), self.node(end)) {
            (Some(start), Some(end)) => (start, end),
            _ => return 0,
        };

        BoundedWalk::new(start, WalkBound::Distance(max_distance))
            .iter(self.get_ref())
            .filter(|step| step.node == end && step.distance > 0)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::StopLimit;
    use crate::error::QueryError;
    use crate::graph::Graph;
    use crate::tests::DEFAULT_GRAPH;

    #[test]
    fn distance_along() {
        assert_eq!(DEFAULT_GRAPH.distance_along(&["A", "B", "C"]), Some(9));
        assert_eq!(DEFAULT_GRAPH.distance_along(&["A", "D"]), Some(5));
        assert_eq!(DEFAULT_GRAPH.distance_along(&["A", "D", "C"]), Some(13));
        assert_eq!(
            DEFAULT_GRAPH.distance_along(&["A", "E", "B", "C", "D"]),
            Some(22)
        );
        assert_eq!(DEFAULT_GRAPH.distance_along(&["A", "E", "D"]), None);
    }

    #[test]
    fn distance_along_unknown_town() {
        assert_eq!(DEFAULT_GRAPH.distance_along(&["A", "X"]), None);
        assert_eq!(DEFAULT_GRAPH.distance_along(&["X", "A"]), None);
    }

    #[test]
    fn distance_along_needs_a_leg() {
        assert_eq!(DEFAULT_GRAPH.distance_along(&["A"]), None);
        assert_eq!(DEFAULT_GRAPH.distance_along::<&str>(&[]), None);
    }

    #[test]
    fn distance_along_sums_legs() {
        let path = ["A", "D", "C", "E", "B", "C", "D", "E"];
        let expected: u64 = path
            .windows(2)
            .map(|leg| DEFAULT_GRAPH.weight(leg[0], leg[1]).unwrap())
            .sum();
        assert_eq!(DEFAULT_GRAPH.distance_along(&path), Some(expected));
    }

    #[test]
    fn distances_saturate() {
        let graph = Graph::from_routes(&["AB18446744073709551615", "BC1", "BA1"]).unwrap();
        assert_eq!(graph.distance_along(&["A", "B", "C"]), Some(u64::MAX));
        assert_eq!(graph.shortest_distance("A", "A"), Some(u64::MAX));
        assert_eq!(graph.shortest_distance("A", "C"), Some(u64::MAX));
        assert_eq!(graph.shortest_distance("B", "B"), Some(u64::MAX));
    }

    #[test]
    fn trips_by_stops() {
        assert_eq!(
            DEFAULT_GRAPH.count_trips_by_stops("C", "C", StopLimit::Max(3)),
            2
        );
        assert_eq!(
            DEFAULT_GRAPH.count_trips_by_stops("A", "C", StopLimit::Exact(4)),
            3
        );
        assert_eq!(
            DEFAULT_GRAPH.count_trips_by_stops("A", "C", StopLimit::Exact(2)),
            2
        );
        assert_eq!(
            DEFAULT_GRAPH.count_trips_by_stops("A", "C", StopLimit::Max(2)),
            2
        );
    }

    #[test]
    fn zero_stops_is_never_a_trip() {
        for town in DEFAULT_GRAPH.towns() {
            let town = town.label();
            assert_eq!(
                DEFAULT_GRAPH.count_trips_by_stops(town, town, StopLimit::Exact(0)),
                0
            );
            assert_eq!(
                DEFAULT_GRAPH.count_trips_by_stops(town, town, StopLimit::Max(0)),
                0
            );
            assert_eq!(
                DEFAULT_GRAPH.count_trips_by_stops("A", town, StopLimit::Max(0)),
                0
            );
        }
    }

    #[test]
    fn trips_from_unknown_town() {
        assert_eq!(
            DEFAULT_GRAPH.count_trips_by_stops("X", "C", StopLimit::Max(10)),
            0
        );
        assert_eq!(
            DEFAULT_GRAPH.count_trips_by_stops("C", "X", StopLimit::Max(10)),
            0
        );
    }

    #[test]
    fn stop_limit_from_bounds() {
        assert_eq!(
            StopLimit::from_bounds(Some(4), None),
            Ok(StopLimit::Exact(4))
        );
        assert_eq!(StopLimit::from_bounds(None, Some(3)), Ok(StopLimit::Max(3)));
        assert_eq!(
            StopLimit::from_bounds(Some(4), Some(3)),
            Err(QueryError::InvalidStopLimit {
                exact: Some(4),
                max: Some(3)
            })
        );
        assert_eq!(
            StopLimit::from_bounds(None, None),
            Err(QueryError::InvalidStopLimit {
                exact: None,
                max: None
            })
        );
    }

    #[test]
    fn shortest_distance() {
        assert_eq!(DEFAULT_GRAPH.shortest_distance("A", "C"), Some(9));
        assert_eq!(DEFAULT_GRAPH.shortest_distance("B", "B"), Some(9));
        assert_eq!(DEFAULT_GRAPH.shortest_distance("A", "E"), Some(7));
        assert_eq!(DEFAULT_GRAPH.shortest_distance("E", "D"), Some(15));
        assert_eq!(DEFAULT_GRAPH.shortest_distance("C", "C"), Some(9));
    }

    #[test]
    fn shortest_distance_without_route() {
        // No route leads back to A.
        assert_eq!(DEFAULT_GRAPH.shortest_distance("B", "A"), None);
        assert_eq!(DEFAULT_GRAPH.shortest_distance("A", "A"), None);
        assert_eq!(DEFAULT_GRAPH.shortest_distance("A", "X"), None);
        assert_eq!(DEFAULT_GRAPH.shortest_distance("X", "X"), None);
    }

    #[test]
    fn shortest_cycle_picks_best_departure() {
        let graph = Graph::from_routes(&["AB1", "BA20", "AC4", "CA4", "BC1"]).unwrap();
        // A -> B -> C -> A beats both direct returns.
        assert_eq!(graph.shortest_distance("A", "A"), Some(6));
    }

    #[test]
    fn routes_by_max_distance() {
        assert_eq!(
            DEFAULT_GRAPH.count_routes_by_max_distance("C", "C", 30),
            7
        );
        assert_eq!(DEFAULT_GRAPH.count_routes_by_max_distance("A", "B", 6), 1);
        assert_eq!(DEFAULT_GRAPH.count_routes_by_max_distance("A", "B", 5), 0);
    }

    #[test]
    fn routes_by_max_distance_never_stays() {
        assert_eq!(DEFAULT_GRAPH.count_routes_by_max_distance("C", "C", 1), 0);
        assert_eq!(DEFAULT_GRAPH.count_routes_by_max_distance("C", "C", 0), 0);
        // The shortest round trip through C has length 9.
        assert_eq!(DEFAULT_GRAPH.count_routes_by_max_distance("C", "C", 9), 0);
        assert_eq!(DEFAULT_GRAPH.count_routes_by_max_distance("C", "C", 10), 1);
    }

    #[test]
    fn sink_has_no_departures() {
        let graph = Graph::from_routes(&["AB3", "CB2", "CA1"]).unwrap();
        assert_eq!(graph.distance_along(&["B", "A"]), None);
        assert_eq!(graph.shortest_distance("B", "A"), None);
        assert_eq!(graph.shortest_distance("B", "B"), None);
        assert_eq!(graph.count_trips_by_stops("B", "B", StopLimit::Max(5)), 0);
        assert_eq!(graph.count_routes_by_max_distance("B", "A", 100), 0);
    }
}

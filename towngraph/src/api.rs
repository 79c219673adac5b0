//! Requests and responses for callers that talk to a graph through
//! plain parameters, such as an HTTP front end.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::QueryError;
use crate::graph::Graph;
use crate::query::StopLimit;
use crate::town::{Town, Weight};

/// Message reported for queries without a matching route.
pub const NO_ROUTE: &str = "NO SUCH ROUTE";

/// A query against a graph.
///
/// In serialized form the kind of query is stored in the `query` field:
///
/// ```json
/// {"query": "trips_by_stops", "start": "C", "end": "C", "max_stops": 3}
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum Request {
    /// Distance when following a path of at least two towns.
    Distance { path: Vec<Town> },

    /// Number of trips within a stop limit.
    ///
    /// Exactly one of `exact_stops` and `max_stops` must be given.
    TripsByStops {
        start: Town,
        end: Town,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exact_stops: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_stops: Option<usize>,
    },

    /// Length of the shortest route.
    Shortest { start: Town, end: Town },

    /// Number of routes shorter than `max_distance`.
    RoutesByMaxDistance {
        start: Town,
        end: Town,
        #[serde(alias = "threshold")]
        max_distance: Weight,
    },
}

/// Answer to a [`Request`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Response {
    /// A distance.
    Distance(Weight),

    /// A number of trips or routes.
    Count(usize),

    /// There is no route that satisfies the request.
    NoRoute,
}

impl From<Option<Weight>> for Response {
    fn from(distance: Option<Weight>) -> Self {
        distance.map(Response::Distance).unwrap_or(Response::NoRoute)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Response::Distance(distance) => write!(f, "{}", distance),
            Response::Count(count) => write!(f, "{}", count),
            Response::NoRoute => f.write_str(NO_ROUTE),
        }
    }
}

impl Serialize for Response {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Response::Distance(distance) => map.serialize_entry("distance", distance)?,
            Response::Count(count) => map.serialize_entry("count", count)?,
            Response::NoRoute => map.serialize_entry("error", NO_ROUTE)?,
        }
        map.end()
    }
}

impl Graph {
    /// Answer a request.
    ///
    /// Fails when the request parameters are invalid. A request without
    /// a matching route is not an error, it is answered with
    /// [`Response::NoRoute`].
    pub fn answer(&self, request: &Request) -> Result<Response, QueryError> {
        let response = match request {
            Request::Distance { path } => {
                if path.len() < 2 {
                    return Err(QueryError::PathTooShort { len: path.len() });
                }
                self.distance_along(path.as_slice()).into()
            }
            Request::TripsByStops {
                start,
                end,
                exact_stops,
                max_stops,
            } => {
                let limit = StopLimit::from_bounds(*exact_stops, *max_stops)?;
                Response::Count(self.count_trips_by_stops(start.label(), end.label(), limit))
            }
            Request::Shortest { start, end } => {
                self.shortest_distance(start.label(), end.label()).into()
            }
            Request::RoutesByMaxDistance {
                start,
                end,
                max_distance,
            } => Response::Count(self.count_routes_by_max_distance(
                start.label(),
                end.label(),
                *max_distance,
            )),
        };

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Request, Response, NO_ROUTE};
    use crate::error::QueryError;
    use crate::tests::DEFAULT_GRAPH;
    use crate::town::parse_path;

    fn request(value: serde_json::Value) -> Request {
        serde_json::from_value(value).unwrap()
    }

    fn answer(value: serde_json::Value) -> Result<Response, QueryError> {
        DEFAULT_GRAPH.answer(&request(value))
    }

    #[test]
    fn answers_reference_queries() {
        assert_eq!(
            answer(json!({"query": "distance", "path": ["A", "B", "C"]})),
            Ok(Response::Distance(9))
        );
        assert_eq!(
            answer(json!({"query": "distance", "path": ["A", "E", "D"]})),
            Ok(Response::NoRoute)
        );
        assert_eq!(
            answer(json!({"query": "trips_by_stops", "start": "C", "end": "C", "max_stops": 3})),
            Ok(Response::Count(2))
        );
        assert_eq!(
            answer(json!({"query": "trips_by_stops", "start": "A", "end": "C", "exact_stops": 4})),
            Ok(Response::Count(3))
        );
        assert_eq!(
            answer(json!({"query": "shortest", "start": "B", "end": "B"})),
            Ok(Response::Distance(9))
        );
        assert_eq!(
            answer(json!({
                "query": "routes_by_max_distance",
                "start": "C",
                "end": "C",
                "threshold": 30
            })),
            Ok(Response::Count(7))
        );
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert_eq!(
            answer(json!({"query": "trips_by_stops", "start": "C", "end": "C"})),
            Err(QueryError::InvalidStopLimit {
                exact: None,
                max: None
            })
        );
        assert_eq!(
            answer(json!({"query": "distance", "path": ["A"]})),
            Err(QueryError::PathTooShort { len: 1 })
        );

        // The graph remains usable after a rejected request.
        assert_eq!(
            DEFAULT_GRAPH.answer(&Request::Distance {
                path: parse_path("A-D")
            }),
            Ok(Response::Distance(5))
        );
    }

    #[test]
    fn response_wire_format() {
        assert_eq!(
            serde_json::to_value(Response::Distance(9)).unwrap(),
            json!({"distance": 9})
        );
        assert_eq!(
            serde_json::to_value(Response::Count(7)).unwrap(),
            json!({"count": 7})
        );
        assert_eq!(
            serde_json::to_value(Response::NoRoute).unwrap(),
            json!({ "error": NO_ROUTE })
        );
    }

    #[test]
    fn response_display() {
        assert_eq!(Response::Distance(9).to_string(), "9");
        assert_eq!(Response::Count(2).to_string(), "2");
        assert_eq!(Response::NoRoute.to_string(), "NO SUCH ROUTE");
    }

    #[test]
    fn request_serialization_omits_absent_bounds() {
        let request = Request::TripsByStops {
            start: "C".into(),
            end: "C".into(),
            exact_stops: None,
            max_stops: Some(3),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"query": "trips_by_stops", "start": "C", "end": "C", "max_stops": 3})
        );
    }
}

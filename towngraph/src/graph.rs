//! Town graphs.

use std::collections::HashMap;

use log::debug;
use petgraph::graph::{DiGraph, NodeIndex, NodeIndices};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::error::GraphError;
use crate::town::{Route, Town, Weight};

/// Routes of the reference graph.
pub const DEFAULT_ROUTES: &[&str] = &[
    "AB5", "BC4", "CD8", "DC8", "DE6", "AD5", "CE2", "EB3", "AE7",
];

/// A directed graph of towns connected by one-way routes.
///
/// This data structure is a thin wrapper around the `petgraph`
/// `DiGraph` data structure that enforces the invariants of a route
/// map: there is at most one route for every ordered pair of towns,
/// no route leads from a town to itself and all distances are
/// positive. Every town that is mentioned by a route is a node of the
/// graph, even if no route departs from it.
///
/// A graph is constructed once, through [`GraphBuilder`] or one of the
/// `from_*` constructors, and is immutable afterwards. The wrapped graph
/// can be inspected using [`Graph::get_ref`].
#[derive(Clone, Debug, Default)]
pub struct Graph {
    graph: DiGraph<Town, Weight>,
    index: HashMap<Town, NodeIndex>,
}

impl Graph {
    /// Construct a graph from edge tokens such as `AB5`.
    ///
    /// Tokens are added in order. The first invalid token aborts
    /// construction, no graph is returned in that case.
    ///
    /// ```
    /// use towngraph::Graph;
    ///
    /// let graph = Graph::from_routes(&["AB5", "BC4"]).unwrap();
    /// assert_eq!(graph.town_count(), 3);
    /// assert_eq!(graph.weight("A", "B"), Some(5));
    /// ```
    pub fn from_routes<I>(tokens: I) -> Result<Self, GraphError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut builder = GraphBuilder::new();
        for token in tokens {
            builder.add_route(token.as_ref().parse()?)?;
        }

        Ok(builder.build())
    }

    /// Construct a graph from routes.
    pub fn from_edges<I>(routes: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = Route>,
    {
        let mut builder = GraphBuilder::new();
        for route in routes {
            builder.add_route(route)?;
        }

        Ok(builder.build())
    }

    /// Construct the reference graph from [`DEFAULT_ROUTES`].
    pub fn kiwiland() -> Self {
        Graph::from_routes(DEFAULT_ROUTES).expect("Default routes must form a valid graph")
    }

    /// Check whether `town` is part of the graph.
    pub fn contains(&self, town: &str) -> bool {
        self.index.contains_key(town)
    }

    /// Get the number of towns in the graph.
    pub fn town_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of routes in the graph.
    pub fn route_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Get an iterator over the towns, in order of first mention.
    pub fn towns(&self) -> Towns {
        Towns {
            inner: self.graph.node_indices(),
            graph: &self.graph,
        }
    }

    /// Get an iterator over the routes, in construction order.
    pub fn routes(&self) -> impl Iterator<Item = Route> + '_ {
        self.graph.edge_references().map(move |e| {
            Route::new(
                self.graph[e.source()].clone(),
                self.graph[e.target()].clone(),
                *e.weight(),
            )
        })
    }

    /// Get the towns that can be reached directly from `town`, with
    /// the distance to each of them.
    pub fn destinations<'a>(&'a self, town: &str) -> impl Iterator<Item = (&'a Town, Weight)> {
        let graph = &self.graph;
        self.node(town)
            .into_iter()
            .flat_map(move |idx| graph.edges_directed(idx, Direction::Outgoing))
            .map(move |e| (&graph[e.target()], *e.weight()))
    }

    /// Get the distance of the direct route from `from` to `to`, if any.
    pub fn weight(&self, from: &str, to: &str) -> Option<Weight> {
        let edge = self.graph.find_edge(self.node(from)?, self.node(to)?)?;
        Some(self.graph[edge])
    }

    /// Get a reference to the `DiGraph` of the town graph.
    pub fn get_ref(&self) -> &DiGraph<Town, Weight> {
        &self.graph
    }

    /// Unwrap the `DiGraph` of the town graph.
    pub fn into_inner(self) -> DiGraph<Town, Weight> {
        self.graph
    }

    pub(crate) fn node(&self, town: &str) -> Option<NodeIndex> {
        self.index.get(town).copied()
    }
}

impl Eq for Graph {}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        // Cheap checks
        if self.town_count() != other.town_count() || self.route_count() != other.route_count()
        {
            return false;
        }

        self.towns().all(|town| other.contains(town.label()))
            && self.routes().all(|route| {
                other.weight(route.origin().label(), route.destination().label())
                    == Some(route.weight())
            })
    }
}

impl From<Graph> for DiGraph<Town, Weight> {
    fn from(graph: Graph) -> Self {
        graph.into_inner()
    }
}

/// Iterator over the towns in a graph.
pub struct Towns<'a> {
    inner: NodeIndices,
    graph: &'a DiGraph<Town, Weight>,
}

impl<'a> Iterator for Towns<'a> {
    type Item = &'a Town;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|idx| &self.graph[idx])
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Town;
    type IntoIter = Towns<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.towns()
    }
}

/// Incremental construction of a [`Graph`].
///
/// A builder that returned an error should be discarded: the graph is
/// only available through [`GraphBuilder::build`], after all routes
/// were accepted.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        GraphBuilder::default()
    }

    /// Add a route to the graph under construction.
    ///
    /// Both towns of the route are added to the graph when they are not
    /// present yet. Fails without modifying the graph when the route is
    /// a self loop or duplicates an earlier route.
    pub fn add_route(&mut self, route: Route) -> Result<(), GraphError> {
        if route.origin() == route.destination() {
            return Err(GraphError::SelfLoop {
                town: route.origin().label().to_owned(),
            });
        }

        if self
            .graph
            .weight(route.origin().label(), route.destination().label())
            .is_some()
        {
            return Err(GraphError::DuplicateEdge {
                from: route.origin().label().to_owned(),
                to: route.destination().label().to_owned(),
            });
        }

        let from = self.town_index(route.origin());
        let to = self.town_index(route.destination());
        self.graph.graph.add_edge(from, to, route.weight());

        Ok(())
    }

    /// Finish construction.
    pub fn build(self) -> Graph {
        debug!(
            "Built graph with {} towns and {} routes",
            self.graph.town_count(),
            self.graph.route_count()
        );

        self.graph
    }

    fn town_index(&mut self, town: &Town) -> NodeIndex {
        if let Some(idx) = self.graph.node(town.label()) {
            return idx;
        }

        let idx = self.graph.graph.add_node(town.clone());
        self.graph.index.insert(town.clone(), idx);
        idx
    }
}

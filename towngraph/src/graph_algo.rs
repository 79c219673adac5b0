use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

use petgraph::visit::{EdgeRef, IntoEdges, Walker};

use crate::town::Weight;

/// Limit on the walks explored by [`BoundedWalk`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WalkBound {
    /// Walks of at most this many hops.
    Hops(usize),

    /// Walks shorter than this distance.
    Distance(Weight),
}

impl WalkBound {
    fn admits<N>(self, step: &WalkStep<N>) -> bool {
        match self {
            WalkBound::Hops(max) => step.hops <= max,
            WalkBound::Distance(max) => step.distance < max,
        }
    }
}

/// The end point of a walk prefix.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WalkStep<N> {
    pub node: N,
    pub hops: usize,
    pub distance: Weight,
}

/// Depth-first enumeration of all walks from a start node.
///
/// Every walk prefix that satisfies the bound is visited once, nodes
/// and edges can be revisited. Since the bound can only be violated
/// further by extending a walk, the exploration is pruned as soon as
/// a prefix exceeds the bound. For a distance bound this requires all
/// edge weights to be positive.
pub struct BoundedWalk<N> {
    stack: Vec<WalkStep<N>>,
    bound: WalkBound,
}

impl<N> BoundedWalk<N>
where
    N: Copy,
{
    pub fn new(start: N, bound: WalkBound) -> Self {
        let step = WalkStep {
            node: start,
            hops: 0,
            distance: 0,
        };

        let mut stack = Vec::new();
        if bound.admits(&step) {
            stack.push(step);
        }

        BoundedWalk { stack, bound }
    }

    pub fn next<G>(&mut self, graph: G) -> Option<WalkStep<N>>
    where
        G: IntoEdges<NodeId = N, EdgeWeight = Weight>,
    {
        let step = self.stack.pop()?;

        for edge in graph.edges(step.node) {
            let succ = WalkStep {
                node: edge.target(),
                hops: step.hops + 1,
                distance: step.distance.saturating_add(*edge.weight()),
            };

            if self.bound.admits(&succ) {
                self.stack.push(succ);
            }
        }

        Some(step)
    }
}

impl<G> Walker<G> for BoundedWalk<G::NodeId>
where
    G: IntoEdges<EdgeWeight = Weight>,
{
    type Item = WalkStep<G::NodeId>;

    fn walk_next(&mut self, context: G) -> Option<Self::Item> {
        self.next(context)
    }
}

/// Length of the shortest path from `source` to `target`.
///
/// Dijkstra's algorithm, stopping as soon as `target` is settled.
/// Returns `None` when `target` cannot be reached. The path from a
/// node to itself has length zero.
pub fn shortest_path<G>(graph: G, source: G::NodeId, target: G::NodeId) -> Option<Weight>
where
    G: IntoEdges<EdgeWeight = Weight>,
    G::NodeId: Eq + Hash + Ord,
{
    let mut best = HashMap::new();
    let mut frontier = BinaryHeap::new();

    best.insert(source, 0);
    frontier.push(Reverse((0, source)));

    while let Some(Reverse((distance, node))) = frontier.pop() {
        if node == target {
            return Some(distance);
        }

        // Stale entry, the node was settled with a shorter distance.
        if best.get(&node).map_or(false, |&d| d < distance) {
            continue;
        }

        for edge in graph.edges(node) {
            let candidate = distance.saturating_add(*edge.weight());
            match best.entry(edge.target()) {
                Entry::Occupied(mut entry) => {
                    if candidate < *entry.get() {
                        entry.insert(candidate);
                        frontier.push(Reverse((candidate, edge.target())));
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(candidate);
                    frontier.push(Reverse((candidate, edge.target())));
                }
            }
        }
    }

    None
}

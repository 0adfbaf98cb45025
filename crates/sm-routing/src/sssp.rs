//! Single-source shortest paths over a [`RackGraph`].
//!
//! Classic Dijkstra with a binary-heap frontier and lazy deletion: instead of
//! decrease-key, an improved distance pushes a fresh entry and the outdated
//! one is discarded when it surfaces.  O((V + E) log V).
//!
//! Edge weights are non-negative by construction (`Distance::new` folds
//! negatives into the no-path sentinel), which is all Dijkstra requires.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use tracing::debug;

use sm_core::{Distance, NodeId};

use crate::graph::RackGraph;

// ── ShortestPathTree ──────────────────────────────────────────────────────────

/// Distances and predecessor links from one origin to every node.
///
/// Both tables are indexed by `NodeId`.  Unreachable nodes have distance
/// [`Distance::INFINITE`] and predecessor `NodeId::INVALID`, as does the
/// origin's own predecessor slot.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    origin: Option<NodeId>,
    /// Best distance from the origin.
    pub distances: Vec<Distance>,
    /// Node preceding each node on a shortest path from the origin.
    pub predecessors: Vec<NodeId>,
}

impl ShortestPathTree {
    /// A tree in which nothing is reachable, for an origin the graph lacks.
    fn unreachable(node_count: usize) -> Self {
        Self {
            origin:       None,
            distances:    vec![Distance::INFINITE; node_count],
            predecessors: vec![NodeId::INVALID; node_count],
        }
    }

    /// `None` if the tree was computed for an unknown origin.
    pub fn origin(&self) -> Option<NodeId> {
        self.origin
    }

    /// Distance to `node`; `INFINITE` if unreachable or out of range.
    #[inline]
    pub fn distance(&self, node: NodeId) -> Distance {
        self.distances.get(node.index()).copied().unwrap_or(Distance::INFINITE)
    }

    #[inline]
    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.predecessors
            .get(node.index())
            .copied()
            .filter(|p| p.is_valid())
    }

    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.distance(node).is_finite()
    }

    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_finite()).count()
    }

    /// The distance table keyed by rack name.
    pub fn distances_by_name<'g>(&self, graph: &'g RackGraph) -> BTreeMap<&'g str, Distance> {
        (0..graph.node_count())
            .map(|i| (graph.node_names[i].as_str(), self.distance(NodeId(i as u32))))
            .collect()
    }

    /// The predecessor table keyed by rack name.  Only nodes that have a
    /// predecessor appear.
    pub fn predecessors_by_name<'g>(&self, graph: &'g RackGraph) -> BTreeMap<&'g str, &'g str> {
        (0..graph.node_count())
            .filter_map(|i| {
                self.predecessor(NodeId(i as u32))
                    .map(|p| (graph.node_names[i].as_str(), graph.name(p)))
            })
            .collect()
    }
}

// ── Frontier entry ────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq)]
struct Frontier {
    dist: Distance,
    node: NodeId,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap (max) pops the smallest distance; lower
        // NodeId wins ties for deterministic expansion order.
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ── Dijkstra ──────────────────────────────────────────────────────────────────

/// Shortest paths from the rack named `origin`.
///
/// An origin missing from the graph is not an error: every node maps to
/// `INFINITE` and no predecessors are recorded.
pub fn shortest_paths(graph: &RackGraph, origin: &str) -> ShortestPathTree {
    match graph.node_id(origin) {
        Some(id) => shortest_paths_from(graph, id),
        None => {
            debug!(origin, "origin not in graph; nothing reachable");
            ShortestPathTree::unreachable(graph.node_count())
        }
    }
}

/// Shortest paths from `origin` given as a `NodeId`.
pub fn shortest_paths_from(graph: &RackGraph, origin: NodeId) -> ShortestPathTree {
    let n = graph.node_count();
    if origin.index() >= n {
        return ShortestPathTree::unreachable(n);
    }

    let mut dist = vec![Distance::INFINITE; n];
    let mut prev = vec![NodeId::INVALID; n];
    dist[origin.index()] = Distance::ZERO;

    let mut heap = BinaryHeap::new();
    heap.push(Frontier { dist: Distance::ZERO, node: origin });

    while let Some(Frontier { dist: cost, node }) = heap.pop() {
        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in graph.out_edges(node) {
            let neighbor = graph.edge_to[edge.index()];
            let candidate = cost + graph.edge_weight[edge.index()];

            if candidate < dist[neighbor.index()] {
                dist[neighbor.index()] = candidate;
                prev[neighbor.index()] = node;
                heap.push(Frontier { dist: candidate, node: neighbor });
            }
        }
    }

    let tree = ShortestPathTree { origin: Some(origin), distances: dist, predecessors: prev };
    debug!(
        origin = graph.name(origin),
        reachable = tree.reachable_count(),
        "computed shortest-path tree"
    );
    tree
}

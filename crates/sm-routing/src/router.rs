//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! Callers that only need "walk from here to there" (reroute to the
//! checkout, for instance) go through the [`Router`] trait, so a layout with
//! precomputed tables or a heuristic router can be dropped in without
//! touching the CLI.  [`DijkstraRouter`] runs one SSSP and reconstructs.

use sm_core::Distance;

use crate::graph::RackGraph;
use crate::path::reconstruct_names;
use crate::sssp::shortest_paths_from;
use crate::{RoutingError, RoutingResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// A walked route: every rack passed, in order, plus its total distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Full walked path, including intermediate racks that are not stops.
    pub path: Vec<String>,
    /// The stops in the order they are visited.
    pub stops: Vec<String>,
    /// Sum of edge weights along `path`.
    pub total: Distance,
}

impl Route {
    /// A route that never leaves `node`.
    pub fn stay(node: &str) -> Self {
        Self {
            path:  vec![node.to_owned()],
            stops: vec![node.to_owned()],
            total: Distance::ZERO,
        }
    }

    /// `true` if the route starts and ends on the same rack without moving.
    pub fn is_trivial(&self) -> bool {
        self.path.len() <= 1
    }

    /// Consecutive `(from, to)` hops along the walked path.
    pub fn legs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.path
            .windows(2)
            .map(|w| (w[0].as_str(), w[1].as_str()))
    }

    /// [`legs`](Self::legs) paired with each hop's direct edge weight in
    /// `graph`, the edges of the shortest-path tree the route walks.
    pub fn weighted_legs<'a>(
        &'a self,
        graph: &'a RackGraph,
    ) -> impl Iterator<Item = (&'a str, &'a str, Option<Distance>)> + 'a {
        self.legs().map(move |(a, b)| {
            let weight = graph
                .node_id(a)
                .zip(graph.node_id(b))
                .and_then(|(x, y)| graph.edge_weight_between(x, y));
            (a, b, weight)
        })
    }

    /// `"R1 -> R4 -> R7"`.
    pub fn describe(&self, separator: &str) -> String {
        self.path.join(separator)
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable point-to-point routing engine.
///
/// `Send + Sync` so one router can be shared by independent requests.
pub trait Router: Send + Sync {
    /// Shortest walk from `from` to `to`.
    ///
    /// Unknown racks yield [`RoutingError::UnknownRack`]; a disconnected pair
    /// yields [`RoutingError::NoRoute`].  `from == to` is a trivial route.
    fn route(&self, graph: &RackGraph, from: &str, to: &str) -> RoutingResult<Route>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Runs a full SSSP from `from` and reconstructs the path to `to`.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, graph: &RackGraph, from: &str, to: &str) -> RoutingResult<Route> {
        let origin = graph
            .node_id(from)
            .ok_or_else(|| RoutingError::UnknownRack(from.to_owned()))?;
        let target = graph
            .node_id(to)
            .ok_or_else(|| RoutingError::UnknownRack(to.to_owned()))?;

        if origin == target {
            return Ok(Route::stay(from));
        }

        let tree = shortest_paths_from(graph, origin);
        let path = reconstruct_names(graph, &tree, from, to);
        if path.is_empty() {
            return Err(RoutingError::NoRoute { from: from.to_owned(), to: to.to_owned() });
        }

        Ok(Route {
            path,
            stops: vec![from.to_owned(), to.to_owned()],
            total: tree.distance(target),
        })
    }
}

//! Multi-stop route optimization.
//!
//! Given the racks a shopping list touches, find the visiting order that
//! minimizes total walking distance, then expand it into the full walked
//! path.  The first stop is the customer's current position and stays first;
//! every ordering of the remaining stops is scored exactly.
//!
//! # Cost
//!
//! One SSSP per distinct stop, then `(k-1)!` orderings for `k` stops.  Exact
//! search is only reasonable for the single-digit stop counts of one
//! shopping trip; there is no heuristic fallback.
//!
//! # Determinism
//!
//! Orderings are enumerated lexicographically over input positions and only
//! a strictly shorter total replaces the current best, so on ties the first
//! ordering enumerated wins.  Duplicate stops are visited redundantly.

use rustc_hash::FxHashMap;
use tracing::debug;

use sm_core::{Distance, NodeId};

use crate::graph::RackGraph;
use crate::path::reconstruct;
use crate::router::Route;
use crate::sssp::{shortest_paths_from, ShortestPathTree};
use crate::{RoutingError, RoutingResult};

/// Plan the shortest walk visiting every stop, starting at `required_stops[0]`.
///
/// - Empty input → [`RoutingError::NothingToRoute`].
/// - One stop → that stop alone at distance 0, no search.
/// - No ordering whose legs are all reachable →
///   [`RoutingError::NoFeasibleRoute`].  Stops missing from the graph are
///   unreachable, so they make every ordering infeasible.
pub fn optimal_route<S: AsRef<str>>(graph: &RackGraph, required_stops: &[S]) -> RoutingResult<Route> {
    let names: Vec<&str> = required_stops.iter().map(AsRef::as_ref).collect();
    match names.as_slice() {
        [] => return Err(RoutingError::NothingToRoute),
        [only] => return Ok(Route::stay(only)),
        _ => {}
    }

    let stops: Vec<Option<NodeId>> = names.iter().map(|n| graph.node_id(n)).collect();

    // ── One SSSP per distinct stop ────────────────────────────────────────
    let mut trees: Vec<ShortestPathTree> = Vec::new();
    let mut tree_of: FxHashMap<NodeId, usize> = FxHashMap::default();
    for node in stops.iter().flatten() {
        tree_of.entry(*node).or_insert_with(|| {
            trees.push(shortest_paths_from(graph, *node));
            trees.len() - 1
        });
    }

    let k = stops.len();
    let leg = LegTable::new(&stops, &trees, &tree_of);

    // ── Exact search over orderings of stops[1..] ─────────────────────────
    let mut order: Vec<usize> = (0..k).collect();
    let mut best: Option<(Distance, Vec<usize>)> = None;
    let mut scored = 0usize;

    loop {
        scored += 1;
        if let Some(total) = leg.ordering_cost(&order) {
            if best.as_ref().is_none_or(|(d, _)| total < *d) {
                best = Some((total, order.clone()));
            }
        }
        if !next_permutation(&mut order[1..]) {
            break;
        }
    }

    let Some((total, best_order)) = best else {
        debug!(stops = k, orderings = scored, "no feasible stop ordering");
        return Err(RoutingError::NoFeasibleRoute {
            stops: names.iter().map(|s| (*s).to_owned()).collect(),
        });
    };

    // ── Stitch legs into one walked path ──────────────────────────────────
    let mut path: Vec<NodeId> = Vec::new();
    for pair in best_order.windows(2) {
        // Both endpoints resolved: the ordering was feasible.
        let (Some(from), Some(to)) = (stops[pair[0]], stops[pair[1]]) else {
            return Err(RoutingError::NoFeasibleRoute {
                stops: names.iter().map(|s| (*s).to_owned()).collect(),
            });
        };
        let hop = reconstruct(&trees[tree_of[&from]].predecessors, from, to);
        if path.is_empty() {
            path.extend(hop);
        } else {
            path.extend(hop.into_iter().skip(1));
        }
    }

    debug!(stops = k, orderings = scored, total = total.value(), "planned route");

    Ok(Route {
        path:  path.into_iter().map(|n| graph.name(n).to_owned()).collect(),
        stops: best_order.iter().map(|&i| names[i].to_owned()).collect(),
        total,
    })
}

// ── Leg costs ─────────────────────────────────────────────────────────────────

/// Dense `k × k` table of stop-to-stop distances, by input position.
struct LegTable {
    k:    usize,
    cost: Vec<Distance>,
}

impl LegTable {
    fn new(
        stops: &[Option<NodeId>],
        trees: &[ShortestPathTree],
        tree_of: &FxHashMap<NodeId, usize>,
    ) -> Self {
        let k = stops.len();
        let mut cost = vec![Distance::INFINITE; k * k];
        for (i, from) in stops.iter().enumerate() {
            let Some(from) = from else { continue };
            let tree = &trees[tree_of[from]];
            for (j, to) in stops.iter().enumerate() {
                if let Some(to) = to {
                    cost[i * k + j] = tree.distance(*to);
                }
            }
        }
        Self { k, cost }
    }

    #[inline]
    fn get(&self, from: usize, to: usize) -> Distance {
        self.cost[from * self.k + to]
    }

    /// Total over consecutive stops, or `None` if any leg is unreachable.
    fn ordering_cost(&self, order: &[usize]) -> Option<Distance> {
        let mut total = Distance::ZERO;
        for pair in order.windows(2) {
            let d = self.get(pair[0], pair[1]);
            if d.is_infinite() {
                return None;
            }
            total = total + d;
        }
        Some(total)
    }
}

/// Advance `v` to its next lexicographic permutation.  Returns `false` (and
/// leaves `v` sorted ascending) after the last one.
pub(crate) fn next_permutation(v: &mut [usize]) -> bool {
    if v.len() < 2 {
        return false;
    }
    let mut i = v.len() - 1;
    while i > 0 && v[i - 1] >= v[i] {
        i -= 1;
    }
    if i == 0 {
        v.reverse();
        return false;
    }
    let mut j = v.len() - 1;
    while v[j] <= v[i - 1] {
        j -= 1;
    }
    v.swap(i - 1, j);
    v[i..].reverse();
    true
}

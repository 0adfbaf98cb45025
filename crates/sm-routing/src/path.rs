//! Turning predecessor links back into node sequences.

use sm_core::NodeId;

use crate::graph::RackGraph;
use crate::sssp::ShortestPathTree;

/// Walk predecessor links back from `target` to `origin`.
///
/// Returns the node sequence `origin ..= target`, `[origin]` when the two are
/// equal, and an **empty** `Vec` when the chain breaks before reaching
/// `origin` (target unreachable under this table).  Empty means "no path",
/// never "trivial path".
pub fn reconstruct(predecessors: &[NodeId], origin: NodeId, target: NodeId) -> Vec<NodeId> {
    let mut path = vec![target];
    let mut cur = target;

    while cur != origin {
        let prev = predecessors
            .get(cur.index())
            .copied()
            .filter(|p| p.is_valid());
        match prev {
            Some(p) => cur = p,
            None => return Vec::new(),
        }
        path.push(cur);
        // A predecessor table from Dijkstra is a tree; anything longer than
        // the table is a cycle from a foreign table.
        if path.len() > predecessors.len() + 1 {
            return Vec::new();
        }
    }

    path.reverse();
    path
}

/// Name-level wrapper over [`reconstruct`] using a computed tree.
///
/// Unknown names yield an empty path, except that `origin == target` is
/// always the single-element path.
pub fn reconstruct_names(
    graph: &RackGraph,
    tree: &ShortestPathTree,
    origin: &str,
    target: &str,
) -> Vec<String> {
    if origin == target {
        return vec![origin.to_owned()];
    }
    let (Some(o), Some(t)) = (graph.node_id(origin), graph.node_id(target)) else {
        return Vec::new();
    };
    reconstruct(&tree.predecessors, o, t)
        .into_iter()
        .map(|id| graph.name(id).to_owned())
        .collect()
}

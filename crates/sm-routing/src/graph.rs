//! Rack graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Rack names are interned into dense `NodeId`s at build time; the name index
//! is only consulted at the API boundary, never inside Dijkstra's inner loop.
//!
//! # Distance entries
//!
//! Layout files describe the graph as `"<source>-><destination>"` keys mapped
//! to a number or the `∞` marker.  [`build_graph`] turns such entries into a
//! graph: both endpoints always become nodes, only finite weights become
//! edges, and no reverse edge is synthesized.

use std::borrow::Borrow;

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use sm_core::{Distance, EdgeId, NodeId, RawDistance};

/// Separator between source and destination in a distance-map key.
pub const EDGE_SEPARATOR: &str = "->";

// ── RackGraph ─────────────────────────────────────────────────────────────────

/// Directed, weighted rack graph in CSR format.
///
/// Edge arrays are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`RackGraphBuilder`] or [`build_graph`].
#[derive(Debug, Clone)]
pub struct RackGraph {
    /// Name of each node.  Indexed by `NodeId`.
    pub node_names: Vec<String>,

    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Source node of each edge.  Redundant with CSR; kept so an `EdgeId`
    /// alone is enough to describe a connection.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Walking distance of each edge.  Always finite.
    pub edge_weight: Vec<Distance>,

    index: FxHashMap<String, NodeId>,
}

impl RackGraph {
    /// A graph with no nodes.  Every lookup against it misses.
    pub fn empty() -> Self {
        RackGraphBuilder::new().build()
    }

    pub fn node_count(&self) -> usize {
        self.node_names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_names.is_empty()
    }

    /// Look up a node by rack name.
    #[inline]
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Rack name of `node`.
    ///
    /// # Panics
    ///
    /// If `node` does not belong to this graph.
    #[inline]
    pub fn name(&self, node: NodeId) -> &str {
        &self.node_names[node.index()]
    }

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Cheapest direct edge `from → to`, if any.
    pub fn edge_weight_between(&self, from: NodeId, to: NodeId) -> Option<Distance> {
        self.out_edges(from)
            .filter(|e| self.edge_to[e.index()] == to)
            .map(|e| self.edge_weight[e.index()])
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Every edge as `(source name, destination name, weight)`, grouped by
    /// source node.
    pub fn connections(&self) -> impl Iterator<Item = (&str, &str, Distance)> + '_ {
        (0..self.edge_count()).map(move |i| {
            (
                self.name(self.edge_from[i]),
                self.name(self.edge_to[i]),
                self.edge_weight[i],
            )
        })
    }
}

// ── RackGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`RackGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use sm_core::Distance;
/// use sm_routing::RackGraphBuilder;
///
/// let mut b = RackGraphBuilder::new();
/// b.add_aisle("R1", "R2", Distance::new(4.0));
/// b.add_node("Cashier");
/// let g = b.build();
/// assert_eq!(g.node_count(), 3);
/// assert_eq!(g.edge_count(), 2); // both directions
/// ```
pub struct RackGraphBuilder {
    names:     Vec<String>,
    index:     FxHashMap<String, NodeId>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:   NodeId,
    to:     NodeId,
    weight: Distance,
}

impl RackGraphBuilder {
    pub fn new() -> Self {
        Self {
            names:     Vec::new(),
            index:     FxHashMap::default(),
            raw_edges: Vec::new(),
        }
    }

    /// Add a node by name, or return the existing one.
    pub fn add_node(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = NodeId(self.names.len() as u32);
        self.names.push(name.to_owned());
        self.index.insert(name.to_owned(), id);
        id
    }

    /// Make every name addressable, even with no edges.
    pub fn ensure_nodes<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.add_node(name.as_ref());
        }
    }

    /// Add a **directed** edge.  Both endpoints become nodes; the edge itself
    /// is only recorded when `weight` is finite.  Returns whether an edge was
    /// added.
    pub fn add_directed_edge(&mut self, from: &str, to: &str, weight: Distance) -> bool {
        let from = self.add_node(from);
        let to = self.add_node(to);
        if weight.is_infinite() {
            return false;
        }
        self.raw_edges.push(RawEdge { from, to, weight });
        true
    }

    /// Convenience: an aisle walkable in **both directions**.
    pub fn add_aisle(&mut self, a: &str, b: &str, weight: Distance) {
        self.add_directed_edge(a, b, weight);
        self.add_directed_edge(b, a, weight);
    }

    /// Apply one `"src->dst"` distance-map entry.
    ///
    /// Returns `false` when the entry is malformed (no separator, an empty
    /// endpoint, or an unparseable weight) and was skipped entirely.
    pub fn add_entry(&mut self, key: &str, value: &RawDistance) -> bool {
        let Some((from, to)) = parse_edge_key(key) else {
            return false;
        };
        let Some(weight) = value.resolve() else {
            return false;
        };
        self.add_directed_edge(from, to, weight);
        true
    }

    pub fn node_count(&self) -> usize { self.names.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RackGraph`].
    ///
    /// The sort is stable, so each node's out-edges keep insertion order and
    /// identical input always yields an identical graph.
    pub fn build(self) -> RackGraph {
        let node_count = self.names.len();
        let edge_count = self.raw_edges.len();

        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:   Vec<NodeId>   = raw.iter().map(|e| e.from).collect();
        let edge_to:     Vec<NodeId>   = raw.iter().map(|e| e.to).collect();
        let edge_weight: Vec<Distance> = raw.iter().map(|e| e.weight).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        RackGraph {
            node_names: self.names,
            node_out_start,
            edge_from,
            edge_to,
            edge_weight,
            index: self.index,
        }
    }
}

impl Default for RackGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ── Distance-map entry points ─────────────────────────────────────────────────

/// Split `"src->dst"` into trimmed, non-empty endpoint names.
pub fn parse_edge_key(key: &str) -> Option<(&str, &str)> {
    let (from, to) = key.split_once(EDGE_SEPARATOR)?;
    let (from, to) = (from.trim(), to.trim());
    if from.is_empty() || to.is_empty() {
        return None;
    }
    Some((from, to))
}

/// Build a rack graph from distance-map entries.
///
/// Malformed entries are skipped with a warning, never fatal.
pub fn build_graph<I, K, V>(entries: I) -> RackGraph
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Borrow<RawDistance>,
{
    build_graph_with_nodes(entries, std::iter::empty::<&str>())
}

/// Like [`build_graph`], but also guarantees every name in `nodes` exists
/// (racks with no recorded distances are still addressable).
pub fn build_graph_with_nodes<I, K, V, N, S>(entries: I, nodes: N) -> RackGraph
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Borrow<RawDistance>,
    N: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut b = RackGraphBuilder::new();
    b.ensure_nodes(nodes);

    let mut skipped = 0usize;
    for (key, value) in entries {
        let (key, value) = (key.as_ref(), value.borrow());
        if !b.add_entry(key, value) {
            warn!(key, value = %value, "skipping malformed distance entry");
            skipped += 1;
        }
    }

    let graph = b.build();
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        skipped,
        "built rack graph"
    );
    graph
}

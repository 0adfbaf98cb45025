//! `sm-routing`: rack graph, shortest paths, and shopping-route planning.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`graph`]   | `RackGraph` (CSR), `RackGraphBuilder`, `build_graph`        |
//! | [`sssp`]    | `shortest_paths`, `ShortestPathTree`                        |
//! | [`path`]    | `reconstruct`, `reconstruct_names`                          |
//! | [`planner`] | `optimal_route` (fixed first stop, exact ordering search)   |
//! | [`router`]  | `Router` trait, `Route`, `DijkstraRouter`                   |
//! | [`error`]   | `RoutingError`, `RoutingResult<T>`                          |
//!
//! # Request model
//!
//! Nothing here keeps state between calls.  A planning request builds a
//! fresh graph from the caller's distance map, runs one SSSP per required
//! stop, scores every ordering of the stops after the first, and stitches the
//! winning ordering's legs into one walked path.

pub mod error;
pub mod graph;
pub mod path;
pub mod planner;
pub mod router;
pub mod sssp;


pub use error::{RoutingError, RoutingResult};
pub use graph::{build_graph, build_graph_with_nodes, parse_edge_key, RackGraph, RackGraphBuilder, EDGE_SEPARATOR};
pub use path::{reconstruct, reconstruct_names};
pub use planner::optimal_route;
pub use router::{DijkstraRouter, Route, Router};
pub use sssp::{shortest_paths, shortest_paths_from, ShortestPathTree};

//! Routing error type.
//!
//! Bad topology is never a panic: every variant here is a value the caller
//! is expected to match on.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
    #[error("nothing to route: the stop list is empty")]
    NothingToRoute,

    #[error("no feasible route visits all of {stops:?}")]
    NoFeasibleRoute { stops: Vec<String> },

    #[error("no route from {from} to {to}")]
    NoRoute { from: String, to: String },

    #[error("rack {0:?} not found in layout")]
    UnknownRack(String),
}

pub type RoutingResult<T> = Result<T, RoutingError>;

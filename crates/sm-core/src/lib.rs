//! `sm-core`: foundational types for the supermarket rack-routing toolkit.
//!
//! This crate is a dependency of every other `sm-*` crate.  It has no `sm-*`
//! dependencies and only `thiserror`, `serde` and `toml` externally.
//!
//! # What lives here
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`ids`]        | `NodeId`, `EdgeId`                                     |
//! | [`distance`]   | `Distance` (with the `∞` no-path sentinel), `RawDistance` |
//! | [`config`]     | `ShopConfig`                                           |
//! | [`error`]      | `SmError`, `SmResult`                                  |

pub mod config;
pub mod distance;
pub mod error;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::ShopConfig;
pub use distance::{Distance, RawDistance, NO_PATH_MARKER};
pub use error::{SmError, SmResult};
pub use ids::{EdgeId, NodeId};

//! `sm-layout`: the store layout document and its loaders.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`layout`]  | `StoreLayout`, `DistanceMap`, `StopLookup`, rack-id helpers |
//! | [`loader`]  | JSON load/save, CSV distance loading                        |
//! | [`error`]   | `LayoutError`, `LayoutResult<T>`                            |
//!
//! # Document shape
//!
//! ```json
//! {
//!   "rack_ids":  ["R1", "R2", "R3"],
//!   "distances": { "R1->R2": 4, "R2->R1": 4, "R1->R3": "∞" },
//!   "products":  { "R1": "milk", "R2": "bread", "R3": "unassigned" }
//! }
//! ```
//!
//! An `"inventory"` section written by `sm-store` may sit alongside; this
//! crate carries it through untouched.

pub mod error;
pub mod layout;
pub mod loader;

#[cfg(test)]
mod tests;

pub use error::{LayoutError, LayoutResult};
pub use layout::{generate_rack_ids, parse_connection_distance, parse_layout_size, DistanceMap, StopLookup, StoreLayout, UNASSIGNED};
pub use loader::{load_distances_csv, load_distances_reader, load_layout_json, load_layout_reader, save_layout_json};

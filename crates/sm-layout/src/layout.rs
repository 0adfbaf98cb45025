//! The store layout: racks, the distances between them, and what each holds.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use sm_core::{Distance, RawDistance};
use sm_routing::{
    build_graph_with_nodes, optimal_route, parse_edge_key, RackGraph, Route, RoutingError,
    RoutingResult, EDGE_SEPARATOR,
};

use crate::{LayoutError, LayoutResult};

/// Product label of a rack with nothing on it.
pub const UNASSIGNED: &str = "unassigned";

// ── DistanceMap ───────────────────────────────────────────────────────────────

/// `"src->dst"` → distance, exactly as stored in the layout file.
///
/// Values stay unparsed ([`RawDistance`]) so a hand-edited file with a bad
/// value still loads; the bad entry is skipped when the graph is built.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistanceMap(BTreeMap<String, RawDistance>);

impl DistanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(from: &str, to: &str) -> String {
        format!("{from}{EDGE_SEPARATOR}{to}")
    }

    /// Record the directed distance `from → to`.  `Distance::INFINITE` is
    /// stored as the `∞` marker.
    pub fn insert(&mut self, from: &str, to: &str, distance: Distance) {
        self.0.insert(Self::key(from, to), RawDistance::from(distance));
    }

    /// Record the same distance in both directions.
    pub fn insert_symmetric(&mut self, a: &str, b: &str, distance: Distance) {
        self.insert(a, b, distance);
        self.insert(b, a, distance);
    }

    /// Parsed distance `from → to`; `None` if absent or malformed.
    pub fn get(&self, from: &str, to: &str) -> Option<Distance> {
        self.0.get(&Self::key(from, to)).and_then(RawDistance::resolve)
    }

    pub fn insert_raw(&mut self, key: impl Into<String>, value: RawDistance) {
        self.0.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RawDistance)> + '_ {
        self.0.iter()
    }

    /// Merge `other` into `self`; entries in `other` win.
    pub fn extend(&mut self, other: DistanceMap) {
        self.0.extend(other.0);
    }
}

impl<'a> IntoIterator for &'a DistanceMap {
    type Item = (&'a String, &'a RawDistance);
    type IntoIter = std::collections::btree_map::Iter<'a, String, RawDistance>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ── StoreLayout ───────────────────────────────────────────────────────────────

/// The whole layout document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreLayout {
    #[serde(default)]
    pub rack_ids: Vec<String>,

    #[serde(default)]
    pub distances: DistanceMap,

    /// Rack → product name.  Blank or [`UNASSIGNED`] means empty.
    #[serde(default)]
    pub products: BTreeMap<String, String>,

    /// Inventory section owned by `sm-store`; carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<serde_json::Value>,
}

/// Result of mapping a shopping list onto racks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StopLookup {
    /// One rack per found product, in shopping-list order.
    pub stops: Vec<String>,
    /// Products no rack holds.
    pub missing: Vec<String>,
}

impl StoreLayout {
    /// A `rows × cols` layout with generated rack ids, nothing assigned and
    /// no distances yet.
    pub fn grid(rows: u32, cols: u32) -> Self {
        let rack_ids = generate_rack_ids(rows, cols);
        let products = rack_ids
            .iter()
            .map(|r| (r.clone(), UNASSIGNED.to_owned()))
            .collect();
        Self { rack_ids, products, ..Self::default() }
    }

    pub fn assign_product(&mut self, rack: &str, product: &str) {
        let product = product.trim();
        let label = if product.is_empty() { UNASSIGNED } else { product };
        self.products.insert(rack.to_owned(), label.to_owned());
    }

    /// Product on `rack`, if any.
    pub fn product_at(&self, rack: &str) -> Option<&str> {
        self.products
            .get(rack)
            .map(|p| p.trim())
            .filter(|p| !p.is_empty() && !p.eq_ignore_ascii_case(UNASSIGNED))
    }

    /// Rack ids first, then any product-map racks the id list lacks.
    pub fn racks_in_order(&self) -> Vec<&str> {
        let mut racks: Vec<&str> = self.rack_ids.iter().map(String::as_str).collect();
        for rack in self.products.keys() {
            if !self.rack_ids.contains(rack) {
                racks.push(rack);
            }
        }
        racks
    }

    /// Rebuild the rack graph from the current distances.  Every listed rack
    /// is a node, even with no recorded distances.
    pub fn graph(&self) -> RackGraph {
        build_graph_with_nodes(&self.distances, &self.rack_ids)
    }

    /// First rack (in [`racks_in_order`](Self::racks_in_order)) holding
    /// `product`, compared trimmed and case-insensitively.
    pub fn rack_for(&self, product: &str) -> Option<&str> {
        let wanted = product.trim();
        if wanted.is_empty() {
            return None;
        }
        self.racks_in_order()
            .into_iter()
            .find(|rack| {
                self.product_at(rack)
                    .is_some_and(|p| p.eq_ignore_ascii_case(wanted))
            })
    }

    /// Map a shopping list onto the racks the route must visit.
    pub fn stops_for<S: AsRef<str>>(&self, shopping_list: &[S]) -> StopLookup {
        let mut lookup = StopLookup::default();
        for item in shopping_list {
            let item = item.as_ref();
            match self.rack_for(item) {
                Some(rack) => lookup.stops.push(rack.to_owned()),
                None => lookup.missing.push(item.trim().to_owned()),
            }
        }
        lookup
    }

    /// Shortest walk through the racks a lookup found, starting from `from`
    /// when given.  A lookup that found nothing is
    /// [`RoutingError::NothingToRoute`] even if a start rack is known.
    pub fn plan_route(&self, lookup: &StopLookup, from: Option<&str>) -> RoutingResult<Route> {
        if lookup.stops.is_empty() {
            return Err(RoutingError::NothingToRoute);
        }
        let stops: Vec<&str> = from
            .into_iter()
            .chain(lookup.stops.iter().map(String::as_str))
            .collect();
        optimal_route(&self.graph(), &stops)
    }
}

impl fmt::Display for StoreLayout {
    /// Rack connections followed by product assignments.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rack connections:")?;
        for (key, value) in &self.distances {
            let Some((from, to)) = parse_edge_key(key) else { continue };
            match value.resolve() {
                Some(d) if d.is_finite() => writeln!(f, "  {from} -> {to} : {d}")?,
                _ => {}
            }
        }
        writeln!(f, "Product assignments:")?;
        for rack in self.racks_in_order() {
            let product = self.products.get(rack).map(String::as_str).unwrap_or(UNASSIGNED);
            writeln!(f, "  {rack} : {product}")?;
        }
        Ok(())
    }
}

// ── Rack-id helpers ───────────────────────────────────────────────────────────

/// `R1 ..= R{rows*cols}`, row-major.
pub fn generate_rack_ids(rows: u32, cols: u32) -> Vec<String> {
    (1..=rows as u64 * cols as u64).map(|i| format!("R{i}")).collect()
}

/// Parse a distance typed between two racks.  Blank or `0` means no path.
pub fn parse_connection_distance(text: &str) -> LayoutResult<Distance> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Distance::INFINITE);
    }
    match Distance::parse(text) {
        Some(d) if d == Distance::ZERO => Ok(Distance::INFINITE),
        Some(d) => Ok(d),
        None => Err(LayoutError::Parse(format!(
            "invalid distance {text:?}: enter a number, or 0 for no path"
        ))),
    }
}

/// Parse a `"3x3"`-style layout size into `(rows, cols)`.
pub fn parse_layout_size(text: &str) -> LayoutResult<(u32, u32)> {
    let text = text.trim().to_ascii_lowercase();
    let (rows, cols) = text
        .split_once('x')
        .ok_or_else(|| LayoutError::Parse(format!("layout size {text:?} is missing 'x' (e.g. 3x3)")))?;

    let parse = |s: &str| {
        s.trim()
            .parse::<u32>()
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| LayoutError::Parse(format!("invalid layout dimension {s:?}")))
    };
    Ok((parse(rows)?, parse(cols)?))
}

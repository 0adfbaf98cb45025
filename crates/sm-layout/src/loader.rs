//! Layout file I/O.
//!
//! # JSON
//!
//! The layout document (see the crate docs) is read and written whole.
//! Saving over an existing file keeps that file's `"inventory"` section when
//! the layout being saved has none, so re-initialising the racks does not
//! wipe stock.
//!
//! # CSV distances
//!
//! Distances can also come from a spreadsheet export, one directed pair per
//! row:
//!
//! ```csv
//! source,destination,distance
//! R1,R2,4
//! R2,R1,4
//! R1,R3,∞
//! ```
//!
//! The `distance` column accepts anything [`Distance::parse`] does.
//! Unparseable values are kept raw and skipped at graph-build time.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use sm_core::{Distance, RawDistance};
use sm_routing::EDGE_SEPARATOR;

use crate::layout::{DistanceMap, StoreLayout};
use crate::{LayoutError, LayoutResult};

// ── JSON ──────────────────────────────────────────────────────────────────────

/// Load a layout document from a JSON file.
pub fn load_layout_json(path: &Path) -> LayoutResult<StoreLayout> {
    let file = std::fs::File::open(path)?;
    let layout = load_layout_reader(file)?;
    info!(
        path = %path.display(),
        racks = layout.rack_ids.len(),
        distances = layout.distances.len(),
        "loaded layout"
    );
    Ok(layout)
}

/// Like [`load_layout_json`] but accepts any `Read` source.
pub fn load_layout_reader<R: Read>(reader: R) -> LayoutResult<StoreLayout> {
    Ok(serde_json::from_reader(reader)?)
}

/// Write `layout` to `path` as pretty-printed JSON.
pub fn save_layout_json(layout: &StoreLayout, path: &Path) -> LayoutResult<()> {
    let mut doc = layout.clone();
    if doc.inventory.is_none() && path.exists() {
        // A broken existing file is about to be overwritten anyway.
        if let Ok(existing) = load_layout_json(path) {
            doc.inventory = existing.inventory;
        }
    }

    let text = serde_json::to_string_pretty(&doc)?;
    std::fs::write(path, text)?;
    debug!(path = %path.display(), "saved layout");
    Ok(())
}

// ── CSV distances ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct DistanceRecord {
    source:      String,
    destination: String,
    distance:    String,
}

/// Load a [`DistanceMap`] from a CSV file.
pub fn load_distances_csv(path: &Path) -> LayoutResult<DistanceMap> {
    let file = std::fs::File::open(path)?;
    load_distances_reader(file)
}

/// Like [`load_distances_csv`] but accepts any `Read` source.
pub fn load_distances_reader<R: Read>(reader: R) -> LayoutResult<DistanceMap> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut map = DistanceMap::new();

    for result in csv_reader.deserialize::<DistanceRecord>() {
        let row = result.map_err(|e| LayoutError::Parse(e.to_string()))?;
        let value = match Distance::parse(&row.distance) {
            Some(d) => RawDistance::from(d),
            None => RawDistance::Text(row.distance),
        };
        map.insert_raw(format!("{}{EDGE_SEPARATOR}{}", row.source, row.destination), value);
    }

    debug!(entries = map.len(), "loaded CSV distances");
    Ok(map)
}

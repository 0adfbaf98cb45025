//! Product inventory keyed by `(name, brand)`, listed cheapest first.
//!
//! Names are stored lower-cased; brands keep their original spelling but
//! match case-insensitively.
//!
//! # JSON records
//!
//! Each product is a positional record `[price, name, brand, stock]`.
//! Three-element records mean stock 0; any other shape is skipped.  The
//! records live either at the top level of a file or under an
//! `"inventory"` key next to a layout document.  A layout with no inventory
//! yet seeds one entry per assigned rack product (price 0, brand
//! `"default"`, stock 0).

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{StoreError, StoreResult};

/// Brand given to products seeded from a layout's rack assignments.
const SEED_BRAND: &str = "default";

/// Product label of an empty rack in a layout's `"products"` map.
const UNASSIGNED: &str = "unassigned";

// ── StockItem ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct StockItem {
    /// Lower-cased product name.
    pub name:  String,
    pub brand: String,
    pub price: f64,
    pub stock: u32,
}

impl StockItem {
    fn by_price(a: &&StockItem, b: &&StockItem) -> Ordering {
        a.price
            .total_cmp(&b.price)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.brand.cmp(&b.brand))
    }
}

/// Lookup key: lower-cased name and brand.
pub(crate) type ProductKey = (String, String);

pub(crate) fn key(name: &str, brand: &str) -> ProductKey {
    (name.trim().to_lowercase(), brand.trim().to_lowercase())
}

// ── Inventory ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inventory {
    items: BTreeMap<ProductKey, StockItem>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert or replace a product.
    pub fn add_product(&mut self, name: &str, brand: &str, price: f64, stock: u32) {
        let item = StockItem {
            name:  name.trim().to_lowercase(),
            brand: brand.trim().to_owned(),
            price,
            stock,
        };
        self.items.insert(key(name, brand), item);
    }

    /// Change price and/or stock.  Returns `false` if the product is unknown.
    pub fn update_product(
        &mut self,
        name: &str,
        brand: &str,
        price: Option<f64>,
        stock: Option<u32>,
    ) -> bool {
        let Some(item) = self.items.get_mut(&key(name, brand)) else {
            return false;
        };
        if let Some(p) = price {
            item.price = p;
        }
        if let Some(s) = stock {
            item.stock = s;
        }
        true
    }

    pub fn delete_product(&mut self, name: &str, brand: &str) -> Option<StockItem> {
        self.items.remove(&key(name, brand))
    }

    pub fn get(&self, name: &str, brand: &str) -> Option<&StockItem> {
        self.items.get(&key(name, brand))
    }

    pub fn price_of(&self, name: &str, brand: &str) -> Option<f64> {
        self.get(name, brand).map(|i| i.price)
    }

    /// Add `delta` to a product's stock.  Returns `false`, changing nothing,
    /// if the product is unknown or the stock would go negative.
    pub fn adjust_stock(&mut self, name: &str, brand: &str, delta: i64) -> bool {
        let Some(item) = self.items.get_mut(&key(name, brand)) else {
            return false;
        };
        match u32::try_from(item.stock as i64 + delta) {
            Ok(stock) => {
                item.stock = stock;
                true
            }
            Err(_) => false,
        }
    }

    /// Every product, cheapest first.
    pub fn cheapest_first(&self) -> Vec<&StockItem> {
        let mut all: Vec<&StockItem> = self.items.values().collect();
        all.sort_by(StockItem::by_price);
        all
    }

    /// Products whose name or brand contains `keyword` (case-insensitive),
    /// cheapest first.
    pub fn search(&self, keyword: &str) -> Vec<&StockItem> {
        let keyword = keyword.trim().to_lowercase();
        let mut hits: Vec<&StockItem> = self
            .items
            .values()
            .filter(|i| i.name.contains(&keyword) || i.brand.to_lowercase().contains(&keyword))
            .collect();
        hits.sort_by(StockItem::by_price);
        hits
    }

    /// Product name → its brands, cheapest first.
    pub fn grouped(&self) -> BTreeMap<&str, Vec<&StockItem>> {
        let mut groups: BTreeMap<&str, Vec<&StockItem>> = BTreeMap::new();
        for item in self.items.values() {
            groups.entry(item.name.as_str()).or_default().push(item);
        }
        for brands in groups.values_mut() {
            brands.sort_by(StockItem::by_price);
        }
        groups
    }

    // ── JSON ──────────────────────────────────────────────────────────────

    /// Build from any of the accepted JSON shapes (see the module docs).
    pub fn from_json_value(value: &Value) -> Self {
        let mut inv = Inventory::new();
        match value {
            Value::Array(records) => inv.extend_records(records),
            Value::Object(obj) => {
                if let Some(Value::Array(records)) = obj.get("inventory") {
                    inv.extend_records(records);
                } else if let Some(Value::Object(products)) = obj.get("products") {
                    for product in products.values().filter_map(Value::as_str) {
                        let product = product.trim();
                        if product.is_empty() || product.eq_ignore_ascii_case(UNASSIGNED) {
                            continue;
                        }
                        inv.add_product(product, SEED_BRAND, 0.0, 0);
                    }
                }
            }
            _ => {}
        }
        inv
    }

    fn extend_records(&mut self, records: &[Value]) {
        for record in records {
            match Record::deserialize(record) {
                Ok(Record::Full(price, name, brand, stock)) => {
                    self.add_product(&name, &brand, price, stock)
                }
                Ok(Record::NoStock(price, name, brand)) => self.add_product(&name, &brand, price, 0),
                Err(_) => warn!(%record, "skipping malformed inventory record"),
            }
        }
    }

    /// Positional records, cheapest first.
    pub fn to_json_value(&self) -> Value {
        Value::Array(
            self.cheapest_first()
                .into_iter()
                .map(|i| serde_json::json!([i.price, i.name, i.brand, i.stock]))
                .collect(),
        )
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Record {
    Full(f64, String, String, u32),
    NoStock(f64, String, String),
}

// ── Files ─────────────────────────────────────────────────────────────────────

/// Load an inventory.  A missing file is an empty inventory.
pub fn load_inventory_json(path: &Path) -> StoreResult<Inventory> {
    if !path.exists() {
        debug!(path = %path.display(), "no inventory file; starting empty");
        return Ok(Inventory::new());
    }
    let text = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;
    Ok(Inventory::from_json_value(&value))
}

/// Write the inventory under an `"inventory"` key, keeping every other key
/// already present in the file.
pub fn save_inventory_json(inventory: &Inventory, path: &Path) -> StoreResult<()> {
    let mut doc = match std::fs::read_to_string(path) {
        Ok(text) => match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(obj)) => obj,
            _ => Map::new(),
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
        Err(e) => return Err(StoreError::Io(e)),
    };
    doc.insert("inventory".to_owned(), inventory.to_json_value());
    std::fs::write(path, serde_json::to_string_pretty(&Value::Object(doc))?)?;
    Ok(())
}

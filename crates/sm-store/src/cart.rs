//! Shopping cart backed by an [`Inventory`].
//!
//! Adding to the cart takes the units out of stock immediately; removing or
//! shrinking a line puts them back.  Prices are not captured in the cart and
//! are looked up from the inventory when the bill is drawn up.
//!
//! Lines are keyed like the inventory: lower-cased name and brand.  The
//! inventory's display spelling appears only on the [`Bill`].

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::inventory::{key, Inventory, ProductKey};
use crate::{StoreError, StoreResult};

// ── Bill ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct BillLine {
    pub name:     String,
    pub brand:    String,
    pub qty:      u32,
    pub price:    f64,
    pub subtotal: f64,
}

/// Priced cart contents, lines ordered by subtotal (lowest first).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bill {
    pub lines: Vec<BillLine>,
    pub total: f64,
}

impl Bill {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// ── Cart ──────────────────────────────────────────────────────────────────────

/// Normalized `(name, brand)` → quantity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cart {
    items: BTreeMap<ProductKey, u32>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn quantity(&self, name: &str, brand: &str) -> u32 {
        self.items.get(&key(name, brand)).copied().unwrap_or(0)
    }

    /// `(name, brand, qty)` for every line, lower-cased.
    pub fn lines(&self) -> impl Iterator<Item = (&str, &str, u32)> + '_ {
        self.items
            .iter()
            .map(|((n, b), &q)| (n.as_str(), b.as_str(), q))
    }

    /// Move `qty` units from stock into the cart.
    pub fn add_item(
        &mut self,
        inventory: &mut Inventory,
        name: &str,
        brand: &str,
        qty: u32,
    ) -> StoreResult<()> {
        if qty == 0 {
            return Err(StoreError::InvalidQuantity);
        }
        if inventory.get(name, brand).is_none() {
            return Err(StoreError::UnknownProduct { name: name.to_owned(), brand: brand.to_owned() });
        }
        let line = key(name, brand);
        take_stock(inventory, &line, qty)?;
        *self.items.entry(line.clone()).or_insert(0) += qty;
        debug!(name = %line.0, brand = %line.1, qty, "added to cart");
        Ok(())
    }

    /// Drop a line and return its units to stock.  Returns the quantity
    /// removed.  A line whose product has since been deleted is dropped
    /// without returning anything.
    pub fn remove_item(&mut self, inventory: &mut Inventory, name: &str, brand: &str) -> StoreResult<u32> {
        let line = self.cart_key(name, brand)?;
        let qty = self.items[&line];
        return_stock(inventory, &line, qty)?;
        self.items.remove(&line);
        debug!(name = %line.0, brand = %line.1, qty, "removed from cart");
        Ok(qty)
    }

    /// Set a line's quantity, moving the difference to or from stock.  Zero
    /// removes the line.
    pub fn modify_item(
        &mut self,
        inventory: &mut Inventory,
        name: &str,
        brand: &str,
        new_qty: u32,
    ) -> StoreResult<()> {
        if new_qty == 0 {
            return self.remove_item(inventory, name, brand).map(|_| ());
        }
        let line = self.cart_key(name, brand)?;
        let current = self.items[&line];
        if new_qty > current {
            take_stock(inventory, &line, new_qty - current)?;
        } else {
            return_stock(inventory, &line, current - new_qty)?;
        }
        self.items.insert(line, new_qty);
        Ok(())
    }

    /// Price the cart against current inventory prices.  Lines whose product
    /// has since been deleted are left off.
    pub fn bill(&self, inventory: &Inventory) -> Bill {
        let mut lines: Vec<BillLine> = self
            .items
            .iter()
            .filter_map(|((name, brand), &qty)| {
                let item = inventory.get(name, brand)?;
                Some(BillLine {
                    name: item.name.clone(),
                    brand: item.brand.clone(),
                    qty,
                    price: item.price,
                    subtotal: item.price * qty as f64,
                })
            })
            .collect();
        lines.sort_by(|a, b| a.subtotal.total_cmp(&b.subtotal));
        let total = lines.iter().map(|l| l.subtotal).sum();
        Bill { lines, total }
    }

    /// Bill the cart and empty it.  Stock was already taken when items were
    /// added, so the inventory is not touched.
    pub fn checkout(&mut self, inventory: &Inventory) -> StoreResult<Bill> {
        if self.items.is_empty() {
            return Err(StoreError::EmptyCart);
        }
        let bill = self.bill(inventory);
        self.items.clear();
        info!(lines = bill.lines.len(), total = bill.total, "checked out");
        Ok(bill)
    }

    fn cart_key(&self, name: &str, brand: &str) -> StoreResult<ProductKey> {
        let line = key(name, brand);
        if self.items.contains_key(&line) {
            Ok(line)
        } else {
            Err(StoreError::NotInCart { name: name.to_owned(), brand: brand.to_owned() })
        }
    }

    // ── JSON ──────────────────────────────────────────────────────────────

    fn from_records(records: Vec<(String, String, u32)>) -> Self {
        let mut cart = Self::new();
        for (n, b, q) in records {
            *cart.items.entry(key(&n, &b)).or_insert(0) += q;
        }
        cart
    }

    fn to_records(&self) -> Vec<(&str, &str, u32)> {
        self.lines().collect()
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn take_stock(inventory: &mut Inventory, line: &ProductKey, qty: u32) -> StoreResult<()> {
    if inventory.adjust_stock(&line.0, &line.1, -(qty as i64)) {
        return Ok(());
    }
    let available = inventory.get(&line.0, &line.1).map(|i| i.stock).unwrap_or(0);
    Err(StoreError::InsufficientStock {
        name: line.0.clone(),
        brand: line.1.clone(),
        requested: qty,
        available,
    })
}

fn return_stock(inventory: &mut Inventory, line: &ProductKey, qty: u32) -> StoreResult<()> {
    if inventory.get(&line.0, &line.1).is_none() {
        warn!(name = %line.0, brand = %line.1, qty, "product no longer stocked; units not returned");
        return Ok(());
    }
    if inventory.adjust_stock(&line.0, &line.1, qty as i64) {
        Ok(())
    } else {
        Err(StoreError::StockOverflow { name: line.0.clone(), brand: line.1.clone(), qty })
    }
}

// ── Files ─────────────────────────────────────────────────────────────────────

/// Load a cart saved as `[[name, brand, qty], ...]`.  A missing file is an
/// empty cart.
pub fn load_cart_json(path: &Path) -> StoreResult<Cart> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Cart::from_records(serde_json::from_str(&text)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Cart::new()),
        Err(e) => Err(StoreError::Io(e)),
    }
}

pub fn save_cart_json(cart: &Cart, path: &Path) -> StoreResult<()> {
    std::fs::write(path, serde_json::to_string(&cart.to_records())?)?;
    Ok(())
}

//! Store-keeper commands: setting up the rack layout and editing products.

use anyhow::{bail, Result};
use clap::Subcommand;
use tracing::warn;

use sm_layout::{parse_connection_distance, parse_layout_size, StoreLayout};

use crate::session::Session;

#[derive(Subcommand)]
pub enum LayoutCommand {
    /// Start a fresh `rows x cols` grid of racks (e.g. 3x3)
    Init { size: String },

    /// Set the walking distance between two racks, both ways (0 = no path)
    Connect { a: String, b: String, distance: String },

    /// Put a product on a rack
    Assign { rack: String, product: String },
}

#[derive(Subcommand)]
pub enum ProductCommand {
    /// Add or replace a product
    Add {
        name:  String,
        brand: String,
        price: f64,
        stock: u32,

        /// Rack the product is shelved on
        #[arg(long)]
        rack: Option<String>,
    },

    /// Change a product's price and/or stock
    Update {
        name:  String,
        brand: String,

        #[arg(long)]
        price: Option<f64>,

        #[arg(long)]
        stock: Option<u32>,
    },

    /// Remove a product from the inventory
    Delete { name: String, brand: String },

    /// Every product, brands cheapest first
    List,
}

// ── Layout ────────────────────────────────────────────────────────────────────

pub fn run_layout(session: &Session, cmd: LayoutCommand) -> Result<()> {
    match cmd {
        LayoutCommand::Init { size } => {
            let (rows, cols) = parse_layout_size(&size)?;
            let layout = StoreLayout::grid(rows, cols);
            if session.config.layout_path.exists() {
                warn!(path = %session.config.layout_path.display(), "replacing existing layout");
            }
            session.save_layout(&layout)?;
            println!("Generated racks: {}", layout.rack_ids.join(", "));
        }
        LayoutCommand::Connect { a, b, distance } => {
            let mut layout = session.stored_layout()?;
            require_rack(&layout, &a)?;
            require_rack(&layout, &b)?;
            let distance = parse_connection_distance(&distance)?;
            layout.distances.insert_symmetric(&a, &b, distance);
            session.save_layout(&layout)?;
            println!("{a} <-> {b} : {distance}");
        }
        LayoutCommand::Assign { rack, product } => {
            let mut layout = session.stored_layout()?;
            require_rack(&layout, &rack)?;
            layout.assign_product(&rack, &product);
            session.save_layout(&layout)?;
            println!("Assigned {product:?} to {rack}.");
        }
    }
    Ok(())
}

fn require_rack(layout: &StoreLayout, rack: &str) -> Result<()> {
    if !layout.rack_ids.iter().any(|r| r == rack) {
        bail!("unknown rack {rack:?}; the layout has {}", layout.rack_ids.join(", "));
    }
    Ok(())
}

// ── Products ──────────────────────────────────────────────────────────────────

pub fn run_product(session: &Session, cmd: ProductCommand) -> Result<()> {
    let mut inventory = session.inventory()?;

    match cmd {
        ProductCommand::Add { name, brand, price, stock, rack } => {
            if let Some(rack) = rack {
                // Written before the inventory: both may live in one file.
                let mut layout = session.stored_layout()?;
                require_rack(&layout, &rack)?;
                layout.assign_product(&rack, &name);
                session.save_layout(&layout)?;
            }
            inventory.add_product(&name, &brand, price, stock);
            println!("Added {brand} {name} at {price:.2} (qty {stock}).");
        }
        ProductCommand::Update { name, brand, price, stock } => {
            if !inventory.update_product(&name, &brand, price, stock) {
                bail!("no product {name:?} from brand {brand:?}");
            }
            println!("Updated {brand} {name}.");
        }
        ProductCommand::Delete { name, brand } => {
            if inventory.delete_product(&name, &brand).is_none() {
                bail!("no product {name:?} from brand {brand:?}");
            }
            println!("Deleted {brand} {name}.");
        }
        ProductCommand::List => {
            if inventory.is_empty() {
                println!("No products.");
            }
            for (name, brands) in inventory.grouped() {
                println!("{name}:");
                for item in brands {
                    println!("  {:<16} {:>8.2}  (qty {})", item.brand, item.price, item.stock);
                }
            }
            return Ok(());
        }
    }

    session.save_inventory(&inventory)
}

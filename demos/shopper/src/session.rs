//! Config resolution and file access for one CLI invocation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use sm_core::ShopConfig;
use sm_layout::{load_distances_csv, load_layout_json, save_layout_json, StoreLayout};
use sm_store::{load_cart_json, load_inventory_json, save_cart_json, save_inventory_json, Cart, Inventory};

pub struct Session {
    pub config:      ShopConfig,
    extra_distances: Option<PathBuf>,
}

impl Session {
    /// Load the config file (if any) and apply command-line overrides.
    pub fn open(
        config_path: Option<&Path>,
        layout: Option<PathBuf>,
        extra_distances: Option<PathBuf>,
    ) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => ShopConfig::load(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => ShopConfig::default(),
        };
        if let Some(layout) = layout {
            // The inventory follows the layout unless it was configured apart.
            if config.inventory_path == config.layout_path {
                config.inventory_path = layout.clone();
            }
            config.layout_path = layout;
        }
        debug!(?config, "session config");
        Ok(Self { config, extra_distances })
    }

    /// The layout with any extra CSV distances merged in.
    pub fn layout(&self) -> Result<StoreLayout> {
        let mut layout = self.stored_layout()?;
        if let Some(csv) = &self.extra_distances {
            let extra = load_distances_csv(csv)
                .with_context(|| format!("reading distances {}", csv.display()))?;
            layout.distances.extend(extra);
        }
        Ok(layout)
    }

    /// The layout file exactly as stored, for editing.
    pub fn stored_layout(&self) -> Result<StoreLayout> {
        let path = &self.config.layout_path;
        load_layout_json(path).with_context(|| format!("reading layout {}", path.display()))
    }

    pub fn save_layout(&self, layout: &StoreLayout) -> Result<()> {
        let path = &self.config.layout_path;
        save_layout_json(layout, path).with_context(|| format!("writing layout {}", path.display()))
    }

    pub fn save_inventory(&self, inventory: &Inventory) -> Result<()> {
        let path = &self.config.inventory_path;
        save_inventory_json(inventory, path)
            .with_context(|| format!("writing inventory {}", path.display()))
    }

    pub fn inventory(&self) -> Result<Inventory> {
        let path = &self.config.inventory_path;
        load_inventory_json(path).with_context(|| format!("reading inventory {}", path.display()))
    }

    pub fn cart(&self) -> Result<Cart> {
        let path = &self.config.cart_path;
        load_cart_json(path).with_context(|| format!("reading cart {}", path.display()))
    }

    pub fn save_store(&self, inventory: &Inventory, cart: &Cart) -> Result<()> {
        self.save_inventory(inventory)?;
        save_cart_json(cart, &self.config.cart_path)
            .with_context(|| format!("writing cart {}", self.config.cart_path.display()))?;
        Ok(())
    }
}

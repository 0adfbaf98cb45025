//! Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{SmError, SmResult};

/// Top-level shop configuration.
///
/// Typically loaded from a TOML file by the application crate.  Every field
/// has a default, so an empty file (or no file at all) is valid.
///
/// ```toml
/// layout_path    = "layout_data.json"
/// inventory_path = "layout_data.json"
/// cart_path      = "cart.json"
/// checkout_rack  = "R1"
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    /// JSON layout document: rack ids, distances, product assignments.
    pub layout_path: PathBuf,

    /// JSON file holding the inventory.  Defaults to the layout file, which
    /// then carries an `"inventory"` section alongside the layout.
    pub inventory_path: PathBuf,

    /// JSON file holding the current cart.
    pub cart_path: PathBuf,

    /// Rack the reroute command walks to when no target is given.
    pub checkout_rack: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            layout_path:    PathBuf::from("layout_data.json"),
            inventory_path: PathBuf::from("layout_data.json"),
            cart_path:      PathBuf::from("cart.json"),
            checkout_rack:  "R1".to_owned(),
        }
    }
}

impl ShopConfig {
    pub fn from_toml_str(text: &str) -> SmResult<Self> {
        let config: ShopConfig =
            toml::from_str(text).map_err(|e| SmError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> SmResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> SmResult<()> {
        if self.checkout_rack.trim().is_empty() {
            return Err(SmError::Config("checkout_rack must not be empty".into()));
        }
        Ok(())
    }
}

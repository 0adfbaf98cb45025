//! Unit tests for sm-store.

use serde_json::json;

use crate::{
    load_cart_json, load_inventory_json, save_cart_json, save_inventory_json, Cart, Inventory,
    StoreError,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn pantry() -> Inventory {
    let mut inv = Inventory::new();
    inv.add_product("Milk", "Acme", 1.5, 10);
    inv.add_product("milk", "Dairyland", 1.2, 2);
    inv.add_product("bread", "Baker", 2.0, 5);
    inv.add_product("eggs", "Hen", 3.0, 0);
    inv
}

// ── Inventory ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod inventory {
    use super::*;

    #[test]
    fn names_are_lowercased_and_brands_match_any_case() {
        let inv = pantry();
        let item = inv.get("MILK", "acme").unwrap();
        assert_eq!(item.name, "milk");
        assert_eq!(item.brand, "Acme");
        assert_eq!(inv.price_of(" milk ", "ACME"), Some(1.5));
        assert_eq!(inv.len(), 4);
    }

    #[test]
    fn add_replaces_existing_product() {
        let mut inv = pantry();
        inv.add_product("milk", "ACME", 9.0, 1);
        assert_eq!(inv.len(), 4);
        assert_eq!(inv.price_of("milk", "acme"), Some(9.0));
    }

    #[test]
    fn update_and_delete() {
        let mut inv = pantry();
        assert!(inv.update_product("bread", "baker", Some(2.5), None));
        assert_eq!(inv.get("bread", "Baker").unwrap().stock, 5);
        assert_eq!(inv.price_of("bread", "Baker"), Some(2.5));
        assert!(!inv.update_product("tea", "Any", None, Some(3)));

        let gone = inv.delete_product("eggs", "hen").unwrap();
        assert_eq!(gone.price, 3.0);
        assert!(inv.get("eggs", "Hen").is_none());
        assert!(inv.delete_product("eggs", "Hen").is_none());
    }

    #[test]
    fn stock_never_goes_negative() {
        let mut inv = pantry();
        assert!(inv.adjust_stock("milk", "Dairyland", -2));
        assert_eq!(inv.get("milk", "Dairyland").unwrap().stock, 0);
        assert!(!inv.adjust_stock("milk", "Dairyland", -1));
        assert_eq!(inv.get("milk", "Dairyland").unwrap().stock, 0);
        assert!(!inv.adjust_stock("tea", "Any", 1));
    }

    #[test]
    fn listing_is_cheapest_first() {
        let inv = pantry();
        let prices: Vec<f64> = inv.cheapest_first().iter().map(|i| i.price).collect();
        assert_eq!(prices, [1.2, 1.5, 2.0, 3.0]);
    }

    #[test]
    fn search_matches_name_or_brand() {
        let inv = pantry();
        let hits: Vec<&str> = inv.search("MILK").iter().map(|i| i.brand.as_str()).collect();
        assert_eq!(hits, ["Dairyland", "Acme"]);
        let hits = inv.search("bak");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "bread");
        assert!(inv.search("caviar").is_empty());
    }

    #[test]
    fn grouped_by_name() {
        let inv = pantry();
        let groups = inv.grouped();
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), ["bread", "eggs", "milk"]);
        assert_eq!(groups["milk"][0].brand, "Dairyland");
        assert_eq!(groups["milk"].len(), 2);
    }
}

// ── Inventory JSON ────────────────────────────────────────────────────────────

#[cfg(test)]
mod inventory_json {
    use super::*;

    #[test]
    fn top_level_records() {
        let inv = Inventory::from_json_value(&json!([
            [1.5, "milk", "Acme", 3],
            [0.5, "salt", "Sea"],
            ["oops"],
            [2.0, "tea", "Leaf", -1]
        ]));
        assert_eq!(inv.len(), 2);
        assert_eq!(inv.get("salt", "Sea").unwrap().stock, 0);
        assert_eq!(inv.get("milk", "Acme").unwrap().stock, 3);
    }

    #[test]
    fn records_next_to_a_layout() {
        let inv = Inventory::from_json_value(&json!({
            "rack_ids": ["R1"],
            "products": {"R1": "milk"},
            "inventory": [[1.0, "bread", "Baker", 4]]
        }));
        assert_eq!(inv.len(), 1);
        assert!(inv.get("bread", "baker").is_some());
    }

    #[test]
    fn layout_products_seed_an_empty_inventory() {
        let inv = Inventory::from_json_value(&json!({
            "products": {"R1": "Milk", "R2": "unassigned", "R3": " ", "R4": "eggs"}
        }));
        assert_eq!(inv.len(), 2);
        let milk = inv.get("milk", "default").unwrap();
        assert_eq!((milk.price, milk.stock), (0.0, 0));
    }

    #[test]
    fn serialised_cheapest_first() {
        let value = pantry().to_json_value();
        assert_eq!(value[0], json!([1.2, "milk", "Dairyland", 2]));
        assert_eq!(value.as_array().unwrap().len(), 4);
    }

    #[test]
    fn save_keeps_other_keys() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("layout_data.json");
        std::fs::write(&path, r#"{"rack_ids": ["R1", "R2"], "products": {"R1": "milk"}}"#).unwrap();

        save_inventory_json(&pantry(), &path).unwrap();

        let doc: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["rack_ids"], json!(["R1", "R2"]));
        assert_eq!(load_inventory_json(&path).unwrap(), pantry());
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let inv = load_inventory_json(&dir.path().join("none.json")).unwrap();
        assert!(inv.is_empty());
    }
}

// ── Cart ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cart {
    use super::*;

    #[test]
    fn adding_takes_stock() {
        let mut inv = pantry();
        let mut cart = Cart::new();
        cart.add_item(&mut inv, "MILK", "acme", 3).unwrap();
        cart.add_item(&mut inv, "milk", "Acme", 2).unwrap();
        assert_eq!(cart.quantity("milk", "acme"), 5);
        assert_eq!(inv.get("milk", "Acme").unwrap().stock, 5);
        assert_eq!(cart.lines().collect::<Vec<_>>(), [("milk", "acme", 5)]);
    }

    #[test]
    fn add_rejections() {
        let mut inv = pantry();
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add_item(&mut inv, "milk", "Acme", 0),
            Err(StoreError::InvalidQuantity)
        ));
        assert!(matches!(
            cart.add_item(&mut inv, "caviar", "Tsar", 1),
            Err(StoreError::UnknownProduct { .. })
        ));
        match cart.add_item(&mut inv, "milk", "Dairyland", 3) {
            Err(StoreError::InsufficientStock { requested, available, .. }) => {
                assert_eq!((requested, available), (3, 2));
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
        assert!(cart.is_empty());
        assert_eq!(inv, pantry());
    }

    #[test]
    fn remove_returns_stock() {
        let mut inv = pantry();
        let mut cart = Cart::new();
        cart.add_item(&mut inv, "bread", "Baker", 4).unwrap();
        assert_eq!(cart.remove_item(&mut inv, "Bread", "baker").unwrap(), 4);
        assert_eq!(inv.get("bread", "Baker").unwrap().stock, 5);
        assert!(matches!(
            cart.remove_item(&mut inv, "bread", "Baker"),
            Err(StoreError::NotInCart { .. })
        ));
    }

    #[test]
    fn modify_moves_the_difference() {
        let mut inv = pantry();
        let mut cart = Cart::new();
        cart.add_item(&mut inv, "milk", "Acme", 2).unwrap();

        cart.modify_item(&mut inv, "milk", "Acme", 6).unwrap();
        assert_eq!(inv.get("milk", "Acme").unwrap().stock, 4);

        cart.modify_item(&mut inv, "milk", "Acme", 1).unwrap();
        assert_eq!(inv.get("milk", "Acme").unwrap().stock, 9);

        assert!(matches!(
            cart.modify_item(&mut inv, "milk", "Acme", 20),
            Err(StoreError::InsufficientStock { .. })
        ));
        assert_eq!(cart.quantity("milk", "Acme"), 1);

        cart.modify_item(&mut inv, "milk", "Acme", 0).unwrap();
        assert!(cart.is_empty());
        assert_eq!(inv.get("milk", "Acme").unwrap().stock, 10);
    }

    #[test]
    fn line_survives_brand_respelling() {
        let mut inv = pantry();
        let mut cart = Cart::new();
        inv.add_product("milk", "Anchor", 1.0, 10);
        cart.add_item(&mut inv, "milk", "Anchor", 2).unwrap();
        inv.add_product("milk", "ANCHOR", 50.0, 8);

        let bill = cart.bill(&inv);
        assert_eq!(bill.lines[0].brand, "ANCHOR");
        assert_eq!(bill.total, 100.0);

        cart.modify_item(&mut inv, "Milk", "anchor", 1).unwrap();
        assert_eq!(inv.get("milk", "anchor").unwrap().stock, 9);
        assert_eq!(cart.remove_item(&mut inv, "milk", "anchor").unwrap(), 1);
        assert_eq!(inv.get("milk", "anchor").unwrap().stock, 10);
        assert!(cart.is_empty());
    }

    #[test]
    fn returning_stock_past_the_limit_is_an_error() {
        let mut inv = pantry();
        let mut cart = Cart::new();
        cart.add_item(&mut inv, "bread", "Baker", 2).unwrap();
        inv.update_product("bread", "Baker", None, Some(u32::MAX));

        assert!(matches!(
            cart.remove_item(&mut inv, "bread", "Baker"),
            Err(StoreError::StockOverflow { qty: 2, .. })
        ));
        assert_eq!(cart.quantity("bread", "baker"), 2);
        assert_eq!(inv.get("bread", "Baker").unwrap().stock, u32::MAX);

        assert!(matches!(
            cart.modify_item(&mut inv, "bread", "Baker", 1),
            Err(StoreError::StockOverflow { qty: 1, .. })
        ));
        assert_eq!(cart.quantity("bread", "baker"), 2);
    }

    #[test]
    fn removing_a_deleted_product_drops_the_line() {
        let mut inv = pantry();
        let mut cart = Cart::new();
        cart.add_item(&mut inv, "bread", "Baker", 1).unwrap();
        inv.delete_product("bread", "Baker");
        assert_eq!(cart.remove_item(&mut inv, "bread", "Baker").unwrap(), 1);
        assert!(cart.is_empty());
    }

    #[test]
    fn modify_unknown_line() {
        let mut inv = pantry();
        let mut cart = Cart::new();
        assert!(matches!(
            cart.modify_item(&mut inv, "bread", "Baker", 2),
            Err(StoreError::NotInCart { .. })
        ));
    }

    #[test]
    fn bill_orders_by_subtotal() {
        let mut inv = pantry();
        let mut cart = Cart::new();
        cart.add_item(&mut inv, "bread", "Baker", 2).unwrap(); // 4.0
        cart.add_item(&mut inv, "milk", "Dairyland", 1).unwrap(); // 1.2
        cart.add_item(&mut inv, "milk", "Acme", 2).unwrap(); // 3.0

        let bill = cart.bill(&inv);
        let subtotals: Vec<f64> = bill.lines.iter().map(|l| l.subtotal).collect();
        assert_eq!(subtotals, [1.2, 3.0, 4.0]);
        assert!((bill.total - 8.2).abs() < 1e-9);
    }

    #[test]
    fn bill_skips_deleted_products() {
        let mut inv = pantry();
        let mut cart = Cart::new();
        cart.add_item(&mut inv, "bread", "Baker", 1).unwrap();
        cart.add_item(&mut inv, "milk", "Acme", 1).unwrap();
        inv.delete_product("bread", "Baker");

        let bill = cart.bill(&inv);
        assert_eq!(bill.lines.len(), 1);
        assert_eq!(bill.total, 1.5);
    }

    #[test]
    fn checkout_empties_the_cart() {
        let mut inv = pantry();
        let mut cart = Cart::new();
        assert!(matches!(cart.checkout(&inv), Err(StoreError::EmptyCart)));

        cart.add_item(&mut inv, "milk", "Acme", 2).unwrap();
        let bill = cart.checkout(&inv).unwrap();
        assert_eq!(bill.total, 3.0);
        assert!(cart.is_empty());
        assert_eq!(inv.get("milk", "Acme").unwrap().stock, 8);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("cart.json");
        let mut inv = pantry();
        let mut cart = Cart::new();
        cart.add_item(&mut inv, "milk", "Acme", 2).unwrap();
        cart.add_item(&mut inv, "bread", "Baker", 1).unwrap();

        save_cart_json(&cart, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains(r#"["milk","acme",2]"#));
        assert_eq!(load_cart_json(&path).unwrap(), cart);
        assert!(load_cart_json(&dir.path().join("none.json")).unwrap().is_empty());
    }
}

//! Unit tests for sm-layout.

use std::io::Cursor;

use sm_core::{Distance, RawDistance};

use crate::{
    generate_rack_ids, load_distances_reader, load_layout_json, load_layout_reader,
    parse_connection_distance, parse_layout_size, save_layout_json, StoreLayout, UNASSIGNED,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// The kind of file the layout wizard writes: symmetric distances with the
/// no-path marker, one rack left empty.
const LAYOUT_JSON: &str = r#"{
    "rack_ids": ["R1", "R2", "R3", "R4"],
    "distances": {
        "R1->R2": 4,
        "R2->R1": 4,
        "R1->R3": "∞",
        "R3->R1": "∞",
        "R2->R3": 2.5,
        "R3->R2": 2.5,
        "R1->R4": "âˆž",
        "R4->R1": "âˆž",
        "R2->R4": "soon",
        "R4->R2": "∞"
    },
    "products": {
        "R1": "Milk",
        "R2": "bread",
        "R3": "eggs",
        "R4": "unassigned"
    }
}"#;

fn layout() -> StoreLayout {
    load_layout_reader(Cursor::new(LAYOUT_JSON)).unwrap()
}

// ── Rack ids and sizes ────────────────────────────────────────────────────────

#[cfg(test)]
mod racks {
    use super::*;

    #[test]
    fn generated_ids_are_row_major() {
        assert_eq!(generate_rack_ids(2, 3), ["R1", "R2", "R3", "R4", "R5", "R6"]);
        assert!(generate_rack_ids(0, 3).is_empty());
    }

    #[test]
    fn layout_size_parsing() {
        assert_eq!(parse_layout_size("3x3").unwrap(), (3, 3));
        assert_eq!(parse_layout_size(" 2X4 ").unwrap(), (2, 4));
        assert!(parse_layout_size("33").is_err());
        assert!(parse_layout_size("3xq").is_err());
        assert!(parse_layout_size("0x3").is_err());
    }

    #[test]
    fn grid_starts_unassigned() {
        let l = StoreLayout::grid(1, 2);
        assert_eq!(l.rack_ids, ["R1", "R2"]);
        assert_eq!(l.products["R1"], UNASSIGNED);
        assert_eq!(l.product_at("R1"), None);
    }

    #[test]
    fn blank_assignment_is_unassigned() {
        let mut l = StoreLayout::grid(1, 1);
        l.assign_product("R1", "   ");
        assert_eq!(l.product_at("R1"), None);
        l.assign_product("R1", " tea ");
        assert_eq!(l.product_at("R1"), Some("tea"));
    }
}

// ── Distance map ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod distances {
    use super::*;

    #[test]
    fn symmetric_insert_writes_both_directions() {
        let mut l = StoreLayout::grid(1, 2);
        l.distances.insert_symmetric("R1", "R2", Distance::new(3.0));
        assert_eq!(l.distances.get("R1", "R2"), Some(Distance::new(3.0)));
        assert_eq!(l.distances.get("R2", "R1"), Some(Distance::new(3.0)));
        assert_eq!(l.distances.get("R1", "R3"), None);
    }

    #[test]
    fn markers_decode_to_infinite() {
        let l = layout();
        assert_eq!(l.distances.get("R1", "R3"), Some(Distance::INFINITE));
        assert_eq!(l.distances.get("R1", "R4"), Some(Distance::INFINITE));
        assert_eq!(l.distances.get("R2", "R4"), None); // malformed
    }

    #[test]
    fn graph_skips_markers_and_malformed() {
        let g = layout().graph();
        assert_eq!(g.node_count(), 4);
        // R1<->R2 and R2<->R3 only.
        assert_eq!(g.edge_count(), 4);
        let r4 = g.node_id("R4").unwrap();
        assert_eq!(g.out_degree(r4), 0);
    }

    #[test]
    fn csv_distances() {
        let csv = "source,destination,distance\nR1,R2,4\nR2,R1, 4 \nR1,R3,∞\nR3,R1,later\n";
        let map = load_distances_reader(Cursor::new(csv)).unwrap();
        assert_eq!(map.len(), 4);
        assert_eq!(map.get("R2", "R1"), Some(Distance::new(4.0)));
        assert_eq!(map.get("R1", "R3"), Some(Distance::INFINITE));
        assert_eq!(map.get("R3", "R1"), None);
        let raw: Vec<_> = map.iter().map(|(_, v)| v.clone()).collect();
        assert!(raw.contains(&RawDistance::Text("later".into())));
    }

    #[test]
    fn typed_connections() {
        assert_eq!(parse_connection_distance(" 4 ").unwrap(), Distance::new(4.0));
        assert_eq!(parse_connection_distance("0").unwrap(), Distance::INFINITE);
        assert_eq!(parse_connection_distance("").unwrap(), Distance::INFINITE);
        assert_eq!(parse_connection_distance("∞").unwrap(), Distance::INFINITE);
        assert!(parse_connection_distance("far").is_err());
    }

    #[test]
    fn csv_missing_column_is_an_error() {
        let csv = "source,destination\nR1,R2\n";
        assert!(load_distances_reader(Cursor::new(csv)).is_err());
    }
}

// ── Shopping list → stops ─────────────────────────────────────────────────────

#[cfg(test)]
mod stops {
    use super::*;

    #[test]
    fn products_map_to_racks_case_insensitively() {
        let lookup = layout().stops_for(&["milk", " EGGS ", "caviar", "bread"]);
        assert_eq!(lookup.stops, ["R1", "R3", "R2"]);
        assert_eq!(lookup.missing, ["caviar"]);
    }

    #[test]
    fn unassigned_never_matches() {
        let lookup = layout().stops_for(&["unassigned", ""]);
        assert!(lookup.stops.is_empty());
        assert_eq!(lookup.missing.len(), 2);
    }

    #[test]
    fn first_listed_rack_wins() {
        let mut l = StoreLayout::grid(1, 3);
        l.assign_product("R3", "rice");
        l.assign_product("R2", "rice");
        assert_eq!(l.rack_for("Rice"), Some("R2"));
    }

    #[test]
    fn nothing_found_is_nothing_to_route_even_with_a_start() {
        let l = layout();
        let lookup = l.stops_for(&["caviar"]);
        assert_eq!(
            l.plan_route(&lookup, Some("R2")),
            Err(sm_routing::RoutingError::NothingToRoute)
        );
    }

    #[test]
    fn start_rack_is_the_fixed_first_stop() {
        let l = layout();
        let lookup = l.stops_for(&["eggs"]);
        let route = l.plan_route(&lookup, Some("R1")).unwrap();
        assert_eq!(route.stops, ["R1", "R3"]);
        assert_eq!(route.path, ["R1", "R2", "R3"]);
        assert_eq!(route.total, Distance::new(6.5));
    }

    #[test]
    fn lookup_feeds_the_optimizer() {
        let l = layout();
        let lookup = l.stops_for(&["eggs", "milk"]);
        let route = sm_routing::optimal_route(&l.graph(), &lookup.stops).unwrap();
        assert_eq!(route.path, ["R3", "R2", "R1"]);
        assert_eq!(route.total, Distance::new(6.5));
    }
}

// ── File round trips ──────────────────────────────────────────────────────────

#[cfg(test)]
mod files {
    use super::*;

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("layout_data.json");

        let mut l = StoreLayout::grid(1, 3);
        l.distances.insert_symmetric("R1", "R2", Distance::new(1.5));
        l.distances.insert_symmetric("R2", "R3", Distance::INFINITE);
        l.assign_product("R2", "salt");
        save_layout_json(&l, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"∞\""));

        let back = load_layout_json(&path).unwrap();
        assert_eq!(back, l);
        assert_eq!(back.graph().edge_count(), 2);
    }

    #[test]
    fn store_setup_then_route() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("layout_data.json");

        let (rows, cols) = parse_layout_size("2x2").unwrap();
        save_layout_json(&StoreLayout::grid(rows, cols), &path).unwrap();

        let mut l = load_layout_json(&path).unwrap();
        l.distances.insert_symmetric("R1", "R2", parse_connection_distance("3").unwrap());
        l.distances.insert_symmetric("R2", "R4", parse_connection_distance("2").unwrap());
        l.distances.insert_symmetric("R1", "R4", parse_connection_distance("0").unwrap());
        l.assign_product("R4", "tea");
        save_layout_json(&l, &path).unwrap();

        let l = load_layout_json(&path).unwrap();
        let route = l.plan_route(&l.stops_for(&["tea"]), Some("R1")).unwrap();
        assert_eq!(route.path, ["R1", "R2", "R4"]);
        assert_eq!(route.total, Distance::new(5.0));
    }

    #[test]
    fn save_keeps_existing_inventory() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("layout_data.json");
        std::fs::write(
            &path,
            r#"{"rack_ids": [], "inventory": [[1.5, "milk", "Acme", 3]]}"#,
        )
        .unwrap();

        save_layout_json(&StoreLayout::grid(1, 1), &path).unwrap();
        let back = load_layout_json(&path).unwrap();
        assert_eq!(back.rack_ids, ["R1"]);
        assert!(back.inventory.is_some());
    }

    #[test]
    fn display_lists_connections_and_products() {
        let text = layout().to_string();
        assert!(text.contains("R1 -> R2 : 4"));
        assert!(!text.contains("R1 -> R3"));
        assert!(text.contains("R4 : unassigned"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_layout_json(std::path::Path::new("/nonexistent/layout.json")).unwrap_err();
        assert!(matches!(err, crate::LayoutError::Io(_)));
    }
}

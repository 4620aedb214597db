//! Property-based tests using proptest
//!
//! These tests check payload shaping, cache keys and display helpers
//! against randomized inputs.

use proptest::prelude::*;
use serde_json::json;
use stockroom::model::{GiveStock, Item, PartyType, Product, StockTransfer};
use stockroom::query::QueryKey;
use stockroom::resource::payload::{create_payload, update_payload};
use stockroom::resource::{extract_json_value, get_all_resource_keys, get_resource, PageBase, Sort};
use stockroom::table::truncate_string;

/// Generate arbitrary product records, with or without an id
fn arb_product() -> impl Strategy<Value = Product> {
    (
        prop_oneof![Just(String::new()), "[a-f0-9]{24}"],
        "[A-Za-z0-9 .-]{1,40}",
        0.0f64..100_000.0,
    )
        .prop_map(|(id, name, price)| Product { id, name, price })
}

fn arb_party() -> impl Strategy<Value = PartyType> {
    prop_oneof![
        Just(PartyType::Supplier),
        Just(PartyType::Warehouse),
        Just(PartyType::Vehicle),
    ]
}

fn arb_item() -> impl Strategy<Value = Item> {
    ("p[0-9]{1,3}", 0u32..500, 0u32..500, 0u32..50).prop_map(
        |(product_id, quantity_full, quantity_empty, quantity_defective)| Item {
            product_id,
            quantity_full,
            quantity_empty,
            quantity_defective,
        },
    )
}

/// Generate arbitrary give-stock movements
fn arb_give_stock() -> impl Strategy<Value = GiveStock> {
    (
        "[a-f0-9]{1,24}",
        prop::collection::vec(arb_item(), 0..8),
        "[a-z0-9]{1,8}",
        arb_party(),
        "[a-z0-9]{1,8}",
        arb_party(),
    )
        .prop_map(|(id, items, from_id, from_type, to_id, to_type)| {
            GiveStock(StockTransfer {
                id,
                items,
                from_id,
                from_type,
                to_id,
                to_type,
                date_time: "2023-05-02T08:00:00".to_string(),
            })
        })
}

proptest! {
    /// Creation payloads never carry the id
    #[test]
    fn create_payload_has_no_id(product in arb_product()) {
        let def = get_resource("product").unwrap();
        let body = create_payload(def, &product).unwrap();
        prop_assert!(body.get("id").is_none());
        prop_assert_eq!(body["name"].as_str(), Some(product.name.as_str()));
    }

    /// Update payloads carry the id exactly when one is present
    #[test]
    fn update_payload_requires_id(product in arb_product()) {
        let def = get_resource("product").unwrap();
        let result = update_payload(def, &product);
        if product.id.is_empty() {
            prop_assert!(result.is_err());
        } else {
            let body = result.unwrap();
            prop_assert_eq!(body["id"].as_str(), Some(product.id.as_str()));
        }
    }

    /// Give-stock updates send only the renamed id and the editable fields
    #[test]
    fn give_stock_update_is_reduced(give in arb_give_stock()) {
        let def = get_resource("give-stock").unwrap();
        let body = update_payload(def, &give).unwrap();
        let map = body.as_object().unwrap();
        prop_assert_eq!(map.len(), 4);
        prop_assert_eq!(map["giveId"].as_str(), Some(give.0.id.as_str()));
        prop_assert_eq!(map["items"].as_array().map(|a| a.len()), Some(give.0.items.len()));
        prop_assert!(!map.contains_key("toId"));
    }

    /// Every list key falls under its own resource's list prefix only
    #[test]
    fn list_keys_nest_under_resource(
        resource_idx in 0usize..18,
        other_idx in 0usize..18,
        page in 1u32..1000,
        size in 1u32..200,
        query in "[a-z0-9 ]{0,12}",
        desc in any::<bool>(),
    ) {
        let keys = get_all_resource_keys();
        let resource = keys[resource_idx];
        let other = keys[other_idx];
        let sort = if desc { Sort::desc("name") } else { Sort::asc("id") };
        let key = QueryKey::list(resource, page, size, &query, &sort);

        prop_assert!(key.starts_with(&QueryKey::lists(resource)));
        prop_assert!(!key.starts_with(&QueryKey::detail(resource, "x")));
        if other != resource {
            prop_assert!(!key.starts_with(&QueryKey::lists(other)));
        }
    }

    /// Zero-based servers always see the previous page number
    #[test]
    fn zero_based_page_shift(page in 1u32..u32::MAX) {
        prop_assert_eq!(PageBase::Zero.to_server(page), page - 1);
        prop_assert_eq!(PageBase::One.to_server(page), page);
    }

    /// Path extraction never panics and misses render as a dash
    #[test]
    fn extract_never_panics(path in "[a-zA-Z0-9.]{0,20}") {
        let item = json!({"id": "p1", "address": {"city": "Pune"}, "items": [{"productId": "p1"}]});
        let value = extract_json_value(&item, &path);
        prop_assert!(!value.is_empty());
    }

    /// Truncated strings never exceed the column width
    #[test]
    fn truncate_respects_width(s in "\\PC{0,80}", width in 3usize..60) {
        let out = truncate_string(&s, width);
        prop_assert!(out.chars().count() <= width);
    }
}

#[test]
fn resource_count_matches_key_range() {
    assert_eq!(get_all_resource_keys().len(), 18);
}

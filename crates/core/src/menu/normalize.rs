//! Menu normalisation

use rustc_hash::FxHashSet;
use serde_json::Value;
use tracing::{debug, warn};

use crate::menu::{
    CategoryItems, Menu, MenuCategory, MenuError, MenuItem, RestaurantInfo, Subcategory,
    payload::{self, CardNode, CategoryNode, RawItemInfo, RawRestaurantInfo},
};

/// Normalise a raw restaurant payload into a [`Menu`].
///
/// Categories keep their source order. Missing or malformed branches degrade to empty lists or
/// priceless items.
///
/// # Errors
///
/// Returns [`MenuError::NotReady`] if the payload has no restaurant info card.
pub fn normalize(raw: &Value) -> Result<Menu, MenuError> {
    let mut restaurant = None;
    let mut regular_cards: Option<&[Value]> = None;

    for card in payload::cards(raw) {
        match payload::classify_card(card) {
            CardNode::RestaurantInfo(info) if restaurant.is_none() => restaurant = Some(info),
            CardNode::GroupedCards(cards) if regular_cards.is_none() => regular_cards = Some(cards),
            _ => {}
        }
    }

    let restaurant = restaurant.map(restaurant_info).ok_or(MenuError::NotReady)?;

    let categories: Vec<MenuCategory> = regular_cards
        .unwrap_or_default()
        .iter()
        .filter_map(|card| match payload::classify_category(card) {
            CategoryNode::Flat { title, item_cards } => Some(MenuCategory {
                title,
                items: CategoryItems::Flat(menu_items(&item_cards)),
            }),
            CategoryNode::Nested { title, categories } => Some(MenuCategory {
                title,
                items: CategoryItems::Nested(
                    categories
                        .into_iter()
                        .map(|subcategory| Subcategory {
                            title: subcategory.title.unwrap_or_default(),
                            items: menu_items(&subcategory.item_cards.unwrap_or_default()),
                        })
                        .collect(),
                ),
            }),
            CategoryNode::Other => None,
        })
        .collect();

    warn_duplicate_ids(&categories);

    debug!(
        restaurant = %restaurant.name,
        categories = categories.len(),
        "normalised menu payload"
    );

    Ok(Menu {
        restaurant,
        categories,
    })
}

fn restaurant_info(raw: RawRestaurantInfo) -> RestaurantInfo {
    RestaurantInfo {
        name: raw.name.unwrap_or_default(),
        area_name: raw.area_name.unwrap_or_default(),
        cuisines: raw.cuisines.unwrap_or_default().into_iter().collect(),
        cost_for_two_message: raw.cost_for_two_message.unwrap_or_default(),
    }
}

fn menu_items(item_cards: &[Value]) -> Vec<MenuItem> {
    item_cards
        .iter()
        .filter_map(|card| {
            let item = payload::item_info(card).and_then(menu_item);

            if item.is_none() {
                warn!("skipping item card without a usable id");
            }

            item
        })
        .collect()
}

fn menu_item(info: RawItemInfo) -> Option<MenuItem> {
    Some(MenuItem {
        id: info.id?,
        name: info.name.unwrap_or_default(),
        description: info.description,
        image_ref: info.image_id,
        price_minor_units: info.price.or(info.default_price),
    })
}

fn warn_duplicate_ids(categories: &[MenuCategory]) {
    let mut seen = FxHashSet::default();

    for item in categories.iter().flat_map(MenuCategory::iter_items) {
        if !seen.insert(&item.id) {
            warn!(item_id = %item.id, "item id appears more than once in menu");
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use testresult::TestResult;

    use crate::{items::ItemId, menu::CategoryKind};

    use super::*;

    fn restaurant_card() -> Value {
        json!({
            "card": { "card": {
                "@type": "type.googleapis.com/swiggy.presentation.food.v2.Restaurant",
                "info": {
                    "name": "Truffles",
                    "areaName": "Koramangala",
                    "cuisines": ["American", "Desserts"],
                    "costForTwoMessage": "₹450 for two"
                }
            }}
        })
    }

    fn item_card(id: u64, price: Option<i64>) -> Value {
        let mut info = json!({ "id": id.to_string(), "name": format!("dish {id}") });

        if let (Some(price), Some(object)) = (price, info.as_object_mut()) {
            object.insert("price".to_string(), json!(price));
        }

        json!({ "card": { "info": info } })
    }

    fn payload(regular_cards: Vec<Value>) -> Value {
        json!({
            "cards": [
                restaurant_card(),
                { "groupedCard": { "cardGroupMap": { "REGULAR": { "cards": regular_cards } } } }
            ]
        })
    }

    fn flat(title: &str, items: Vec<Value>) -> Value {
        json!({
            "card": { "card": {
                "@type": "type.googleapis.com/swiggy.presentation.food.v2.ItemCategory",
                "title": title,
                "itemCards": items
            }}
        })
    }

    #[test]
    fn missing_restaurant_is_not_ready() {
        let raw = json!({ "cards": [{ "groupedCard": {} }] });

        assert_eq!(normalize(&raw), Err(MenuError::NotReady));
    }

    #[test]
    fn restaurant_fields_are_extracted() -> TestResult {
        let menu = normalize(&payload(vec![]))?;

        assert_eq!(menu.restaurant.name, "Truffles");
        assert_eq!(menu.restaurant.area_name, "Koramangala");
        assert_eq!(menu.restaurant.cuisines.as_slice(), ["American", "Desserts"]);
        assert_eq!(menu.restaurant.cost_for_two_message, "₹450 for two");

        Ok(())
    }

    #[test]
    fn missing_grouped_card_yields_no_categories() -> TestResult {
        let menu = normalize(&json!({ "cards": [restaurant_card()] }))?;

        assert!(menu.categories.is_empty());

        Ok(())
    }

    #[test]
    fn categories_keep_source_order_and_skip_other_cards() -> TestResult {
        let menu = normalize(&payload(vec![
            json!({ "card": { "card": { "@type": "type.googleapis.com/swiggy.presentation.food.v2.MenuVegFilterAndBadge" } } }),
            flat("Zebra Cakes", vec![item_card(1, Some(100))]),
            flat("Apple Pies", vec![]),
        ]))?;

        let titles: Vec<&str> = menu.categories.iter().map(|c| c.title.as_str()).collect();

        assert_eq!(titles, vec!["Zebra Cakes", "Apple Pies"]);

        Ok(())
    }

    #[test]
    fn price_falls_back_to_default_price() -> TestResult {
        let menu = normalize(&payload(vec![flat(
            "Mains",
            vec![json!({ "card": { "info": { "id": "9", "name": "Thali", "defaultPrice": 15000 } } })],
        )]))?;

        let item = menu.find_item(&ItemId::from(9)).ok_or("expected item 9")?;

        assert_eq!(item.price_minor_units, Some(15_000));

        Ok(())
    }

    #[test]
    fn price_wins_over_default_price() -> TestResult {
        let menu = normalize(&payload(vec![flat(
            "Mains",
            vec![json!({ "card": { "info": { "id": "9", "price": 12000, "defaultPrice": 15000 } } })],
        )]))?;

        let item = menu.find_item(&ItemId::from(9)).ok_or("expected item 9")?;

        assert_eq!(item.price_minor_units, Some(12_000));

        Ok(())
    }

    #[test]
    fn negative_price_falls_back_then_goes_priceless() -> TestResult {
        let menu = normalize(&payload(vec![flat(
            "Mains",
            vec![
                json!({ "card": { "info": { "id": "9", "price": -500, "defaultPrice": 15000 } } }),
                item_card(10, Some(-500)),
            ],
        )]))?;

        let fallback = menu.find_item(&ItemId::from(9)).ok_or("expected item 9")?;
        let negative = menu.find_item(&ItemId::from(10)).ok_or("expected item 10")?;

        assert_eq!(fallback.price_minor_units, Some(15_000));
        assert_eq!(negative.price_minor_units, None);

        Ok(())
    }

    #[test]
    fn items_without_price_are_kept_priceless() -> TestResult {
        let menu = normalize(&payload(vec![flat("Mains", vec![item_card(3, None)])]))?;

        let item = menu.find_item(&ItemId::from(3)).ok_or("expected item 3")?;

        assert_eq!(item.price_minor_units, None);

        Ok(())
    }

    #[test]
    fn items_without_ids_are_dropped() -> TestResult {
        let menu = normalize(&payload(vec![flat(
            "Mains",
            vec![
                json!({ "card": { "info": { "name": "Mystery" } } }),
                json!({ "card": {} }),
                item_card(4, Some(400)),
            ],
        )]))?;

        assert_eq!(menu.item_count(), 1);

        Ok(())
    }

    #[test]
    fn nested_category_without_subcategories_is_empty() -> TestResult {
        let menu = normalize(&payload(vec![json!({
            "card": { "card": {
                "@type": "type.googleapis.com/swiggy.presentation.food.v2.NestedItemCategory",
                "title": "Combos"
            }}
        })]))?;

        let category = menu.category("Combos").ok_or("expected Combos")?;

        assert_eq!(category.kind(), CategoryKind::Nested);
        assert!(category.subcategories().is_empty());

        Ok(())
    }

    #[test]
    fn enveloped_payload_is_accepted() -> TestResult {
        let raw = json!({ "data": payload(vec![flat("Mains", vec![item_card(1, Some(100))])]) });

        let menu = normalize(&raw)?;

        assert_eq!(menu.item_count(), 1);

        Ok(())
    }
}

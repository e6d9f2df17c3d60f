//! Normalisation of stored menu payloads

use rusty_money::{Money, iso::INR};
use storefront::{
    accordion::Accordion,
    config::StorefrontConfig,
    display::{MenuItemView, format_price},
    fixtures::Fixture,
    items::ItemId,
    menu::{CategoryItems, CategoryKind, MenuError, MenuState, normalize},
};
use testresult::TestResult;

#[test]
fn flat_category_with_three_items() -> TestResult {
    let menu = Fixture::new().menu("flat-three")?;

    assert_eq!(menu.categories.len(), 1);

    let category = menu.categories.first().ok_or("expected one category")?;

    assert_eq!(category.kind(), CategoryKind::Flat);

    let CategoryItems::Flat(items) = &category.items else {
        return Err("expected flat items".into());
    };

    let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();

    assert_eq!(ids, vec!["101", "102", "103"]);

    Ok(())
}

#[test]
fn nested_category_with_two_subcategories() -> TestResult {
    let menu = Fixture::new().menu("nested-two")?;
    let category = menu.categories.first().ok_or("expected one category")?;

    assert_eq!(category.kind(), CategoryKind::Nested);

    let sizes: Vec<usize> = category
        .subcategories()
        .iter()
        .map(|subcategory| subcategory.items.len())
        .collect();

    assert_eq!(sizes, vec![2, 3]);

    let mut accordion = Accordion::for_menu(&menu);

    assert!(accordion.is_subcategory_expanded("Beverages", "Hot"));
    assert!(!accordion.is_subcategory_expanded("Beverages", "Cold"));

    accordion.toggle_subcategory(&menu, "Cold");

    assert!(accordion.is_subcategory_expanded("Beverages", "Cold"));
    assert!(!accordion.is_subcategory_expanded("Beverages", "Hot"));

    Ok(())
}

#[test]
fn api_envelope_with_noise_cards() -> TestResult {
    let menu = Fixture::new().menu("restaurant")?;

    assert_eq!(menu.restaurant.name, "Meghana Foods");
    assert_eq!(
        menu.restaurant.summary_line(),
        "Biryani, Andhra, South Indian - ₹500 for two"
    );

    let titles: Vec<&str> = menu
        .categories
        .iter()
        .map(|category| category.title.as_str())
        .collect();

    assert_eq!(titles, vec!["Recommended", "Starters", "Desserts"]);

    let desserts = menu.category("Desserts").ok_or("expected Desserts")?;

    assert_eq!(desserts.iter_items().count(), 0);

    let starters = menu.category("Starters").ok_or("expected Starters")?;
    let headings: Vec<String> = starters
        .subcategories()
        .iter()
        .map(|subcategory| subcategory.heading())
        .collect();

    assert_eq!(
        headings,
        vec!["Veg Starters (2)", "Non Veg Starters (3)", "Seasonal (0)"]
    );

    Ok(())
}

#[test]
fn default_price_item_displays_major_units() -> TestResult {
    let menu = Fixture::new().menu("restaurant")?;
    let item = menu
        .find_item(&ItemId::from(1001))
        .ok_or("expected item 1001")?;

    assert_eq!(item.price_minor_units, Some(15_000));

    let price = item.price(INR).ok_or("expected a price")?;

    assert_eq!(price, Money::from_minor(15_000, INR));
    assert_eq!(format_price(&price), "₹150.00");

    Ok(())
}

#[test]
fn long_description_is_truncated_only_for_display() -> TestResult {
    let menu = Fixture::new().menu("restaurant")?;
    let item = menu
        .find_item(&ItemId::from(1001))
        .ok_or("expected item 1001")?;

    let raw = item.description.as_deref().ok_or("expected a description")?;

    assert_eq!(raw.chars().count(), 130);

    let view = MenuItemView::new(item, &StorefrontConfig::default());
    let shown = view.description.ok_or("expected a displayed description")?;

    assert_eq!(shown.chars().count(), 123);
    assert!(shown.ends_with("..."), "expected ellipsis in {shown}");
    assert!(raw.starts_with(shown.trim_end_matches("...")));

    Ok(())
}

#[test]
fn priceless_item_renders_without_price() -> TestResult {
    let menu = Fixture::new().menu("restaurant")?;
    let item = menu
        .find_item(&ItemId::from(1003))
        .ok_or("expected item 1003")?;

    let view = MenuItemView::new(item, &StorefrontConfig::default());

    assert_eq!(view.price, None);
    assert!(!view.can_add);

    Ok(())
}

#[test]
fn payload_without_restaurant_info_is_loading() -> TestResult {
    let payload = Fixture::new().payload("loading")?;

    assert_eq!(normalize(&payload), Err(MenuError::NotReady));
    assert!(MenuState::from_payload(Some(&payload)).is_loading());

    Ok(())
}

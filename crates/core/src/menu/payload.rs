//! Raw menu payload decoding
//!
//! The payload shape belongs to a third party and any branch may be missing or malformed. Each
//! node is classified once here, and fields that fail to decode are treated as absent.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;
use tracing::warn;

use crate::{items::ItemId, pricing::minor_units_from_f64};

/// `@type` marker of the restaurant info card.
pub const RESTAURANT_INFO_MARKER: &str = "food.v2.Restaurant";

/// `@type` marker of a flat item category.
pub const ITEM_CATEGORY_MARKER: &str = "ItemCategory";

/// `@type` marker of a nested item category.
pub const NESTED_ITEM_CATEGORY_MARKER: &str = "NestedItemCategory";

const NESTED_MARKER: &str = "Nested";

const REGULAR_CARDS_POINTER: &str = "/groupedCard/cardGroupMap/REGULAR/cards";

/// Restaurant info fields.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRestaurantInfo {
    /// Restaurant name
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,

    /// Outlet area
    #[serde(default, deserialize_with = "lenient")]
    pub area_name: Option<String>,

    /// Cuisine labels
    #[serde(default, deserialize_with = "lenient")]
    pub cuisines: Option<Vec<String>>,

    /// Cost for two message
    #[serde(default, deserialize_with = "lenient")]
    pub cost_for_two_message: Option<String>,
}

/// Item `card.info` fields.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItemInfo {
    /// Item id
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<ItemId>,

    /// Item name
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,

    /// Item description
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,

    /// Image reference
    #[serde(default, deserialize_with = "lenient")]
    pub image_id: Option<String>,

    /// Primary price in minor units
    #[serde(default, deserialize_with = "lenient_minor_units")]
    pub price: Option<i64>,

    /// Fallback price in minor units
    #[serde(default, deserialize_with = "lenient_minor_units")]
    pub default_price: Option<i64>,
}

/// Category card fields (`card.card`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCategory {
    #[serde(rename = "@type", default, deserialize_with = "lenient")]
    type_tag: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    item_cards: Option<Vec<Value>>,

    #[serde(default, deserialize_with = "lenient")]
    categories: Option<Vec<Value>>,
}

/// A subcategory of a nested category.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubcategory {
    /// Subcategory title
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,

    /// Raw item cards
    #[serde(default, deserialize_with = "lenient")]
    pub item_cards: Option<Vec<Value>>,
}

/// A top level payload card.
#[derive(Debug)]
pub enum CardNode<'a> {
    /// The restaurant info card
    RestaurantInfo(RawRestaurantInfo),

    /// The grouped card, holding the regular category cards
    GroupedCards(&'a [Value]),

    /// Anything else (offers, banners, licences, ...)
    Other,
}

/// A regular group card.
#[derive(Debug)]
pub enum CategoryNode {
    /// Flat item category
    Flat {
        /// Category title
        title: String,

        /// Raw item cards
        item_cards: Vec<Value>,
    },

    /// Nested item category
    Nested {
        /// Category title
        title: String,

        /// Subcategories
        categories: Vec<RawSubcategory>,
    },

    /// Not an item category
    Other,
}

/// The top level card list, from either `{ "cards": [...] }` or `{ "data": { "cards": [...] } }`.
pub fn cards(payload: &Value) -> &[Value] {
    payload
        .get("cards")
        .or_else(|| payload.pointer("/data/cards"))
        .and_then(Value::as_array)
        .map_or(&[][..], Vec::as_slice)
}

/// Classify a top level card.
pub fn classify_card(card: &Value) -> CardNode<'_> {
    if card.get("groupedCard").is_some() {
        let regular = card
            .pointer(REGULAR_CARDS_POINTER)
            .and_then(Value::as_array)
            .map_or(&[][..], Vec::as_slice);

        return CardNode::GroupedCards(regular);
    }

    let is_restaurant = type_tag(card).is_some_and(|tag| tag.contains(RESTAURANT_INFO_MARKER));

    if !is_restaurant {
        return CardNode::Other;
    }

    match card.pointer("/card/card/info").and_then(decode::<RawRestaurantInfo>) {
        Some(info) => CardNode::RestaurantInfo(info),
        None => {
            warn!("restaurant card has no usable info node");
            CardNode::Other
        }
    }
}

/// Classify a regular group card.
pub fn classify_category(card: &Value) -> CategoryNode {
    let Some(raw) = card.pointer("/card/card").and_then(decode::<RawCategory>) else {
        return CategoryNode::Other;
    };

    let Some(tag) = raw.type_tag.as_deref() else {
        return CategoryNode::Other;
    };

    if !(tag.contains(ITEM_CATEGORY_MARKER) || tag.contains(NESTED_ITEM_CATEGORY_MARKER)) {
        return CategoryNode::Other;
    }

    let title = raw.title.unwrap_or_default();

    if tag.contains(NESTED_MARKER) {
        let categories = raw
            .categories
            .unwrap_or_default()
            .iter()
            .filter_map(|subcategory| {
                let decoded = decode::<RawSubcategory>(subcategory);

                if decoded.is_none() {
                    warn!(category = %title, "skipping malformed subcategory");
                }

                decoded
            })
            .collect();

        CategoryNode::Nested { title, categories }
    } else {
        CategoryNode::Flat {
            title,
            item_cards: raw.item_cards.unwrap_or_default(),
        }
    }
}

/// Decode the `card.info` node of an item card.
pub fn item_info(item_card: &Value) -> Option<RawItemInfo> {
    item_card.pointer("/card/info").and_then(decode)
}

fn type_tag(card: &Value) -> Option<&str> {
    card.pointer("/card/card/@type").and_then(Value::as_str)
}

fn decode<T: DeserializeOwned>(value: &Value) -> Option<T> {
    if !value.is_object() {
        return None;
    }

    T::deserialize(value).ok()
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;

    Ok(T::deserialize(value).ok())
}

fn lenient_minor_units<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    let minor = match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(minor_units_from_f64)),
        Value::String(text) => {
            let text = text.trim();

            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(minor_units_from_f64))
        }
        _ => None,
    };

    Ok(minor.filter(|minor| *minor >= 0))
}

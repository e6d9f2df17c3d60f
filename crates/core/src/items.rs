//! Items

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Deserializer, de};

/// Stable identifier of a catalog item.
///
/// Menu payloads carry ids as either strings or integers; both forms are kept as text so that
/// `1` and `"1"` refer to the same item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ItemIdVisitor;

        impl de::Visitor<'_> for ItemIdVisitor {
            type Value = ItemId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer item id")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<ItemId, E> {
                Ok(ItemId::from(value))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<ItemId, E> {
                Ok(ItemId(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<ItemId, E> {
                Ok(ItemId::from(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<ItemId, E> {
                Ok(ItemId(value.to_string()))
            }
        }

        deserializer.deserialize_any(ItemIdVisitor)
    }
}

/// An item selected for the cart, with its price already in major units.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    /// Catalog id
    pub id: ItemId,

    /// Display name
    pub name: String,

    /// Unit price
    pub price: Money<'static, Currency>,

    /// Opaque image reference for the presentation layer
    pub image_ref: Option<String>,
}

impl CartItem {
    /// Creates a new cart item without an image reference.
    #[must_use]
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        price: Money<'static, Currency>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image_ref: None,
        }
    }

    /// Sets the image reference.
    #[must_use]
    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }
}

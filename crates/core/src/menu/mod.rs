//! Menu
//!
//! The typed menu model produced from a raw restaurant payload by [`normalize`].

use rusty_money::{Money, iso::Currency};
use serde_json::Value;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    items::{CartItem, ItemId},
    pricing::price_from_minor,
};

pub mod normalize;
pub mod payload;

pub use normalize::normalize;

/// Menu errors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MenuError {
    /// The payload has not resolved yet, or carries no restaurant info card. Show a loading
    /// state and wait for the next payload.
    #[error("menu data is not ready")]
    NotReady,
}

/// Restaurant header details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantInfo {
    /// Restaurant name
    pub name: String,

    /// Outlet area
    pub area_name: String,

    /// Cuisine labels
    pub cuisines: SmallVec<[String; 4]>,

    /// Preformatted cost message, e.g. "₹400 for two"
    pub cost_for_two_message: String,
}

/// A purchasable menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Catalog id
    pub id: ItemId,

    /// Display name
    pub name: String,

    /// Full description, never truncated here
    pub description: Option<String>,

    /// Opaque image reference
    pub image_ref: Option<String>,

    /// `price`, or `defaultPrice` when `price` is absent, in minor units
    pub price_minor_units: Option<i64>,
}

impl MenuItem {
    /// Display price, if the item has one. Negative amounts count as no price.
    pub fn price(&self, currency: &'static Currency) -> Option<Money<'static, Currency>> {
        self.price_minor_units
            .filter(|minor| *minor >= 0)
            .map(|minor| price_from_minor(minor, currency))
    }

    /// The cart representation of this item. Priceless items cannot be added to a cart.
    pub fn to_cart_item(&self, currency: &'static Currency) -> Option<CartItem> {
        let price = self.price(currency)?;

        Some(CartItem {
            id: self.id.clone(),
            name: self.name.clone(),
            price,
            image_ref: self.image_ref.clone(),
        })
    }
}

/// A titled list of items inside a nested category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subcategory {
    /// Subcategory title
    pub title: String,

    /// Items in source order
    pub items: Vec<MenuItem>,
}

/// Category shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    /// Items directly under the category
    Flat,

    /// Items grouped into subcategories
    Nested,
}

/// Category contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryItems {
    /// Items directly under the category
    Flat(Vec<MenuItem>),

    /// Titled subcategories
    Nested(Vec<Subcategory>),
}

/// A top level menu category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCategory {
    /// Category title, also the expansion key
    pub title: String,

    /// Category contents
    pub items: CategoryItems,
}

impl MenuCategory {
    /// Category shape.
    pub fn kind(&self) -> CategoryKind {
        match self.items {
            CategoryItems::Flat(_) => CategoryKind::Flat,
            CategoryItems::Nested(_) => CategoryKind::Nested,
        }
    }

    /// Subcategories of a nested category; empty for flat categories.
    pub fn subcategories(&self) -> &[Subcategory] {
        match &self.items {
            CategoryItems::Flat(_) => &[],
            CategoryItems::Nested(subcategories) => subcategories,
        }
    }

    /// Every item in the category, subcategories flattened in order.
    pub fn iter_items(&self) -> Box<dyn Iterator<Item = &MenuItem> + '_> {
        match &self.items {
            CategoryItems::Flat(items) => Box::new(items.iter()),
            CategoryItems::Nested(subcategories) => Box::new(
                subcategories
                    .iter()
                    .flat_map(|subcategory| subcategory.items.iter()),
            ),
        }
    }
}

/// A normalised restaurant menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    /// Restaurant header details
    pub restaurant: RestaurantInfo,

    /// Categories in source order
    pub categories: Vec<MenuCategory>,
}

impl Menu {
    /// Find an item anywhere in the menu.
    pub fn find_item(&self, id: &ItemId) -> Option<&MenuItem> {
        self.categories
            .iter()
            .flat_map(MenuCategory::iter_items)
            .find(|item| &item.id == id)
    }

    /// Find a category by title.
    pub fn category(&self, title: &str) -> Option<&MenuCategory> {
        self.categories
            .iter()
            .find(|category| category.title == title)
    }

    /// Number of items across all categories.
    pub fn item_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.iter_items().count())
            .sum()
    }
}

/// Menu loading state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MenuState {
    /// No usable payload yet
    #[default]
    Loading,

    /// The menu is ready to render
    Ready(Menu),
}

impl MenuState {
    /// Derive the state from a payload that may not have arrived yet.
    pub fn from_payload(payload: Option<&Value>) -> Self {
        match payload.map(normalize) {
            Some(Ok(menu)) => Self::Ready(menu),
            Some(Err(MenuError::NotReady)) | None => Self::Loading,
        }
    }

    /// The menu, once ready.
    pub fn menu(&self) -> Option<&Menu> {
        match self {
            Self::Loading => None,
            Self::Ready(menu) => Some(menu),
        }
    }

    /// Whether a loading placeholder should be shown.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

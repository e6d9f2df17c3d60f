//! Display
//!
//! Render models handed to the presentation layer. Nothing here mutates core state.

use std::borrow::Cow;

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::{Cart, CartLine},
    config::StorefrontConfig,
    menu::{MenuItem, RestaurantInfo, Subcategory},
    pricing::{MINOR_UNIT_SCALE, TotalPriceError},
};

/// Descriptions longer than this many characters are truncated for display.
pub const DESCRIPTION_DISPLAY_LIMIT: usize = 120;

/// Marker appended to truncated descriptions.
pub const ELLIPSIS: &str = "...";

/// Message shown for an empty cart.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

/// Truncate a description to `limit` characters plus [`ELLIPSIS`].
pub fn truncate_description(description: &str, limit: usize) -> Cow<'_, str> {
    if description.chars().nth(limit).is_none() {
        return Cow::Borrowed(description);
    }

    let mut truncated: String = description.chars().take(limit).collect();
    truncated.push_str(ELLIPSIS);

    Cow::Owned(truncated)
}

/// Format a price as currency symbol and two decimal places, e.g. `₹150.00`.
pub fn format_price(money: &Money<'_, Currency>) -> String {
    let amount = money.amount().round_dp(MINOR_UNIT_SCALE);

    format!("{}{amount:.2}", money.currency().symbol)
}

/// Full URL of an item image.
pub fn image_url(base: &str, image_ref: &str) -> String {
    format!("{base}{image_ref}")
}

/// Cart button badge text. Hidden when the cart holds nothing.
pub fn cart_badge(total_items: u64) -> Option<String> {
    (total_items > 0).then(|| total_items.to_string())
}

impl RestaurantInfo {
    /// Cuisines and cost line, e.g. `"Biryani, Andhra - ₹500 for two"`.
    pub fn summary_line(&self) -> String {
        format!("{} - {}", self.cuisines.join(", "), self.cost_for_two_message)
    }
}

impl Subcategory {
    /// Subcategory heading with item count, e.g. `"Naan (4)"`.
    pub fn heading(&self) -> String {
        format!("{} ({})", self.title, self.items.len())
    }
}

/// Render model for a menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemView {
    /// Item name
    pub name: String,

    /// Truncated description
    pub description: Option<String>,

    /// Formatted price, absent for priceless items
    pub price: Option<String>,

    /// Image URL
    pub image_url: Option<String>,

    /// Whether the add button does anything
    pub can_add: bool,
}

impl MenuItemView {
    /// Build the view of a menu item.
    pub fn new(item: &MenuItem, config: &StorefrontConfig) -> Self {
        let price = item.price(config.currency);

        Self {
            name: item.name.clone(),
            description: item
                .description
                .as_deref()
                .filter(|description| !description.is_empty())
                .map(|description| {
                    truncate_description(description, config.description_limit).into_owned()
                }),
            price: price.as_ref().map(format_price),
            image_url: item
                .image_ref
                .as_deref()
                .map(|image_ref| image_url(&config.image_base_url, image_ref)),
            can_add: price.is_some(),
        }
    }
}

/// Render model for a cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    /// Item id, as text
    pub id: String,

    /// Item name
    pub name: String,

    /// Formatted unit price
    pub unit_price: String,

    /// Quantity
    pub quantity: u32,

    /// Formatted line total
    pub line_total: String,

    /// Image URL
    pub image_url: Option<String>,
}

impl CartLineView {
    /// Build the view of a cart line.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the line total overflows.
    pub fn new(line: &CartLine, config: &StorefrontConfig) -> Result<Self, TotalPriceError> {
        Ok(Self {
            id: line.id().to_string(),
            name: line.name().to_string(),
            unit_price: format_price(line.unit_price()),
            quantity: line.quantity(),
            line_total: format_price(&line.line_total()?),
            image_url: line
                .image_ref()
                .map(|image_ref| image_url(&config.image_base_url, image_ref)),
        })
    }
}

/// Render model for the cart panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    /// Whether the panel is shown at all
    pub is_open: bool,

    /// Lines in cart order
    pub lines: Vec<CartLineView>,

    /// Badge text for the cart button
    pub badge: Option<String>,

    /// Formatted total, present only when the cart has lines
    pub total: Option<String>,

    /// Empty state message
    pub empty_message: Option<&'static str>,
}

impl CartView {
    /// Build the cart panel view.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if a total cannot be calculated.
    pub fn new(cart: &Cart, config: &StorefrontConfig) -> Result<Self, TotalPriceError> {
        let lines = cart
            .lines()
            .iter()
            .map(|line| CartLineView::new(line, config))
            .collect::<Result<Vec<_>, _>>()?;

        let total = if cart.is_empty() {
            None
        } else {
            Some(format_price(&cart.total_price()?))
        };

        Ok(Self {
            is_open: cart.is_open(),
            badge: cart_badge(cart.total_item_count()),
            empty_message: cart.is_empty().then_some(EMPTY_CART_MESSAGE),
            lines,
            total,
        })
    }
}

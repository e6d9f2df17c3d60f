//! Cart

use rusty_money::{Money, iso::Currency};
use tracing::{debug, warn};

use crate::{
    items::{CartItem, ItemId},
    pricing::{TotalPriceError, line_total, total_price},
};

pub mod scope;

pub use scope::{CartError, CartHandle, CartScope};

/// A single cart entry. There is at most one line per catalog item.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    id: ItemId,
    name: String,
    unit_price: Money<'static, Currency>,
    quantity: u32,
    image_ref: Option<String>,
}

impl CartLine {
    /// Item id
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Display name, as first seen
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price, as first seen
    pub fn unit_price(&self) -> &Money<'static, Currency> {
        &self.unit_price
    }

    /// Quantity, always at least 1
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Opaque image reference
    pub fn image_ref(&self) -> Option<&str> {
        self.image_ref.as_deref()
    }

    /// Price of this line (`unit price * quantity`).
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the amount does not fit in minor units.
    pub fn line_total(&self) -> Result<Money<'static, Currency>, TotalPriceError> {
        line_total(self)
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}

impl From<CartItem> for CartLine {
    fn from(item: CartItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            unit_price: item.price,
            quantity: 1,
            image_ref: item.image_ref,
        }
    }
}

/// Shopping cart for one browsing session.
///
/// Lines keep first-add order. The open flag is independent of the contents.
#[derive(Debug, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
    is_open: bool,
    currency: &'static Currency,
}

impl Cart {
    /// Create a new, closed, empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            lines: Vec::new(),
            is_open: false,
            currency,
        }
    }

    /// Add one unit of an item.
    ///
    /// An existing line for the same id has its quantity incremented and keeps its first
    /// name, price and image. Otherwise a new line with quantity 1 is appended. Items priced in
    /// a currency other than the cart's are skipped with a warning.
    pub fn add_item(&mut self, item: CartItem) {
        if item.price.currency() != self.currency {
            warn!(
                item_id = %item.id,
                item_currency = item.price.currency().iso_alpha_code,
                cart_currency = self.currency.iso_alpha_code,
                "skipping item priced in another currency"
            );

            return;
        }

        if let Some(line) = self.line_mut(&item.id) {
            let quantity = line.quantity.saturating_add(1);
            line.set_quantity(quantity);

            debug!(item_id = %line.id, quantity = line.quantity, "incremented cart line");

            return;
        }

        debug!(item_id = %item.id, "added cart line");

        self.lines.push(CartLine::from(item));
    }

    /// Remove the line for an item. Removing an absent id does nothing.
    pub fn remove_item(&mut self, id: &ItemId) {
        let before = self.lines.len();

        self.lines.retain(|line| &line.id != id);

        if self.lines.len() != before {
            debug!(item_id = %id, "removed cart line");
        }
    }

    /// Replace the quantity of an existing line.
    ///
    /// A quantity of zero or less removes the line. Ids without a line are ignored: only
    /// [`Cart::add_item`] creates lines.
    pub fn set_quantity(&mut self, id: &ItemId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        if let Some(line) = self.line_mut(id) {
            line.set_quantity(quantity);

            debug!(item_id = %id, quantity, "updated cart line quantity");
        }
    }

    /// Total number of units across all lines.
    pub fn total_item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Total price of all lines, exact to the minor unit.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if a line total overflows.
    pub fn total_price(&self) -> Result<Money<'static, Currency>, TotalPriceError> {
        total_price(&self.lines, self.currency)
    }

    /// Remove every line. The open flag is left untouched.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Show the cart.
    pub fn open(&mut self) {
        self.set_open(true);
    }

    /// Hide the cart.
    pub fn close(&mut self) {
        self.set_open(false);
    }

    /// Set cart visibility.
    pub fn set_open(&mut self, open: bool) {
        self.is_open = open;
    }

    /// Whether the cart is visible.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Lines in first-add order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Find the line for an item.
    pub fn line(&self, id: &ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency all lines are priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn line_mut(&mut self, id: &ItemId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| &line.id == id)
    }
}

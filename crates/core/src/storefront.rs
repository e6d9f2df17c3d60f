//! Storefront session
//!
//! Binds the menu, its expansion state and the cart for one restaurant visit. Dropping the
//! session ends the cart scope.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    accordion::Accordion,
    cart::{CartError, CartHandle, CartScope},
    config::StorefrontConfig,
    items::ItemId,
    menu::{Menu, MenuState},
};

/// Errors from session operations.
#[derive(Debug, Error, PartialEq)]
pub enum StorefrontError {
    /// The menu has not loaded yet.
    #[error("menu is still loading")]
    Loading,

    /// Cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Outcome of adding a menu item to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// One unit was added
    Added,

    /// No such item on the menu
    UnknownItem,

    /// The item has no price and cannot be bought
    Priceless,
}

/// One menu browsing session.
#[derive(Debug)]
pub struct Storefront {
    config: StorefrontConfig,
    state: MenuState,
    accordion: Accordion,
    cart: CartScope,
}

impl Storefront {
    /// Start a session in the loading state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let cart = CartScope::new(config.currency);

        Self {
            config,
            state: MenuState::Loading,
            accordion: Accordion::default(),
            cart,
        }
    }

    /// Accept a payload update. Payloads without restaurant info leave the session loading.
    pub fn receive_payload(&mut self, payload: &Value) {
        self.state = MenuState::from_payload(Some(payload));

        match self.state.menu() {
            Some(menu) => {
                self.accordion = Accordion::for_menu(menu);

                info!(
                    restaurant = %menu.restaurant.name,
                    items = menu.item_count(),
                    "menu ready"
                );
            }
            None => {
                self.accordion = Accordion::default();

                debug!("payload not ready; still loading");
            }
        }
    }

    /// Session configuration.
    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Menu state.
    pub fn state(&self) -> &MenuState {
        &self.state
    }

    /// Menu, once loaded.
    pub fn menu(&self) -> Option<&Menu> {
        self.state.menu()
    }

    /// Expansion state.
    pub fn accordion(&self) -> &Accordion {
        &self.accordion
    }

    /// Toggle a category.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Loading`] before the menu has loaded.
    pub fn toggle_category(&mut self, title: &str) -> Result<(), StorefrontError> {
        let menu = self.state.menu().ok_or(StorefrontError::Loading)?;

        self.accordion.toggle_category(menu, title);

        Ok(())
    }

    /// Toggle a subcategory of the expanded category.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Loading`] before the menu has loaded.
    pub fn toggle_subcategory(&mut self, title: &str) -> Result<(), StorefrontError> {
        let menu = self.state.menu().ok_or(StorefrontError::Loading)?;

        self.accordion.toggle_subcategory(menu, title);

        Ok(())
    }

    /// A handle to this session's cart.
    pub fn cart(&self) -> CartHandle {
        self.cart.handle()
    }

    /// Add one unit of a menu item to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Loading`] before the menu has loaded.
    pub fn add_menu_item(&self, id: &ItemId) -> Result<AddOutcome, StorefrontError> {
        let menu = self.state.menu().ok_or(StorefrontError::Loading)?;

        let Some(item) = menu.find_item(id) else {
            return Ok(AddOutcome::UnknownItem);
        };

        let Some(cart_item) = item.to_cart_item(self.config.currency) else {
            return Ok(AddOutcome::Priceless);
        };

        self.cart.handle().add_item(cart_item)?;

        Ok(AddOutcome::Added)
    }
}

//! Cart scope
//!
//! A [`CartScope`] owns the cart for one menu browsing session. Components that need the cart
//! are given a [`CartHandle`] explicitly. Once the scope is torn down every handle operation
//! fails with [`CartError::ContextMisuse`].

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    cart::{Cart, CartLine},
    items::{CartItem, ItemId},
    pricing::TotalPriceError,
};

/// Errors from cart handle operations.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// The handle outlived the scope that owns the cart. This is a programming error.
    #[error("cart handle used outside of an active cart scope")]
    ContextMisuse,

    /// The cart is already borrowed, e.g. a handle was used from inside [`CartHandle::with`].
    #[error("cart is already in use")]
    Busy,

    /// Error calculating the cart total.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),
}

/// Owner of a session cart.
#[derive(Debug)]
pub struct CartScope {
    cart: Rc<RefCell<Cart>>,
}

impl CartScope {
    /// Begin a scope with an empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            cart: Rc::new(RefCell::new(Cart::new(currency))),
        }
    }

    /// Hand out access to the cart.
    #[must_use]
    pub fn handle(&self) -> CartHandle {
        CartHandle {
            cart: Rc::downgrade(&self.cart),
        }
    }
}

/// Shared access to a cart owned by a [`CartScope`].
#[derive(Debug, Clone)]
pub struct CartHandle {
    cart: Weak<RefCell<Cart>>,
}

impl CartHandle {
    /// Whether the owning scope is still alive.
    pub fn is_active(&self) -> bool {
        self.cart.strong_count() > 0
    }

    /// See [`Cart::add_item`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ContextMisuse`] if the scope has ended.
    pub fn add_item(&self, item: CartItem) -> Result<(), CartError> {
        self.with_mut(|cart| cart.add_item(item))
    }

    /// See [`Cart::remove_item`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ContextMisuse`] if the scope has ended.
    pub fn remove_item(&self, id: &ItemId) -> Result<(), CartError> {
        self.with_mut(|cart| cart.remove_item(id))
    }

    /// See [`Cart::set_quantity`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ContextMisuse`] if the scope has ended.
    pub fn set_quantity(&self, id: &ItemId, quantity: i64) -> Result<(), CartError> {
        self.with_mut(|cart| cart.set_quantity(id, quantity))
    }

    /// See [`Cart::clear`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ContextMisuse`] if the scope has ended.
    pub fn clear(&self) -> Result<(), CartError> {
        self.with_mut(Cart::clear)
    }

    /// See [`Cart::open`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ContextMisuse`] if the scope has ended.
    pub fn open(&self) -> Result<(), CartError> {
        self.with_mut(Cart::open)
    }

    /// See [`Cart::close`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ContextMisuse`] if the scope has ended.
    pub fn close(&self) -> Result<(), CartError> {
        self.with_mut(Cart::close)
    }

    /// See [`Cart::set_open`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ContextMisuse`] if the scope has ended.
    pub fn set_open(&self, open: bool) -> Result<(), CartError> {
        self.with_mut(|cart| cart.set_open(open))
    }

    /// See [`Cart::is_open`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ContextMisuse`] if the scope has ended.
    pub fn is_open(&self) -> Result<bool, CartError> {
        self.with(Cart::is_open)
    }

    /// See [`Cart::total_item_count`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ContextMisuse`] if the scope has ended.
    pub fn total_item_count(&self) -> Result<u64, CartError> {
        self.with(Cart::total_item_count)
    }

    /// See [`Cart::total_price`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ContextMisuse`] if the scope has ended, or
    /// [`CartError::TotalPrice`] if the total cannot be calculated.
    pub fn total_price(&self) -> Result<Money<'static, Currency>, CartError> {
        let total = self.with(Cart::total_price)??;

        Ok(total)
    }

    /// Snapshot of the current lines.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ContextMisuse`] if the scope has ended.
    pub fn lines(&self) -> Result<Vec<CartLine>, CartError> {
        self.with(|cart| cart.lines().to_vec())
    }

    /// Run a read-only closure against the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ContextMisuse`] if the scope has ended, or [`CartError::Busy`] if the
    /// cart is being modified. Handle mutations made from inside `f` fail with
    /// [`CartError::Busy`].
    pub fn with<T>(&self, f: impl FnOnce(&Cart) -> T) -> Result<T, CartError> {
        let cart = self.cart.upgrade().ok_or(CartError::ContextMisuse)?;
        let cart = cart.try_borrow().map_err(|_err| CartError::Busy)?;

        Ok(f(&cart))
    }

    fn with_mut<T>(&self, f: impl FnOnce(&mut Cart) -> T) -> Result<T, CartError> {
        let cart = self.cart.upgrade().ok_or(CartError::ContextMisuse)?;
        let mut cart = cart.try_borrow_mut().map_err(|_err| CartError::Busy)?;

        Ok(f(&mut cart))
    }
}

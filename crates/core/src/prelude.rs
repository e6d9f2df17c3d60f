//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    accordion::{Accordion, toggled},
    cart::{Cart, CartError, CartHandle, CartLine, CartScope},
    config::StorefrontConfig,
    display::{CartLineView, CartView, MenuItemView, format_price, truncate_description},
    fixtures::{Fixture, FixtureError},
    items::{CartItem, ItemId},
    menu::{
        CategoryItems, CategoryKind, Menu, MenuCategory, MenuError, MenuItem, MenuState,
        RestaurantInfo, Subcategory, normalize,
    },
    pricing::TotalPriceError,
    receipt::{ReceiptError, write_cart},
    storefront::{AddOutcome, Storefront, StorefrontError},
};

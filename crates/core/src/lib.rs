//! Storefront
//!
//! Storefront is the state core of a restaurant menu browser: it normalises third-party menu
//! payloads into a typed menu model and keeps shopping cart state with exact money arithmetic.

pub mod accordion;
pub mod cart;
pub mod config;
pub mod display;
pub mod fixtures;
pub mod items;
pub mod menu;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod storefront;

//! Storefront configuration

use rusty_money::iso::{self, Currency};

use crate::display::DESCRIPTION_DISPLAY_LIMIT;

/// Image CDN prefix that menu `imageId` references are appended to.
pub const DEFAULT_IMAGE_BASE_URL: &str =
    "https://media-assets.swiggy.com/swiggy/image/upload/fl_lossy,f_auto,q_auto,w_300,h_300,c_fit/";

/// Presentation settings shared by the menu and the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    /// Currency all menu prices are expressed in
    pub currency: &'static Currency,

    /// Base URL for item images
    pub image_base_url: String,

    /// Character limit before descriptions are truncated
    pub description_limit: usize,
}

impl StorefrontConfig {
    /// Replace the image base URL.
    #[must_use]
    pub fn with_image_base_url(mut self, image_base_url: impl Into<String>) -> Self {
        self.image_base_url = image_base_url.into();
        self
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency: iso::INR,
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            description_limit: DESCRIPTION_DISPLAY_LIMIT,
        }
    }
}

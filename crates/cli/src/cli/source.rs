use std::path::PathBuf;

use clap::Args;
use serde_json::Value;
use storefront::{
    config::{DEFAULT_IMAGE_BASE_URL, StorefrontConfig},
    fixtures::{Fixture, load_payload},
    menu::MenuState,
    storefront::Storefront,
};
use tracing::info;

const DEFAULT_MENU_API_URL: &str = "https://www.swiggy.com/dapi/menu/pl?page-type=REGULAR_MENU&complete-menu=true&lat=12.9715987&lng=77.5945627&restaurantId=";

const USER_AGENT: &str = concat!("storefront-cli/", env!("CARGO_PKG_VERSION"));

/// Where the raw menu payload comes from.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub(crate) struct PayloadSource {
    /// Read the raw menu payload from a JSON file
    #[arg(long, value_name = "FILE")]
    payload: Option<PathBuf>,

    /// Use a bundled fixture payload by name
    #[arg(long, value_name = "NAME")]
    fixture: Option<String>,

    /// Fetch the menu of this restaurant from the menu API
    #[arg(long, value_name = "ID")]
    restaurant_id: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct SourceArgs {
    #[command(flatten)]
    source: PayloadSource,

    /// Menu API URL; the restaurant id is appended
    #[arg(long, env = "MENU_API_URL", default_value = DEFAULT_MENU_API_URL)]
    menu_api_url: String,

    /// Base URL for item images
    #[arg(long, env = "MENU_IMAGE_BASE_URL", default_value = DEFAULT_IMAGE_BASE_URL)]
    image_base_url: String,
}

impl SourceArgs {
    pub(crate) fn config(&self) -> StorefrontConfig {
        StorefrontConfig::default().with_image_base_url(self.image_base_url.clone())
    }

    pub(crate) async fn load(&self) -> Result<Value, String> {
        if let Some(path) = &self.source.payload {
            return load_payload(path).map_err(|error| format!("failed to load payload: {error}"));
        }

        if let Some(name) = &self.source.fixture {
            return Fixture::new()
                .payload(name)
                .map_err(|error| format!("failed to load fixture {name}: {error}"));
        }

        match &self.source.restaurant_id {
            Some(restaurant_id) => {
                fetch(&format!("{}{restaurant_id}", self.menu_api_url)).await
            }
            None => Err("no payload source given".to_string()),
        }
    }
}

/// Start a session and feed it the payload.
pub(crate) async fn open_storefront(args: &SourceArgs) -> Result<Storefront, String> {
    let mut storefront = Storefront::new(args.config());

    let payload = args.load().await?;

    storefront.receive_payload(&payload);

    match storefront.state() {
        MenuState::Ready(_) => Ok(storefront),
        MenuState::Loading => {
            Err("menu is not ready: payload has no restaurant info".to_string())
        }
    }
}

#[cfg(test)]
impl SourceArgs {
    pub(crate) fn for_fixture(name: &str) -> Self {
        Self {
            source: PayloadSource {
                payload: None,
                fixture: Some(name.to_string()),
                restaurant_id: None,
            },
            menu_api_url: DEFAULT_MENU_API_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }
}

async fn fetch(url: &str) -> Result<Value, String> {
    info!(url, "fetching menu payload");

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|error| format!("failed to build HTTP client: {error}"))?;

    client
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|error| format!("failed to fetch menu: {error}"))?
        .json::<Value>()
        .await
        .map_err(|error| format!("failed to decode menu payload: {error}"))
}

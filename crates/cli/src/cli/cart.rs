use std::io;

use clap::Args;
use storefront::{
    items::ItemId,
    receipt::write_cart,
    storefront::{AddOutcome, Storefront},
};
use tracing::warn;

use super::source::{SourceArgs, open_storefront};

#[derive(Debug, Args)]
pub(crate) struct CartArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Add one unit of a menu item (repeatable)
    #[arg(long = "add", value_name = "ITEM_ID")]
    add: Vec<String>,

    /// Set a line quantity; zero or less removes the line (repeatable)
    #[arg(long = "set", value_name = "ITEM_ID=QTY", value_parser = parse_quantity)]
    set: Vec<(String, i64)>,

    /// Remove a line (repeatable)
    #[arg(long = "remove", value_name = "ITEM_ID")]
    remove: Vec<String>,

    /// Empty the cart after applying the other operations
    #[arg(long)]
    clear: bool,
}

pub(crate) async fn run(args: CartArgs) -> Result<(), String> {
    let storefront = open_storefront(&args.source).await?;

    apply(&storefront, &args)?;

    let cart = storefront.cart();
    let stdout = io::stdout();

    cart.with(|cart| write_cart(stdout.lock(), cart, storefront.config()))
        .map_err(|error| error.to_string())?
        .map_err(|error| format!("failed to write cart: {error}"))
}

/// Apply adds, then quantity updates, then removals.
fn apply(storefront: &Storefront, args: &CartArgs) -> Result<(), String> {
    for id in &args.add {
        let id = ItemId::from(id.as_str());

        match storefront
            .add_menu_item(&id)
            .map_err(|error| error.to_string())?
        {
            AddOutcome::Added => {}
            AddOutcome::UnknownItem => warn!(%id, "no such item on the menu"),
            AddOutcome::Priceless => warn!(%id, "item has no price; not added"),
        }
    }

    let cart = storefront.cart();

    for (id, quantity) in &args.set {
        cart.set_quantity(&ItemId::from(id.as_str()), *quantity)
            .map_err(|error| error.to_string())?;
    }

    for id in &args.remove {
        cart.remove_item(&ItemId::from(id.as_str()))
            .map_err(|error| error.to_string())?;
    }

    if args.clear {
        cart.clear().map_err(|error| error.to_string())?;
    }

    cart.set_open(true).map_err(|error| error.to_string())
}

fn parse_quantity(value: &str) -> Result<(String, i64), String> {
    let (id, quantity) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ITEM_ID=QTY, got `{value}`"))?;

    if id.is_empty() {
        return Err(format!("missing item id in `{value}`"));
    }

    let quantity = quantity
        .trim()
        .parse()
        .map_err(|error| format!("invalid quantity in `{value}`: {error}"))?;

    Ok((id.trim().to_string(), quantity))
}

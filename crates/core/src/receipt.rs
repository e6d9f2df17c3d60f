//! Receipt
//!
//! Plain text rendering of a cart, used by command line front ends.

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    config::StorefrontConfig,
    display::{CartView, EMPTY_CART_MESSAGE},
    pricing::TotalPriceError,
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error calculating a line or cart total.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Write the cart as a table followed by its item count and total.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if totals cannot be calculated or the output cannot be written.
pub fn write_cart(
    mut out: impl io::Write,
    cart: &Cart,
    config: &StorefrontConfig,
) -> Result<(), ReceiptError> {
    let view = CartView::new(cart, config)?;

    if view.lines.is_empty() {
        return writeln!(out, "\n {EMPTY_CART_MESSAGE}\n").map_err(|_err| ReceiptError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Unit Price", "Qty", "Line Total"]);

    for (idx, line) in view.lines.iter().enumerate() {
        builder.push_record([
            format!("#{}", idx + 1),
            line.name.clone(),
            line.unit_price.clone(),
            line.quantity.to_string(),
            line.line_total.clone(),
        ]);
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..5), Alignment::right());

    writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)?;

    let items_val = cart.total_item_count().to_string();
    let total_val = view.total.unwrap_or_default();
    let value_width = items_val.len().max(total_val.len());

    writeln!(out, " Items: {items_val:>value_width$}").map_err(|_err| ReceiptError::IO)?;
    writeln!(out, " \x1b[1mTotal:\x1b[0m {total_val:>value_width$}")
        .map_err(|_err| ReceiptError::IO)?;

    writeln!(out).map_err(|_err| ReceiptError::IO)
}

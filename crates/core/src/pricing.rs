//! Pricing

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::cart::CartLine;

/// Decimal places of a payload minor unit: amounts are hundredths of the major unit.
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Errors that can occur while calculating a cart total.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// A line total does not fit in the minor unit range.
    #[error("line total for item {0} overflows")]
    Overflow(String),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Builds a price from payload minor units (`minor_units / 100` of the major unit).
///
/// The scale is fixed regardless of the currency's own exponent.
pub fn price_from_minor(minor_units: i64, currency: &'static Currency) -> Money<'static, Currency> {
    Money::from_decimal(Decimal::new(minor_units, MINOR_UNIT_SCALE), currency)
}

/// Payload minor units of a price, the inverse of [`price_from_minor`].
///
/// Sub-minor precision rounds to the nearest minor unit. Returns `None` outside the `i64` range.
pub fn minor_units(money: &Money<'_, Currency>) -> Option<i64> {
    let mut amount = *money.amount();
    amount.rescale(MINOR_UNIT_SCALE);

    i64::try_from(amount.mantissa()).ok()
}

/// Converts a loosely typed payload amount into whole minor units.
///
/// Fractional amounts round to the nearest minor unit; non-finite values are rejected.
pub fn minor_units_from_f64(value: f64) -> Option<i64> {
    Decimal::from_f64_retain(value)
        .map(|amount| amount.round_dp(0))
        .and_then(|amount| amount.to_i64())
}

/// Calculates the price of a single cart line (`unit price * quantity`).
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the product does not fit in `i64` minor units.
pub fn line_total(line: &CartLine) -> Result<Money<'static, Currency>, TotalPriceError> {
    let minor = minor_units(line.unit_price())
        .and_then(|unit| unit.checked_mul(i64::from(line.quantity())))
        .ok_or_else(|| TotalPriceError::Overflow(line.id().to_string()))?;

    Ok(price_from_minor(minor, line.unit_price().currency()))
}

/// Calculates the total price of a list of cart lines in the given currency.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: a line total overflowed.
/// - [`TotalPriceError::Money`]: a line was priced in a different currency.
pub fn total_price(
    lines: &[CartLine],
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, TotalPriceError> {
    let total = lines
        .iter()
        .try_fold(price_from_minor(0, currency), |acc, line| {
            Ok::<_, TotalPriceError>(acc.add(line_total(line)?)?)
        })?;

    Ok(total)
}

//! Two-stage half-even money arithmetic.
//!
//! Line totals are carried at [`OPERATION_SCALE`] decimals and running
//! report totals at [`RESULT_SCALE`] decimals. Every rounding step breaks
//! exact ties towards the even digit. The order of the steps is part of
//! the result: summing unrounded line totals first gives different cents.
//!
//! None of these functions panic. A value too large to carry its scale
//! inside a [`Decimal`] gives `None`.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on intermediate products.
pub const OPERATION_SCALE: u32 = 3;

/// Decimal places kept on report amounts.
pub const RESULT_SCALE: u32 = 2;

/// Round `value` half-to-even and fix its scale to exactly `scale` digits.
///
/// Returns `None` when `value` has too many integer digits to carry
/// `scale` decimals.
///
/// # Examples
///
/// ```
/// use fx_settlement_reporting::reporting::rounding::round_half_even;
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_half_even(dec!(0.125), 2).unwrap().to_string(), "0.12");
/// assert_eq!(round_half_even(dec!(0.135), 2).unwrap().to_string(), "0.14");
/// assert_eq!(round_half_even(dec!(7), 2).unwrap().to_string(), "7.00");
/// assert_eq!(round_half_even(Decimal::MAX, 2), None);
/// ```
pub fn round_half_even(value: Decimal, scale: u32) -> Option<Decimal> {
    let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(scale);
    // rescale settles for a smaller scale when the mantissa would overflow.
    (rounded.scale() == scale).then_some(rounded)
}

/// `round(round(agreed_fx * price_per_unit, 3) * units, 3)`, or `None`
/// if either product leaves the representable range.
pub fn line_total(agreed_fx: Decimal, price_per_unit: Decimal, units: u32) -> Option<Decimal> {
    let unit_value = round_half_even(agreed_fx.checked_mul(price_per_unit)?, OPERATION_SCALE)?;
    round_half_even(unit_value.checked_mul(Decimal::from(units))?, OPERATION_SCALE)
}

/// Add a line total to a running report amount, rounding the sum to
/// [`RESULT_SCALE`]. `None` if the exact sum cannot be represented.
pub fn accumulate(running: Decimal, line_total: Decimal) -> Option<Decimal> {
    let sum = running.checked_add(line_total)?;
    if sum.scale() < running.scale().max(line_total.scale()) {
        // The addition dropped digits to fit; the tie would be decided
        // on an already rounded value.
        return None;
    }
    round_half_even(sum, RESULT_SCALE)
}

/// Fold `amounts` through [`accumulate`] starting from `0.00`.
pub fn checked_sum<I: IntoIterator<Item = Decimal>>(amounts: I) -> Option<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::new(0, RESULT_SCALE), accumulate)
}

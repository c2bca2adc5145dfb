//! Money helpers using rust_decimal for exact arithmetic
//!
//! Every accepted price is rounded to 2 decimal places (half away from zero)
//! and rescaled so it always prints with two digits, e.g. `3` -> `3.00`.

use rust_decimal::prelude::*;
use serde_json::Value;

/// Rounding precision for prices and totals
const DECIMAL_PLACES: u32 = 2;

/// Largest accepted item price and order total (10 digits, 2 decimal places)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, DECIMAL_PLACES);

/// Smallest positive amount, `0.01`
pub const CENT: Decimal = Decimal::from_parts(1, 0, 0, false, DECIMAL_PLACES);

/// Round to 2 decimal places, half away from zero, and fix the scale at 2
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DECIMAL_PLACES);
    rounded
}

/// Round an accepted positive price; anything below a cent becomes `0.01`
pub fn round_price(value: Decimal) -> Decimal {
    round_money(value).max(CENT)
}

/// Add two amounts, `None` when the sum leaves the accepted range
pub fn checked_sum(a: Decimal, b: Decimal) -> Option<Decimal> {
    a.checked_add(b).filter(|sum| *sum <= MAX_AMOUNT)
}

/// Zero with the money scale (`0.00`)
pub fn zero() -> Decimal {
    Decimal::new(0, DECIMAL_PLACES)
}

/// Interpret a raw JSON price
///
/// Accepts JSON numbers and numeric strings (`"4.50"`, `" 3 "`, `"1e2"`).
/// Returns `None` for anything else, including booleans, null and
/// strings such as `"NaN"`.
pub fn parse_price(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            parse_decimal_str(&n.to_string()).or_else(|| n.as_f64().and_then(Decimal::from_f64))
        }
        Value::String(s) => parse_decimal_str(s.trim()),
        _ => None,
    }
}

fn parse_decimal_str(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

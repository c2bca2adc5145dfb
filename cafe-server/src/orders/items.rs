//! Item list operations shared by the customer and staff update paths

use rust_decimal::Decimal;
use shared::models::OrderItem;

use super::money;

/// Same name and numerically equal price (`3.0` equals `3.00`)
pub fn is_duplicate(a: &OrderItem, b: &OrderItem) -> bool {
    a.name == b.name && a.price == b.price
}

/// Append `incoming` to `existing`, skipping items already present
///
/// Duplicates are checked against `existing` as it was when the call
/// started, so repeated items inside `incoming` are all appended.
pub fn merge_items(existing: &[OrderItem], incoming: Vec<OrderItem>) -> Vec<OrderItem> {
    let mut merged = existing.to_vec();
    for item in incoming {
        if existing.iter().any(|e| is_duplicate(e, &item)) {
            tracing::debug!(name = %item.name, price = %item.price, "Skipping duplicate item");
            continue;
        }
        merged.push(item);
    }
    merged
}

/// Drop items at the given positions; out-of-range and repeated indices are ignored
pub fn remove_indices(items: &[OrderItem], indices: &[usize]) -> Vec<OrderItem> {
    items
        .iter()
        .enumerate()
        .filter(|(i, _)| !indices.contains(i))
        .map(|(_, item)| item.clone())
        .collect()
}

/// Exact sum of item prices with money scale; `0.00` for an empty list
///
/// `None` when the sum exceeds [`money::MAX_AMOUNT`].
pub fn total_price(items: &[OrderItem]) -> Option<Decimal> {
    items
        .iter()
        .try_fold(money::zero(), |acc, item| money::checked_sum(acc, item.price))
        .map(money::round_money)
}

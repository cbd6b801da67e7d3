use chrono::{DateTime, Duration, Utc};
use crate::domain::models::cart::{CartItemDetail, CartSummary, ExpiryNotification};
use std::collections::HashSet;

/// Flat credit per full block of ten cart items, in pence. Models "every
/// 10th lesson is free" as money off the total, not an item substitution.
pub const FIXED_BLOCK_DISCOUNT_PENCE: i64 = 1500;
pub const BLOCK_SIZE: i64 = 10;

pub fn block_discount_pence(item_count: usize) -> i64 {
    (item_count as i64 / BLOCK_SIZE) * FIXED_BLOCK_DISCOUNT_PENCE
}

pub fn summarize(items: Vec<CartItemDetail>) -> CartSummary {
    let subtotal: i64 = items.iter().map(|i| i.price_pence).sum();
    let discount = block_discount_pence(items.len());
    let final_price = (subtotal - discount).max(0);

    CartSummary {
        items,
        subtotal_pence: subtotal,
        discount_pence: discount,
        final_price_pence: final_price,
    }
}

/// Splits the combined discount proportionally across item prices so each
/// booking carries an individually discounted charge. Integer division
/// truncates; the remainder is folded into the last item so the charges sum
/// exactly to `final_price - total_discount`. A discount meeting or
/// exceeding the final price clamps every charge to zero.
pub fn distribute_discount(prices: &[i64], final_price_pence: i64, total_discount_pence: i64) -> Vec<i64> {
    if prices.is_empty() {
        return Vec::new();
    }
    if total_discount_pence >= final_price_pence || final_price_pence <= 0 {
        return vec![0; prices.len()];
    }

    let payable = final_price_pence - total_discount_pence;
    let mut charges: Vec<i64> = prices
        .iter()
        .map(|p| p * payable / final_price_pence)
        .collect();

    let assigned: i64 = charges.iter().sum();
    if let Some(last) = charges.last_mut() {
        *last += payable - assigned;
    }
    charges
}

/// Items lapsing within the notice window that the caller has not dismissed.
/// The dismissed set is client-local state, re-supplied on every read.
pub fn expiry_notifications(
    items: &[CartItemDetail],
    now: DateTime<Utc>,
    notice_minutes: i64,
    dismissed: &HashSet<String>,
) -> Vec<ExpiryNotification> {
    let horizon = now + Duration::minutes(notice_minutes);

    items
        .iter()
        .filter(|i| i.expires_at > now && i.expires_at <= horizon && !dismissed.contains(&i.id))
        .map(|i| ExpiryNotification {
            id: i.id.clone(),
            tutor_name: i.tutor_name.clone(),
            start_time: i.start_time,
            expires_at: i.expires_at,
        })
        .collect()
}

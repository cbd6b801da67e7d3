use serde::Serialize;
use crate::domain::models::cart::CartSummary;
use crate::error::AppError;

/// The only codes the reconciler accepts: full-discount, first lesson only.
/// Partial-percentage codes are not supported.
pub const FIRST_LESSON_PROMO_CODES: [&str; 2] = ["FIRSTFREE", "TUTORIAL100"];

/// Returns the promo discount in pence (always 100% of the final price).
/// Unknown codes and learners with completed lessons fail typed; in both
/// cases the caller's promo discount stays untouched at zero.
pub fn validate_promo(code: &str, completed_lessons: i64, final_price_pence: i64) -> Result<i64, AppError> {
    let normalized = code.trim().to_uppercase();

    if !FIRST_LESSON_PROMO_CODES.contains(&normalized.as_str()) {
        return Err(AppError::InvalidPromoCode(format!("Unknown code '{}'", code)));
    }
    if completed_lessons > 0 {
        return Err(AppError::PromoIneligible(
            "This code is only valid for your first lesson".into(),
        ));
    }

    Ok(final_price_pence)
}

/// Snapshot of the reconciler's arithmetic for one cart state. Recomputed
/// from scratch whenever the balance, the price, or the promo changes.
#[derive(Debug, Serialize, Clone)]
pub struct CheckoutQuote {
    pub item_count: i64,
    pub subtotal_pence: i64,
    pub block_discount_pence: i64,
    pub final_price_pence: i64,
    pub promo_discount_pence: i64,
    pub referral_applied_pence: i64,
    pub total_discount_pence: i64,
    pub payable_pence: i64,
    pub credit_balance: i64,
    pub credits_eligible: bool,
}

pub fn build_quote(
    summary: &CartSummary,
    promo_discount_pence: i64,
    referral_balance_pence: i64,
    credit_balance: i64,
) -> CheckoutQuote {
    let final_price = summary.final_price_pence;
    let item_count = summary.items.len() as i64;

    // Referral balance is auto-applied, never opt-in, capped by what the
    // promo left over.
    let referral_applied = referral_balance_pence
        .min(final_price - promo_discount_pence)
        .max(0);

    let total_discount = (promo_discount_pence + referral_applied).min(final_price);
    let payable = final_price - total_discount;

    CheckoutQuote {
        item_count,
        subtotal_pence: summary.subtotal_pence,
        block_discount_pence: summary.discount_pence,
        final_price_pence: final_price,
        promo_discount_pence,
        referral_applied_pence: referral_applied,
        total_discount_pence: total_discount,
        payable_pence: payable,
        credit_balance,
        credits_eligible: item_count > 0 && credit_balance >= item_count,
    }
}

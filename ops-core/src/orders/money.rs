//! Money calculation utilities and the pricing engine
//!
//! All calculations are done using `Decimal` internally, then converted
//! to `f64` for storage/serialization. The pricing engine is a pure
//! function of the order snapshot and the pending edits, so the editor
//! can call it on every keystroke.

use chrono::{NaiveDate, Utc};
use rust_decimal::prelude::*;
use shared::models::{DiscountType, Order, PricingUpdate};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.05). Mirrors
/// [`shared::models::order::BALANCE_EPSILON`] for Decimal math.
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Tax rate applied to the discounted subtotal when the order is
/// invoiced (0.15)
const TAX_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Lenient monetary parsing: comma or dot decimal separator, surrounding
/// whitespace ignored, empty or non-numeric input degrades to 0. Data
/// entry must never throw.
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim().replace(',', ".").parse::<f64>().unwrap_or(0.0)
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Derived pricing fields returned by [`compute_totals`]
#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    pub rental_days: i64,
    /// Effective date list (falls back to `[today]` when empty)
    pub execution_dates: Vec<NaiveDate>,
    /// Primary date, always `execution_dates[0]`
    pub execution_date: NaiveDate,
    /// Subtotal after discount, before tax and delivery. Not clamped:
    /// an over-discount legally drives it negative (a credit).
    pub net_subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
}

/// Pricing engine: merge `update` onto `order` and derive the totals.
///
/// - `days = max(1, dates.len())`, empty dates fall back to today
/// - raw subtotal = Σ price_at_booking · quantity · days
/// - discount: percentage of the raw subtotal or an absolute value
/// - 15% tax on the discounted subtotal iff `has_invoice`
/// - delivery added last, untaxed
///
/// Pure: no persistence, no hidden state, never errors (monetary strings
/// parse leniently).
pub fn compute_totals(order: &Order, update: &PricingUpdate) -> Totals {
    let items = update.items.as_deref().unwrap_or(&order.items);

    let mut dates = update
        .execution_dates
        .clone()
        .unwrap_or_else(|| order.execution_dates.clone());
    if dates.is_empty() {
        dates.push(Utc::now().date_naive());
    }
    let days = dates.len().max(1) as i64;

    let discount = match &update.discount {
        Some(raw) => parse_amount(raw),
        None => order.discount_percentage,
    };
    let discount_type = update.discount_type.unwrap_or(order.discount_type);
    let delivery = match &update.delivery_cost {
        Some(raw) => parse_amount(raw),
        None => order.delivery_cost,
    };
    let has_invoice = update.has_invoice.unwrap_or(order.has_invoice);

    let mut subtotal_raw = Decimal::ZERO;
    for item in items {
        subtotal_raw +=
            to_decimal(item.price_at_booking) * Decimal::from(item.quantity) * Decimal::from(days);
    }

    let discount_amount = match discount_type {
        DiscountType::Percent => {
            (subtotal_raw * to_decimal(discount) / Decimal::ONE_HUNDRED).round_dp(DECIMAL_PLACES)
        }
        DiscountType::Value => to_decimal(discount),
    };

    // No clamp on over-discount: the negative total is an explicit policy
    let net_subtotal = subtotal_raw - discount_amount;

    let tax_amount = if has_invoice {
        (net_subtotal * TAX_RATE).round_dp(DECIMAL_PLACES)
    } else {
        Decimal::ZERO
    };

    let total = net_subtotal + tax_amount + to_decimal(delivery);

    Totals {
        rental_days: days,
        execution_date: dates[0],
        execution_dates: dates,
        net_subtotal: to_f64(net_subtotal),
        tax_amount: to_f64(tax_amount),
        total: to_f64(total),
    }
}

/// Merge a pricing update onto an order and refresh every derived field.
/// The caller persists; this only mutates the in-memory document.
pub fn apply_pricing(order: &mut Order, update: &PricingUpdate) -> Totals {
    let totals = compute_totals(order, update);

    if let Some(items) = &update.items {
        order.items = items.clone();
    }
    if let Some(raw) = &update.discount {
        order.discount_percentage = parse_amount(raw);
    }
    if let Some(dt) = update.discount_type {
        order.discount_type = dt;
    }
    if let Some(raw) = &update.delivery_cost {
        order.delivery_cost = parse_amount(raw);
    }
    if let Some(v) = update.has_invoice {
        order.has_invoice = v;
    }
    order.execution_dates = totals.execution_dates.clone();
    order.execution_date = totals.execution_date;
    order.rental_days = totals.rental_days;
    order.total = totals.total;
    order.updated_at = Utc::now();

    totals
}

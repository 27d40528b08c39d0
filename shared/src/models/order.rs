//! Order Model
//!
//! The central entity of the system: a rental booking progressing from
//! quote to archival. Pricing fields are owned by the order editor,
//! `status` by the dispatch/return flows, `transactions` by the payments
//! register and `withheld_amount` by accounting. Archival is a status
//! (`FINISHED`/`CANCELLED`), never a delete.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Tolerance for monetary comparisons. All balance/paid checks use this
/// epsilon instead of exact equality to absorb floating-point noise.
pub const BALANCE_EPSILON: f64 = 0.05;

/// Order status - the full set observed across the quoting, dispatch,
/// return and accounting screens. Exactly one source of truth per order;
/// every board derives its working set by filtering on this field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Quote,
    Reserved,
    Confirmed,
    Dispatched,
    Delivered,
    InProgress,
    /// Return intake with reported issues. Some screens label this
    /// state "WITH_ISSUES"; it is the same status value.
    #[serde(alias = "WITH_ISSUES")]
    PartialReturn,
    Returned,
    Finished,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Finished | OrderStatus::Returned | OrderStatus::Cancelled
        )
    }
}

/// Discount semantics: a percentage of the raw subtotal or an absolute
/// amount. One or the other, never both.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    #[default]
    Percent,
    Value,
}

/// Payment method recorded on a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Transfer,
    Card,
    Check,
}

/// Derived payment standing of an order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Nothing collected yet
    #[default]
    Credit,
    /// Partially collected
    Partial,
    /// Collected in full (within tolerance, withholdings included)
    Paid,
}

/// Order line item. `price_at_booking` is a snapshot of the catalog price
/// at the time the item was added; it is never recomputed from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Inventory item reference (String ID)
    pub item_id: String,
    /// Name snapshot for receipts
    pub name: String,
    pub quantity: i32,
    /// Price per unit per rental day, in currency unit
    pub price_at_booking: f64,
}

/// Payment transaction. Voided transactions stay in the list with
/// `is_void` set; only an explicit hard delete removes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentTransaction {
    pub id: String,
    /// Human-readable receipt code, allocated atomically at registration
    pub receipt_code: String,
    pub date: DateTime<Utc>,
    /// Amount in currency unit
    pub amount: f64,
    pub method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    /// Operator name snapshot
    pub recorded_by: String,
    pub order_number: i64,
    #[serde(default)]
    pub is_void: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub void_reason: Option<String>,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Assigned by the document store on first save
    pub id: Option<String>,
    /// Sequential, allocated once at creation, never reused
    pub order_number: i64,
    /// Client reference (String ID)
    pub client_id: String,
    /// Client name snapshot, not live-joined
    pub client_name: String,
    pub items: Vec<OrderItem>,
    /// Calendar dates the rental spans
    pub execution_dates: Vec<NaiveDate>,
    /// Primary date, kept in sync with `execution_dates[0]`
    pub execution_date: NaiveDate,
    /// Derived: `max(1, execution_dates.len())`
    pub rental_days: i64,
    pub discount_percentage: f64,
    pub discount_type: DiscountType,
    /// Flat fee added after tax, never taxed
    pub delivery_cost: f64,
    /// When set, 15% tax applies to the discounted subtotal
    pub has_invoice: bool,
    /// Derived cache: discounted subtotal + tax + delivery. Recomputed by
    /// every pricing-affecting edit, never hand-edited elsewhere.
    pub total: f64,
    /// Cumulative tax withholdings applied by accounting; reduces the
    /// balance without being a payment
    pub withheld_amount: f64,
    pub transactions: Vec<PaymentTransaction>,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse_exit_number: Option<String>,
    /// Set by the invoicing flow, which lives outside this engine. Kept
    /// on the document so round-tripping an invoiced order preserves it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_notes: Option<String>,
    /// Monotonic document version; the store rejects a save whose version
    /// does not match the stored one
    #[serde(default)]
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Sum of non-void transaction amounts. Derived on every read rather
    /// than kept as a running counter, so voids can never drift.
    pub fn paid_amount(&self) -> f64 {
        self.transactions
            .iter()
            .filter(|t| !t.is_void)
            .map(|t| t.amount)
            .sum()
    }

    /// Raw outstanding amount: `total - paid - withheld`. May be negative
    /// after an overpayment.
    pub fn balance(&self) -> f64 {
        self.total - self.paid_amount() - self.withheld_amount
    }

    /// UI-facing balance, floored at zero.
    pub fn display_balance(&self) -> f64 {
        self.balance().max(0.0)
    }

    /// Check if collected in full, withholdings included.
    pub fn is_fully_paid(&self) -> bool {
        self.paid_amount() + self.withheld_amount >= self.total - BALANCE_EPSILON
    }

    /// Derived payment standing.
    pub fn payment_status(&self) -> PaymentStatus {
        if self.is_fully_paid() {
            PaymentStatus::Paid
        } else if self.paid_amount() > 0.0 {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Credit
        }
    }
}

/// Pricing-affecting field updates coming from the order editor. Monetary
/// fields arrive as the raw operator-typed strings; parsing is lenient
/// (comma or dot decimal separator, anything else degrades to 0).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_dates: Option<Vec<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<DiscountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_invoice: Option<bool>,
}

/// Create order payload from the order editor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    pub client_id: String,
    pub client_name: String,
    pub items: Vec<OrderItem>,
    pub execution_dates: Vec<NaiveDate>,
    /// Raw discount input as typed
    pub discount: String,
    pub discount_type: DiscountType,
    /// Raw delivery cost input as typed
    pub delivery_cost: String,
    pub has_invoice: bool,
    /// Create directly in RESERVED instead of QUOTE
    #[serde(default)]
    pub reserved: bool,
}

/// Payment registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInput {
    /// Raw amount input as typed
    pub amount: String,
    pub method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
}

//! Balance ledger
//!
//! Pure mutations over the order's transaction list and withholding
//! counter. The ledger never persists; actions hand the updated document
//! to the store. Paid amount is always derived by folding non-void
//! transactions ([`Order::paid_amount`]), so voiding and deleting need no
//! counter bookkeeping.

use rust_decimal::Decimal;
use shared::models::{Order, PaymentTransaction};

use super::error::OrderError;
use super::money::{to_decimal, to_f64, MONEY_TOLERANCE};

/// Outstanding balance computed in Decimal: `total - paid - withheld`.
/// Raw value, may be negative after an overpayment.
pub fn balance(order: &Order) -> Decimal {
    to_decimal(order.total) - to_decimal(order.paid_amount()) - to_decimal(order.withheld_amount)
}

/// Whether registering `amount` would exceed the outstanding balance
/// beyond tolerance. Overpayment is allowed, but only after the operator
/// confirms.
pub fn is_overpayment(order: &Order, amount: f64) -> bool {
    to_decimal(amount) > balance(order) + MONEY_TOLERANCE
}

/// Append a freshly registered transaction.
pub fn append_payment(order: &mut Order, transaction: PaymentTransaction) {
    order.transactions.push(transaction);
}

/// Mark a transaction void, keeping it in the list for the audit trail.
/// A non-empty reason is required.
pub fn void_transaction(
    order: &mut Order,
    transaction_id: &str,
    reason: &str,
) -> Result<(), OrderError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(OrderError::ValidationFailed(
            "a void reason is required".to_string(),
        ));
    }

    let transaction = order
        .transactions
        .iter_mut()
        .find(|t| t.id == transaction_id)
        .ok_or_else(|| OrderError::TransactionNotFound(transaction_id.to_string()))?;

    if transaction.is_void {
        return Err(OrderError::ValidationFailed(
            "the transaction is already void".to_string(),
        ));
    }

    transaction.is_void = true;
    transaction.void_reason = Some(reason.to_string());
    Ok(())
}

/// Physically remove a transaction. Irreversible; callers gate this
/// behind an explicit confirmation.
pub fn delete_transaction(
    order: &mut Order,
    transaction_id: &str,
) -> Result<PaymentTransaction, OrderError> {
    let idx = order
        .transactions
        .iter()
        .position(|t| t.id == transaction_id)
        .ok_or_else(|| OrderError::TransactionNotFound(transaction_id.to_string()))?;
    Ok(order.transactions.remove(idx))
}

/// Accumulate a withholding against the order. Does not touch the
/// transaction list.
pub fn apply_withholding(order: &mut Order, amount: f64) -> Result<(), OrderError> {
    if amount <= 0.0 {
        return Err(OrderError::InvalidAmount);
    }
    order.withheld_amount = to_f64(to_decimal(order.withheld_amount) + to_decimal(amount));
    Ok(())
}

use shared::models::OrderStatus;
use thiserror::Error;

use crate::store::StoreError;

/// Order engine errors
///
/// `ValidationFailed` carries the business-worded message the UI shows
/// verbatim; the other variants are mapped by the screens. Store failures
/// keep their underlying message for diagnostics.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("{0}")]
    ValidationFailed(String),

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Illegal transition: {from:?} -> {to:?}")]
    IllegalTransition { from: OrderStatus, to: OrderStatus },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The operator backed out of a confirmation prompt. Normal control
    /// flow, not a failure; state is unchanged.
    #[error("Cancelled by operator")]
    ConfirmationDeclined,
}

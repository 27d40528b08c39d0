//! Order state machine and board filters
//!
//! Initial state is always `QUOTE` (direct creation in `RESERVED` is the
//! one sanctioned shortcut). `FINISHED`, `RETURNED` and `CANCELLED` are
//! terminal. Legacy documents may carry `IN_PROGRESS` (behaves like
//! `DELIVERED`) or `RETURNED`.
//!
//! The table below is pure; transition side effects (stock replenishment,
//! note recording) live in the action handlers.

use chrono::NaiveDate;
use shared::models::{Order, OrderStatus, BALANCE_EPSILON};

use super::error::OrderError;

/// Legal status transitions.
pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;
    match (from, to) {
        // Order editor: a quote becomes an active reservation
        (Quote, Reserved) => true,
        // Quoting module: confirm (requires a warehouse-exit number,
        // enforced by the action) or cancel
        (Quote, Confirmed) => true,
        (Quote, Cancelled) => true,
        // Dispatch flow
        (Confirmed | Reserved, Dispatched) => true,
        (Dispatched, Delivered) => true,
        // Return intake, with or without issues. InProgress is legacy
        // data and behaves like Delivered.
        (Delivered | Dispatched | PartialReturn | InProgress, Finished) => true,
        (Delivered | Dispatched | PartialReturn | InProgress, PartialReturn) => true,
        _ => false,
    }
}

/// Gate a transition, leaving the order untouched on failure.
pub fn ensure_transition(order: &Order, to: OrderStatus) -> Result<(), OrderError> {
    if can_transition(order.status, to) {
        Ok(())
    } else {
        Err(OrderError::IllegalTransition {
            from: order.status,
            to,
        })
    }
}

/// Dispatch board: confirmed or already-dispatched orders whose primary
/// date has not passed.
pub fn dispatch_eligible(orders: &[Order], today: NaiveDate) -> Vec<&Order> {
    orders
        .iter()
        .filter(|o| {
            matches!(o.status, OrderStatus::Confirmed | OrderStatus::Dispatched)
                && o.execution_date >= today
        })
        .collect()
}

/// Pickup board: goods out in the field whose primary date has arrived.
pub fn pickup_eligible(orders: &[Order], today: NaiveDate) -> Vec<&Order> {
    orders
        .iter()
        .filter(|o| {
            matches!(
                o.status,
                OrderStatus::Delivered
                    | OrderStatus::Dispatched
                    | OrderStatus::InProgress
                    | OrderStatus::PartialReturn
            ) && o.execution_date <= today
        })
        .collect()
}

/// Collections view: non-cancelled orders still owing money.
pub fn pending_balance(orders: &[Order]) -> Vec<&Order> {
    orders
        .iter()
        .filter(|o| o.status != OrderStatus::Cancelled && o.balance() > BALANCE_EPSILON)
        .collect()
}

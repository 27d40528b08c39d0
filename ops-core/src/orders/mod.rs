//! Order engine
//!
//! - **money**: lenient monetary parsing and the pure pricing engine
//! - **ledger**: balance derivation and payment-list mutations
//! - **lifecycle**: the status transition table and board filters
//! - **actions**: one command handler per user-visible operation
//! - **manager**: the facade the screens call; persists and broadcasts
//!
//! Money reconciles through the ledger, stock reconciles through the
//! return-intake side effects, and status never forks: every screen
//! filters the same authoritative `status` field.

pub mod actions;
pub mod error;
pub mod ledger;
pub mod lifecycle;
pub mod manager;
pub mod money;

#[cfg(test)]
pub(crate) mod testkit;

// Re-exports
pub use error::OrderError;
pub use manager::OrdersManager;
pub use money::{compute_totals, parse_amount, Totals, MONEY_TOLERANCE};

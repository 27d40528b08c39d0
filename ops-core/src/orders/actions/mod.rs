//! Command handlers
//!
//! One file per user-visible operation. Each handler validates, runs the
//! pure pricing/ledger/lifecycle logic, and persists the result through
//! the store handle in its context. Validation failures leave the stored
//! document untouched; the operator resubmits, there is no retry.

pub mod apply_withholding;
pub mod cancel_order;
pub mod confirm_quote;
pub mod create_order;
pub mod deliver_order;
pub mod delete_transaction;
pub mod dispatch_order;
pub mod register_payment;
pub mod reserve_order;
pub mod return_intake;
pub mod update_order;
pub mod void_transaction;
pub mod write_off;

pub use apply_withholding::ApplyWithholdingAction;
pub use cancel_order::CancelOrderAction;
pub use confirm_quote::ConfirmQuoteAction;
pub use create_order::CreateOrderAction;
pub use deliver_order::DeliverOrderAction;
pub use delete_transaction::DeleteTransactionAction;
pub use dispatch_order::DispatchOrderAction;
pub use register_payment::RegisterPaymentAction;
pub use reserve_order::ReserveOrderAction;
pub use return_intake::ReturnIntakeAction;
pub use update_order::UpdateOrderAction;
pub use void_transaction::VoidTransactionAction;
pub use write_off::WriteOffAction;

use async_trait::async_trait;

use crate::context::{Interaction, OperatorContext};
use crate::orders::error::OrderError;
use crate::store::DocumentStore;

/// Execution context handed to every command handler
pub struct CommandContext<'a> {
    pub store: &'a dyn DocumentStore,
    pub interaction: &'a dyn Interaction,
    pub operator: &'a OperatorContext,
}

/// Command handler contract
#[async_trait]
pub trait CommandHandler {
    type Output;

    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<Self::Output, OrderError>;
}

//! DeleteTransaction command handler
//!
//! Physically removes a transaction from the order. Irreversible, so it
//! is Admin-only and confirmation-gated; the usual correction path is a
//! void, which keeps the audit trail.

use async_trait::async_trait;
use chrono::Utc;
use shared::models::Order;

use super::{CommandContext, CommandHandler};
use crate::orders::error::OrderError;
use crate::orders::ledger;

/// DeleteTransaction action
#[derive(Debug, Clone)]
pub struct DeleteTransactionAction {
    pub order_id: String,
    pub transaction_id: String,
}

#[async_trait]
impl CommandHandler for DeleteTransactionAction {
    type Output = Order;

    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<Order, OrderError> {
        if !ctx.operator.role.is_admin() {
            return Err(OrderError::PermissionDenied(
                "only an administrator can delete transactions".to_string(),
            ));
        }

        let mut order = ctx.store.get_order(&self.order_id).await?;

        let prompt = format!(
            "Permanently delete this transaction from order #{}? The receipt trail is lost.",
            order.order_number
        );
        if !ctx.interaction.confirm(&prompt).await {
            return Err(OrderError::ConfirmationDeclined);
        }

        let removed = ledger::delete_transaction(&mut order, &self.transaction_id)?;
        order.updated_at = Utc::now();

        let saved = ctx.store.save_order(order).await?;
        tracing::warn!(
            order_number = saved.order_number,
            receipt_code = %removed.receipt_code,
            amount = removed.amount,
            operator = %ctx.operator.operator_name,
            "transaction hard-deleted"
        );
        Ok(saved)
    }
}

//! VoidTransaction command handler
//!
//! Marks a transaction void with the recorded reason. The transaction
//! stays in the list for the audit trail; the derived paid amount drops
//! it automatically.

use async_trait::async_trait;
use chrono::Utc;
use shared::models::Order;

use super::{CommandContext, CommandHandler};
use crate::orders::error::OrderError;
use crate::orders::ledger;

/// VoidTransaction action
#[derive(Debug, Clone)]
pub struct VoidTransactionAction {
    pub order_id: String,
    pub transaction_id: String,
    pub reason: String,
}

#[async_trait]
impl CommandHandler for VoidTransactionAction {
    type Output = Order;

    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<Order, OrderError> {
        let mut order = ctx.store.get_order(&self.order_id).await?;
        ledger::void_transaction(&mut order, &self.transaction_id, &self.reason)?;
        order.updated_at = Utc::now();

        let saved = ctx.store.save_order(order).await?;
        tracing::info!(
            order_number = saved.order_number,
            transaction_id = %self.transaction_id,
            reason = %self.reason,
            operator = %ctx.operator.operator_name,
            "transaction voided"
        );
        Ok(saved)
    }
}

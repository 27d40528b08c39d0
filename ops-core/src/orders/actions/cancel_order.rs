//! CancelOrder command handler
//!
//! `QUOTE -> CANCELLED`, terminal. Cancellation is an archival status,
//! never a delete; the document stays queryable.

use async_trait::async_trait;
use chrono::Utc;
use shared::models::{Order, OrderStatus};

use super::{CommandContext, CommandHandler};
use crate::orders::error::OrderError;
use crate::orders::lifecycle;

/// CancelOrder action
#[derive(Debug, Clone)]
pub struct CancelOrderAction {
    pub order_id: String,
}

#[async_trait]
impl CommandHandler for CancelOrderAction {
    type Output = Order;

    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<Order, OrderError> {
        let mut order = ctx.store.get_order(&self.order_id).await?;
        lifecycle::ensure_transition(&order, OrderStatus::Cancelled)?;

        order.status = OrderStatus::Cancelled;
        order.updated_at = Utc::now();

        let saved = ctx.store.save_order(order).await?;
        tracing::info!(
            order_number = saved.order_number,
            operator = %ctx.operator.operator_name,
            "quote cancelled"
        );
        Ok(saved)
    }
}

//! ConfirmQuote command handler
//!
//! `QUOTE -> CONFIRMED`. The warehouse-exit number proves the goods are
//! cleared to leave the warehouse; without it the transition is blocked
//! and the order is left unchanged.

use async_trait::async_trait;
use chrono::Utc;
use shared::models::{Order, OrderStatus};

use super::{CommandContext, CommandHandler};
use crate::orders::error::OrderError;
use crate::orders::lifecycle;

/// ConfirmQuote action
#[derive(Debug, Clone)]
pub struct ConfirmQuoteAction {
    pub order_id: String,
    pub warehouse_exit_number: String,
}

#[async_trait]
impl CommandHandler for ConfirmQuoteAction {
    type Output = Order;

    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<Order, OrderError> {
        let exit_number = self.warehouse_exit_number.trim();
        if exit_number.is_empty() {
            return Err(OrderError::ValidationFailed(
                "a warehouse exit number is required to confirm".to_string(),
            ));
        }

        let mut order = ctx.store.get_order(&self.order_id).await?;
        lifecycle::ensure_transition(&order, OrderStatus::Confirmed)?;

        order.status = OrderStatus::Confirmed;
        order.warehouse_exit_number = Some(exit_number.to_string());
        order.updated_at = Utc::now();

        let saved = ctx.store.save_order(order).await?;
        tracing::info!(
            order_number = saved.order_number,
            warehouse_exit_number = exit_number,
            operator = %ctx.operator.operator_name,
            "quote confirmed"
        );
        Ok(saved)
    }
}

//! DeliverOrder command handler
//!
//! `DISPATCHED -> DELIVERED`: the driver confirms the goods reached the
//! event site.

use async_trait::async_trait;
use chrono::Utc;
use shared::models::{Order, OrderStatus};

use super::{CommandContext, CommandHandler};
use crate::orders::error::OrderError;
use crate::orders::lifecycle;

/// DeliverOrder action
#[derive(Debug, Clone)]
pub struct DeliverOrderAction {
    pub order_id: String,
}

#[async_trait]
impl CommandHandler for DeliverOrderAction {
    type Output = Order;

    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<Order, OrderError> {
        let mut order = ctx.store.get_order(&self.order_id).await?;
        lifecycle::ensure_transition(&order, OrderStatus::Delivered)?;

        order.status = OrderStatus::Delivered;
        order.updated_at = Utc::now();

        let saved = ctx.store.save_order(order).await?;
        tracing::info!(order_number = saved.order_number, "delivery confirmed");
        Ok(saved)
    }
}

//! ReserveOrder command handler
//!
//! `QUOTE -> RESERVED`: the order editor promotes a saved quote to an
//! active reservation. No paperwork required yet; the warehouse-exit
//! number only becomes mandatory at confirmation.

use async_trait::async_trait;
use chrono::Utc;
use shared::models::{Order, OrderStatus};

use super::{CommandContext, CommandHandler};
use crate::orders::error::OrderError;
use crate::orders::lifecycle;

/// ReserveOrder action
#[derive(Debug, Clone)]
pub struct ReserveOrderAction {
    pub order_id: String,
}

#[async_trait]
impl CommandHandler for ReserveOrderAction {
    type Output = Order;

    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<Order, OrderError> {
        let mut order = ctx.store.get_order(&self.order_id).await?;
        lifecycle::ensure_transition(&order, OrderStatus::Reserved)?;

        order.status = OrderStatus::Reserved;
        order.updated_at = Utc::now();

        let saved = ctx.store.save_order(order).await?;
        tracing::info!(
            order_number = saved.order_number,
            operator = %ctx.operator.operator_name,
            "quote reserved"
        );
        Ok(saved)
    }
}

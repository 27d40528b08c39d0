//! ApplyWithholding command handler
//!
//! Accounting registers a client's tax withholding against a specific
//! order. Reduces the effective balance without being a payment; the
//! transaction list is untouched.

use async_trait::async_trait;
use chrono::Utc;
use shared::models::Order;

use super::{CommandContext, CommandHandler};
use crate::orders::error::OrderError;
use crate::orders::ledger;

/// ApplyWithholding action
#[derive(Debug, Clone)]
pub struct ApplyWithholdingAction {
    pub order_id: String,
    pub amount: f64,
}

#[async_trait]
impl CommandHandler for ApplyWithholdingAction {
    type Output = Order;

    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<Order, OrderError> {
        let mut order = ctx.store.get_order(&self.order_id).await?;
        ledger::apply_withholding(&mut order, self.amount)?;
        order.updated_at = Utc::now();

        let saved = ctx.store.save_order(order).await?;
        tracing::info!(
            order_number = saved.order_number,
            amount = self.amount,
            withheld = saved.withheld_amount,
            "withholding applied"
        );
        Ok(saved)
    }
}

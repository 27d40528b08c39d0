//! UpdateOrder command handler
//!
//! Pricing-field edits from the order editor. Totals are recomputed on
//! every edit; the save is version-checked so concurrent editors cannot
//! silently overwrite each other.

use async_trait::async_trait;
use shared::models::{Order, PricingUpdate};

use super::{CommandContext, CommandHandler};
use crate::orders::error::OrderError;
use crate::orders::money;

/// UpdateOrder action
#[derive(Debug, Clone)]
pub struct UpdateOrderAction {
    pub order_id: String,
    pub update: PricingUpdate,
}

#[async_trait]
impl CommandHandler for UpdateOrderAction {
    type Output = Order;

    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<Order, OrderError> {
        let mut order = ctx.store.get_order(&self.order_id).await?;

        if order.status.is_terminal() {
            return Err(OrderError::ValidationFailed(format!(
                "order {} is archived and can no longer be edited",
                order.order_number
            )));
        }
        if let Some(items) = &self.update.items {
            if items.is_empty() {
                return Err(OrderError::ValidationFailed(
                    "at least one item is required".to_string(),
                ));
            }
        }

        let totals = money::apply_pricing(&mut order, &self.update);
        let saved = ctx.store.save_order(order).await?;

        tracing::debug!(
            order_number = saved.order_number,
            total = totals.total,
            tax = totals.tax_amount,
            "order pricing updated"
        );
        Ok(saved)
    }
}

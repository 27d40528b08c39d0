//! CreateOrder command handler
//!
//! Builds a new order from the editor's draft, in `QUOTE` or directly in
//! `RESERVED`. The order number comes from the serialized sequence
//! counter and is never reused, even if the save fails afterwards.

use async_trait::async_trait;
use chrono::Utc;
use shared::models::{Order, OrderDraft, OrderStatus, PricingUpdate};

use super::{CommandContext, CommandHandler};
use crate::orders::error::OrderError;
use crate::orders::money;

/// CreateOrder action
#[derive(Debug, Clone)]
pub struct CreateOrderAction {
    pub draft: OrderDraft,
}

#[async_trait]
impl CommandHandler for CreateOrderAction {
    type Output = Order;

    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<Order, OrderError> {
        let draft = &self.draft;

        if draft.client_id.trim().is_empty() {
            return Err(OrderError::ValidationFailed(
                "a client is required".to_string(),
            ));
        }
        if draft.items.is_empty() {
            return Err(OrderError::ValidationFailed(
                "at least one item is required".to_string(),
            ));
        }

        let order_number = ctx.store.allocate_sequence("orders").await?;
        let now = Utc::now();
        let today = now.date_naive();

        let mut order = Order {
            id: None,
            order_number,
            client_id: draft.client_id.clone(),
            client_name: draft.client_name.clone(),
            items: Vec::new(),
            execution_dates: Vec::new(),
            execution_date: today,
            rental_days: 1,
            discount_percentage: 0.0,
            discount_type: draft.discount_type,
            delivery_cost: 0.0,
            has_invoice: false,
            total: 0.0,
            withheld_amount: 0.0,
            transactions: Vec::new(),
            status: if draft.reserved {
                OrderStatus::Reserved
            } else {
                OrderStatus::Quote
            },
            warehouse_exit_number: None,
            invoice_number: None,
            return_notes: None,
            version: 0,
            created_at: now,
            updated_at: now,
        };

        money::apply_pricing(
            &mut order,
            &PricingUpdate {
                items: Some(draft.items.clone()),
                execution_dates: Some(draft.execution_dates.clone()),
                discount: Some(draft.discount.clone()),
                discount_type: Some(draft.discount_type),
                delivery_cost: Some(draft.delivery_cost.clone()),
                has_invoice: Some(draft.has_invoice),
            },
        );

        let saved = ctx.store.save_order(order).await?;
        tracing::info!(
            order_number = saved.order_number,
            status = ?saved.status,
            total = saved.total,
            operator = %ctx.operator.operator_name,
            "order created"
        );
        Ok(saved)
    }
}

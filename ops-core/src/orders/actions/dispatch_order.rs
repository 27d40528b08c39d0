//! DispatchOrder command handler
//!
//! `CONFIRMED|RESERVED -> DISPATCHED`. No stock side effect: this system
//! does not model reservation holds, stock only moves back at return
//! intake (or out through write-offs).

use async_trait::async_trait;
use chrono::Utc;
use shared::models::{Order, OrderStatus};

use super::{CommandContext, CommandHandler};
use crate::orders::error::OrderError;
use crate::orders::lifecycle;

/// DispatchOrder action
#[derive(Debug, Clone)]
pub struct DispatchOrderAction {
    pub order_id: String,
}

#[async_trait]
impl CommandHandler for DispatchOrderAction {
    type Output = Order;

    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<Order, OrderError> {
        let mut order = ctx.store.get_order(&self.order_id).await?;
        lifecycle::ensure_transition(&order, OrderStatus::Dispatched)?;

        order.status = OrderStatus::Dispatched;
        order.updated_at = Utc::now();

        let saved = ctx.store.save_order(order).await?;
        tracing::info!(
            order_number = saved.order_number,
            operator = %ctx.operator.operator_name,
            "order dispatched"
        );
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AutoConfirm;
    use crate::orders::testkit;
    use crate::store::MemoryStore;

    async fn dispatch_from(status: OrderStatus) -> Result<Order, OrderError> {
        let store = MemoryStore::new();
        let mut order = testkit::order_with_items(Vec::new());
        order.status = status;
        let seeded = testkit::seed_order(&store, order).await;
        let operator = testkit::operator();
        let ctx = CommandContext {
            store: &store,
            interaction: &AutoConfirm,
            operator: &operator,
        };

        DispatchOrderAction {
            order_id: seeded.id.unwrap(),
        }
        .execute(&ctx)
        .await
    }

    #[tokio::test]
    async fn test_dispatch_from_confirmed_and_reserved() {
        assert_eq!(
            dispatch_from(OrderStatus::Confirmed).await.unwrap().status,
            OrderStatus::Dispatched
        );
        assert_eq!(
            dispatch_from(OrderStatus::Reserved).await.unwrap().status,
            OrderStatus::Dispatched
        );
    }

    #[tokio::test]
    async fn test_dispatch_from_quote_fails() {
        assert!(matches!(
            dispatch_from(OrderStatus::Quote).await,
            Err(OrderError::IllegalTransition { .. })
        ));
    }
}

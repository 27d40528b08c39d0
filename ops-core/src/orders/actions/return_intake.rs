//! ReturnIntake command handler
//!
//! The pickup crew books the goods back in:
//!
//! - no issues: `-> FINISHED`, and every PRODUCT line is returned to
//!   stock with an atomic `+quantity`. This is the only place stock
//!   flows back into inventory, so the transition is confirmation-gated.
//! - issues reported: `-> PARTIAL_RETURN` with the notes recorded and
//!   stock untouched - damaged or missing goods wait for a manual
//!   reconciliation (write-off or stock adjustment).

use async_trait::async_trait;
use chrono::Utc;
use shared::models::{ItemType, Order, OrderStatus};

use super::{CommandContext, CommandHandler};
use crate::orders::error::OrderError;
use crate::orders::lifecycle;

/// ReturnIntake action
#[derive(Debug, Clone)]
pub struct ReturnIntakeAction {
    pub order_id: String,
    pub issues: bool,
    pub notes: Option<String>,
}

#[async_trait]
impl CommandHandler for ReturnIntakeAction {
    type Output = Order;

    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<Order, OrderError> {
        let mut order = ctx.store.get_order(&self.order_id).await?;

        let target = if self.issues {
            OrderStatus::PartialReturn
        } else {
            OrderStatus::Finished
        };
        lifecycle::ensure_transition(&order, target)?;

        if self.issues {
            order.status = OrderStatus::PartialReturn;
            order.return_notes = self.notes.clone().filter(|n| !n.trim().is_empty());
            order.updated_at = Utc::now();

            let saved = ctx.store.save_order(order).await?;
            tracing::info!(
                order_number = saved.order_number,
                notes = saved.return_notes.as_deref().unwrap_or(""),
                "return booked with issues, stock held for reconciliation"
            );
            return Ok(saved);
        }

        let prompt = format!(
            "Finish order #{} and return its items to stock? This cannot be undone.",
            order.order_number
        );
        if !ctx.interaction.confirm(&prompt).await {
            return Err(OrderError::ConfirmationDeclined);
        }

        order.status = OrderStatus::Finished;
        order.updated_at = Utc::now();
        let saved = ctx.store.save_order(order).await?;

        // Stock moves only once the status flip is durable: a failed save
        // leaves stock untouched, and FINISHED stops a resubmit from
        // replenishing the same lines twice.
        for line in &saved.items {
            match ctx.store.get_item(&line.item_id).await {
                Ok(item) if item.item_type == ItemType::Product => {
                    let stock = ctx
                        .store
                        .adjust_stock(&line.item_id, i64::from(line.quantity))
                        .await?;
                    tracing::debug!(item = %item.name, stock, "stock replenished");
                }
                Ok(_) => {} // services carry no stock
                Err(_) => {
                    tracing::warn!(
                        item_id = %line.item_id,
                        order_number = saved.order_number,
                        "returned item no longer in catalog, stock not adjusted"
                    );
                }
            }
        }

        tracing::info!(order_number = saved.order_number, "order finished");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{AutoConfirm, AutoDeny};
    use crate::orders::testkit;
    use crate::store::{DocumentStore, MemoryStore, StoreError};
    use shared::models::{InventoryItem, OrderItem};
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::watch;

    /// Delegates to a [`MemoryStore`], failing the next `save_order`
    /// with a version conflict when armed.
    struct FailNextSave {
        inner: MemoryStore,
        fail_next: AtomicBool,
    }

    #[async_trait]
    impl DocumentStore for FailNextSave {
        async fn save_order(&self, order: Order) -> Result<Order, StoreError> {
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(StoreError::VersionConflict(
                    order.id.clone().unwrap_or_default(),
                ));
            }
            self.inner.save_order(order).await
        }

        async fn get_order(&self, id: &str) -> Result<Order, StoreError> {
            self.inner.get_order(id).await
        }

        async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
            self.inner.list_orders().await
        }

        async fn delete_order(&self, id: &str) -> Result<(), StoreError> {
            self.inner.delete_order(id).await
        }

        async fn save_item(&self, item: InventoryItem) -> Result<InventoryItem, StoreError> {
            self.inner.save_item(item).await
        }

        async fn get_item(&self, id: &str) -> Result<InventoryItem, StoreError> {
            self.inner.get_item(id).await
        }

        async fn adjust_stock(&self, item_id: &str, delta: i64) -> Result<i64, StoreError> {
            self.inner.adjust_stock(item_id, delta).await
        }

        async fn allocate_sequence(&self, counter: &str) -> Result<i64, StoreError> {
            self.inner.allocate_sequence(counter).await
        }

        fn subscribe_orders(&self) -> watch::Receiver<Vec<Order>> {
            self.inner.subscribe_orders()
        }
    }

    async fn seeded_store() -> (MemoryStore, String, String) {
        let store = MemoryStore::new();
        let item = store.save_item(testkit::product("Chair", 7)).await.unwrap();
        let item_id = item.id.unwrap();

        let mut order = testkit::order_with_items(vec![OrderItem {
            item_id: item_id.clone(),
            name: "Chair".to_string(),
            quantity: 3,
            price_at_booking: 5.0,
        }]);
        order.status = OrderStatus::Delivered;
        let seeded = testkit::seed_order(&store, order).await;
        let order_id = seeded.id.unwrap();
        (store, order_id, item_id)
    }

    #[tokio::test]
    async fn test_clean_return_replenishes_stock() {
        let (store, order_id, item_id) = seeded_store().await;
        let operator = testkit::operator();
        let ctx = CommandContext {
            store: &store,
            interaction: &AutoConfirm,
            operator: &operator,
        };

        let finished = ReturnIntakeAction {
            order_id,
            issues: false,
            notes: None,
        }
        .execute(&ctx)
        .await
        .unwrap();

        assert_eq!(finished.status, OrderStatus::Finished);
        assert_eq!(store.get_item(&item_id).await.unwrap().stock, 10);
    }

    #[tokio::test]
    async fn test_return_with_issues_holds_stock() {
        let (store, order_id, item_id) = seeded_store().await;
        let operator = testkit::operator();
        let ctx = CommandContext {
            store: &store,
            interaction: &AutoConfirm,
            operator: &operator,
        };

        let returned = ReturnIntakeAction {
            order_id,
            issues: true,
            notes: Some("two chairs broken".to_string()),
        }
        .execute(&ctx)
        .await
        .unwrap();

        assert_eq!(returned.status, OrderStatus::PartialReturn);
        assert_eq!(returned.return_notes.as_deref(), Some("two chairs broken"));
        assert_eq!(store.get_item(&item_id).await.unwrap().stock, 7);
    }

    #[tokio::test]
    async fn test_partial_return_can_still_finish() {
        let (store, order_id, item_id) = seeded_store().await;
        let operator = testkit::operator();
        let ctx = CommandContext {
            store: &store,
            interaction: &AutoConfirm,
            operator: &operator,
        };

        ReturnIntakeAction {
            order_id: order_id.clone(),
            issues: true,
            notes: Some("awaiting recount".to_string()),
        }
        .execute(&ctx)
        .await
        .unwrap();

        let finished = ReturnIntakeAction {
            order_id,
            issues: false,
            notes: None,
        }
        .execute(&ctx)
        .await
        .unwrap();

        assert_eq!(finished.status, OrderStatus::Finished);
        assert_eq!(store.get_item(&item_id).await.unwrap().stock, 10);
    }

    #[tokio::test]
    async fn test_declined_confirmation_changes_nothing() {
        let (store, order_id, item_id) = seeded_store().await;
        let operator = testkit::operator();
        let ctx = CommandContext {
            store: &store,
            interaction: &AutoDeny,
            operator: &operator,
        };

        let result = ReturnIntakeAction {
            order_id: order_id.clone(),
            issues: false,
            notes: None,
        }
        .execute(&ctx)
        .await;

        assert!(matches!(result, Err(OrderError::ConfirmationDeclined)));
        assert_eq!(
            store.get_order(&order_id).await.unwrap().status,
            OrderStatus::Delivered
        );
        assert_eq!(store.get_item(&item_id).await.unwrap().stock, 7);
    }

    #[tokio::test]
    async fn test_failed_save_leaves_stock_for_clean_resubmit() {
        let store = FailNextSave {
            inner: MemoryStore::new(),
            fail_next: AtomicBool::new(false),
        };
        let item = store.save_item(testkit::product("Chair", 7)).await.unwrap();
        let item_id = item.id.unwrap();

        let mut order = testkit::order_with_items(vec![OrderItem {
            item_id: item_id.clone(),
            name: "Chair".to_string(),
            quantity: 3,
            price_at_booking: 5.0,
        }]);
        order.status = OrderStatus::Delivered;
        let order_id = store.save_order(order).await.unwrap().id.unwrap();

        let operator = testkit::operator();
        let ctx = CommandContext {
            store: &store,
            interaction: &AutoConfirm,
            operator: &operator,
        };
        let action = ReturnIntakeAction {
            order_id: order_id.clone(),
            issues: false,
            notes: None,
        };

        // A conflicting save aborts the return before any stock moves
        store.fail_next.store(true, Ordering::SeqCst);
        let result = action.execute(&ctx).await;
        assert!(matches!(
            result,
            Err(OrderError::Store(StoreError::VersionConflict(_)))
        ));
        assert_eq!(store.get_item(&item_id).await.unwrap().stock, 7);
        assert_eq!(
            store.get_order(&order_id).await.unwrap().status,
            OrderStatus::Delivered
        );

        // The resubmit replenishes exactly once
        let finished = action.execute(&ctx).await.unwrap();
        assert_eq!(finished.status, OrderStatus::Finished);
        assert_eq!(store.get_item(&item_id).await.unwrap().stock, 10);
    }

    #[tokio::test]
    async fn test_service_lines_do_not_touch_stock() {
        let store = MemoryStore::new();
        let service = store.save_item(testkit::service("Setup crew")).await.unwrap();
        let service_id = service.id.unwrap();

        let mut order = testkit::order_with_items(vec![OrderItem {
            item_id: service_id.clone(),
            name: "Setup crew".to_string(),
            quantity: 1,
            price_at_booking: 50.0,
        }]);
        order.status = OrderStatus::Delivered;
        let seeded = testkit::seed_order(&store, order).await;
        let operator = testkit::operator();
        let ctx = CommandContext {
            store: &store,
            interaction: &AutoConfirm,
            operator: &operator,
        };

        ReturnIntakeAction {
            order_id: seeded.id.unwrap(),
            issues: false,
            notes: None,
        }
        .execute(&ctx)
        .await
        .unwrap();

        assert_eq!(store.get_item(&service_id).await.unwrap().stock, 0);
    }

    #[tokio::test]
    async fn test_return_requires_goods_in_the_field() {
        let store = MemoryStore::new();
        let seeded = testkit::seed_order(&store, testkit::order_with_items(Vec::new())).await;
        let operator = testkit::operator();
        let ctx = CommandContext {
            store: &store,
            interaction: &AutoConfirm,
            operator: &operator,
        };

        let result = ReturnIntakeAction {
            order_id: seeded.id.unwrap(),
            issues: false,
            notes: None,
        }
        .execute(&ctx)
        .await;
        assert!(matches!(result, Err(OrderError::IllegalTransition { .. })));
    }
}

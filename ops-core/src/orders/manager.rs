//! OrdersManager - the facade the screens call
//!
//! Wraps the action handlers with a store handle, the injected
//! interaction capability, and an update broadcast. Every operation takes
//! the acting operator explicitly; the manager keeps no session state.
//!
//! # Operation Flow
//!
//! ```text
//! manager.<operation>(operator, payload)
//!     ├─ 1. Build CommandContext
//!     ├─ 2. Action validates and computes
//!     ├─ 3. Version-checked save through DocumentStore
//!     ├─ 4. Broadcast the persisted order
//!     └─ 5. Return it to the caller
//! ```

use std::sync::Arc;

use chrono::NaiveDate;
use shared::models::{InventoryItem, Order, OrderDraft, PaymentInput, PricingUpdate};
use tokio::sync::{broadcast, watch};

use super::actions::{
    ApplyWithholdingAction, CancelOrderAction, CommandContext, CommandHandler, ConfirmQuoteAction,
    CreateOrderAction, DeleteTransactionAction, DeliverOrderAction, DispatchOrderAction,
    RegisterPaymentAction, ReserveOrderAction, ReturnIntakeAction, UpdateOrderAction,
    VoidTransactionAction, WriteOffAction,
};
use super::error::OrderError;
use super::lifecycle;
use crate::context::{Interaction, OperatorContext};
use crate::store::DocumentStore;

/// Update broadcast channel capacity
const UPDATE_CHANNEL_CAPACITY: usize = 256;

/// Order engine facade
pub struct OrdersManager {
    store: Arc<dyn DocumentStore>,
    interaction: Arc<dyn Interaction>,
    update_tx: broadcast::Sender<Order>,
}

impl OrdersManager {
    pub fn new(store: Arc<dyn DocumentStore>, interaction: Arc<dyn Interaction>) -> Self {
        let (update_tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            store,
            interaction,
            update_tx,
        }
    }

    /// Subscribe to orders persisted through this manager
    pub fn subscribe(&self) -> broadcast::Receiver<Order> {
        self.update_tx.subscribe()
    }

    /// Live full-collection snapshots from the underlying store
    pub fn subscribe_orders(&self) -> watch::Receiver<Vec<Order>> {
        self.store.subscribe_orders()
    }

    async fn run<H>(&self, operator: &OperatorContext, action: H) -> Result<Order, OrderError>
    where
        H: CommandHandler<Output = Order> + Send + Sync,
    {
        let ctx = CommandContext {
            store: self.store.as_ref(),
            interaction: self.interaction.as_ref(),
            operator,
        };
        let order = action.execute(&ctx).await?;
        let _ = self.update_tx.send(order.clone());
        Ok(order)
    }

    // === Order editor ===

    pub async fn create_order(
        &self,
        operator: &OperatorContext,
        draft: OrderDraft,
    ) -> Result<Order, OrderError> {
        self.run(operator, CreateOrderAction { draft }).await
    }

    pub async fn update_order(
        &self,
        operator: &OperatorContext,
        order_id: impl Into<String>,
        update: PricingUpdate,
    ) -> Result<Order, OrderError> {
        self.run(
            operator,
            UpdateOrderAction {
                order_id: order_id.into(),
                update,
            },
        )
        .await
    }

    pub async fn reserve_order(
        &self,
        operator: &OperatorContext,
        order_id: impl Into<String>,
    ) -> Result<Order, OrderError> {
        self.run(
            operator,
            ReserveOrderAction {
                order_id: order_id.into(),
            },
        )
        .await
    }

    // === Quoting ===

    pub async fn confirm_quote(
        &self,
        operator: &OperatorContext,
        order_id: impl Into<String>,
        warehouse_exit_number: impl Into<String>,
    ) -> Result<Order, OrderError> {
        self.run(
            operator,
            ConfirmQuoteAction {
                order_id: order_id.into(),
                warehouse_exit_number: warehouse_exit_number.into(),
            },
        )
        .await
    }

    pub async fn cancel_order(
        &self,
        operator: &OperatorContext,
        order_id: impl Into<String>,
    ) -> Result<Order, OrderError> {
        self.run(
            operator,
            CancelOrderAction {
                order_id: order_id.into(),
            },
        )
        .await
    }

    // === Dispatch and returns ===

    pub async fn dispatch_order(
        &self,
        operator: &OperatorContext,
        order_id: impl Into<String>,
    ) -> Result<Order, OrderError> {
        self.run(
            operator,
            DispatchOrderAction {
                order_id: order_id.into(),
            },
        )
        .await
    }

    pub async fn deliver_order(
        &self,
        operator: &OperatorContext,
        order_id: impl Into<String>,
    ) -> Result<Order, OrderError> {
        self.run(
            operator,
            DeliverOrderAction {
                order_id: order_id.into(),
            },
        )
        .await
    }

    pub async fn return_intake(
        &self,
        operator: &OperatorContext,
        order_id: impl Into<String>,
        issues: bool,
        notes: Option<String>,
    ) -> Result<Order, OrderError> {
        self.run(
            operator,
            ReturnIntakeAction {
                order_id: order_id.into(),
                issues,
                notes,
            },
        )
        .await
    }

    // === Payments register ===

    pub async fn register_payment(
        &self,
        operator: &OperatorContext,
        order_id: impl Into<String>,
        payment: PaymentInput,
    ) -> Result<Order, OrderError> {
        self.run(
            operator,
            RegisterPaymentAction {
                order_id: order_id.into(),
                payment,
            },
        )
        .await
    }

    pub async fn void_transaction(
        &self,
        operator: &OperatorContext,
        order_id: impl Into<String>,
        transaction_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Result<Order, OrderError> {
        self.run(
            operator,
            VoidTransactionAction {
                order_id: order_id.into(),
                transaction_id: transaction_id.into(),
                reason: reason.into(),
            },
        )
        .await
    }

    pub async fn delete_transaction(
        &self,
        operator: &OperatorContext,
        order_id: impl Into<String>,
        transaction_id: impl Into<String>,
    ) -> Result<Order, OrderError> {
        self.run(
            operator,
            DeleteTransactionAction {
                order_id: order_id.into(),
                transaction_id: transaction_id.into(),
            },
        )
        .await
    }

    // === Accounting ===

    pub async fn apply_withholding(
        &self,
        operator: &OperatorContext,
        order_id: impl Into<String>,
        amount: f64,
    ) -> Result<Order, OrderError> {
        self.run(
            operator,
            ApplyWithholdingAction {
                order_id: order_id.into(),
                amount,
            },
        )
        .await
    }

    // === Inventory ===

    pub async fn write_off(
        &self,
        operator: &OperatorContext,
        item_id: impl Into<String>,
        quantity: i32,
        reason: impl Into<String>,
    ) -> Result<InventoryItem, OrderError> {
        let ctx = CommandContext {
            store: self.store.as_ref(),
            interaction: self.interaction.as_ref(),
            operator,
        };
        WriteOffAction {
            item_id: item_id.into(),
            quantity,
            reason: reason.into(),
        }
        .execute(&ctx)
        .await
    }

    // === Boards (read-only views over the authoritative status) ===

    pub async fn get_order(&self, order_id: &str) -> Result<Order, OrderError> {
        self.store.get_order(order_id).await.map_err(OrderError::from)
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.store.list_orders().await.map_err(OrderError::from)
    }

    pub async fn dispatch_board(&self, today: NaiveDate) -> Result<Vec<Order>, OrderError> {
        let orders = self.store.list_orders().await?;
        Ok(lifecycle::dispatch_eligible(&orders, today)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn pickup_board(&self, today: NaiveDate) -> Result<Vec<Order>, OrderError> {
        let orders = self.store.list_orders().await?;
        Ok(lifecycle::pickup_eligible(&orders, today)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn pending_balance_board(&self) -> Result<Vec<Order>, OrderError> {
        let orders = self.store.list_orders().await?;
        Ok(lifecycle::pending_balance(&orders)
            .into_iter()
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::testkit;
    use crate::store::DocumentStore;
    use chrono::Utc;
    use shared::models::{
        DiscountType, OrderItem, OrderStatus, PaymentMethod, PaymentStatus,
    };

    fn draft_with(item_id: &str, quantity: i32, price: f64) -> OrderDraft {
        OrderDraft {
            client_id: "client-1".to_string(),
            client_name: "Eventos del Valle".to_string(),
            items: vec![OrderItem {
                item_id: item_id.to_string(),
                name: "Chair".to_string(),
                quantity,
                price_at_booking: price,
            }],
            execution_dates: vec![Utc::now().date_naive()],
            discount: String::new(),
            discount_type: DiscountType::Percent,
            delivery_cost: String::new(),
            has_invoice: false,
            reserved: false,
        }
    }

    fn cash(amount: &str) -> PaymentInput {
        PaymentInput {
            amount: amount.to_string(),
            method: PaymentMethod::Cash,
            bank_name: None,
        }
    }

    #[tokio::test]
    async fn test_full_rental_cycle() {
        let (manager, store) = testkit::manager();
        let operator = testkit::operator();
        let item = store.save_item(testkit::product("Chair", 20)).await.unwrap();
        let item_id = item.id.unwrap();

        // Quote for 10 chairs at $5, one day
        let order = manager
            .create_order(&operator, draft_with(&item_id, 10, 5.0))
            .await
            .unwrap();
        let order_id = order.id.clone().unwrap();
        assert_eq!(order.total, 50.0);
        assert_eq!(order.payment_status(), PaymentStatus::Credit);

        // Confirm with the warehouse-exit number, dispatch, deliver
        manager
            .confirm_quote(&operator, &order_id, "EB-031")
            .await
            .unwrap();
        manager.dispatch_order(&operator, &order_id).await.unwrap();
        manager.deliver_order(&operator, &order_id).await.unwrap();

        // Partial payments drive the standing
        let order = manager
            .register_payment(&operator, &order_id, cash("30"))
            .await
            .unwrap();
        assert_eq!(order.payment_status(), PaymentStatus::Partial);
        let order = manager
            .register_payment(&operator, &order_id, cash("20"))
            .await
            .unwrap();
        assert_eq!(order.payment_status(), PaymentStatus::Paid);

        // Clean return replenishes the chairs
        let order = manager
            .return_intake(&operator, &order_id, false, None)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Finished);
        assert_eq!(store.get_item(&item_id).await.unwrap().stock, 20);
    }

    #[tokio::test]
    async fn test_reserved_quote_can_dispatch_directly() {
        let (manager, store) = testkit::manager();
        let operator = testkit::operator();
        let item = store.save_item(testkit::product("Chair", 5)).await.unwrap();

        // Saved as a quote, promoted from the editor afterwards
        let order = manager
            .create_order(&operator, draft_with(item.id.as_deref().unwrap(), 2, 5.0))
            .await
            .unwrap();
        let order_id = order.id.clone().unwrap();
        assert_eq!(order.status, OrderStatus::Quote);

        let reserved = manager.reserve_order(&operator, &order_id).await.unwrap();
        assert_eq!(reserved.status, OrderStatus::Reserved);

        // A reservation skips quote confirmation on its way out
        let dispatched = manager.dispatch_order(&operator, &order_id).await.unwrap();
        assert_eq!(dispatched.status, OrderStatus::Dispatched);
    }

    #[tokio::test]
    async fn test_broadcast_carries_persisted_orders() {
        let (manager, store) = testkit::manager();
        let operator = testkit::operator();
        let item = store.save_item(testkit::product("Chair", 5)).await.unwrap();
        let mut rx = manager.subscribe();

        let created = manager
            .create_order(&operator, draft_with(item.id.as_deref().unwrap(), 2, 5.0))
            .await
            .unwrap();

        let seen = rx.recv().await.unwrap();
        assert_eq!(seen.id, created.id);
        assert_eq!(seen.total, 10.0);
    }

    #[tokio::test]
    async fn test_failed_action_broadcasts_nothing() {
        let (manager, _store) = testkit::manager();
        let operator = testkit::operator();
        let mut rx = manager.subscribe();

        let result = manager
            .confirm_quote(&operator, "missing-order", "EB-1")
            .await;
        assert!(result.is_err());
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_boards_follow_the_same_status_field() {
        let (manager, store) = testkit::manager();
        let operator = testkit::operator();
        let item = store.save_item(testkit::product("Chair", 20)).await.unwrap();
        let item_id = item.id.unwrap();
        let today = Utc::now().date_naive();

        let order = manager
            .create_order(&operator, draft_with(&item_id, 4, 5.0))
            .await
            .unwrap();
        let order_id = order.id.clone().unwrap();

        assert!(manager.dispatch_board(today).await.unwrap().is_empty());

        manager
            .confirm_quote(&operator, &order_id, "EB-001")
            .await
            .unwrap();
        assert_eq!(manager.dispatch_board(today).await.unwrap().len(), 1);
        assert!(manager.pickup_board(today).await.unwrap().is_empty());

        manager.dispatch_order(&operator, &order_id).await.unwrap();
        manager.deliver_order(&operator, &order_id).await.unwrap();
        assert!(manager.dispatch_board(today).await.unwrap().is_empty());
        assert_eq!(manager.pickup_board(today).await.unwrap().len(), 1);

        // Still owing the full 20.00
        assert_eq!(manager.pending_balance_board().await.unwrap().len(), 1);
        manager
            .register_payment(&operator, &order_id, cash("20"))
            .await
            .unwrap();
        assert!(manager.pending_balance_board().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_void_then_balance_reopens() {
        let (manager, store) = testkit::manager();
        let operator = testkit::operator();
        let item = store.save_item(testkit::product("Chair", 5)).await.unwrap();

        let order = manager
            .create_order(&operator, draft_with(item.id.as_deref().unwrap(), 10, 5.0))
            .await
            .unwrap();
        let order_id = order.id.clone().unwrap();

        let order = manager
            .register_payment(&operator, &order_id, cash("50"))
            .await
            .unwrap();
        assert_eq!(order.payment_status(), PaymentStatus::Paid);
        let tx_id = order.transactions[0].id.clone();

        let order = manager
            .void_transaction(&operator, &order_id, &tx_id, "wrong order")
            .await
            .unwrap();
        assert_eq!(order.payment_status(), PaymentStatus::Credit);
        assert_eq!(order.transactions.len(), 1);
        assert_eq!(manager.pending_balance_board().await.unwrap().len(), 1);
    }
}

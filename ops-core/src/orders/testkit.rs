//! Test helpers shared across the order engine tests

use chrono::Utc;
use shared::models::{
    DiscountType, InventoryItem, ItemType, Order, OrderItem, OrderStatus, PaymentMethod,
    PaymentTransaction, Role,
};
use std::sync::Arc;

use crate::context::{AutoConfirm, OperatorContext};
use crate::orders::OrdersManager;
use crate::store::{DocumentStore, MemoryStore};

pub fn operator() -> OperatorContext {
    OperatorContext::new("user-1", "Test Operator", Role::Admin)
}

pub fn staff_operator() -> OperatorContext {
    OperatorContext::new("user-2", "Staff Operator", Role::Staff)
}

pub fn order_with_items(items: Vec<OrderItem>) -> Order {
    let today = Utc::now().date_naive();
    Order {
        id: None,
        order_number: 1,
        client_id: "client-1".to_string(),
        client_name: "Test Client".to_string(),
        items,
        execution_dates: vec![today],
        execution_date: today,
        rental_days: 1,
        discount_percentage: 0.0,
        discount_type: DiscountType::Percent,
        delivery_cost: 0.0,
        has_invoice: false,
        total: 0.0,
        withheld_amount: 0.0,
        transactions: Vec::new(),
        status: OrderStatus::Quote,
        warehouse_exit_number: None,
        invoice_number: None,
        return_notes: None,
        version: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn transaction(id: &str, amount: f64) -> PaymentTransaction {
    PaymentTransaction {
        id: id.to_string(),
        receipt_code: format!("20260101-{id}"),
        date: Utc::now(),
        amount,
        method: PaymentMethod::Cash,
        bank_name: None,
        recorded_by: "Test Operator".to_string(),
        order_number: 1,
        is_void: false,
        void_reason: None,
    }
}

pub fn product(name: &str, stock: i64) -> InventoryItem {
    InventoryItem {
        id: None,
        name: name.to_string(),
        price: 5.0,
        stock,
        item_type: ItemType::Product,
        replacement_price: 25.0,
        is_active: true,
    }
}

pub fn service(name: &str) -> InventoryItem {
    InventoryItem {
        id: None,
        name: name.to_string(),
        price: 50.0,
        stock: 0,
        item_type: ItemType::Service,
        replacement_price: 0.0,
        is_active: true,
    }
}

/// Manager over a fresh in-memory store with auto-confirm interaction
pub fn manager() -> (OrdersManager, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let manager = OrdersManager::new(store.clone(), Arc::new(AutoConfirm));
    (manager, store)
}

/// Store an order directly, bypassing the actions
pub async fn seed_order(store: &MemoryStore, order: Order) -> Order {
    store.save_order(order).await.unwrap()
}

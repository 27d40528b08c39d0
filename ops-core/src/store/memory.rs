//! In-memory document store
//!
//! Backs tests and single-process deployments. Locks are taken and
//! released inside each call; nothing is held across an await point.

use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use shared::models::{InventoryItem, Order};
use tokio::sync::watch;
use uuid::Uuid;

use super::{DocumentStore, StoreError};

#[derive(Default)]
struct Collections {
    orders: HashMap<String, Order>,
    items: HashMap<String, InventoryItem>,
}

/// In-process [`DocumentStore`] implementation
pub struct MemoryStore {
    inner: RwLock<Collections>,
    counters: DashMap<String, i64>,
    orders_tx: watch::Sender<Vec<Order>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (orders_tx, _) = watch::channel(Vec::new());
        Self {
            inner: RwLock::new(Collections::default()),
            counters: DashMap::new(),
            orders_tx,
        }
    }

    fn publish_orders(&self, collections: &Collections) {
        let mut orders: Vec<Order> = collections.orders.values().cloned().collect();
        orders.sort_by_key(|o| o.order_number);
        let _ = self.orders_tx.send(orders);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn save_order(&self, mut order: Order) -> Result<Order, StoreError> {
        let mut inner = self.inner.write();
        match order.id.as_deref() {
            None | Some("") => {
                let id = Uuid::new_v4().to_string();
                order.id = Some(id.clone());
                order.version = 1;
                inner.orders.insert(id, order.clone());
            }
            Some(id) => {
                let id = id.to_string();
                if let Some(stored) = inner.orders.get(&id) {
                    if stored.version != order.version {
                        return Err(StoreError::VersionConflict(id));
                    }
                }
                order.version += 1;
                inner.orders.insert(id, order.clone());
            }
        }
        self.publish_orders(&inner);
        Ok(order)
    }

    async fn get_order(&self, id: &str) -> Result<Order, StoreError> {
        self.inner
            .read()
            .orders
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        let mut orders: Vec<Order> = self.inner.read().orders.values().cloned().collect();
        orders.sort_by_key(|o| o.order_number);
        Ok(orders)
    }

    async fn delete_order(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        inner
            .orders
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.publish_orders(&inner);
        Ok(())
    }

    async fn save_item(&self, mut item: InventoryItem) -> Result<InventoryItem, StoreError> {
        let mut inner = self.inner.write();
        let id = match item.id.as_deref() {
            None | Some("") => {
                let id = Uuid::new_v4().to_string();
                item.id = Some(id.clone());
                id
            }
            Some(id) => id.to_string(),
        };
        inner.items.insert(id, item.clone());
        Ok(item)
    }

    async fn get_item(&self, id: &str) -> Result<InventoryItem, StoreError> {
        self.inner
            .read()
            .items
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn adjust_stock(&self, item_id: &str, delta: i64) -> Result<i64, StoreError> {
        let mut inner = self.inner.write();
        let item = inner
            .items
            .get_mut(item_id)
            .ok_or_else(|| StoreError::NotFound(item_id.to_string()))?;
        item.stock += delta;
        Ok(item.stock)
    }

    async fn allocate_sequence(&self, counter: &str) -> Result<i64, StoreError> {
        let mut entry = self.counters.entry(counter.to_string()).or_insert(0);
        *entry += 1;
        Ok(*entry)
    }

    fn subscribe_orders(&self) -> watch::Receiver<Vec<Order>> {
        self.orders_tx.subscribe()
    }
}

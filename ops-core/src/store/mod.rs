//! Document store abstraction
//!
//! Persistence is an external collaborator: the core specifies only the
//! contract it needs (upsert with version check, atomic stock deltas,
//! serialized sequence counters, live collection snapshots) and never a
//! concrete backend. [`MemoryStore`] is the in-process reference
//! implementation, used by tests and as the contract's executable
//! documentation.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use shared::models::{InventoryItem, Order};
use thiserror::Error;
use tokio::sync::watch;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Version conflict on {0}: the document changed since it was loaded")]
    VersionConflict(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Per-entity document store contract
///
/// Ordering: live snapshots are delivered in arbitrary, eventually
/// consistent order to all subscribers; only `allocate_sequence` and
/// `adjust_stock` are serialized by the backend.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Upsert an order. An empty/absent id creates a new document and
    /// assigns one. The save is version-checked: a mismatch against the
    /// stored version fails with [`StoreError::VersionConflict`] and the
    /// stored document is left untouched. The returned order carries the
    /// assigned id and bumped version.
    async fn save_order(&self, order: Order) -> Result<Order, StoreError>;

    async fn get_order(&self, id: &str) -> Result<Order, StoreError>;

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError>;

    async fn delete_order(&self, id: &str) -> Result<(), StoreError>;

    async fn save_item(&self, item: InventoryItem) -> Result<InventoryItem, StoreError>;

    async fn get_item(&self, id: &str) -> Result<InventoryItem, StoreError>;

    /// Atomically apply a stock delta, returning the new stock level.
    /// The only way stock moves; full-record overwrites of `stock` would
    /// lose updates under concurrent operators.
    async fn adjust_stock(&self, item_id: &str, delta: i64) -> Result<i64, StoreError>;

    /// Serialized, monotonically increasing counter. Used for order
    /// numbers and receipt codes; values are never reused.
    async fn allocate_sequence(&self, counter: &str) -> Result<i64, StoreError>;

    /// Live full-collection snapshots of orders.
    fn subscribe_orders(&self) -> watch::Receiver<Vec<Order>>;
}

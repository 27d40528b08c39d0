//! Inventory Item Model

use serde::{Deserialize, Serialize};

/// Item kind: physical stock or an unbounded service line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    #[default]
    Product,
    Service,
}

/// Inventory item entity
///
/// `stock` is the authoritative on-hand count for `PRODUCT` items and is
/// mutated only through atomic stock deltas, never by overwriting the
/// record. `SERVICE` items carry an ignored stock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryItem {
    pub id: Option<String>,
    pub name: String,
    /// Rental price per unit per day, in currency unit
    pub price: f64,
    pub stock: i64,
    pub item_type: ItemType,
    /// Charged for lost/damaged goods
    pub replacement_price: f64,
    pub is_active: bool,
}

/// Create item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCreate {
    pub name: String,
    pub price: f64,
    pub stock: Option<i64>,
    pub item_type: Option<ItemType>,
    pub replacement_price: Option<f64>,
}

/// Update item payload (stock is intentionally absent - stock moves only
/// through atomic deltas)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub replacement_price: Option<f64>,
    pub is_active: Option<bool>,
}

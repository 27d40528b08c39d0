//! Purchase Transaction Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Purchase transaction (payment made to a provider)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseTransaction {
    pub id: Option<String>,
    pub provider_id: String,
    pub provider_name: String,
    pub description: String,
    /// Amount in currency unit
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub invoice_number: Option<String>,
    pub recorded_by: String,
}

//! Withholding Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tax withholding applied by a client against a specific order's
/// balance. Not a cash payment; it reduces the outstanding balance
/// through the order's `withheld_amount`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Withholding {
    pub id: Option<String>,
    pub client_id: String,
    pub client_name: String,
    pub order_number: i64,
    /// Amount in currency unit
    pub amount: f64,
    /// Tax authority certificate reference
    pub certificate_number: Option<String>,
    pub date: DateTime<Utc>,
    pub recorded_by: String,
}

//! Settings Model

use serde::{Deserialize, Serialize};

/// Company settings consumed by the receipt/report renderer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub id: Option<String>,
    pub company_name: String,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    /// Logo reference for printed receipts
    pub logo_url: Option<String>,
}

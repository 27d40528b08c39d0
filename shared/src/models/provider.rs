//! Provider Model

use serde::{Deserialize, Serialize};

/// Provider entity (supplier of purchased goods/services)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub id: Option<String>,
    pub name: String,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
    pub contact_name: Option<String>,
}

/// Create provider payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderCreate {
    pub name: String,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
    pub contact_name: Option<String>,
}

//! Data models
//!
//! Shared between the operations core and the front end (via API).
//! Every entity carries `id: Option<String>`, assigned by the document
//! store on first save.

pub mod client;
pub mod inventory;
pub mod order;
pub mod payroll;
pub mod provider;
pub mod purchase;
pub mod settings;
pub mod user;
pub mod withholding;

// Re-exports
pub use client::*;
pub use inventory::*;
pub use order::*;
pub use payroll::*;
pub use provider::*;
pub use purchase::*;
pub use settings::*;
pub use user::*;
pub use withholding::*;

//! Shared types for the rental operations manager
//!
//! Data models and payload types used by the operations core and any
//! front end. Entities are plain serde structs; `id` is assigned by the
//! document store on first save.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

//! Rental operations core
//!
//! The order total/balance computation engine and the order status state
//! machine behind the rental operations manager (quotes, dispatch,
//! returns, payments, accounting). Three facets:
//!
//! - **Pricing engine** (`orders::money`): pure totals computation from
//!   line items, rental days, discount, delivery and the invoice flag.
//! - **Balance ledger** (`orders::ledger`): outstanding balance from
//!   totals, payments and withholdings; void and hard delete.
//! - **State machine** (`orders::lifecycle`): legal status transitions,
//!   their stock side effects, and the board filters the screens use.
//!
//! Persistence lives behind the [`store::DocumentStore`] trait; the core
//! never talks to a database directly. Operator identity and user
//! confirmations are injected per call ([`context`]), so every operation
//! is testable without a UI.
//!
//! # Command Flow
//!
//! ```text
//! OrdersManager::<operation>(operator, payload)
//!     ├─ 1. Build CommandContext (store, interaction, operator)
//!     ├─ 2. Action validates and computes (pure pricing/ledger/lifecycle)
//!     ├─ 3. Version-checked save through DocumentStore
//!     ├─ 4. Broadcast updated order to subscribers
//!     └─ 5. Return the persisted document
//! ```

pub mod context;
pub mod logger;
pub mod orders;
pub mod store;

// Re-export public types
pub use context::{AutoConfirm, AutoDeny, Interaction, OperatorContext};
pub use orders::{OrderError, OrdersManager};
pub use store::{DocumentStore, MemoryStore, StoreError};

//! Operator context and user-interaction capability
//!
//! The core keeps no ambient session: who is acting is an explicit
//! argument to every operation, and confirmation dialogs are a capability
//! the caller injects. A real front end bridges `Interaction` to its
//! modal dialogs; tests use the auto stubs below.

use async_trait::async_trait;
use shared::models::Role;

/// Who is performing an operation
#[derive(Debug, Clone)]
pub struct OperatorContext {
    pub operator_id: String,
    pub operator_name: String,
    pub role: Role,
}

impl OperatorContext {
    pub fn new(operator_id: impl Into<String>, operator_name: impl Into<String>, role: Role) -> Self {
        Self {
            operator_id: operator_id.into(),
            operator_name: operator_name.into(),
            role,
        }
    }
}

/// Request/response channel to the operator. Blocking from the user's
/// perspective, non-blocking from the event loop's.
#[async_trait]
pub trait Interaction: Send + Sync {
    /// Ask the operator to acknowledge an irreversible or unusual action
    /// (overpayment, hard delete, stock replenishment). Returns `false`
    /// when the operator backs out.
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Interaction stub that acknowledges every prompt
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

#[async_trait]
impl Interaction for AutoConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Interaction stub that declines every prompt
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoDeny;

#[async_trait]
impl Interaction for AutoDeny {
    async fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

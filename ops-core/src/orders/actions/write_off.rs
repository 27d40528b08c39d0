//! WriteOff command handler
//!
//! Manual permanent stock decrement for lost or damaged goods. Lives
//! outside the return-intake flow: a return with issues holds stock
//! until someone reconciles it, and this is the reconciling half.

use async_trait::async_trait;
use shared::models::{InventoryItem, ItemType};

use super::{CommandContext, CommandHandler};
use crate::orders::error::OrderError;

/// WriteOff action
#[derive(Debug, Clone)]
pub struct WriteOffAction {
    pub item_id: String,
    pub quantity: i32,
    pub reason: String,
}

#[async_trait]
impl CommandHandler for WriteOffAction {
    type Output = InventoryItem;

    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<InventoryItem, OrderError> {
        if !ctx.operator.role.is_admin() {
            return Err(OrderError::PermissionDenied(
                "only an administrator can write off stock".to_string(),
            ));
        }
        if self.quantity <= 0 {
            return Err(OrderError::InvalidAmount);
        }
        if self.reason.trim().is_empty() {
            return Err(OrderError::ValidationFailed(
                "a write-off reason is required".to_string(),
            ));
        }

        let item = ctx
            .store
            .get_item(&self.item_id)
            .await
            .map_err(|_| OrderError::ItemNotFound(self.item_id.clone()))?;
        if item.item_type != ItemType::Product {
            return Err(OrderError::ValidationFailed(
                "services carry no stock to write off".to_string(),
            ));
        }

        let prompt = format!(
            "Write off {} x {}? Stock is reduced permanently.",
            self.quantity, item.name
        );
        if !ctx.interaction.confirm(&prompt).await {
            return Err(OrderError::ConfirmationDeclined);
        }

        let stock = ctx
            .store
            .adjust_stock(&self.item_id, -i64::from(self.quantity))
            .await?;
        tracing::warn!(
            item = %item.name,
            quantity = self.quantity,
            stock,
            reason = %self.reason,
            operator = %ctx.operator.operator_name,
            "stock written off"
        );

        ctx.store
            .get_item(&self.item_id)
            .await
            .map_err(OrderError::from)
    }
}

//! RegisterPayment command handler
//!
//! Appends a transaction to the order. Receipt codes come from the
//! serialized "receipts" counter, formatted date-first so the printed
//! books sort naturally. Overpayment is allowed, but only after the
//! operator confirms; amounts ≤ 0 are rejected outright.

use async_trait::async_trait;
use chrono::Utc;
use shared::models::{Order, PaymentInput, PaymentTransaction};

use super::{CommandContext, CommandHandler};
use crate::orders::error::OrderError;
use crate::orders::ledger;
use crate::orders::money::parse_amount;

/// RegisterPayment action
#[derive(Debug, Clone)]
pub struct RegisterPaymentAction {
    pub order_id: String,
    pub payment: PaymentInput,
}

#[async_trait]
impl CommandHandler for RegisterPaymentAction {
    type Output = Order;

    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<Order, OrderError> {
        let amount = parse_amount(&self.payment.amount);
        if amount <= 0.0 {
            return Err(OrderError::InvalidAmount);
        }

        let mut order = ctx.store.get_order(&self.order_id).await?;

        if ledger::is_overpayment(&order, amount) {
            let prompt = format!(
                "The payment ({:.2}) exceeds the outstanding balance ({:.2}). Register anyway?",
                amount,
                order.display_balance()
            );
            if !ctx.interaction.confirm(&prompt).await {
                return Err(OrderError::ConfirmationDeclined);
            }
        }

        let seq = ctx.store.allocate_sequence("receipts").await?;
        let now = Utc::now();
        let receipt_code = format!("{}-{:04}", now.format("%Y%m%d"), seq);

        let transaction = PaymentTransaction {
            id: uuid::Uuid::new_v4().to_string(),
            receipt_code: receipt_code.clone(),
            date: now,
            amount,
            method: self.payment.method,
            bank_name: self.payment.bank_name.clone(),
            recorded_by: ctx.operator.operator_name.clone(),
            order_number: order.order_number,
            is_void: false,
            void_reason: None,
        };
        ledger::append_payment(&mut order, transaction);
        order.updated_at = now;

        let saved = ctx.store.save_order(order).await?;
        tracing::info!(
            order_number = saved.order_number,
            receipt_code = %receipt_code,
            amount,
            paid = saved.paid_amount(),
            status = ?saved.payment_status(),
            "payment registered"
        );
        Ok(saved)
    }
}

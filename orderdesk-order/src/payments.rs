use chrono::{DateTime, Utc};
use orderdesk_shared::{Order, PaymentRecordedEvent, PaymentStatus, Transaction};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};

/// Collects and amends payments on an order
pub struct PaymentCollector;

impl PaymentCollector {
    /// Whether the payment action is offered for this order
    pub fn can_collect(order: &Order) -> bool {
        order.total_cost > order.total_paid && !order.is_quotation()
    }

    /// Amount must be positive and within the limit: the outstanding balance
    /// for a new payment, or the order total when editing an existing one.
    pub fn validate_amount(order: &Order, amount: Decimal, editing: bool) -> OrderResult<()> {
        let limit = if editing {
            order.total_cost
        } else {
            order.balance_due()?
        }
        .round_dp(2);

        if amount <= Decimal::ZERO || amount > limit {
            return Err(OrderError::InvalidInput(format!(
                "payment amount must be greater than 0 and at most {}, got {}",
                limit, amount
            )));
        }
        Ok(())
    }

    /// Append a payment and refresh the paid total and payment status.
    ///
    /// The paid total moves by the payment amount. Backend records may carry a
    /// `totalPaid` without the transactions behind it, so it is never re-summed.
    pub fn collect(order: &mut Order, amount: Decimal, at: DateTime<Utc>) -> OrderResult<PaymentRecordedEvent> {
        Self::ensure_payable(order)?;
        Self::validate_amount(order, amount, false)?;
        let total_paid = Self::shifted_total(order, amount)?;

        let transaction = Transaction::new(amount, at);
        let transaction_id = transaction.id;
        order.transactions.push(transaction);
        Self::refresh(order, total_paid);

        Ok(Self::recorded(order, transaction_id, amount, at))
    }

    /// Change the amount of an existing payment
    pub fn amend(
        order: &mut Order,
        transaction_id: &Uuid,
        amount: Decimal,
        at: DateTime<Utc>,
    ) -> OrderResult<PaymentRecordedEvent> {
        Self::ensure_payable(order)?;
        Self::validate_amount(order, amount, true)?;

        let index = order
            .transactions
            .iter()
            .position(|t| t.id == *transaction_id)
            .ok_or_else(|| OrderError::InvalidInput(format!("transaction not found: {}", transaction_id)))?;

        let delta = amount
            .checked_sub(order.transactions[index].amount)
            .ok_or_else(|| OrderError::InvalidInput(format!("amended amount overflows: {}", amount)))?;
        let total_paid = Self::shifted_total(order, delta)?;

        order.transactions[index].amount = amount;
        Self::refresh(order, total_paid);

        Ok(Self::recorded(order, *transaction_id, amount, at))
    }

    /// Payment status implied by the paid total
    pub fn derive_status(total_cost: Decimal, total_paid: Decimal) -> PaymentStatus {
        if total_paid <= Decimal::ZERO {
            PaymentStatus::Open
        } else if total_paid < total_cost {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Closed
        }
    }

    fn ensure_payable(order: &Order) -> OrderResult<()> {
        if order.is_quotation() {
            return Err(OrderError::InvalidInput(format!(
                "order {} is a quotation and cannot take payments",
                order.id
            )));
        }
        Ok(())
    }

    fn shifted_total(order: &Order, delta: Decimal) -> OrderResult<Decimal> {
        order
            .total_paid
            .checked_add(delta)
            .ok_or_else(|| OrderError::InvalidInput(format!("paid total of order {} overflows", order.id)))
    }

    fn refresh(order: &mut Order, total_paid: Decimal) {
        order.total_paid = total_paid;
        order.status = Self::derive_status(order.total_cost, order.total_paid);
    }

    fn recorded(order: &Order, transaction_id: Uuid, amount: Decimal, at: DateTime<Utc>) -> PaymentRecordedEvent {
        PaymentRecordedEvent {
            order_id: order.id.clone(),
            transaction_id,
            amount,
            total_paid: order.total_paid,
            payment_status: order.status,
            timestamp: at.timestamp(),
        }
    }
}

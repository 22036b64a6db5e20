use chrono::{DateTime, Utc};
use orderdesk_shared::{Order, ProcessStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{OrderError, OrderResult};
use crate::overdue::{is_payment_overdue, is_quotation_expired};
use crate::rules::BusinessRules;

/// Restricts the order list to a set of process stages. Empty admits everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderFilter {
    #[serde(default)]
    pub allowed: Vec<ProcessStatus>,
}

impl OrderFilter {
    pub fn new(allowed: Vec<ProcessStatus>) -> Self {
        Self { allowed }
    }

    pub fn admits(&self, order: &Order) -> bool {
        self.allowed.is_empty() || self.allowed.contains(&order.process_status)
    }

    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        orders.iter().filter(|o| self.admits(o)).collect()
    }
}

/// Footer totals for a list of orders
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBookSummary {
    pub orders: usize,
    pub total_cost: Decimal,
    pub total_paid: Decimal,
    pub to_receive: Decimal,
    pub overdue: usize,
    pub expired_quotations: usize,
}

fn accumulate(sum: Decimal, amount: Decimal, field: &str) -> OrderResult<Decimal> {
    sum.checked_add(amount)
        .ok_or_else(|| OrderError::InvalidInput(format!("summary {} overflows", field)))
}

/// Fails with `InvalidInput` when a footer sum leaves the decimal range.
pub fn summarize<'a, I>(orders: I, now: DateTime<Utc>, rules: &BusinessRules) -> OrderResult<OrderBookSummary>
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut summary = OrderBookSummary::default();

    for order in orders {
        summary.orders += 1;
        summary.total_cost = accumulate(summary.total_cost, order.total_cost, "total cost")?;
        summary.total_paid = accumulate(summary.total_paid, order.total_paid, "total paid")?;
        summary.to_receive = accumulate(summary.to_receive, order.balance_due()?, "amount to receive")?;

        if is_payment_overdue(order, now, rules.overdue_threshold()) {
            summary.overdue += 1;
        }
        if is_quotation_expired(order, now, rules.quotation_expiry()) {
            summary.expired_quotations += 1;
        }
    }

    Ok(summary)
}

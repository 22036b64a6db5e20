use chrono::{DateTime, Utc};
use orderdesk_shared::{LineItem, Order, PaymentStatus, ProcessStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{OrderError, OrderResult};
use crate::payments::PaymentCollector;

/// Percentage discount applied to an order subtotal, within `[0, 40]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Discount(Decimal);

impl Discount {
    pub const MAX_PERCENT: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

    pub fn new(percent: Decimal) -> OrderResult<Self> {
        if percent < Decimal::ZERO || percent > Self::MAX_PERCENT {
            return Err(OrderError::InvalidInput(format!(
                "discount must be between 0 and {}, got {}",
                Self::MAX_PERCENT,
                percent
            )));
        }
        Ok(Self(percent))
    }

    pub fn none() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn percent(self) -> Decimal {
        self.0
    }

    /// Fraction of the subtotal that remains after the discount
    fn retained(self) -> Decimal {
        Decimal::ONE - self.0 / Decimal::ONE_HUNDRED
    }
}

impl TryFrom<Decimal> for Discount {
    type Error = OrderError;

    fn try_from(percent: Decimal) -> Result<Self, Self::Error> {
        Discount::new(percent)
    }
}

impl From<Discount> for Decimal {
    fn from(discount: Discount) -> Self {
        discount.0
    }
}

/// Subtotal of all lines minus the percentage discount. No rounding is applied.
/// Amounts beyond the decimal range are `InvalidInput`.
pub fn compute_total(items: &[LineItem], discount: Discount) -> OrderResult<Decimal> {
    let subtotal = items.iter().try_fold(Decimal::ZERO, |acc, item| {
        acc.checked_add(item.line_total()?)
            .ok_or_else(|| OrderError::InvalidInput("order subtotal overflows".to_string()))
    })?;

    subtotal
        .checked_mul(discount.retained())
        .ok_or_else(|| OrderError::InvalidInput("order total overflows".to_string()))
}

/// Validates a raw discount percentage before computing the total.
pub fn compute_total_checked(items: &[LineItem], discount_percent: Decimal) -> OrderResult<Decimal> {
    let discount = Discount::new(discount_percent)?;
    compute_total(items, discount)
}

/// Payload assembled by the order form before the order exists
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub items: Vec<LineItem>,
    #[serde(default = "Discount::none")]
    pub discount: Discount,
    #[serde(default)]
    pub is_quotation: bool,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub est_conclusion_date: Option<DateTime<Utc>>,
    /// Amount paid up front when placing a regular order
    #[serde(default)]
    pub paid: Option<Decimal>,
}

impl OrderDraft {
    pub fn new(items: Vec<LineItem>, discount: Discount) -> Self {
        Self {
            items,
            discount,
            is_quotation: false,
            est_conclusion_date: None,
            paid: None,
        }
    }

    pub fn total(&self) -> OrderResult<Decimal> {
        compute_total(&self.items, self.discount)
    }

    /// Turn the draft into an order. Quotations skip the process pipeline and take no payment.
    pub fn place(self, id: impl Into<String>, now: DateTime<Utc>) -> OrderResult<Order> {
        if self.items.is_empty() {
            return Err(OrderError::InvalidInput("an order needs at least one item".to_string()));
        }

        let mut order = Order::new(id, now);
        order.total_cost = self.total()?;
        order.discount = self.discount.percent();
        order.est_conclusion_date = self.est_conclusion_date;
        order.items = self.items;

        if self.is_quotation {
            if self.paid.is_some_and(|p| !p.is_zero()) {
                return Err(OrderError::InvalidInput("quotations cannot take payments".to_string()));
            }
            order.status = PaymentStatus::Quotation;
            order.process_status = ProcessStatus::None;
            return Ok(order);
        }

        if let Some(paid) = self.paid.filter(|p| !p.is_zero()) {
            PaymentCollector::collect(&mut order, paid, now)?;
        }

        Ok(order)
    }
}

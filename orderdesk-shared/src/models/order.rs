use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::{PaymentStatus, ProcessStatus};

/// A malformed numeric field on an order record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid input: {0}")]
pub struct InvalidInput(pub String);

/// One product line on an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", try_from = "LineItemRecord")]
pub struct LineItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub price: Decimal,
    pub quantity: Decimal,
}

impl LineItem {
    /// Unit price must be non-negative and quantity strictly positive.
    pub fn new(price: Decimal, quantity: Decimal) -> Result<Self, InvalidInput> {
        if price < Decimal::ZERO {
            return Err(InvalidInput(format!("price must not be negative, got {}", price)));
        }
        if quantity <= Decimal::ZERO {
            return Err(InvalidInput(format!("quantity must be positive, got {}", quantity)));
        }

        Ok(Self {
            product_id: None,
            title: None,
            price,
            quantity,
        })
    }

    /// Price times quantity; fails instead of overflowing.
    pub fn line_total(&self) -> Result<Decimal, InvalidInput> {
        self.price.checked_mul(self.quantity).ok_or_else(|| {
            InvalidInput(format!(
                "line total overflows: {} x {}",
                self.price, self.quantity
            ))
        })
    }
}

// Unvalidated wire shape; saved orders call the quantity "amount".
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineItemRecord {
    #[serde(default)]
    product_id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    price: Decimal,
    #[serde(alias = "amount")]
    quantity: Decimal,
}

impl TryFrom<LineItemRecord> for LineItem {
    type Error = InvalidInput;

    fn try_from(record: LineItemRecord) -> Result<Self, Self::Error> {
        let mut item = LineItem::new(record.price, record.quantity)?;
        item.product_id = record.product_id;
        item.title = record.title;
        Ok(item)
    }
}

/// A payment received against an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub amount: Decimal,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(amount: Decimal, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            created_at,
        }
    }
}

/// An order (or quotation) as fetched from the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    pub status: PaymentStatus,
    #[serde(default = "default_process_status")]
    pub process_status: ProcessStatus,
    #[serde(default)]
    pub total_cost: Decimal,
    #[serde(default)]
    pub total_paid: Decimal,
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub est_conclusion_date: Option<DateTime<Utc>>,
}

fn default_process_status() -> ProcessStatus {
    ProcessStatus::None
}

impl Order {
    /// A fresh order with nothing paid yet.
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            status: PaymentStatus::Open,
            process_status: ProcessStatus::New,
            total_cost: Decimal::ZERO,
            total_paid: Decimal::ZERO,
            discount: Decimal::ZERO,
            items: Vec::new(),
            created_at,
            transactions: Vec::new(),
            est_conclusion_date: None,
        }
    }

    pub fn is_quotation(&self) -> bool {
        self.status == PaymentStatus::Quotation
    }

    /// Amount still to receive
    pub fn balance_due(&self) -> Result<Decimal, InvalidInput> {
        self.total_cost
            .checked_sub(self.total_paid)
            .ok_or_else(|| InvalidInput(format!("balance of order {} overflows", self.id)))
    }

    /// Timestamp of the most recent payment, if any
    pub fn last_payment_at(&self) -> Option<DateTime<Utc>> {
        self.transactions.iter().map(|t| t.created_at).max()
    }

    /// Transactions newest first
    pub fn transactions_by_recency(&self) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.transactions.iter().collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sorted
    }

    /// Sum of line quantities
    pub fn total_units(&self) -> Result<Decimal, InvalidInput> {
        self.items.iter().try_fold(Decimal::ZERO, |acc, item| {
            acc.checked_add(item.quantity)
                .ok_or_else(|| InvalidInput(format!("unit count overflows on order {}", self.id)))
        })
    }
}

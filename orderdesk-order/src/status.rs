use chrono::{DateTime, Utc};
use orderdesk_shared::{Order, PaymentStatus, ProcessStatus};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::OrderResult;
use crate::overdue::is_payment_overdue;
use crate::rules::BusinessRules;

/// Label shown in the order list status column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusLabel {
    Quotation,
    Overdue(ProcessStatus),
    Process(ProcessStatus),
}

impl StatusLabel {
    /// Stable translation key for this label
    pub fn key(&self) -> String {
        match self {
            StatusLabel::Quotation => "Quotation".to_string(),
            StatusLabel::Overdue(process) => format!("{} (overdue)", process.label()),
            StatusLabel::Process(process) => process.label().to_string(),
        }
    }

    pub fn is_overdue(&self) -> bool {
        matches!(self, StatusLabel::Overdue(_))
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl Serialize for StatusLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key())
    }
}

/// Quotation wins over everything, then the overdue flag, then the plain stage.
pub fn derive_status_label(status: PaymentStatus, process: ProcessStatus, is_overdue: bool) -> StatusLabel {
    match (status, is_overdue) {
        (PaymentStatus::Quotation, _) => StatusLabel::Quotation,
        (_, true) => StatusLabel::Overdue(process),
        (_, false) => StatusLabel::Process(process),
    }
}

/// Same as [`derive_status_label`] over raw codes. The process code is not
/// consulted for quotations.
pub fn derive_status_label_from_codes(status_code: u8, process_code: u8, is_overdue: bool) -> OrderResult<StatusLabel> {
    let status = PaymentStatus::try_from(status_code)?;
    if status == PaymentStatus::Quotation {
        return Ok(StatusLabel::Quotation);
    }

    let process = ProcessStatus::try_from(process_code)?;
    Ok(derive_status_label(status, process, is_overdue))
}

/// Label for a fetched order at `now`.
pub fn order_status_label(order: &Order, now: DateTime<Utc>, rules: &BusinessRules) -> StatusLabel {
    let overdue = is_payment_overdue(order, now, rules.overdue_threshold());
    derive_status_label(order.status, order.process_status, overdue)
}

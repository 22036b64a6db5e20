use serde::{Deserialize, Serialize};
use std::fmt;

/// Raised when a numeric status code falls outside its fixed enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} code: {code}")]
pub struct UnknownStatus {
    pub kind: &'static str,
    pub code: u8,
}

/// Payment status of an order. Quotations share this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PaymentStatus {
    None,
    Open,
    Partial,
    Closed,
    Quotation,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 5] = [
        PaymentStatus::None,
        PaymentStatus::Open,
        PaymentStatus::Partial,
        PaymentStatus::Closed,
        PaymentStatus::Quotation,
    ];

    pub fn code(self) -> u8 {
        match self {
            PaymentStatus::None => 0,
            PaymentStatus::Open => 1,
            PaymentStatus::Partial => 2,
            PaymentStatus::Closed => 3,
            PaymentStatus::Quotation => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::None => "None",
            PaymentStatus::Open => "Open",
            PaymentStatus::Partial => "Partial",
            PaymentStatus::Closed => "Closed",
            PaymentStatus::Quotation => "Quotation",
        }
    }

    /// Open or Partial: money is still expected on this order.
    pub fn awaits_payment(self) -> bool {
        matches!(self, PaymentStatus::Open | PaymentStatus::Partial)
    }
}

impl TryFrom<u8> for PaymentStatus {
    type Error = UnknownStatus;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(UnknownStatus { kind: "payment status", code })
    }
}

impl From<PaymentStatus> for u8 {
    fn from(status: PaymentStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Production pipeline stage of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ProcessStatus {
    None,
    New,
    Preparation,
    Production,
    Quality,
    Finishing,
    Completed,
    DeliveredOrReturned,
    Concluded,
    Canceled,
}

impl ProcessStatus {
    pub const ALL: [ProcessStatus; 10] = [
        ProcessStatus::None,
        ProcessStatus::New,
        ProcessStatus::Preparation,
        ProcessStatus::Production,
        ProcessStatus::Quality,
        ProcessStatus::Finishing,
        ProcessStatus::Completed,
        ProcessStatus::DeliveredOrReturned,
        ProcessStatus::Concluded,
        ProcessStatus::Canceled,
    ];

    pub fn code(self) -> u8 {
        match self {
            ProcessStatus::None => 0,
            ProcessStatus::New => 1,
            ProcessStatus::Preparation => 2,
            ProcessStatus::Production => 3,
            ProcessStatus::Quality => 4,
            ProcessStatus::Finishing => 5,
            ProcessStatus::Completed => 6,
            ProcessStatus::DeliveredOrReturned => 7,
            ProcessStatus::Concluded => 8,
            ProcessStatus::Canceled => 9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProcessStatus::None => "None",
            ProcessStatus::New => "New",
            ProcessStatus::Preparation => "Preparation",
            ProcessStatus::Production => "Production",
            ProcessStatus::Quality => "Quality",
            ProcessStatus::Finishing => "Finishing",
            ProcessStatus::Completed => "Completed",
            ProcessStatus::DeliveredOrReturned => "Delivered | Returned",
            ProcessStatus::Concluded => "Concluded",
            ProcessStatus::Canceled => "Canceled",
        }
    }

    /// Concluded and Canceled admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, ProcessStatus::Concluded | ProcessStatus::Canceled)
    }

    /// The stage directly after this one, if any.
    pub fn successor(self) -> Option<ProcessStatus> {
        Self::ALL.get(usize::from(self.code()) + 1).copied()
    }
}

impl TryFrom<u8> for ProcessStatus {
    type Error = UnknownStatus;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(UnknownStatus { kind: "process status", code })
    }
}

impl From<ProcessStatus> for u8 {
    fn from(status: ProcessStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

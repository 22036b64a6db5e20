pub mod error;
pub mod rules;
pub mod totals;
pub mod status;
pub mod overdue;
pub mod process;
pub mod payments;
pub mod schedule;
pub mod summary;

pub use error::{OrderError, OrderResult};
pub use rules::BusinessRules;
pub use totals::{compute_total, compute_total_checked, Discount, OrderDraft};
pub use status::{derive_status_label, derive_status_label_from_codes, order_status_label, StatusLabel};
pub use overdue::{is_payment_overdue, is_quotation_expired};
pub use process::{legal_targets, validate_transition, validate_transition_codes};
pub use payments::PaymentCollector;
pub use schedule::{conclusion_alert, ConclusionAlert};
pub use summary::{summarize, OrderBookSummary, OrderFilter};

pub mod models;
pub mod status;

pub use models::{InvalidInput, LineItem, Order, Transaction};
pub use models::events::PaymentRecordedEvent;
pub use status::{PaymentStatus, ProcessStatus, UnknownStatus};

use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecordedEvent {
    pub order_id: String,
    pub transaction_id: Uuid,
    pub amount: Decimal,
    pub total_paid: Decimal,
    pub payment_status: crate::PaymentStatus,
    pub timestamp: i64,
}

use chrono::{DateTime, Duration, Utc};
use orderdesk_shared::Order;

/// True when an Open or Partial order has gone longer than `threshold`
/// without a payment. Orders with no transactions count from creation.
pub fn is_payment_overdue(order: &Order, now: DateTime<Utc>, threshold: Duration) -> bool {
    if !order.status.awaits_payment() {
        return false;
    }

    // max_by_key keeps the last of equal maxima
    let last_payment = order
        .transactions
        .iter()
        .max_by_key(|t| t.created_at)
        .map(|t| t.created_at)
        .unwrap_or(order.created_at);

    now - last_payment > threshold
}

/// True when a quotation is older than `threshold` and may be discarded.
pub fn is_quotation_expired(order: &Order, now: DateTime<Utc>, threshold: Duration) -> bool {
    order.is_quotation() && now - order.created_at > threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderdesk_shared::{PaymentStatus, Transaction};
    use rust_decimal::Decimal;

    const T: i64 = 1_700_000_000;

    fn order_with(status: PaymentStatus) -> Order {
        let mut order = Order::new("ord-1", DateTime::from_timestamp(T, 0).unwrap());
        order.status = status;
        order
    }

    fn days_after_creation(days: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(T, 0).unwrap() + Duration::days(days)
    }

    #[test]
    fn test_overdue_without_transactions() {
        let order = order_with(PaymentStatus::Open);
        let threshold = Duration::days(30);

        assert!(is_payment_overdue(&order, days_after_creation(31), threshold));
        assert!(!is_payment_overdue(&order, days_after_creation(29), threshold));
        // strictly greater than the threshold
        assert!(!is_payment_overdue(&order, days_after_creation(30), threshold));
    }

    #[test]
    fn test_recent_transaction_resets_clock() {
        let mut order = order_with(PaymentStatus::Partial);
        order.transactions.push(Transaction::new(Decimal::from(5), days_after_creation(20)));
        order.transactions.push(Transaction::new(Decimal::from(5), days_after_creation(2)));

        let threshold = Duration::days(30);
        assert!(!is_payment_overdue(&order, days_after_creation(45), threshold));
        assert!(is_payment_overdue(&order, days_after_creation(51), threshold));
    }

    #[test]
    fn test_only_open_or_partial_can_be_overdue() {
        let far_future = days_after_creation(3650);
        for status in [PaymentStatus::None, PaymentStatus::Closed, PaymentStatus::Quotation] {
            assert!(!is_payment_overdue(&order_with(status), far_future, Duration::days(30)));
        }
    }

    #[test]
    fn test_quotation_expiry() {
        let quote = order_with(PaymentStatus::Quotation);
        assert!(is_quotation_expired(&quote, days_after_creation(31), Duration::days(30)));
        assert!(!is_quotation_expired(&quote, days_after_creation(10), Duration::days(30)));

        let order = order_with(PaymentStatus::Open);
        assert!(!is_quotation_expired(&order, days_after_creation(90), Duration::days(30)));
    }
}

use chrono::{DateTime, Utc};
use orderdesk_order::{
    conclusion_alert, order_status_label, summarize, BusinessRules, ConclusionAlert, OrderBookSummary, OrderFilter,
    OrderResult, PaymentCollector, StatusLabel,
};
use orderdesk_shared::Order;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Write;

/// One row of the order list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub id: String,
    pub label: StatusLabel,
    pub total_cost: Decimal,
    pub total_units: Decimal,
    pub balance_due: Decimal,
    pub last_payment_at: Option<DateTime<Utc>>,
    pub conclusion: Option<ConclusionAlert>,
    pub can_collect: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub lines: Vec<OrderLine>,
    pub summary: OrderBookSummary,
}

pub fn build_report(
    orders: &[Order],
    now: DateTime<Utc>,
    filter: &OrderFilter,
    rules: &BusinessRules,
) -> OrderResult<Report> {
    let visible = filter.apply(orders);

    let lines = visible
        .iter()
        .map(|order| -> OrderResult<OrderLine> {
            Ok(OrderLine {
                id: order.id.clone(),
                label: order_status_label(order, now, rules),
                total_cost: order.total_cost,
                total_units: order.total_units()?,
                balance_due: order.balance_due()?,
                last_payment_at: order.last_payment_at(),
                conclusion: conclusion_alert(order, now, rules.conclusion_warning_days),
                can_collect: PaymentCollector::can_collect(order),
            })
        })
        .collect::<OrderResult<Vec<_>>>()?;

    Ok(Report {
        lines,
        summary: summarize(visible, now, rules)?,
    })
}

pub fn render_text(report: &Report) -> String {
    let mut out = String::new();

    for line in &report.lines {
        let last_paid = line
            .last_payment_at
            .map(|at| at.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "-".to_string());
        let alert = match line.conclusion {
            Some(ConclusionAlert::Late) => " [late]",
            Some(ConclusionAlert::DueSoon) => " [due soon]",
            None => "",
        };

        let _ = writeln!(
            out,
            "{:<12} {:<28} units {:>8} total {:>12} due {:>12} last paid {}{}",
            line.id,
            line.label.key(),
            line.total_units.normalize(),
            line.total_cost.round_dp(2),
            line.balance_due.round_dp(2),
            last_paid,
            alert
        );
    }

    let s = &report.summary;
    let _ = writeln!(
        out,
        "{} orders, total {}, paid {}, to receive {}, {} overdue, {} expired quotations",
        s.orders,
        s.total_cost.round_dp(2),
        s.total_paid.round_dp(2),
        s.to_receive.round_dp(2),
        s.overdue,
        s.expired_quotations
    );

    out
}

pub mod report;

use anyhow::{anyhow, Context};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use orderdesk_order::{compute_total_checked, legal_targets, validate_transition_codes, OrderFilter, PaymentCollector};
use orderdesk_shared::{LineItem, PaymentStatus, ProcessStatus};
use orderdesk_store::{Config, JsonOrderRepository, OrderRepository};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Order desk: totals, payment status and process checks over an orders snapshot.
#[derive(Debug, Parser)]
#[command(name = "orderdesk", version, about = "Order totals, payment and process status checks")]
pub struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// Directory holding default/{RUN_MODE}/local config files
    #[arg(long, global = true, default_value = "config")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List orders with their status label, balance and conclusion alerts
    Report {
        /// Evaluate as of this RFC 3339 instant instead of the current time
        #[arg(long)]
        now: Option<DateTime<Utc>>,
        /// Only show orders in these process status codes
        #[arg(long = "status")]
        statuses: Vec<u8>,
    },

    /// Compute an order total from a JSON array of line items
    Total {
        /// Path to the line items JSON file
        #[arg(long)]
        items: PathBuf,
        /// Discount percentage, 0 to 40
        #[arg(long, default_value = "0")]
        discount: Decimal,
    },

    /// Check whether a process status change is allowed
    Transition {
        #[arg(long)]
        from: u8,
        #[arg(long)]
        to: u8,
        /// Current payment status code
        #[arg(long)]
        payment: u8,
    },

    /// Record a payment against an order in the snapshot
    Pay {
        #[arg(long)]
        order: String,
        #[arg(long)]
        amount: Decimal,
    },
}

/// Run a parsed command and return what should be printed.
pub async fn run(cli: Cli, config: &Config) -> anyhow::Result<String> {
    let repo = JsonOrderRepository::new(&config.store.orders_path);

    match cli.command {
        Commands::Report { now, statuses } => {
            let allowed = statuses
                .into_iter()
                .map(ProcessStatus::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            let orders = repo.list_orders().await?;
            let now = now.unwrap_or_else(Utc::now);

            let report = report::build_report(&orders, now, &OrderFilter::new(allowed), &config.rules)?;
            tracing::info!("Reported {} of {} orders", report.lines.len(), orders.len());

            match cli.output {
                OutputFormat::Text => Ok(report::render_text(&report)),
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
            }
        }

        Commands::Total { items, discount } => {
            let raw = tokio::fs::read(&items)
                .await
                .with_context(|| format!("reading {}", items.display()))?;
            let items: Vec<LineItem> = serde_json::from_slice(&raw)
                .with_context(|| format!("parsing {}", items.display()))?;
            let total = compute_total_checked(&items, discount)?;

            match cli.output {
                OutputFormat::Text => Ok(format!("{}\n", total.round_dp(2).normalize())),
                OutputFormat::Json => Ok(serde_json::json!({ "total": total }).to_string()),
            }
        }

        Commands::Transition { from, to, payment } => {
            let verdict = validate_transition_codes(from, to, payment);
            if let Err(e) = &verdict {
                tracing::warn!("Rejected transition: {}", e);
            }

            let current = ProcessStatus::try_from(from)?;
            let payment = PaymentStatus::try_from(payment)?;
            let options: Vec<&str> = legal_targets(current, payment).into_iter().map(ProcessStatus::label).collect();

            match (cli.output, verdict) {
                (OutputFormat::Json, verdict) => Ok(serde_json::json!({
                    "allowed": verdict.is_ok(),
                    "error": verdict.err().map(|e| e.to_string()),
                    "legalTargets": options,
                })
                .to_string()),
                (OutputFormat::Text, Ok(())) => Ok("allowed\n".to_string()),
                (OutputFormat::Text, Err(e)) => Ok(format!("{}; legal targets: {}\n", e, options.join(", "))),
            }
        }

        Commands::Pay { order, amount } => {
            let mut record = repo
                .get_order(&order)
                .await?
                .ok_or_else(|| anyhow!("order {} not found in {}", order, repo.path().display()))?;

            let event = PaymentCollector::collect(&mut record, amount, Utc::now())?;
            repo.save_order(&record).await?;
            tracing::info!(order_id = %event.order_id, amount = %event.amount, "Payment recorded");

            match cli.output {
                OutputFormat::Text => Ok(format!(
                    "recorded {} on {}: paid {}, status {}\n",
                    event.amount, event.order_id, event.total_paid, event.payment_status
                )),
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&event)?),
            }
        }
    }
}

use clap::Parser;
use orderdesk_cli::{run, Cli};
use orderdesk_store::Config;
use std::fs;
use std::path::Path;

fn write_config(dir: &Path) -> Config {
    let orders = dir.join("orders.json");
    fs::write(
        dir.join("default.toml"),
        format!("[store]\norders_path = {:?}\n", orders.display().to_string()),
    )
    .unwrap();
    Config::load_from(dir).unwrap()
}

fn seed_orders(config: &Config) {
    let orders = serde_json::json!([
        {
            "_id": "ord-1",
            "status": 1,
            "processStatus": 3,
            "totalCost": 300,
            "totalPaid": 0,
            "createdAt": 1_700_000_000,
            "transactions": []
        },
        {
            "_id": "q-1",
            "status": 4,
            "processStatus": 0,
            "totalCost": 80,
            "createdAt": 1_700_000_000
        }
    ]);
    fs::write(&config.store.orders_path, orders.to_string()).unwrap();
}

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("orderdesk").chain(args.iter().copied())).unwrap()
}

#[tokio::test]
async fn test_report_flags_overdue_orders() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    seed_orders(&config);

    let out = run(cli(&["report", "--now", "2023-12-31T00:00:00Z"]), &config).await.unwrap();

    assert!(out.contains("Production (overdue)"));
    assert!(out.contains("Quotation"));
    assert!(out.contains("2 orders"));
    assert!(out.contains("1 expired quotations"));
}

#[tokio::test]
async fn test_report_status_filter() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    seed_orders(&config);

    let out = run(cli(&["report", "--status", "3", "--now", "2023-11-15T00:00:00Z"]), &config)
        .await
        .unwrap();

    assert!(out.contains("ord-1"));
    assert!(!out.contains("q-1"));
}

#[tokio::test]
async fn test_pay_updates_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    seed_orders(&config);

    let out = run(cli(&["pay", "--order", "ord-1", "--amount", "120.50"]), &config).await.unwrap();
    assert!(out.contains("status Partial"));

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config.store.orders_path).unwrap()).unwrap();
    assert_eq!(saved[0]["status"], 2);
    assert_eq!(saved[0]["transactions"].as_array().unwrap().len(), 1);

    let over = run(cli(&["pay", "--order", "ord-1", "--amount", "500"]), &config).await;
    assert!(over.is_err());
}

#[tokio::test]
async fn test_total_and_transition() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let items = dir.path().join("items.json");
    fs::write(&items, r#"[{"price": 100, "quantity": 2}]"#).unwrap();

    let out = run(
        cli(&["total", "--items", items.to_str().unwrap(), "--discount", "10"]),
        &config,
    )
    .await
    .unwrap();
    assert_eq!(out.trim(), "180");

    let too_much = run(
        cli(&["total", "--items", items.to_str().unwrap(), "--discount", "45"]),
        &config,
    )
    .await;
    assert!(too_much.is_err());

    let ok = run(cli(&["transition", "--from", "7", "--to", "8", "--payment", "3"]), &config)
        .await
        .unwrap();
    assert_eq!(ok, "allowed\n");

    let refused = run(cli(&["transition", "--from", "7", "--to", "8", "--payment", "1"]), &config)
        .await
        .unwrap();
    assert!(refused.contains("Illegal process transition"));
}

#[tokio::test]
async fn test_pay_keeps_paid_total_without_transactions() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let orders = serde_json::json!([{
        "_id": "ord-legacy",
        "status": 2,
        "processStatus": 2,
        "totalCost": 300,
        "totalPaid": 100,
        "createdAt": 1_700_000_000,
        "transactions": []
    }]);
    fs::write(&config.store.orders_path, orders.to_string()).unwrap();

    let out = run(cli(&["pay", "--order", "ord-legacy", "--amount", "50"]), &config).await.unwrap();
    assert!(out.contains("paid 150"));

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config.store.orders_path).unwrap()).unwrap();
    let paid: rust_decimal::Decimal = serde_json::from_value(saved[0]["totalPaid"].clone()).unwrap();
    assert_eq!(paid, rust_decimal::Decimal::from(150));
    assert_eq!(saved[0]["status"], 2);
}

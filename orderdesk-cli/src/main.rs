use clap::Parser;
use orderdesk_cli::{run, Cli};
use orderdesk_store::Config;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orderdesk_cli=info,orderdesk_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match Config::load_from(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            process::exit(2);
        }
    };
    tracing::debug!("Using orders snapshot {}", config.store.orders_path);

    match run(cli, &config).await {
        Ok(output) => print!("{}", output),
        Err(e) => {
            tracing::error!("{:#}", e);
            process::exit(1);
        }
    }
}

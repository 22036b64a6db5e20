use orderdesk_order::BusinessRules;
use serde::Deserialize;
use std::env;
use std::path::Path;

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub store: StoreConfig,
    #[serde(default)]
    pub rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// JSON snapshot holding the fetched orders
    pub orders_path: String,
}

impl Config {
    pub fn load() -> StoreResult<Self> {
        Self::load_from("config")
    }

    /// Layered load: built-in defaults, `default`, `{RUN_MODE}` and `local`
    /// files under `dir`, then `ORDERDESK__*` environment variables.
    pub fn load_from(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref();
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        tracing::debug!("Loading configuration from {:?} (mode {})", dir, run_mode);

        let s = config::Config::builder()
            .set_default("store.orders_path", "data/orders.json")?
            .add_source(config::File::from(dir.join("default")).required(false))
            .add_source(config::File::from(dir.join(&run_mode)).required(false))
            // Not checked in
            .add_source(config::File::from(dir.join("local")).required(false))
            // Eg. `ORDERDESK__RULES__OVERDUE_DAYS=45`
            .add_source(
                config::Environment::with_prefix("ORDERDESK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Config = s.try_deserialize()?;
        loaded
            .rules
            .validate()
            .map_err(|e| StoreError::Config(config::ConfigError::Message(e.to_string())))?;

        Ok(loaded)
    }
}

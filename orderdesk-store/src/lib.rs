pub mod app_config;
pub mod error;
pub mod order_repo;

pub use app_config::Config;
pub use error::{StoreError, StoreResult};
pub use order_repo::{JsonOrderRepository, OrderRepository};

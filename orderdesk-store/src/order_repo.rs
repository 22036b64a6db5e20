use async_trait::async_trait;
use orderdesk_shared::Order;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};

/// Repository trait for order data access
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn list_orders(&self) -> StoreResult<Vec<Order>>;

    async fn get_order(&self, id: &str) -> StoreResult<Option<Order>>;

    /// Replace the stored order with the same id
    async fn save_order(&self, order: &Order) -> StoreResult<()>;

    async fn save_orders(&self, orders: &[Order]) -> StoreResult<()>;
}

/// Orders kept as a JSON array in a single file
pub struct JsonOrderRepository {
    path: PathBuf,
}

impl JsonOrderRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    /// Sibling file the snapshot is staged in before the rename
    fn staging_path(&self) -> PathBuf {
        let mut staged = self.path.clone().into_os_string();
        staged.push(".tmp");
        PathBuf::from(staged)
    }
}

#[async_trait]
impl OrderRepository for JsonOrderRepository {
    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("Order snapshot {} not found, starting empty", self.display_path());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.display_path(),
                    source,
                })
            }
        };

        let orders: Vec<Order> = serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
            path: self.display_path(),
            source,
        })?;

        tracing::debug!("Loaded {} orders from {}", orders.len(), self.display_path());
        Ok(orders)
    }

    async fn get_order(&self, id: &str) -> StoreResult<Option<Order>> {
        let orders = self.list_orders().await?;
        Ok(orders.into_iter().find(|o| o.id == id))
    }

    async fn save_order(&self, order: &Order) -> StoreResult<()> {
        let mut orders = self.list_orders().await?;
        let slot = orders
            .iter_mut()
            .find(|o| o.id == order.id)
            .ok_or_else(|| StoreError::NotFound(order.id.clone()))?;
        *slot = order.clone();

        self.save_orders(&orders).await
    }

    async fn save_orders(&self, orders: &[Order]) -> StoreResult<()> {
        let body = serde_json::to_vec_pretty(orders).map_err(|source| StoreError::Parse {
            path: self.display_path(),
            source,
        })?;

        // Rename within one directory replaces the snapshot atomically
        let staged = self.staging_path();
        tokio::fs::write(&staged, body).await.map_err(|source| StoreError::Io {
            path: staged.display().to_string(),
            source,
        })?;
        tokio::fs::rename(&staged, &self.path).await.map_err(|source| StoreError::Io {
            path: self.display_path(),
            source,
        })?;

        tracing::info!("Wrote {} orders to {}", orders.len(), self.display_path());
        Ok(())
    }
}

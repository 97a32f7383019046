// SQLite Datasource Provider
//
// Turns named DatasourceConfig entries into live SqlitePool
// datasources. Pools are tracked by name so destroy can close them
// without downcasting the trait object handed back by the core.

use crate::session::SqliteSession;
use crate::{create_pool, db_err};
use async_trait::async_trait;
use sqlbridge_core::domain::{DatasourceConfig, DomainError};
use sqlbridge_core::port::{ConnectionHandle, Datasource, DatasourceProvider};
use sqlbridge_core::Result;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Configuration key holding the sqlite connection URL
pub const KEY_URL: &str = "url";

pub struct SqliteDatasourceProvider {
    configs: HashMap<String, DatasourceConfig>,
    pools: RwLock<HashMap<String, SqlitePool>>,
}

impl SqliteDatasourceProvider {
    pub fn new(configs: HashMap<String, DatasourceConfig>) -> Self {
        Self {
            configs,
            pools: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl DatasourceProvider for SqliteDatasourceProvider {
    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.configs.keys().cloned().collect();
        names.sort();
        names
    }

    fn config_for(&self, name: &str) -> Result<DatasourceConfig> {
        self.configs
            .get(name)
            .cloned()
            .ok_or_else(|| DomainError::UnknownConnection(name.to_string()).into())
    }

    async fn create(&self, name: &str) -> Result<Arc<dyn Datasource>> {
        let config = self.config_for(name)?;
        let url = config.get_str(KEY_URL).ok_or_else(|| {
            DomainError::InvalidConfig {
                name: name.to_string(),
                reason: format!("missing '{KEY_URL}' key"),
            }
        })?;

        debug!(name = %name, url = %url, "Opening SQLite pool");
        let pool = create_pool(url).await?;
        self.pools
            .write()
            .await
            .insert(name.to_string(), pool.clone());
        Ok(Arc::new(SqlitePoolDatasource { pool }))
    }

    async fn destroy(&self, name: &str, _datasource: Arc<dyn Datasource>) -> Result<()> {
        if let Some(pool) = self.pools.write().await.remove(name) {
            debug!(name = %name, "Closing SQLite pool");
            pool.close().await;
        }
        Ok(())
    }
}

/// A live SqlitePool from which dedicated sessions are drawn
pub struct SqlitePoolDatasource {
    pool: SqlitePool,
}

#[async_trait]
impl Datasource for SqlitePoolDatasource {
    async fn open_session(&self) -> Result<ConnectionHandle> {
        let conn = self.pool.acquire().await.map_err(db_err)?;
        Ok(Arc::new(SqliteSession::new(conn)))
    }
}

// Connection Handler - Public scoped-access API
//
// "Borrow a connection, run statements, release it later." Handles are
// created lazily on first use of a name, cached, and stay open until
// close_connection. A per-name mutex serializes check-then-create and
// check-then-destroy, so concurrent callers for the same name never
// open two underlying connections.

use crate::application::factory::ConnectionFactory;
use crate::application::storage::Storage;
use crate::domain::{require_non_blank, DEFAULT_CONNECTION_NAME};
use crate::error::{ConnectionError, Result};
use crate::port::ConnectionHandle;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

pub struct ConnectionHandler {
    factory: Arc<ConnectionFactory>,
    storage: Storage<ConnectionHandle>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ConnectionHandler {
    pub fn new(factory: Arc<ConnectionFactory>) -> Self {
        Self {
            factory,
            storage: Storage::new(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Run `work` against the named connection, creating and caching
    /// the handle on first use.
    ///
    /// The work result is returned unchanged on success. Any work
    /// error is wrapped into `ConnectionError::Execution` carrying the
    /// original cause and the connection name. The handle is NOT
    /// auto-closed after a work failure: it stays cached and open, and
    /// the caller must `close_connection` if the handle is suspect.
    pub async fn with_connection<F, Fut, R, E>(&self, name: &str, work: F) -> Result<R>
    where
        F: FnOnce(String, ConnectionHandle) -> Fut,
        Fut: Future<Output = std::result::Result<R, E>>,
        E: Into<crate::error::BoxError>,
    {
        require_non_blank(name)?;
        let handle = self.get_or_create(name).await?;
        debug!(name = %name, "Executing statements on connection");
        work(name.to_string(), handle)
            .await
            .map_err(|source| ConnectionError::Execution {
                name: name.to_string(),
                source: source.into(),
            })
    }

    /// `with_connection` against the well-known default name
    pub async fn with_default_connection<F, Fut, R, E>(&self, work: F) -> Result<R>
    where
        F: FnOnce(String, ConnectionHandle) -> Fut,
        Fut: Future<Output = std::result::Result<R, E>>,
        E: Into<crate::error::BoxError>,
    {
        self.with_connection(DEFAULT_CONNECTION_NAME, work).await
    }

    /// Destroy the cached handle for `name`, if any. A no-op for names
    /// never opened (or already closed), so repeated calls are safe.
    ///
    /// The cache entry is dropped before teardown runs; even a failing
    /// teardown hook cannot leave a closed handle behind in the cache.
    pub async fn close_connection(&self, name: &str) -> Result<()> {
        require_non_blank(name)?;
        let lock = self.name_lock(name).await;
        let _guard = lock.lock().await;

        if let Some(handle) = self.storage.remove(name).await {
            self.factory.destroy(name, handle).await?;
        }
        Ok(())
    }

    /// `close_connection` against the well-known default name
    pub async fn close_default_connection(&self) -> Result<()> {
        self.close_connection(DEFAULT_CONNECTION_NAME).await
    }

    /// Read-only introspection: names with a live cached handle
    pub async fn open_connections(&self) -> Vec<String> {
        self.storage.keys().await
    }

    pub async fn is_open(&self, name: &str) -> bool {
        self.storage.contains(name).await
    }

    async fn get_or_create(&self, name: &str) -> Result<ConnectionHandle> {
        let lock = self.name_lock(name).await;
        let _guard = lock.lock().await;

        if let Some(handle) = self.storage.get(name).await {
            return Ok(handle);
        }
        let handle = self.factory.create(name).await?;
        self.storage.set(name, handle.clone()).await;
        Ok(handle)
    }

    async fn name_lock(&self, name: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

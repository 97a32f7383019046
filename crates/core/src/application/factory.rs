// Connection Factory - Sole authority for turning a name into a live
// handle and back
//
// The factory caches pooled datasources separately from SQL handles,
// so a pool survives recreation of the handle drawn from it. Handle
// caching itself is the handler's responsibility, layered on top.

use crate::application::storage::Storage;
use crate::domain::{ConnectionEvent, DatasourceConfig};
use crate::error::{ConnectionError, Result};
use crate::port::{ConnectionHandle, ConnectionHook, Datasource, DatasourceProvider, EventSink};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct ConnectionFactory {
    provider: Arc<dyn DatasourceProvider>,
    events: Arc<dyn EventSink>,
    hooks: Vec<Arc<dyn ConnectionHook>>,
    datasources: Storage<Arc<dyn Datasource>>,
}

impl ConnectionFactory {
    pub fn new(provider: Arc<dyn DatasourceProvider>, events: Arc<dyn EventSink>) -> Self {
        Self {
            provider,
            events,
            hooks: Vec::new(),
            datasources: Storage::new(),
        }
    }

    /// Register a bootstrap/teardown hook. Hooks run in registration
    /// order during both create and destroy.
    pub fn register_hook(&mut self, hook: Arc<dyn ConnectionHook>) {
        self.hooks.push(hook);
    }

    /// All configured connection names
    pub fn names(&self) -> Vec<String> {
        self.provider.names()
    }

    /// Configuration for one name
    pub fn config_for(&self, name: &str) -> Result<DatasourceConfig> {
        self.provider.config_for(name)
    }

    /// Read-only introspection: names with a live pooled datasource
    pub async fn open_datasources(&self) -> Vec<String> {
        self.datasources.keys().await
    }

    /// Open a fresh handle for `name`, running bootstrap hooks.
    ///
    /// The session the hooks ran on is closed and a fresh one is
    /// opened from the same pooled datasource before returning: hooks
    /// may mutate schema or session state, and application code gets a
    /// clean session. The double open is deliberate.
    ///
    /// A failing bootstrap hook aborts the remaining hooks and leaves
    /// the datasource opened in the meantime as-is.
    pub async fn create(&self, name: &str) -> Result<ConnectionHandle> {
        let config = self.provider.config_for(name)?;
        self.events
            .emit(ConnectionEvent::connect_start(name, config.clone()));

        let datasource = self.acquire_datasource(name).await?;
        let handle = datasource.open_session().await?;

        for hook in &self.hooks {
            hook.init(name, &handle)
                .await
                .map_err(|source| ConnectionError::Bootstrap {
                    name: name.to_string(),
                    source,
                })?;
        }

        handle.close().await?;
        let handle = datasource.open_session().await?;

        info!(name = %name, "Connection established");
        self.events
            .emit(ConnectionEvent::connect_end(name, config, handle.clone()));
        Ok(handle)
    }

    /// Close `handle` and release the pooled datasource for `name`,
    /// running teardown hooks.
    ///
    /// A failing teardown hook aborts the remaining hooks; the handle
    /// is still closed and the datasource still released before the
    /// failure is surfaced.
    pub async fn destroy(&self, name: &str, handle: ConnectionHandle) -> Result<()> {
        if !self.datasources.contains(name).await {
            return Err(ConnectionError::MissingHandle {
                name: name.to_string(),
            });
        }

        let config = self.provider.config_for(name)?;
        self.events.emit(ConnectionEvent::disconnect_start(
            name,
            config.clone(),
            handle.clone(),
        ));

        let mut teardown_failure = None;
        for hook in &self.hooks {
            if let Err(source) = hook.destroy(name, &handle).await {
                warn!(name = %name, error = %source, "Teardown hook failed, aborting remaining hooks");
                teardown_failure = Some(ConnectionError::Teardown {
                    name: name.to_string(),
                    source,
                });
                break;
            }
        }

        handle.close().await?;
        self.release_datasource(name).await?;

        info!(name = %name, "Connection closed");
        self.events
            .emit(ConnectionEvent::disconnect_end(name, config));

        match teardown_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Get-or-create the pooled datasource for `name`
    async fn acquire_datasource(&self, name: &str) -> Result<Arc<dyn Datasource>> {
        if let Some(datasource) = self.datasources.get(name).await {
            return Ok(datasource);
        }
        debug!(name = %name, "Opening pooled datasource");
        let datasource = self.provider.create(name).await?;
        self.datasources.set(name, datasource.clone()).await;
        Ok(datasource)
    }

    /// Release the pooled datasource for `name`; a no-op if absent
    async fn release_datasource(&self, name: &str) -> Result<()> {
        if let Some(datasource) = self.datasources.remove(name).await {
            debug!(name = %name, "Releasing pooled datasource");
            self.provider.destroy(name, datasource).await?;
        }
        Ok(())
    }
}

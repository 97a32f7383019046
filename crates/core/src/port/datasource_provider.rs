// Datasource Provider Port (Interface)
//
// The external pooled-datasource subsystem. A datasource (pool) is
// longer-lived than any single session drawn from it; the factory
// caches datasources separately from SQL handles so the pool survives
// handle recreation.

use crate::domain::{DatasourceConfig, DomainError};
use crate::error::Result;
use crate::port::ConnectionHandle;
use async_trait::async_trait;
use std::sync::Arc;

/// A pooled resource from which sessions are drawn
#[async_trait]
pub trait Datasource: Send + Sync {
    /// Check a fresh session out of the underlying pool
    async fn open_session(&self) -> Result<ConnectionHandle>;
}

// Datasources are opaque trait objects; show only the type name so
// `Result<Arc<dyn Datasource>>` satisfies the `Debug` bound of `unwrap_err`
impl std::fmt::Debug for dyn Datasource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Datasource")
    }
}

/// Factory/registry for named pooled datasources
#[async_trait]
pub trait DatasourceProvider: Send + Sync {
    /// All configured connection names
    fn names(&self) -> Vec<String>;

    /// Configuration for one name
    ///
    /// # Errors
    /// - `DomainError::UnknownConnection` if the name is not configured
    fn config_for(&self, name: &str) -> Result<DatasourceConfig>;

    /// Open the pooled datasource for `name`
    async fn create(&self, name: &str) -> Result<Arc<dyn Datasource>>;

    /// Close the pooled datasource for `name`, returning its
    /// resources. A no-op if the provider holds nothing for the name.
    async fn destroy(&self, name: &str, datasource: Arc<dyn Datasource>) -> Result<()>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::port::SqlSession;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory session recording every statement it is handed
    #[derive(Default)]
    pub struct MemorySession {
        executed: Mutex<Vec<String>>,
        closed: AtomicBool,
    }

    impl MemorySession {
        pub fn executed(&self) -> Vec<String> {
            self.executed.lock().unwrap().clone()
        }

        pub fn is_closed(&self) -> bool {
            self.closed.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SqlSession for MemorySession {
        async fn execute(&self, sql: &str) -> Result<u64> {
            if self.is_closed() {
                return Err(crate::error::ConnectionError::Datasource(
                    "session closed".to_string(),
                ));
            }
            self.executed.lock().unwrap().push(sql.to_string());
            Ok(0)
        }

        async fn fetch_scalar(&self, _sql: &str) -> Result<Option<i64>> {
            if self.is_closed() {
                return Err(crate::error::ConnectionError::Datasource(
                    "session closed".to_string(),
                ));
            }
            Ok(None)
        }

        async fn close(&self) -> Result<()> {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    /// In-memory datasource keeping every session it ever opened, so
    /// tests can assert on the close-then-reopen behavior
    #[derive(Default)]
    pub struct MemoryDatasource {
        sessions: Mutex<Vec<Arc<MemorySession>>>,
    }

    impl MemoryDatasource {
        pub fn sessions_opened(&self) -> usize {
            self.sessions.lock().unwrap().len()
        }

        pub fn session(&self, index: usize) -> Option<Arc<MemorySession>> {
            self.sessions.lock().unwrap().get(index).cloned()
        }
    }

    #[async_trait]
    impl Datasource for MemoryDatasource {
        async fn open_session(&self) -> Result<ConnectionHandle> {
            let session = Arc::new(MemorySession::default());
            self.sessions.lock().unwrap().push(session.clone());
            Ok(session)
        }
    }

    /// Provider over a fixed set of named configs, counting calls
    pub struct MemoryDatasourceProvider {
        configs: HashMap<String, DatasourceConfig>,
        datasources: Mutex<HashMap<String, Arc<MemoryDatasource>>>,
        create_calls: AtomicUsize,
        destroy_calls: AtomicUsize,
    }

    impl MemoryDatasourceProvider {
        pub fn new(configs: HashMap<String, DatasourceConfig>) -> Self {
            Self {
                configs,
                datasources: Mutex::new(HashMap::new()),
                create_calls: AtomicUsize::new(0),
                destroy_calls: AtomicUsize::new(0),
            }
        }

        /// Provider with empty configs for the given names
        pub fn with_names(names: &[&str]) -> Self {
            Self::new(
                names
                    .iter()
                    .map(|n| (n.to_string(), DatasourceConfig::default()))
                    .collect(),
            )
        }

        pub fn create_calls(&self) -> usize {
            self.create_calls.load(Ordering::SeqCst)
        }

        pub fn destroy_calls(&self) -> usize {
            self.destroy_calls.load(Ordering::SeqCst)
        }

        /// The live datasource for `name`, if one was created and not
        /// yet destroyed
        pub fn datasource(&self, name: &str) -> Option<Arc<MemoryDatasource>> {
            self.datasources.lock().unwrap().get(name).cloned()
        }
    }

    #[async_trait]
    impl DatasourceProvider for MemoryDatasourceProvider {
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
            // Unknown names must fail before any resource is opened
            self.config_for(name)?;
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            let datasource = Arc::new(MemoryDatasource::default());
            self.datasources
                .lock()
                .unwrap()
                .insert(name.to_string(), datasource.clone());
            Ok(datasource)
        }

        async fn destroy(&self, name: &str, _datasource: Arc<dyn Datasource>) -> Result<()> {
            self.destroy_calls.fetch_add(1, Ordering::SeqCst);
            self.datasources.lock().unwrap().remove(name);
            Ok(())
        }
    }
}

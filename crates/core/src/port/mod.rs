// Port Layer - Interfaces for external collaborators

pub mod connection_hook;
pub mod datasource_provider;
pub mod event_sink;
pub mod sql_session;

// Re-exports
pub use connection_hook::{ConnectionHook, HookError};
pub use datasource_provider::{Datasource, DatasourceProvider};
pub use event_sink::{EventDispatcher, EventListener, EventSink};
pub use sql_session::{ConnectionHandle, SqlSession};

// Domain Layer - Pure connection lifecycle vocabulary

pub mod config;
pub mod connection;
pub mod error;
pub mod event;

// Re-exports
pub use config::DatasourceConfig;
pub use connection::{require_non_blank, DEFAULT_CONNECTION_NAME};
pub use error::DomainError;
pub use event::{ConnectionEvent, ConnectionEventKind};

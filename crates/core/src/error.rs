// Central Error Type for the Connection Lifecycle Manager

use thiserror::Error;

/// Boxed error used to carry arbitrary hook and work failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Crate-level error type
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Bootstrap hook failed for connection '{name}': {source}")]
    Bootstrap {
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("Teardown hook failed for connection '{name}': {source}")]
    Teardown {
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("Work on connection '{name}' failed: {source}")]
    Execution {
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("No live connection handle for '{name}'")]
    MissingHandle { name: String },

    #[error("Datasource error: {0}")]
    Datasource(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using ConnectionError
pub type Result<T> = std::result::Result<T, ConnectionError>;

// From implementation for infra crates (to avoid circular dependency)
impl From<String> for ConnectionError {
    fn from(err: String) -> Self {
        ConnectionError::Datasource(err)
    }
}

// Note: sqlx::Error conversion is handled in the infra-sqlite crate
// by converting to ConnectionError::Datasource(String)

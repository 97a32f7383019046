// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Connection name must not be blank")]
    BlankConnectionName,

    #[error("Unknown connection name: {0}")]
    UnknownConnection(String),

    #[error("Invalid configuration for connection '{name}': {reason}")]
    InvalidConfig { name: String, reason: String },
}

pub type Result<T> = std::result::Result<T, DomainError>;

// SQL Session Port (Interface)
//
// The live, usable database session behind a connection handle. The
// core never interprets what a session does; it only opens, hands out
// and closes them. Statement execution is delegated to the adapter.

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// A live database session
#[async_trait]
pub trait SqlSession: Send + Sync {
    /// Run a statement, returning the number of affected rows
    async fn execute(&self, sql: &str) -> Result<u64>;

    /// Run a query expected to yield at most one integer value
    async fn fetch_scalar(&self, sql: &str) -> Result<Option<i64>>;

    /// Close the session and return its resources to the datasource.
    /// Closing an already-closed session is a no-op.
    async fn close(&self) -> Result<()>;
}

// Sessions are opaque trait objects; show only the type name so
// `Result<ConnectionHandle>` satisfies the `Debug` bound of `unwrap_err`
impl std::fmt::Debug for dyn SqlSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SqlSession")
    }
}

/// Shared handle over a live session; exactly one is cached per name
pub type ConnectionHandle = Arc<dyn SqlSession>;

// SQLite Session
//
// A dedicated connection checked out of the pool for the lifetime of
// one handle. Dropping the inner connection on close returns it to
// the pool; a closed session rejects further statements.

use crate::db_err;
use async_trait::async_trait;
use sqlbridge_core::error::ConnectionError;
use sqlbridge_core::port::SqlSession;
use sqlbridge_core::Result;
use sqlx::pool::PoolConnection;
use sqlx::Sqlite;
use tokio::sync::Mutex;

pub struct SqliteSession {
    conn: Mutex<Option<PoolConnection<Sqlite>>>,
}

impl SqliteSession {
    pub(crate) fn new(conn: PoolConnection<Sqlite>) -> Self {
        Self {
            conn: Mutex::new(Some(conn)),
        }
    }

    fn closed() -> ConnectionError {
        ConnectionError::Datasource("session is closed".to_string())
    }
}

#[async_trait]
impl SqlSession for SqliteSession {
    async fn execute(&self, sql: &str) -> Result<u64> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(Self::closed)?;
        let result = sqlx::query(sql)
            .execute(&mut **conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected())
    }

    async fn fetch_scalar(&self, sql: &str) -> Result<Option<i64>> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(Self::closed)?;
        sqlx::query_scalar(sql)
            .fetch_optional(&mut **conn)
            .await
            .map_err(db_err)
    }

    async fn close(&self) -> Result<()> {
        // Dropping the pooled connection returns it to the pool
        self.conn.lock().await.take();
        Ok(())
    }
}

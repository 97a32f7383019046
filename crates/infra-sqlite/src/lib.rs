// Sqlbridge Infrastructure - SQLite Adapter
// Implements: DatasourceProvider, Datasource, SqlSession over sqlx

mod pool;
mod provider;
mod session;
mod settings;

pub use pool::create_pool;
pub use provider::{SqliteDatasourceProvider, SqlitePoolDatasource};
pub use session::SqliteSession;
pub use settings::load_datasources;

// sqlx::Error cannot implement From for ConnectionError here (orphan
// rules), so adapters funnel through this helper instead
pub(crate) fn db_err(err: sqlx::Error) -> sqlbridge_core::ConnectionError {
    sqlbridge_core::ConnectionError::Datasource(err.to_string())
}

// Datasource Settings Loader
//
// Named datasource definitions come from a config file, with
// SQLBRIDGE-prefixed environment variables layered on top:
//
// ```toml
// [datasources.primary]
// url = "sqlite:/var/lib/app/primary.db"
// connect_on_startup = true
// ```

use config::{Config, Environment, File};
use sqlbridge_core::domain::DatasourceConfig;
use sqlbridge_core::error::ConnectionError;
use sqlbridge_core::Result;
use std::collections::HashMap;
use std::path::Path;

/// Load the `datasources` table from `path` (missing file means no
/// datasources), applying `SQLBRIDGE_`-prefixed env overrides
pub fn load_datasources(path: &Path) -> Result<HashMap<String, DatasourceConfig>> {
    let settings = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(Environment::with_prefix("SQLBRIDGE").separator("__"))
        .build()
        .map_err(|e| ConnectionError::Config(e.to_string()))?;

    match settings.get::<HashMap<String, DatasourceConfig>>("datasources") {
        Ok(datasources) => Ok(datasources),
        Err(config::ConfigError::NotFound(_)) => Ok(HashMap::new()),
        Err(e) => Err(ConnectionError::Config(e.to_string())),
    }
}

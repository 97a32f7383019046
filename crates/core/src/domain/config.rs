// Datasource Configuration
//
// An opaque key/value mapping owned by the datasource subsystem. The
// core only reads the `connect_on_startup` flag and passes the rest
// through to hooks and events unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Flag checked by the lifecycle addon at application startup
pub const KEY_CONNECT_ON_STARTUP: &str = "connect_on_startup";

/// Opaque configuration for one named datasource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasourceConfig(Map<String, Value>);

impl DatasourceConfig {
    pub fn new(values: Map<String, Value>) -> Self {
        Self(values)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String-typed accessor for adapters (e.g. the `url` key)
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Whether this datasource must be connected eagerly at startup.
    /// Accepts `true` as a bool or as the string "true"; anything else
    /// (including an absent key) means false.
    pub fn connect_on_startup(&self) -> bool {
        self.flag(KEY_CONNECT_ON_STARTUP)
    }

    fn flag(&self, key: &str) -> bool {
        match self.0.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

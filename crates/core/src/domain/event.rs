// Lifecycle Events
//
// Immutable records emitted synchronously around connect/disconnect.
// The core never retains an event after `EventSink::emit` returns.

use crate::domain::DatasourceConfig;
use crate::port::ConnectionHandle;

/// The four emission points of the connection lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEventKind {
    ConnectStart,
    ConnectEnd,
    DisconnectStart,
    DisconnectEnd,
}

/// Event payload: {kind, name, config, optional handle}
#[derive(Clone)]
pub struct ConnectionEvent {
    pub kind: ConnectionEventKind,
    pub name: String,
    pub config: DatasourceConfig,
    pub handle: Option<ConnectionHandle>,
}

impl ConnectionEvent {
    pub fn connect_start(name: &str, config: DatasourceConfig) -> Self {
        Self {
            kind: ConnectionEventKind::ConnectStart,
            name: name.to_string(),
            config,
            handle: None,
        }
    }

    pub fn connect_end(name: &str, config: DatasourceConfig, handle: ConnectionHandle) -> Self {
        Self {
            kind: ConnectionEventKind::ConnectEnd,
            name: name.to_string(),
            config,
            handle: Some(handle),
        }
    }

    pub fn disconnect_start(
        name: &str,
        config: DatasourceConfig,
        handle: ConnectionHandle,
    ) -> Self {
        Self {
            kind: ConnectionEventKind::DisconnectStart,
            name: name.to_string(),
            config,
            handle: Some(handle),
        }
    }

    pub fn disconnect_end(name: &str, config: DatasourceConfig) -> Self {
        Self {
            kind: ConnectionEventKind::DisconnectEnd,
            name: name.to_string(),
            config,
            handle: None,
        }
    }
}

// Handles are trait objects without Debug; show presence only
impl std::fmt::Debug for ConnectionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionEvent")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("config", &self.config)
            .field("handle", &self.handle.is_some())
            .finish()
    }
}

// Lifecycle Addon - Reacts to application startup and shutdown
//
// Startup eagerly connects every datasource flagged with
// `connect_on_startup`, surfacing configuration mistakes before the
// application does real work. Shutdown closes every known name
// unconditionally; closing a never-opened name is a no-op.

use crate::application::factory::ConnectionFactory;
use crate::application::handler::ConnectionHandler;
use crate::application::signal::{LifecycleSignal, LifecycleToken};
use crate::error::Result;
use crate::port::ConnectionHandle;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, info};

pub struct ConnectionAddon {
    handler: Arc<ConnectionHandler>,
    factory: Arc<ConnectionFactory>,
}

impl ConnectionAddon {
    pub fn new(handler: Arc<ConnectionHandler>, factory: Arc<ConnectionFactory>) -> Self {
        Self { handler, factory }
    }

    /// Eagerly connect every datasource flagged for startup
    pub async fn on_startup(&self) -> Result<()> {
        for name in self.factory.names() {
            let config = self.factory.config_for(&name)?;
            if config.connect_on_startup() {
                info!(name = %name, "Connecting datasource at startup");
                self.handler
                    .with_connection(&name, noop_work)
                    .await?;
            } else {
                debug!(name = %name, "Datasource not flagged for startup, skipping");
            }
        }
        Ok(())
    }

    /// Close every known connection; no-op for names never opened
    pub async fn on_shutdown(&self) -> Result<()> {
        for name in self.factory.names() {
            self.handler.close_connection(&name).await?;
        }
        Ok(())
    }

    /// Consume lifecycle signals until shutdown completes or the
    /// sender side goes away
    pub async fn listen(&self, mut signals: LifecycleToken) -> Result<()> {
        while let Some(signal) = signals.next().await {
            match signal {
                LifecycleSignal::StartupStarted => self.on_startup().await?,
                LifecycleSignal::ShutdownStarted => {
                    self.on_shutdown().await?;
                    break;
                }
            }
        }
        Ok(())
    }
}

/// Establishes the connection without touching it
async fn noop_work(_name: String, _handle: ConnectionHandle) -> std::result::Result<(), Infallible> {
    Ok(())
}

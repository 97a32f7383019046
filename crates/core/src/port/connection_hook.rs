// Connection Hook Port (Interface)
//
// Caller-registered bootstrap/teardown callbacks, invoked once per
// connection open/close in registration order.

use crate::port::ConnectionHandle;
use async_trait::async_trait;

/// Errors raised by hooks; wrapped into Bootstrap/Teardown variants by
/// the factory
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Bootstrap/teardown callback pair. Implementations override the
/// phases they care about; both default to no-ops.
#[async_trait]
pub trait ConnectionHook: Send + Sync {
    /// Invoked after a session is opened, before it is handed to
    /// application code. Typical use: schema setup, seed statements.
    async fn init(&self, name: &str, handle: &ConnectionHandle) -> Result<(), HookError> {
        let _ = (name, handle);
        Ok(())
    }

    /// Invoked before a session is closed during destroy
    async fn destroy(&self, name: &str, handle: &ConnectionHandle) -> Result<(), HookError> {
        let _ = (name, handle);
        Ok(())
    }
}

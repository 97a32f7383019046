// Application Layer - Connection lifecycle services

pub mod addon;
pub mod factory;
pub mod handler;
pub mod signal;
pub mod storage;

#[cfg(test)]
mod factory_test;

// Re-exports
pub use addon::ConnectionAddon;
pub use factory::ConnectionFactory;
pub use handler::ConnectionHandler;
pub use signal::{lifecycle_channel, LifecycleSender, LifecycleSignal, LifecycleToken};
pub use storage::Storage;

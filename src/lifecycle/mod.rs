//! Starting, wiring and stopping the actors.

pub mod discovery_system;
pub mod tracing;

pub use self::discovery_system::DiscoverySystem;
pub use self::tracing::setup_tracing;

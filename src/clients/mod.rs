//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod actor_client;
pub mod details_client;
pub mod favorites_client;

pub use actor_client::*;
pub use details_client::*;
pub use favorites_client::*;

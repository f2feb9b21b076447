//! Generic actor framework for single-writer state management.
//!
//! This module provides the core building blocks: every stateful component of
//! the crate is an entity owned by one actor, mutated only through its mailbox
//! and observed through published snapshots.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that stateful components implement to be driven by an actor
//! - [`ResourceActor`] - Generic actor that owns one entity
//! - [`ResourceClient`] - Type-safe handle for sending requests and reading snapshots
//! - [`Mailbox`] - Weak handle for background tasks reporting back to their actor
//! - [`Subscription`] - Restartable stream of snapshots
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod core;
pub mod mock;
pub mod observable;

// Re-export core types for convenience
pub use core::*;
pub use observable::Subscription;

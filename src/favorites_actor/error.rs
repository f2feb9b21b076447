//! Error types for the favorites actor.

use thiserror::Error;

use crate::framework::FrameworkError;

/// Errors that can occur during favorites operations.
///
/// Toggling itself never fails; only reaching the store can.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FavoritesError {
    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(#[from] FrameworkError),
}

//! Error types for the details controller.

use thiserror::Error;

use crate::favorites_actor::FavoritesError;
use crate::framework::FrameworkError;

/// Errors returned by controller operations.
///
/// A failed fetch is not one of them: it is part of the published state.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DetailsError {
    /// Reviews and favorites need a selected restaurant.
    #[error("No restaurant selected")]
    NoSelection,

    #[error("Favorites store error: {0}")]
    Favorites(#[from] FavoritesError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(#[from] FrameworkError),
}

//! Error types for the places integration.

use thiserror::Error;

/// Why fetching place details failed. Both variants are shown to the user as
/// part of the details state; neither stops the controller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Network or transport failure. Eligible for a user-triggered retry.
    #[error("Places service unreachable: {0}")]
    Unreachable(String),

    /// The service answered with a payload we cannot use. Treated as permanent
    /// for that place for the rest of the session.
    #[error("Invalid places response: {0}")]
    InvalidResponse(String),
}

impl FetchError {
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Unreachable(_))
    }
}

/// Failure reported by a [`PlacesClient`](super::PlacesClient) before any payload was read.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Unexpected HTTP status {0}")]
    Status(u16),
}

impl From<TransportError> for FetchError {
    fn from(e: TransportError) -> Self {
        FetchError::Unreachable(e.to_string())
    }
}

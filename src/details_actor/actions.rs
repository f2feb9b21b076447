//! Actions accepted by the details controller.

use crate::model::{DetailsPhase, FavoritesSet, RemoteDetails, Restaurant, ReviewRecord};
use crate::places::FetchError;

/// A review typed by the user, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDraft {
    pub rating: f64,
    pub author: String,
    pub text: String,
}

impl ReviewDraft {
    pub fn new(rating: f64, author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            rating,
            author: author.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum DetailsAction {
    /// Show `restaurant`, cancelling whatever was loading before.
    Select(Restaurant),
    SubmitLocalReview(ReviewDraft),
    ToggleFavorite,
    /// Re-issue a fetch that failed as unreachable.
    Retry,
    /// The surface navigated away.
    Close,
    /// Sent by the fetch task of `generation`.
    FetchCompleted {
        generation: u64,
        result: Result<RemoteDetails, FetchError>,
    },
    /// Sent by the favorites forwarder on every favorites snapshot.
    FavoritesChanged(FavoritesSet),
}

/// Results from DetailsActions - one variant per user-facing action.
#[derive(Debug, Clone)]
pub enum DetailsActionResult {
    Select(DetailsPhase),
    SubmitLocalReview(ReviewRecord),
    ToggleFavorite(bool),
    Retry(bool),
    Close,
    /// Whether an internal notification changed the state.
    Applied(bool),
}

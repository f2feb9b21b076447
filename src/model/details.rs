//! The per-restaurant view model the details controller publishes.

use serde::Serialize;

use super::restaurant::Restaurant;
use super::review::ReviewRecord;
use crate::places::FetchError;

/// Place details returned by the places service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteDetails {
    pub maps_url: String,
    pub website_url: Option<String>,
    /// Remote reviews in the order the service ranked them.
    pub reviews: Vec<ReviewRecord>,
}

/// Progress of the remote half of the details.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RemoteStatus {
    /// No restaurant selected.
    #[default]
    Idle,
    Pending,
    Ready(RemoteDetails),
    Failed(FetchError),
}

/// Coarse state machine position: `Idle -> Loading -> (Ready | Failed)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailsPhase {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Everything a details surface renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RestaurantDetailsState {
    pub restaurant: Option<Restaurant>,
    pub remote: RemoteStatus,
    /// Remote reviews first, then local reviews in submission order.
    pub reviews: Vec<ReviewRecord>,
    pub is_favorite: bool,
    /// Non-blocking problem worth showing, e.g. favorites could not be saved.
    pub warning: Option<String>,
}

impl RestaurantDetailsState {
    pub fn phase(&self) -> DetailsPhase {
        match self.remote {
            RemoteStatus::Idle => DetailsPhase::Idle,
            RemoteStatus::Pending => DetailsPhase::Loading,
            RemoteStatus::Ready(_) => DetailsPhase::Ready,
            RemoteStatus::Failed(_) => DetailsPhase::Failed,
        }
    }

    pub fn remote_details(&self) -> Option<&RemoteDetails> {
        match &self.remote {
            RemoteStatus::Ready(details) => Some(details),
            _ => None,
        }
    }

    pub fn fetch_error(&self) -> Option<&FetchError> {
        match &self.remote {
            RemoteStatus::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_showing(&self, restaurant: &Restaurant) -> bool {
        self.restaurant.as_ref() == Some(restaurant)
    }
}

use tracing::{debug, instrument};

use crate::clients::actor_client::ActorClient;
use crate::details_actor::{
    DetailsAction, DetailsActionResult, DetailsError, RestaurantDetailsController, ReviewDraft,
};
use crate::framework::{ResourceClient, Subscription};
use crate::model::{DetailsPhase, Restaurant, RestaurantDetailsState, ReviewRecord};

/// Client a UI surface uses to drive its details controller.
#[derive(Clone)]
pub struct DetailsClient {
    inner: ResourceClient<RestaurantDetailsController>,
}

impl DetailsClient {
    pub fn new(inner: ResourceClient<RestaurantDetailsController>) -> Self {
        Self { inner }
    }

    /// Shows `restaurant`. Returns once the state is `Loading` (or `Failed` for a
    /// place already known to answer invalid payloads); the fetch result lands
    /// later through [`observe`](Self::observe).
    #[instrument(skip(self, restaurant), fields(place_id = %restaurant.id()))]
    pub async fn select(&self, restaurant: Restaurant) -> Result<DetailsPhase, DetailsError> {
        debug!("Sending request");
        match self.inner.perform_action(DetailsAction::Select(restaurant)).await? {
            DetailsActionResult::Select(phase) => Ok(phase),
            _ => unreachable!("Select action must return Select result"),
        }
    }

    /// Adds a review written by the user. `rating` is clamped to 1..=5 and an
    /// empty `author` becomes "Anonymous".
    #[instrument(skip(self, author, text))]
    pub async fn submit_local_review(
        &self,
        rating: f64,
        author: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<ReviewRecord, DetailsError> {
        debug!("Sending request");
        let draft = ReviewDraft::new(rating, author, text);
        match self.inner.perform_action(DetailsAction::SubmitLocalReview(draft)).await? {
            DetailsActionResult::SubmitLocalReview(review) => Ok(review),
            _ => unreachable!("SubmitLocalReview action must return SubmitLocalReview result"),
        }
    }

    /// Toggles the selected restaurant in the favorites store and returns the
    /// new membership.
    #[instrument(skip(self))]
    pub async fn toggle_favorite(&self) -> Result<bool, DetailsError> {
        debug!("Sending request");
        match self.inner.perform_action(DetailsAction::ToggleFavorite).await? {
            DetailsActionResult::ToggleFavorite(is_favorite) => Ok(is_favorite),
            _ => unreachable!("ToggleFavorite action must return ToggleFavorite result"),
        }
    }

    /// Re-fetches after an `Unreachable` failure. `false` when there was
    /// nothing to retry.
    #[instrument(skip(self))]
    pub async fn retry(&self) -> Result<bool, DetailsError> {
        debug!("Sending request");
        match self.inner.perform_action(DetailsAction::Retry).await? {
            DetailsActionResult::Retry(issued) => Ok(issued),
            _ => unreachable!("Retry action must return Retry result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn close(&self) -> Result<(), DetailsError> {
        debug!("Sending request");
        match self.inner.perform_action(DetailsAction::Close).await? {
            DetailsActionResult::Close => Ok(()),
            _ => unreachable!("Close action must return Close result"),
        }
    }

    pub fn state(&self) -> RestaurantDetailsState {
        self.snapshot()
    }

    pub fn observe(&self) -> Subscription<RestaurantDetailsState> {
        self.subscribe()
    }
}

impl ActorClient<RestaurantDetailsController> for DetailsClient {
    fn inner(&self) -> &ResourceClient<RestaurantDetailsController> {
        &self.inner
    }
}

//! ActorEntity implementation for the restaurant details controller.
//!
//! State machine: `Idle -> Loading -> (Ready | Failed)`.
//!
//! Each fetch is tagged with a generation number. Selecting another restaurant
//! aborts the running fetch task and bumps the generation, and a
//! [`DetailsAction::FetchCompleted`] whose generation is not the current one is
//! dropped, so the last select always wins.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::actions::{DetailsAction, DetailsActionResult, ReviewDraft};
use super::error::DetailsError;
use crate::clients::FavoritesClient;
use crate::framework::{ActorEntity, Mailbox};
use crate::merger::merge_reviews;
use crate::model::{
    DetailsPhase, FavoritesSet, PlaceId, RemoteDetails, RemoteStatus, Restaurant,
    RestaurantDetailsState, ReviewRecord,
};
use crate::places::{FetchError, PlaceDetailsFetcher};

/// Dependencies injected when the controller actor runs.
#[derive(Clone)]
pub struct DetailsContext {
    pub fetcher: PlaceDetailsFetcher,
    pub favorites: FavoritesClient,
}

impl DetailsContext {
    pub fn new(fetcher: PlaceDetailsFetcher, favorites: FavoritesClient) -> Self {
        Self { fetcher, favorites }
    }
}

#[derive(Debug, Default)]
pub struct RestaurantDetailsController {
    state: RestaurantDetailsState,
    /// Reviews written this session, per place, in submission order.
    local_reviews: HashMap<PlaceId, Vec<ReviewRecord>>,
    /// Places whose payload was rejected. Not fetched again this session.
    invalid_places: HashMap<PlaceId, FetchError>,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
    favorites_revision: u64,
    forwarder: Option<JoinHandle<()>>,
}

impl RestaurantDetailsController {
    pub fn new() -> Self {
        Self::default()
    }

    fn selected_id(&self) -> Option<PlaceId> {
        self.state.restaurant.as_ref().map(|r| r.id().clone())
    }

    fn cancel_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            debug!(generation = self.generation, "Cancelling in-flight fetch");
            handle.abort();
        }
    }

    /// Recomputes `state.reviews` from the remote reviews (if any) and the
    /// local reviews of the selected place.
    fn refresh_reviews(&mut self) {
        let local = self
            .state
            .restaurant
            .as_ref()
            .and_then(|r| self.local_reviews.get(r.id()))
            .map(Vec::as_slice)
            .unwrap_or_default();
        let remote = self
            .state
            .remote_details()
            .map(|details| details.reviews.as_slice())
            .unwrap_or_default();
        let merged = merge_reviews(remote, local);
        self.state.reviews = merged;
    }

    fn start_fetch(&mut self, place_id: PlaceId, ctx: &DetailsContext, mailbox: &Mailbox<Self>) {
        self.cancel_in_flight();
        self.generation += 1;
        let generation = self.generation;
        debug!(%place_id, generation, "Starting fetch");

        self.state.remote = RemoteStatus::Pending;
        let fetcher = ctx.fetcher.clone();
        let mailbox = mailbox.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = fetcher.fetch(&place_id).await;
            if !mailbox
                .notify(DetailsAction::FetchCompleted { generation, result })
                .await
            {
                debug!(%place_id, generation, "Controller gone, fetch result dropped");
            }
        }));
    }

    async fn select(
        &mut self,
        restaurant: Restaurant,
        ctx: &DetailsContext,
        mailbox: &Mailbox<Self>,
    ) -> Result<DetailsPhase, DetailsError> {
        if self.state.is_showing(&restaurant) && self.state.phase() == DetailsPhase::Loading {
            debug!(place_id = %restaurant.id(), "Already loading");
            return Ok(DetailsPhase::Loading);
        }

        // Ask first: if the store is unreachable nothing changes.
        let membership = ctx.favorites.membership(restaurant.id().clone()).await?;
        let is_favorite = membership.is_favorite;
        self.favorites_revision = self.favorites_revision.max(membership.revision);

        self.cancel_in_flight();
        let place_id = restaurant.id().clone();
        info!(%place_id, name = restaurant.name(), is_favorite, "Restaurant selected");
        self.state = RestaurantDetailsState {
            restaurant: Some(restaurant),
            remote: RemoteStatus::Pending,
            reviews: Vec::new(),
            is_favorite,
            warning: None,
        };

        match self.invalid_places.get(&place_id) {
            Some(error) => {
                debug!(%place_id, "Place known to answer invalid payloads, not fetching");
                self.state.remote = RemoteStatus::Failed(error.clone());
            }
            None => self.start_fetch(place_id, ctx, mailbox),
        }
        self.refresh_reviews();
        Ok(self.state.phase())
    }

    fn fetch_completed(&mut self, generation: u64, result: Result<RemoteDetails, FetchError>) -> bool {
        if generation != self.generation || self.state.phase() != DetailsPhase::Loading {
            debug!(generation, current = self.generation, "Discarding stale fetch result");
            return false;
        }
        self.in_flight = None;
        let Some(place_id) = self.selected_id() else {
            return false;
        };

        self.state.remote = match result {
            Ok(details) => {
                info!(%place_id, generation, reviews = details.reviews.len(), "Details ready");
                RemoteStatus::Ready(details)
            }
            Err(error) => {
                warn!(%place_id, generation, error = %error, "Details fetch failed");
                if !error.is_transient() {
                    self.invalid_places.insert(place_id, error.clone());
                }
                RemoteStatus::Failed(error)
            }
        };
        self.refresh_reviews();
        true
    }

    fn submit_local_review(&mut self, draft: ReviewDraft) -> Result<ReviewRecord, DetailsError> {
        let place_id = self.selected_id().ok_or(DetailsError::NoSelection)?;
        let review = ReviewRecord::local(draft.rating, &draft.author, draft.text);
        info!(%place_id, rating = review.rating(), author = review.author(), "Local review added");

        self.local_reviews
            .entry(place_id)
            .or_default()
            .push(review.clone());
        self.refresh_reviews();
        Ok(review)
    }

    async fn toggle_favorite(&mut self, ctx: &DetailsContext) -> Result<bool, DetailsError> {
        let restaurant = self.state.restaurant.clone().ok_or(DetailsError::NoSelection)?;
        let outcome = ctx.favorites.toggle(restaurant).await?;

        self.favorites_revision = self.favorites_revision.max(outcome.revision);
        self.state.is_favorite = outcome.is_favorite;
        self.state.warning = outcome.warning;
        Ok(outcome.is_favorite)
    }

    fn retry(&mut self, ctx: &DetailsContext, mailbox: &Mailbox<Self>) -> bool {
        let retryable = self
            .state
            .fetch_error()
            .is_some_and(FetchError::is_transient);
        let Some(place_id) = self.selected_id().filter(|_| retryable) else {
            debug!(phase = ?self.state.phase(), "Nothing to retry");
            return false;
        };

        info!(%place_id, "Retrying fetch");
        self.start_fetch(place_id, ctx, mailbox);
        self.refresh_reviews();
        true
    }

    fn close(&mut self) {
        self.cancel_in_flight();
        if let Some(place_id) = self.selected_id() {
            info!(%place_id, "Details closed");
        }
        self.state = RestaurantDetailsState::default();
    }

    /// Applies a favorites snapshot newer than the last one seen.
    fn favorites_changed(&mut self, favorites: FavoritesSet) -> bool {
        if favorites.revision() <= self.favorites_revision {
            return false;
        }
        self.favorites_revision = favorites.revision();
        match self.selected_id() {
            Some(place_id) => {
                self.state.is_favorite = favorites.contains(&place_id);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl ActorEntity for RestaurantDetailsController {
    type Action = DetailsAction;
    type ActionResult = DetailsActionResult;
    type Snapshot = RestaurantDetailsState;
    type Context = DetailsContext;
    type Error = DetailsError;

    fn snapshot(&self) -> RestaurantDetailsState {
        self.state.clone()
    }

    /// Forwards every favorites snapshot into this controller's mailbox, so a
    /// toggle made on another surface shows up here.
    async fn on_start(
        &mut self,
        ctx: &DetailsContext,
        mailbox: &Mailbox<Self>,
    ) -> Result<(), DetailsError> {
        let mut favorites = ctx.favorites.observe();
        let mailbox = mailbox.clone();
        self.forwarder = Some(tokio::spawn(async move {
            while let Some(snapshot) = favorites.next().await {
                if !mailbox.notify(DetailsAction::FavoritesChanged(snapshot)).await {
                    break;
                }
            }
        }));
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: DetailsAction,
        ctx: &DetailsContext,
        mailbox: &Mailbox<Self>,
    ) -> Result<DetailsActionResult, DetailsError> {
        match action {
            DetailsAction::Select(restaurant) => self
                .select(restaurant, ctx, mailbox)
                .await
                .map(DetailsActionResult::Select),
            DetailsAction::SubmitLocalReview(draft) => self
                .submit_local_review(draft)
                .map(DetailsActionResult::SubmitLocalReview),
            DetailsAction::ToggleFavorite => self
                .toggle_favorite(ctx)
                .await
                .map(DetailsActionResult::ToggleFavorite),
            DetailsAction::Retry => Ok(DetailsActionResult::Retry(self.retry(ctx, mailbox))),
            DetailsAction::Close => {
                self.close();
                Ok(DetailsActionResult::Close)
            }
            DetailsAction::FetchCompleted { generation, result } => Ok(
                DetailsActionResult::Applied(self.fetch_completed(generation, result)),
            ),
            DetailsAction::FavoritesChanged(favorites) => Ok(DetailsActionResult::Applied(
                self.favorites_changed(favorites),
            )),
        }
    }

    async fn on_stop(&mut self, _ctx: &DetailsContext) {
        self.cancel_in_flight();
        if let Some(forwarder) = self.forwarder.take() {
            forwarder.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReviewOrigin;

    fn restaurant(id: &str) -> Restaurant {
        Restaurant::new(id, format!("Place {id}"), "1 Main St", 4.2, "")
    }

    fn details(author: &str) -> RemoteDetails {
        RemoteDetails {
            maps_url: "https://maps.example/p".to_string(),
            website_url: None,
            reviews: vec![ReviewRecord::remote(4.0, Some(author), "", None)],
        }
    }

    fn loading(id: &str) -> RestaurantDetailsController {
        let mut controller = RestaurantDetailsController::new();
        controller.state.restaurant = Some(restaurant(id));
        controller.state.remote = RemoteStatus::Pending;
        controller.generation = 3;
        controller
    }

    #[test]
    fn stale_generation_is_discarded() {
        let mut controller = loading("b");
        assert!(!controller.fetch_completed(2, Ok(details("old"))));
        assert_eq!(controller.state.phase(), DetailsPhase::Loading);
        assert!(controller.state.reviews.is_empty());
    }

    #[test]
    fn result_after_close_is_discarded() {
        let mut controller = loading("b");
        controller.close();
        assert!(!controller.fetch_completed(3, Ok(details("late"))));
        assert_eq!(controller.state, RestaurantDetailsState::default());
    }

    #[test]
    fn failure_keeps_local_reviews() {
        let mut controller = loading("xyz");
        controller.submit_local_review(ReviewDraft::new(3.0, "Me", "ok")).unwrap();

        assert!(controller.fetch_completed(3, Err(FetchError::Unreachable("down".into()))));
        assert_eq!(controller.state.phase(), DetailsPhase::Failed);
        assert_eq!(controller.state.reviews.len(), 1);
        assert_eq!(controller.state.reviews[0].origin(), ReviewOrigin::Local);
        assert!(controller.invalid_places.is_empty());
    }

    #[test]
    fn invalid_response_is_remembered() {
        let mut controller = loading("bad");
        controller.fetch_completed(3, Err(FetchError::InvalidResponse("missing url".into())));
        assert!(controller.invalid_places.contains_key(&PlaceId::from("bad")));
    }

    #[test]
    fn review_without_selection_is_refused() {
        let mut controller = RestaurantDetailsController::new();
        let result = controller.submit_local_review(ReviewDraft::new(5.0, "", "hi"));
        assert_eq!(result, Err(DetailsError::NoSelection));
    }

    #[test]
    fn older_favorites_snapshots_are_ignored() {
        let mut controller = loading("a");
        controller.favorites_revision = 4;

        let mut favorites = FavoritesSet::default();
        favorites.toggle(restaurant("a"));
        assert_eq!(favorites.revision(), 1);
        assert!(!controller.favorites_changed(favorites.clone()));
        assert!(!controller.state.is_favorite);

        for _ in 0..4 {
            favorites.toggle(restaurant("z"));
        }
        assert!(controller.favorites_changed(favorites));
        assert!(controller.state.is_favorite);
    }
}

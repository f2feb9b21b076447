use tracing::{debug, instrument};

use crate::clients::actor_client::ActorClient;
use crate::favorites_actor::{
    FavoritesAction, FavoritesActionResult, FavoritesError, FavoritesStore, Membership,
    ToggleOutcome,
};
use crate::framework::{ResourceClient, Subscription};
use crate::model::{FavoritesSet, PlaceId, Restaurant};

/// Client for interacting with the favorites store.
///
/// Cheap to clone; every screen that shows or changes favorites holds one.
#[derive(Clone)]
pub struct FavoritesClient {
    inner: ResourceClient<FavoritesStore>,
}

impl FavoritesClient {
    pub fn new(inner: ResourceClient<FavoritesStore>) -> Self {
        Self { inner }
    }

    pub async fn is_favorite(&self, place_id: PlaceId) -> Result<bool, FavoritesError> {
        Ok(self.membership(place_id).await?.is_favorite)
    }

    /// Membership together with the revision it was read at, for callers that
    /// also follow [`observe`](Self::observe).
    #[instrument(skip(self), fields(place_id = %place_id))]
    pub async fn membership(&self, place_id: PlaceId) -> Result<Membership, FavoritesError> {
        debug!("Sending request");
        match self.inner.perform_action(FavoritesAction::IsFavorite(place_id)).await? {
            FavoritesActionResult::IsFavorite(membership) => Ok(membership),
            _ => unreachable!("IsFavorite action must return IsFavorite result"),
        }
    }

    /// Flips membership of `restaurant`. Persistence problems come back as
    /// [`ToggleOutcome::warning`], never as an error.
    #[instrument(skip(self, restaurant), fields(place_id = %restaurant.id()))]
    pub async fn toggle(&self, restaurant: Restaurant) -> Result<ToggleOutcome, FavoritesError> {
        debug!("Sending request");
        match self.inner.perform_action(FavoritesAction::Toggle(restaurant)).await? {
            FavoritesActionResult::Toggle(outcome) => Ok(outcome),
            _ => unreachable!("Toggle action must return Toggle result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Restaurant>, FavoritesError> {
        debug!("Sending request");
        match self.inner.perform_action(FavoritesAction::List).await? {
            FavoritesActionResult::List(restaurants) => Ok(restaurants),
            _ => unreachable!("List action must return List result"),
        }
    }

    /// Snapshots of the favorites set, current one first.
    pub fn observe(&self) -> Subscription<FavoritesSet> {
        self.subscribe()
    }

    pub(crate) async fn stop(&self) -> Result<(), FavoritesError> {
        Ok(self.inner.stop().await?)
    }
}

impl ActorClient<FavoritesStore> for FavoritesClient {
    fn inner(&self) -> &ResourceClient<FavoritesStore> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action};
    use crate::framework::FrameworkError;

    #[tokio::test]
    async fn test_toggle_returns_outcome() {
        let (client, mut receiver, _state) =
            create_mock_client::<FavoritesStore>(10, FavoritesSet::default());
        let favorites = FavoritesClient::new(client);

        let toggle = tokio::spawn(async move {
            favorites
                .toggle(Restaurant::new("abc", "Chez Jo", "", 4.0, ""))
                .await
        });

        let (action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        match action {
            FavoritesAction::Toggle(restaurant) => assert_eq!(restaurant.id().as_str(), "abc"),
            other => panic!("Expected Toggle action, got {other:?}"),
        }
        let outcome = ToggleOutcome { is_favorite: true, revision: 1, warning: None };
        responder
            .send(Ok(FavoritesActionResult::Toggle(outcome.clone())))
            .unwrap();

        assert_eq!(toggle.await.unwrap().unwrap(), outcome);
    }

    #[tokio::test]
    async fn test_is_favorite_maps_closed_actor() {
        let (client, receiver, _state) =
            create_mock_client::<FavoritesStore>(10, FavoritesSet::default());
        drop(receiver);

        let result = FavoritesClient::new(client).is_favorite(PlaceId::from("abc")).await;
        assert_eq!(
            result,
            Err(FavoritesError::ActorCommunicationError(FrameworkError::ActorClosed))
        );
    }
}

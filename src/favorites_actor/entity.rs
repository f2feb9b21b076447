//! ActorEntity implementation for the favorites store.
//!
//! The store is driven by a [`ResourceActor`](crate::framework::ResourceActor),
//! so concurrent toggles from several screens are applied one after the
//! other: two toggles of the same restaurant always restore the original
//! membership.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use super::actions::{FavoritesAction, FavoritesActionResult, Membership, ToggleOutcome};
use super::error::FavoritesError;
use crate::framework::{ActorEntity, Mailbox};
use crate::model::{FavoritesSet, Restaurant};
use crate::persistence::FavoritesRepository;

#[derive(Debug, Default)]
pub struct FavoritesStore {
    favorites: FavoritesSet,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn toggle(
        &mut self,
        restaurant: Restaurant,
        repository: &dyn FavoritesRepository,
    ) -> ToggleOutcome {
        let place_id = restaurant.id().clone();
        let is_favorite = self.favorites.toggle(restaurant);
        info!(%place_id, is_favorite, size = self.favorites.len(), "Favorite toggled");

        let warning = match repository.save_favorites(&self.favorites).await {
            Ok(()) => None,
            Err(e) => {
                warn!(%place_id, error = %e, "Favorites not persisted");
                Some(format!("Favorites could not be saved: {e}"))
            }
        };

        ToggleOutcome {
            is_favorite,
            revision: self.favorites.revision(),
            warning,
        }
    }
}

#[async_trait]
impl ActorEntity for FavoritesStore {
    type Action = FavoritesAction;
    type ActionResult = FavoritesActionResult;
    type Snapshot = FavoritesSet;
    type Context = Arc<dyn FavoritesRepository>;
    type Error = FavoritesError;

    fn snapshot(&self) -> FavoritesSet {
        self.favorites.clone()
    }

    /// Loads the persisted favorites. A failed load starts the session empty.
    async fn on_start(
        &mut self,
        repository: &Self::Context,
        _mailbox: &Mailbox<Self>,
    ) -> Result<(), FavoritesError> {
        match repository.load_favorites().await {
            Ok(loaded) => {
                info!(count = loaded.len(), "Favorites loaded");
                if !loaded.is_empty() {
                    self.favorites.replace_entries(loaded);
                }
            }
            Err(e) => warn!(error = %e, "Favorites could not be loaded, starting empty"),
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: FavoritesAction,
        repository: &Self::Context,
        _mailbox: &Mailbox<Self>,
    ) -> Result<FavoritesActionResult, FavoritesError> {
        match action {
            FavoritesAction::Toggle(restaurant) => {
                let outcome = self.toggle(restaurant, repository.as_ref()).await;
                Ok(FavoritesActionResult::Toggle(outcome))
            }
            FavoritesAction::IsFavorite(place_id) => {
                Ok(FavoritesActionResult::IsFavorite(Membership {
                    is_favorite: self.favorites.contains(&place_id),
                    revision: self.favorites.revision(),
                }))
            }
            FavoritesAction::List => Ok(FavoritesActionResult::List(self.favorites.restaurants())),
        }
    }
}

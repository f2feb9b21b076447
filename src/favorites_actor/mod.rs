//! Process-wide favorites store: the only writer of the [`FavoritesSet`](crate::model::FavoritesSet).

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::FavoritesStore;
pub use error::*;

use crate::clients::FavoritesClient;
use crate::framework::ResourceActor;

/// Creates a new favorites actor and its client.
///
/// Run the actor with the repository it loads from and saves to:
/// `tokio::spawn(actor.run(repository))`.
pub fn new(buffer_size: usize) -> (ResourceActor<FavoritesStore>, FavoritesClient) {
    let (actor, generic_client) = ResourceActor::new(FavoritesStore::new(), buffer_size);
    let client = FavoritesClient::new(generic_client);
    (actor, client)
}

//! One controller per displayed restaurant surface.
//!
//! The controller owns a [`RestaurantDetailsState`](crate::model::RestaurantDetailsState)
//! and is the only code that mutates it. Fetches run in background tasks and
//! report back through the actor's [`Mailbox`](crate::framework::Mailbox).

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::{DetailsContext, RestaurantDetailsController};
pub use error::*;

use crate::clients::DetailsClient;
use crate::framework::ResourceActor;

/// Creates a new details controller actor and its client.
///
/// Run it with a [`DetailsContext`]: `tokio::spawn(actor.run(context))`.
pub fn new(buffer_size: usize) -> (ResourceActor<RestaurantDetailsController>, DetailsClient) {
    let (actor, generic_client) =
        ResourceActor::new(RestaurantDetailsController::new(), buffer_size);
    let client = DetailsClient::new(generic_client);
    (actor, client)
}

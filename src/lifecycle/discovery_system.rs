use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::clients::{ActorClient, DetailsClient, FavoritesClient};
use crate::config::DiscoveryConfig;
use crate::details_actor::{DetailsContext, RestaurantDetailsController};
use crate::framework::Mailbox;
use crate::persistence::{
    FavoritesRepository, InMemoryFavoritesRepository, JsonFileFavoritesRepository,
};
use crate::places::{PlaceDetailsFetcher, PlacesClient};

/// Runtime orchestrator of the restaurant discovery core.
///
/// `DiscoverySystem` is responsible for:
/// - **Lifecycle Management**: starting the favorites store once per process
///   and one details controller per displayed restaurant surface, and stopping
///   all of them
/// - **Dependency Wiring**: every controller gets the shared fetcher and a
///   handle to the one favorites store
///
/// # Example
///
/// ```ignore
/// let mut system = DiscoverySystem::new(places, repository, DiscoveryConfig::default());
///
/// let sheet = system.open_details();
/// sheet.select(restaurant).await?;
/// sheet.submit_local_review(5.0, "", "Great!").await?;
///
/// system.shutdown().await?;
/// ```
pub struct DiscoverySystem {
    /// Client for the process-wide favorites store
    pub favorites_client: FavoritesClient,

    fetcher: PlaceDetailsFetcher,
    mailbox_capacity: usize,
    favorites_handle: JoinHandle<()>,
    controllers: Vec<(Mailbox<RestaurantDetailsController>, JoinHandle<()>)>,
}

impl DiscoverySystem {
    /// Starts the favorites store. Controllers start on [`open_details`](Self::open_details).
    pub fn new(
        places: Arc<dyn PlacesClient>,
        repository: Arc<dyn FavoritesRepository>,
        config: DiscoveryConfig,
    ) -> Self {
        let (favorites_actor, favorites_client) =
            crate::favorites_actor::new(config.mailbox_capacity);
        let favorites_handle = tokio::spawn(favorites_actor.run(repository));

        Self {
            favorites_client,
            fetcher: PlaceDetailsFetcher::new(places, config.fetch_timeout),
            mailbox_capacity: config.mailbox_capacity,
            favorites_handle,
            controllers: Vec::new(),
        }
    }

    /// Like [`new`](Self::new), persisting favorites to `config.favorites_path`
    /// when one is set and in memory otherwise.
    pub fn from_config(places: Arc<dyn PlacesClient>, config: DiscoveryConfig) -> Self {
        let repository: Arc<dyn FavoritesRepository> = match &config.favorites_path {
            Some(path) => {
                info!(path = %path.display(), "Persisting favorites to file");
                Arc::new(JsonFileFavoritesRepository::new(path.clone()))
            }
            None => Arc::new(InMemoryFavoritesRepository::new()),
        };
        Self::new(places, repository, config)
    }

    /// Starts a details controller for a new restaurant surface.
    pub fn open_details(&mut self) -> DetailsClient {
        let (actor, client) = crate::details_actor::new(self.mailbox_capacity);
        let context = DetailsContext::new(self.fetcher.clone(), self.favorites_client.clone());
        let handle = tokio::spawn(actor.run(context));

        self.controllers.retain(|(_, handle)| !handle.is_finished());
        self.controllers.push((client.mailbox(), handle));
        info!(controllers = self.controllers.len(), "Details surface opened");
        client
    }

    /// Stops every controller, then the favorites store, and waits for all of
    /// them. Clients still held elsewhere get `ActorClosed` afterwards.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // Controllers hold favorites clients, so they go first.
        for (mailbox, handle) in self.controllers {
            mailbox.stop().await;
            Self::join(handle).await?;
        }

        if let Err(e) = self.favorites_client.stop().await {
            info!(error = %e, "Favorites store already stopped");
        }
        Self::join(self.favorites_handle).await?;

        info!("System shutdown complete.");
        Ok(())
    }

    async fn join(handle: JoinHandle<()>) -> Result<(), String> {
        handle.await.map_err(|e| {
            error!("Actor task failed: {:?}", e);
            format!("Actor task failed: {:?}", e)
        })
    }
}

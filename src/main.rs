//! Walks one detail sheet through the life of a session: a restaurant that
//! loads, a local review, a favorite, and a restaurant the places service
//! cannot be reached for.

use std::sync::Arc;

use restaurant_details::config::DiscoveryConfig;
use restaurant_details::lifecycle::{setup_tracing, DiscoverySystem};
use restaurant_details::model::{DetailsPhase, Restaurant};
use restaurant_details::places::{StaticPlacesClient, TransportError};
use serde_json::json;
use tracing::{error, info, Instrument};

fn demo_places() -> StaticPlacesClient {
    StaticPlacesClient::new()
        .with_payload(
            "abc",
            json!({
                "status": "OK",
                "result": {
                    "url": "https://maps.google.com/?cid=1001",
                    "website": "https://chezjo.example",
                    "reviews": [
                        { "author_name": "Jo", "rating": 4, "text": "Solid bistro food.", "time": 1700000000 }
                    ]
                }
            }),
        )
        .fail_with("xyz", TransportError::Connection("connection refused".to_string()))
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = DiscoveryConfig::from_env();
    info!(?config, "Starting restaurant details demo");
    let mut system = DiscoverySystem::from_config(Arc::new(demo_places()), config);
    let sheet = system.open_details();

    let chez_jo = Restaurant::new("abc", "Chez Jo", "12 Rue Oberkampf", 4.4, "");
    let span = tracing::info_span!("chez_jo");
    async {
        sheet.select(chez_jo).await.map_err(|e| e.to_string())?;
        let mut updates = sheet.observe();
        while let Some(state) = updates.next().await {
            if state.phase() != DetailsPhase::Loading {
                break;
            }
        }

        let review = sheet
            .submit_local_review(6.0, "", "Great!")
            .await
            .map_err(|e| e.to_string())?;
        info!(rating = review.rating(), author = review.author(), "Review submitted");

        let is_favorite = sheet.toggle_favorite().await.map_err(|e| e.to_string())?;
        let state = sheet.state();
        info!(
            phase = ?state.phase(),
            reviews = state.reviews.len(),
            is_favorite,
            "Chez Jo ready"
        );
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let unreachable = Restaurant::new("xyz", "Night Market", "3 Canal St", 3.9, "");
    let span = tracing::info_span!("night_market");
    async {
        sheet.select(unreachable).await.map_err(|e| e.to_string())?;
        let mut updates = sheet.observe();
        while let Some(state) = updates.next().await {
            if let Some(cause) = state.fetch_error() {
                error!(error = %cause, "Details unavailable");
                break;
            }
        }
        sheet
            .submit_local_review(3.0, "Sam", "Could not see the menu, food was fine.")
            .await
            .map_err(|e| e.to_string())?;
        info!(reviews = sheet.state().reviews.len(), "Local review kept while offline");
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let favorites = system
        .favorites_client
        .list()
        .await
        .map_err(|e| e.to_string())?;
    info!(count = favorites.len(), "Favorites at exit");

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}

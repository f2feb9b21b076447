use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};

use super::client::PlacesClient;
use super::error::FetchError;
use super::payload::PlaceDetailsResponse;
use crate::model::{PlaceId, RemoteDetails};

/// Fetches and validates the details of one place.
///
/// One network call per [`fetch`](Self::fetch), no retry. The returned future
/// can be dropped or its task aborted at any point; nothing is shared until the
/// caller commits the result.
#[derive(Clone)]
pub struct PlaceDetailsFetcher {
    client: Arc<dyn PlacesClient>,
    timeout: Duration,
}

impl PlaceDetailsFetcher {
    pub fn new(client: Arc<dyn PlacesClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[instrument(skip(self), fields(place_id = %place_id))]
    pub async fn fetch(&self, place_id: &PlaceId) -> Result<RemoteDetails, FetchError> {
        debug!("Requesting place details");
        let payload = match tokio::time::timeout(self.timeout, self.client.get_details(place_id)).await {
            Ok(Ok(payload)) => payload,
            Ok(Err(e)) => {
                warn!(error = %e, "Places request failed");
                return Err(e.into());
            }
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "Places request timed out");
                return Err(FetchError::Unreachable(format!(
                    "no answer within {} ms",
                    self.timeout.as_millis()
                )));
            }
        };

        let details = match PlaceDetailsResponse::from_value(payload)
            .and_then(PlaceDetailsResponse::into_remote_details)
        {
            Ok(details) => details,
            Err(e) => {
                warn!(error = %e, "Rejected places payload");
                return Err(e);
            }
        };
        debug!(reviews = details.reviews.len(), "Place details ready");
        Ok(details)
    }
}

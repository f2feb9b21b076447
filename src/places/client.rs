use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::RwLock;

use super::error::TransportError;
use crate::model::PlaceId;

/// Network client for the places service.
///
/// Implementations perform exactly one request per call and return the raw
/// JSON body; decoding and validation belong to
/// [`PlaceDetailsFetcher`](super::PlaceDetailsFetcher).
#[async_trait]
pub trait PlacesClient: Send + Sync {
    async fn get_details(&self, place_id: &PlaceId) -> Result<Value, TransportError>;
}

/// In-memory places service keyed by place id.
///
/// Unknown ids answer the service's `NOT_FOUND` payload, ids registered with
/// [`StaticPlacesClient::fail_with`] answer a transport error.
#[derive(Debug, Default)]
pub struct StaticPlacesClient {
    responses: RwLock<HashMap<PlaceId, Result<Value, TransportError>>>,
}

impl StaticPlacesClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(self, place_id: impl Into<PlaceId>, payload: Value) -> Self {
        self.set(place_id.into(), Ok(payload));
        self
    }

    pub fn fail_with(self, place_id: impl Into<PlaceId>, error: TransportError) -> Self {
        self.set(place_id.into(), Err(error));
        self
    }

    fn set(&self, place_id: PlaceId, response: Result<Value, TransportError>) {
        if let Ok(mut responses) = self.responses.write() {
            responses.insert(place_id, response);
        }
    }
}

#[async_trait]
impl PlacesClient for StaticPlacesClient {
    async fn get_details(&self, place_id: &PlaceId) -> Result<Value, TransportError> {
        let responses = self
            .responses
            .read()
            .map_err(|_| TransportError::Connection("places table poisoned".to_string()))?;
        match responses.get(place_id) {
            Some(response) => response.clone(),
            None => Ok(json!({ "status": "NOT_FOUND" })),
        }
    }
}

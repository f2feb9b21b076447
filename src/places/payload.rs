//! Wire format of a place details response.
//!
//! Mirrors the subset of the Google Place Details response the app reads:
//!
//! ```text
//! { "status": "OK",
//!   "result": { "url": "...", "website": "...",
//!               "reviews": [ { "author_name": "...", "rating": 4, "text": "...", "time": 1700000000 } ] } }
//! ```

use serde::Deserialize;
use serde_json::Value;

use super::error::FetchError;
use crate::model::{RemoteDetails, ReviewRecord};

const STATUS_OK: &str = "OK";

/// Statuses where asking again later may succeed. Every other non-OK status
/// (`NOT_FOUND`, `INVALID_REQUEST`, `REQUEST_DENIED`, `ZERO_RESULTS`, ...) is a
/// rejected request.
const TRANSIENT_STATUSES: [&str; 2] = ["UNKNOWN_ERROR", "OVER_QUERY_LIMIT"];

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDetailsResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub result: Option<PlaceResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceResult {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub reviews: Vec<PlaceReview>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceReview {
    #[serde(default)]
    pub author_name: Option<String>,
    pub rating: f64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub time: Option<i64>,
}

impl PlaceDetailsResponse {
    pub fn from_value(payload: Value) -> Result<Self, FetchError> {
        serde_json::from_value(payload).map_err(|e| FetchError::InvalidResponse(e.to_string()))
    }

    /// Validates the payload and converts it into domain details.
    pub fn into_remote_details(self) -> Result<RemoteDetails, FetchError> {
        if let Some(status) = self.status.as_deref() {
            if status != STATUS_OK {
                let detail = match self.error_message {
                    Some(message) => format!("status {status}: {message}"),
                    None => format!("status {status}"),
                };
                return Err(if TRANSIENT_STATUSES.contains(&status) {
                    FetchError::Unreachable(detail)
                } else {
                    FetchError::InvalidResponse(detail)
                });
            }
        }

        let result = self
            .result
            .ok_or_else(|| FetchError::InvalidResponse("missing result".to_string()))?;
        let maps_url = result
            .url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| FetchError::InvalidResponse("missing maps url".to_string()))?;

        let reviews = result
            .reviews
            .into_iter()
            .map(|review| {
                ReviewRecord::remote(
                    review.rating,
                    review.author_name.as_deref(),
                    review.text,
                    review.time,
                )
            })
            .collect();

        Ok(RemoteDetails {
            maps_url,
            website_url: result.website.filter(|site| !site.trim().is_empty()),
            reviews,
        })
    }
}

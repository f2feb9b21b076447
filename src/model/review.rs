//! Normalized review representation, whatever its origin.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Author shown when a review carries no display name.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

pub const MIN_REVIEW_RATING: f64 = 1.0;
pub const MAX_REVIEW_RATING: f64 = 5.0;

/// Where a review came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewOrigin {
    /// Returned by the places service.
    Remote,
    /// Written in the app during this session.
    Local,
}

/// A single review.
///
/// Fields are private so every record goes through normalization:
/// the rating always lies in `1.0..=5.0` and the author is never blank.
/// Records are immutable; [`ReviewRecord::with_text`] returns an edited copy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRecord {
    rating: f64,
    author: String,
    text: String,
    origin: ReviewOrigin,
    created_at: Option<i64>,
}

impl ReviewRecord {
    pub fn new(
        rating: f64,
        author: Option<&str>,
        text: impl Into<String>,
        origin: ReviewOrigin,
        created_at: Option<i64>,
    ) -> Self {
        Self {
            rating: clamp_rating(rating),
            author: normalize_author(author),
            text: text.into(),
            origin,
            created_at,
        }
    }

    /// A review as returned by the places service.
    pub fn remote(
        rating: f64,
        author: Option<&str>,
        text: impl Into<String>,
        created_at: Option<i64>,
    ) -> Self {
        Self::new(rating, author, text, ReviewOrigin::Remote, created_at)
    }

    /// A review submitted in the app now.
    pub fn local(rating: f64, author: &str, text: impl Into<String>) -> Self {
        Self::new(rating, Some(author), text, ReviewOrigin::Local, Some(unix_now()))
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> ReviewOrigin {
        self.origin
    }

    /// Unix seconds, when known.
    pub fn created_at(&self) -> Option<i64> {
        self.created_at
    }

    pub fn is_local(&self) -> bool {
        self.origin == ReviewOrigin::Local
    }

    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }
}

fn clamp_rating(rating: f64) -> f64 {
    if rating.is_nan() {
        return MIN_REVIEW_RATING;
    }
    rating.clamp(MIN_REVIEW_RATING, MAX_REVIEW_RATING)
}

fn normalize_author(author: Option<&str>) -> String {
    match author.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => ANONYMOUS_AUTHOR.to_string(),
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or_default()
}

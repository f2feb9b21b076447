use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Stable identifier the places service assigns to a restaurant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(pub String);

impl PlaceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlaceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlaceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A restaurant as listed by the discovery screens.
///
/// Immutable once fetched. Equality and hashing only look at [`Restaurant::id`],
/// so two listings of the same place are the same restaurant even if their
/// name or rating differ. Deserialized values go through [`Restaurant::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "StoredRestaurant")]
pub struct Restaurant {
    id: PlaceId,
    name: String,
    address: String,
    rating: f64,
    photo_url: String,
}

/// Wire shape of a [`Restaurant`], before normalization.
#[derive(Deserialize)]
struct StoredRestaurant {
    id: PlaceId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    photo_url: String,
}

impl From<StoredRestaurant> for Restaurant {
    fn from(stored: StoredRestaurant) -> Self {
        Restaurant::new(
            stored.id,
            stored.name,
            stored.address,
            stored.rating,
            stored.photo_url,
        )
    }
}

impl Restaurant {
    pub const MAX_RATING: f64 = 5.0;

    /// Creates a restaurant. `rating` is clamped into `0.0..=5.0`.
    pub fn new(
        id: impl Into<PlaceId>,
        name: impl Into<String>,
        address: impl Into<String>,
        rating: f64,
        photo_url: impl Into<String>,
    ) -> Self {
        let rating = if rating.is_nan() {
            0.0
        } else {
            rating.clamp(0.0, Self::MAX_RATING)
        };
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            rating,
            photo_url: photo_url.into(),
        }
    }

    pub fn id(&self) -> &PlaceId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn photo_url(&self) -> &str {
        &self.photo_url
    }
}

impl PartialEq for Restaurant {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Restaurant {}

impl Hash for Restaurant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equality_is_by_id() {
        let listed = Restaurant::new("abc", "Chez Jo", "1 Main St", 4.2, "");
        let refreshed = Restaurant::new("abc", "Chez Jo's", "1 Main Street", 4.4, "http://img");
        assert_eq!(listed, refreshed);

        let set: HashSet<_> = [listed, refreshed].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn rating_is_clamped() {
        assert_eq!(Restaurant::new("a", "A", "", 7.0, "").rating(), 5.0);
        assert_eq!(Restaurant::new("a", "A", "", -1.0, "").rating(), 0.0);
        assert_eq!(Restaurant::new("a", "A", "", f64::NAN, "").rating(), 0.0);
    }

    #[test]
    fn deserialized_rating_is_clamped() {
        let restaurant: Restaurant = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "name": "Chez Jo",
            "address": "1 Main St",
            "rating": 42.0,
            "photo_url": ""
        }))
        .unwrap();
        assert_eq!(restaurant.id().as_str(), "abc");
        assert_eq!(restaurant.name(), "Chez Jo");
        assert_eq!(restaurant.rating(), 5.0);

        let restaurant: Restaurant =
            serde_json::from_value(serde_json::json!({ "id": "def", "rating": -3 })).unwrap();
        assert_eq!(restaurant.rating(), 0.0);
        assert_eq!(restaurant.address(), "");
    }
}

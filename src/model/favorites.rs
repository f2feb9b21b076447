use serde::Serialize;
use std::collections::BTreeMap;

use super::restaurant::{PlaceId, Restaurant};

/// The set of favorited restaurants.
///
/// Membership is by [`PlaceId`]. `revision` increases on every toggle so
/// observers can tell an older snapshot from a newer one. Only the favorites
/// store mutates a set; everyone else receives clones.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FavoritesSet {
    entries: BTreeMap<PlaceId, Restaurant>,
    revision: u64,
}

impl FavoritesSet {
    pub fn from_restaurants(restaurants: impl IntoIterator<Item = Restaurant>) -> Self {
        Self {
            entries: restaurants
                .into_iter()
                .map(|restaurant| (restaurant.id().clone(), restaurant))
                .collect(),
            revision: 0,
        }
    }

    pub fn contains(&self, id: &PlaceId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn ids(&self) -> impl Iterator<Item = &PlaceId> {
        self.entries.keys()
    }

    /// Favorited restaurants ordered by id.
    pub fn restaurants(&self) -> Vec<Restaurant> {
        self.entries.values().cloned().collect()
    }

    /// Inserts if absent, removes if present. Returns the new membership.
    pub(crate) fn toggle(&mut self, restaurant: Restaurant) -> bool {
        self.revision += 1;
        if self.entries.remove(restaurant.id()).is_some() {
            false
        } else {
            self.entries.insert(restaurant.id().clone(), restaurant);
            true
        }
    }

    /// Replaces the content with `loaded`, keeping the revision moving forward.
    pub(crate) fn replace_entries(&mut self, loaded: FavoritesSet) {
        self.entries = loaded.entries;
        self.revision += 1;
    }
}

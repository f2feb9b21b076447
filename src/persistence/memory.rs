use async_trait::async_trait;
use std::sync::Mutex;

use super::{FavoritesRepository, PersistenceError};
use crate::model::{FavoritesSet, Restaurant};

/// Keeps the saved favorites in process memory.
#[derive(Debug, Default)]
pub struct InMemoryFavoritesRepository {
    saved: Mutex<Vec<Restaurant>>,
}

impl InMemoryFavoritesRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `restaurants` already saved.
    pub fn with_favorites(restaurants: impl IntoIterator<Item = Restaurant>) -> Self {
        Self {
            saved: Mutex::new(restaurants.into_iter().collect()),
        }
    }

    /// What the last save wrote.
    pub fn saved(&self) -> Vec<Restaurant> {
        self.saved
            .lock()
            .map(|saved| saved.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl FavoritesRepository for InMemoryFavoritesRepository {
    async fn load_favorites(&self) -> Result<FavoritesSet, PersistenceError> {
        let saved = self
            .saved
            .lock()
            .map_err(|_| PersistenceError::Unavailable("favorites lock poisoned".to_string()))?;
        Ok(FavoritesSet::from_restaurants(saved.iter().cloned()))
    }

    async fn save_favorites(&self, favorites: &FavoritesSet) -> Result<(), PersistenceError> {
        let mut saved = self
            .saved
            .lock()
            .map_err(|_| PersistenceError::Unavailable("favorites lock poisoned".to_string()))?;
        *saved = favorites.restaurants();
        Ok(())
    }
}

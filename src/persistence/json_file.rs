use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{FavoritesRepository, PersistenceError};
use crate::model::{FavoritesSet, Restaurant};

/// Stores favorites as a JSON array of restaurants in one file.
///
/// A missing file loads as an empty set. Saves write a sibling temporary file
/// and rename it over the target, so a crash never leaves half a file behind.
#[derive(Debug, Clone)]
pub struct JsonFileFavoritesRepository {
    path: PathBuf,
}

impl JsonFileFavoritesRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "favorites.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl FavoritesRepository for JsonFileFavoritesRepository {
    async fn load_favorites(&self) -> Result<FavoritesSet, PersistenceError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No favorites file yet");
                return Ok(FavoritesSet::default());
            }
            Err(e) => return Err(e.into()),
        };
        let restaurants: Vec<Restaurant> = serde_json::from_str(&raw)?;
        Ok(FavoritesSet::from_restaurants(restaurants))
    }

    async fn save_favorites(&self, favorites: &FavoritesSet) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_string_pretty(&favorites.restaurants())?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, body).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        debug!(path = %self.path.display(), count = favorites.len(), "Favorites saved");
        Ok(())
    }
}

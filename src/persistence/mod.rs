//! Storage for the favorites set.
//!
//! The favorites store loads once at start and saves after every toggle. A
//! failing repository never blocks a toggle: the in-memory set stays
//! authoritative for the session.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileFavoritesRepository;
pub use memory::InMemoryFavoritesRepository;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::FavoritesSet;

/// Errors raised by a favorites repository.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Favorites storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Favorites serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Favorites storage unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    async fn load_favorites(&self) -> Result<FavoritesSet, PersistenceError>;

    async fn save_favorites(&self, favorites: &FavoritesSet) -> Result<(), PersistenceError>;
}

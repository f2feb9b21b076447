//! Actions accepted by the favorites store.

use crate::model::{PlaceId, Restaurant};

/// Operations on the favorites set. `Toggle` is the only mutation.
#[derive(Debug, Clone)]
pub enum FavoritesAction {
    /// Inserts the restaurant if absent, removes it if present.
    Toggle(Restaurant),
    IsFavorite(PlaceId),
    /// Favorited restaurants, for the favorites screen.
    List,
}

/// Results from FavoritesActions - variants match 1:1 with FavoritesAction
#[derive(Debug, Clone)]
pub enum FavoritesActionResult {
    Toggle(ToggleOutcome),
    IsFavorite(Membership),
    List(Vec<Restaurant>),
}

/// Membership of one place, and the revision of the set it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Membership {
    pub is_favorite: bool,
    pub revision: u64,
}

/// What a toggle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Membership after the toggle.
    pub is_favorite: bool,
    /// Revision of the set after the toggle.
    pub revision: u64,
    /// Set when the new set could not be saved. The toggle still took effect.
    pub warning: Option<String>,
}

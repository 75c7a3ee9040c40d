//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::departures::BoardConfig;
use crate::schedule::TransitData;
use crate::search::{Favorites, FavoritesError, FavoritesStore};

/// Shared application state.
///
/// The dataset is read-only once loaded; only the favourites change.
#[derive(Clone)]
pub struct AppState {
    /// Decoded dataset and its indexes
    pub data: Arc<TransitData>,

    /// Departure list configuration
    pub config: Arc<BoardConfig>,

    /// Favourite stop groups
    pub favorites: Arc<RwLock<Favorites>>,

    /// Where favourites are persisted
    pub store: Arc<FavoritesStore>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        data: TransitData,
        config: BoardConfig,
        favorites: Favorites,
        store: FavoritesStore,
    ) -> Self {
        Self {
            data: Arc::new(data),
            config: Arc::new(config),
            favorites: Arc::new(RwLock::new(favorites)),
            store: Arc::new(store),
        }
    }

    pub async fn favorite_names(&self) -> Vec<String> {
        self.favorites.read().await.names().to_vec()
    }

    /// Toggle `name` and persist the result.
    ///
    /// Returns whether `name` is now a favourite and the full list. If the
    /// file cannot be written the toggle is undone.
    pub async fn toggle_favorite(&self, name: &str) -> Result<(bool, Vec<String>), FavoritesError> {
        let mut favorites = self.favorites.write().await;
        let is_favorite = favorites.toggle(name);

        if let Err(e) = self.store.save(&favorites) {
            favorites.toggle(name);
            return Err(e);
        }

        Ok((is_favorite, favorites.names().to_vec()))
    }
}

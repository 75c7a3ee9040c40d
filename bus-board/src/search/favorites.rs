//! Favourite stop groups and their on-disk store.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors reading or writing the favourites file.
#[derive(Debug, thiserror::Error)]
pub enum FavoritesError {
    /// Filesystem operation failed
    #[error("favorites file error: {message}")]
    Io { message: String },

    /// File contents are not a favourites list
    #[error("favorites JSON error: {message}")]
    Json { message: String },
}

/// Ordered list of favourite stop group names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorites {
    names: Vec<String>,
}

impl Favorites {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Add `name` at the end if absent, remove it if present.
    ///
    /// Returns whether `name` is a favourite afterwards.
    pub fn toggle(&mut self, name: &str) -> bool {
        match self.names.iter().position(|n| n == name) {
            Some(i) => {
                self.names.remove(i);
                false
            }
            None => {
                self.names.push(name.to_string());
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// JSON file holding the favourites list.
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    path: PathBuf,
}

impl FavoritesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the stored list. A missing file is an empty list.
    pub fn load(&self) -> Result<Favorites, FavoritesError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Favorites::default());
            }
            Err(e) => {
                return Err(FavoritesError::Io {
                    message: format!("failed to read {}: {}", self.path.display(), e),
                });
            }
        };

        serde_json::from_str(&contents).map_err(|e| FavoritesError::Json {
            message: e.to_string(),
        })
    }

    /// Write the list, creating parent directories if needed.
    pub fn save(&self, favorites: &Favorites) -> Result<(), FavoritesError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| FavoritesError::Io {
                message: format!("failed to create directory: {}", e),
            })?;
        }

        let json = serde_json::to_string_pretty(favorites).map_err(|e| FavoritesError::Json {
            message: e.to_string(),
        })?;

        std::fs::write(&self.path, json).map_err(|e| FavoritesError::Io {
            message: format!("failed to write {}: {}", self.path.display(), e),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn toggle_adds_then_removes() {
        let mut favorites = Favorites::default();
        assert!(favorites.toggle("Gion"));
        assert!(favorites.toggle("Kyoto Station"));
        assert!(favorites.contains("Gion"));
        assert_eq!(favorites.names(), ["Gion", "Kyoto Station"]);

        assert!(!favorites.toggle("Gion"));
        assert!(!favorites.contains("Gion"));
        assert_eq!(favorites.names(), ["Kyoto Station"]);
    }

    #[test]
    fn save_and_load() {
        let dir = tempdir().unwrap();
        let store = FavoritesStore::new(dir.path().join("favorites.json"));

        let favorites = Favorites::new(vec!["Gion".to_string(), "Demachiyanagi".to_string()]);
        store.save(&favorites).unwrap();

        assert_eq!(store.load().unwrap(), favorites);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = FavoritesStore::new(dir.path().join("absent.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FavoritesStore::new(&path).load().unwrap_err();
        assert!(matches!(err, FavoritesError::Json { .. }));
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("favorites.json");
        let store = FavoritesStore::new(&path);

        store.save(&Favorites::default()).unwrap();
        assert!(path.exists());
    }
}

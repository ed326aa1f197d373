//! Saved recipes.
//!
//! Favorites are full copies of recipes kept in insertion order, at most one
//! per recipe id. Every change rewrites the whole collection under
//! [`FAVORITES_KEY`]. The in-memory collection is authoritative: when a
//! write fails the change is kept and the error is returned so the caller
//! can warn that it was not saved.

use std::collections::HashSet;

use crate::models::{Recipe, RecipeId};
use crate::storage::{KeyValueStore, StorageError, FAVORITES_KEY};

pub struct FavoritesStore<S: KeyValueStore> {
    storage: S,
    favorites: Vec<Recipe>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Loads favorites from storage.
    ///
    /// A missing, unreadable or corrupt value yields an empty collection.
    /// The stored value is left as-is until the next successful write.
    pub fn load(storage: S) -> Self {
        let favorites = match storage.get(FAVORITES_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<Recipe>>(&json) {
                Ok(recipes) => dedupe_by_id(recipes),
                Err(e) => {
                    tracing::warn!("Discarding corrupt favorites in '{}': {}", FAVORITES_KEY, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read favorites: {}", e);
                Vec::new()
            }
        };

        tracing::debug!("Loaded {} favorite(s)", favorites.len());
        Self { storage, favorites }
    }

    /// Adds a copy of `recipe` unless one with the same id is already saved.
    ///
    /// Returns `Ok(true)` if the recipe was added. Nothing is written when it
    /// was already a favorite.
    pub fn add(&mut self, recipe: &Recipe) -> Result<bool, StorageError> {
        if self.is_favorite(recipe.id) {
            return Ok(false);
        }
        self.favorites.push(recipe.clone());
        self.persist()?;
        Ok(true)
    }

    /// Removes the favorite with `recipe_id`. Returns `Ok(false)` if absent.
    pub fn remove(&mut self, recipe_id: RecipeId) -> Result<bool, StorageError> {
        let len_before = self.favorites.len();
        self.favorites.retain(|r| r.id != recipe_id);
        if self.favorites.len() == len_before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Flips the favorite status of `recipe` and returns the new status.
    pub fn toggle(&mut self, recipe: &Recipe) -> Result<bool, StorageError> {
        if self.is_favorite(recipe.id) {
            self.remove(recipe.id)?;
            Ok(false)
        } else {
            self.add(recipe)?;
            Ok(true)
        }
    }

    /// Removes every favorite and deletes the stored value.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.favorites.clear();
        self.storage.delete(FAVORITES_KEY)
    }

    pub fn is_favorite(&self, recipe_id: RecipeId) -> bool {
        self.favorites.iter().any(|r| r.id == recipe_id)
    }

    pub fn get(&self, recipe_id: RecipeId) -> Option<&Recipe> {
        self.favorites.iter().find(|r| r.id == recipe_id)
    }

    /// Favorites in the order they were added.
    pub fn list(&self) -> &[Recipe] {
        &self.favorites
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    fn persist(&self) -> Result<(), StorageError> {
        // Serializing these types cannot fail
        let json = serde_json::to_string(&self.favorites).unwrap_or_else(|_| "[]".to_string());
        self.storage.set(FAVORITES_KEY, &json).inspect_err(|e| {
            tracing::warn!("Favorites could not be saved: {}", e);
        })
    }
}

/// Keeps the first recipe seen for each id.
fn dedupe_by_id(recipes: Vec<Recipe>) -> Vec<Recipe> {
    let before = recipes.len();
    let mut seen = HashSet::new();
    let unique: Vec<Recipe> = recipes.into_iter().filter(|r| seen.insert(r.id)).collect();
    if unique.len() != before {
        tracing::warn!(
            "Dropped {} duplicate favorite(s) while loading",
            before - unique.len()
        );
    }
    unique
}

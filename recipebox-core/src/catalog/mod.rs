//! Recipe sources.
//!
//! The stores only ever receive recipe records; where they come from is up
//! to a [`RecipeSource`]. [`SampleCatalog`] serves a small bundled set of
//! recipes so the application works without network access or an API key.

use rand::seq::SliceRandom;
use thiserror::Error;

use crate::models::{Recipe, RecipeId, SearchResponse};

const SAMPLE_RECIPES: &str = include_str!("sample_recipes.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("recipe not found: {0}")]
    RecipeNotFound(RecipeId),

    #[error("invalid recipe data: {0}")]
    InvalidData(#[from] serde_json::Error),
}

/// Orderings for a page of results. Sorting is stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecipeSort {
    /// Keep the source's order.
    #[default]
    Relevance,
    /// Quickest first.
    ReadyTime,
    /// Most servings first.
    Servings,
    /// Very healthy recipes first.
    Health,
}

impl RecipeSort {
    pub fn apply(self, recipes: &mut [Recipe]) {
        match self {
            RecipeSort::Relevance => {}
            RecipeSort::ReadyTime => recipes.sort_by_key(|r| r.ready_in_minutes),
            RecipeSort::Servings => recipes.sort_by_key(|r| std::cmp::Reverse(r.servings)),
            RecipeSort::Health => recipes.sort_by_key(|r| !r.very_healthy),
        }
    }
}

/// Something that can look up recipes.
pub trait RecipeSource {
    /// Recipes whose title or summary contains `query`, at most `limit` of them.
    fn search(&self, query: &str, limit: usize) -> Result<SearchResponse, CatalogError>;

    /// Up to `limit` recipes in random order.
    fn random(&self, limit: usize) -> Result<SearchResponse, CatalogError>;

    fn get(&self, id: RecipeId) -> Result<Recipe, CatalogError>;
}

/// In-memory recipe source.
#[derive(Debug, Clone)]
pub struct SampleCatalog {
    recipes: Vec<Recipe>,
}

impl SampleCatalog {
    /// Loads the bundled demo recipes.
    pub fn bundled() -> Result<Self, CatalogError> {
        let recipes: Vec<Recipe> = serde_json::from_str(SAMPLE_RECIPES)?;
        Ok(Self { recipes })
    }

    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl RecipeSource for SampleCatalog {
    fn search(&self, query: &str, limit: usize) -> Result<SearchResponse, CatalogError> {
        let matches: Vec<&Recipe> = self
            .recipes
            .iter()
            .filter(|r| r.matches_query(query))
            .collect();
        let total_results = matches.len();

        Ok(SearchResponse {
            results: matches.into_iter().take(limit).cloned().collect(),
            offset: 0,
            number: total_results,
            total_results,
        })
    }

    fn random(&self, limit: usize) -> Result<SearchResponse, CatalogError> {
        let mut results = self.recipes.clone();
        results.shuffle(&mut rand::rng());
        results.truncate(limit);

        Ok(SearchResponse {
            number: results.len(),
            results,
            offset: 0,
            total_results: self.recipes.len(),
        })
    }

    fn get(&self, id: RecipeId) -> Result<Recipe, CatalogError> {
        self.recipes
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(CatalogError::RecipeNotFound(id))
    }
}

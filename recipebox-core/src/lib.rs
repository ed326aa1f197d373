//! Recipe Box Core Library
//!
//! Favorites, shopping list consolidation and the key-value persistence
//! they share.

pub mod catalog;
pub mod favorites;
pub mod models;
pub mod shopping_list;
pub mod storage;

pub use catalog::{CatalogError, RecipeSort, RecipeSource, SampleCatalog};
pub use favorites::FavoritesStore;
pub use models::{
    format_quantity, AnalyzedInstruction, Equipment, ExtendedIngredient, InstructionStep, ItemKey,
    Recipe, RecipeId, SearchResponse, ShoppingListItem, StepIngredient,
};
pub use shopping_list::{AddSummary, ShoppingListEngine, ShoppingListError};
pub use storage::{
    FileStore, KeyValueStore, MemoryStore, StorageError, FAVORITES_KEY, SHOPPING_LIST_KEY,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

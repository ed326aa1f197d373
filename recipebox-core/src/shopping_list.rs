//! Consolidated shopping list.
//!
//! Ingredients from any number of recipes are merged into one list of rows
//! keyed by [`ItemKey`] (lowercase name, exact unit). Adding an ingredient
//! whose key already exists sums it into the existing row in place; new keys
//! are appended. Adding the same recipe twice therefore doubles its
//! quantities.
//!
//! The whole list is written under [`SHOPPING_LIST_KEY`] after every change.
//! A failed write never rolls back the in-memory change.

use thiserror::Error;

use crate::models::{ExtendedIngredient, ItemKey, Recipe, RecipeId, ShoppingListItem};
use crate::storage::{KeyValueStore, StorageError, SHOPPING_LIST_KEY};

/// Errors returned by shopping list mutations.
#[derive(Debug, Error)]
pub enum ShoppingListError {
    #[error("no shopping list item at position {index} (list has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no shopping list item for '{0}'")]
    ItemNotFound(ItemKey),

    /// The change was applied in memory but could not be written.
    #[error(transparent)]
    Persist(#[from] StorageError),
}

impl ShoppingListError {
    /// True when the mutation took effect but was not saved.
    pub fn is_unsaved(&self) -> bool {
        matches!(self, ShoppingListError::Persist(_))
    }
}

/// How the ingredients passed to [`ShoppingListEngine::add_ingredients`] landed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddSummary {
    /// Ingredients summed into an existing row.
    pub merged: usize,
    /// Ingredients that became new rows.
    pub appended: usize,
}

pub struct ShoppingListEngine<S: KeyValueStore> {
    storage: S,
    items: Vec<ShoppingListItem>,
}

impl<S: KeyValueStore> ShoppingListEngine<S> {
    /// Loads the list from storage.
    ///
    /// A missing, unreadable or corrupt value yields an empty list. Rows that
    /// share a key (possible only through outside edits) are folded together.
    pub fn load(storage: S) -> Self {
        let items = match storage.get(SHOPPING_LIST_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<ShoppingListItem>>(&json) {
                Ok(items) => consolidate(items),
                Err(e) => {
                    tracing::warn!(
                        "Discarding corrupt shopping list in '{}': {}",
                        SHOPPING_LIST_KEY,
                        e
                    );
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read shopping list: {}", e);
                Vec::new()
            }
        };

        tracing::debug!("Loaded {} shopping list item(s)", items.len());
        Self { storage, items }
    }

    /// Merges `ingredients` into the list, in order, then saves once.
    pub fn add_ingredients(
        &mut self,
        recipe_id: RecipeId,
        recipe_title: &str,
        ingredients: &[ExtendedIngredient],
    ) -> Result<AddSummary, StorageError> {
        let mut summary = AddSummary::default();

        for ingredient in ingredients {
            let key = ItemKey::of(ingredient);
            match self.items.iter_mut().find(|item| item.matches(&key)) {
                Some(existing) => {
                    existing.quantity = finite_quantity(existing.quantity + ingredient.amount);
                    summary.merged += 1;
                }
                None => {
                    let mut item =
                        ShoppingListItem::from_ingredient(ingredient, recipe_id, recipe_title);
                    item.ingredient.amount = finite_quantity(item.ingredient.amount);
                    item.quantity = finite_quantity(item.quantity);
                    self.items.push(item);
                    summary.appended += 1;
                }
            }
        }

        tracing::debug!(
            "Added recipe {}: {} merged, {} new",
            recipe_id,
            summary.merged,
            summary.appended
        );
        self.persist()?;
        Ok(summary)
    }

    /// Adds every ingredient of `recipe`.
    pub fn add_recipe(&mut self, recipe: &Recipe) -> Result<AddSummary, StorageError> {
        self.add_ingredients(recipe.id, &recipe.title, &recipe.extended_ingredients)
    }

    /// Flips the checked flag of the row at `index` and returns the new value.
    pub fn toggle_item(&mut self, index: usize) -> Result<bool, ShoppingListError> {
        let index = self.check_index(index)?;
        self.toggle_at(index)
    }

    /// Sets the quantity of the row at `index`, floored at zero.
    ///
    /// Returns the stored quantity.
    pub fn update_quantity(
        &mut self,
        index: usize,
        quantity: f64,
    ) -> Result<f64, ShoppingListError> {
        let index = self.check_index(index)?;
        self.set_quantity_at(index, quantity)
    }

    /// Deletes the row at `index` and returns it.
    pub fn remove_item(&mut self, index: usize) -> Result<ShoppingListItem, ShoppingListError> {
        let index = self.check_index(index)?;
        self.remove_at(index)
    }

    /// Flips the checked flag of the row identified by `key`.
    pub fn toggle(&mut self, key: &ItemKey) -> Result<bool, ShoppingListError> {
        let index = self.require(key)?;
        self.toggle_at(index)
    }

    /// Sets the quantity of the row identified by `key`, floored at zero.
    pub fn set_quantity(
        &mut self,
        key: &ItemKey,
        quantity: f64,
    ) -> Result<f64, ShoppingListError> {
        let index = self.require(key)?;
        self.set_quantity_at(index, quantity)
    }

    /// Deletes the row identified by `key` and returns it.
    pub fn remove(&mut self, key: &ItemKey) -> Result<ShoppingListItem, ShoppingListError> {
        let index = self.require(key)?;
        self.remove_at(index)
    }

    /// Empties the list and deletes the stored value.
    pub fn clear_list(&mut self) -> Result<(), StorageError> {
        self.items.clear();
        self.storage.delete(SHOPPING_LIST_KEY)
    }

    /// Removes every checked row, keeping the order of the rest.
    ///
    /// Returns how many rows were removed. Nothing is written if none were.
    pub fn clear_checked(&mut self) -> Result<usize, StorageError> {
        let len_before = self.items.len();
        self.items.retain(|item| !item.checked);
        let removed = len_before - self.items.len();
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }

    pub fn find(&self, key: &ItemKey) -> Option<&ShoppingListItem> {
        self.items.iter().find(|item| item.matches(key))
    }

    pub fn position(&self, key: &ItemKey) -> Option<usize> {
        self.items.iter().position(|item| item.matches(key))
    }

    /// All rows in list order.
    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    pub fn unchecked_items(&self) -> Vec<&ShoppingListItem> {
        self.items.iter().filter(|item| !item.checked).collect()
    }

    pub fn checked_items(&self) -> Vec<&ShoppingListItem> {
        self.items.iter().filter(|item| item.checked).collect()
    }

    pub fn total_count(&self) -> usize {
        self.items.len()
    }

    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|item| item.checked).count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<usize, ShoppingListError> {
        if index < self.items.len() {
            Ok(index)
        } else {
            Err(ShoppingListError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }

    fn require(&self, key: &ItemKey) -> Result<usize, ShoppingListError> {
        self.position(key)
            .ok_or_else(|| ShoppingListError::ItemNotFound(key.clone()))
    }

    fn toggle_at(&mut self, index: usize) -> Result<bool, ShoppingListError> {
        let item = &mut self.items[index];
        item.checked = !item.checked;
        let checked = item.checked;
        self.persist()?;
        Ok(checked)
    }

    fn set_quantity_at(&mut self, index: usize, quantity: f64) -> Result<f64, ShoppingListError> {
        let quantity = finite_quantity(quantity).max(0.0);
        self.items[index].quantity = quantity;
        self.persist()?;
        Ok(quantity)
    }

    fn remove_at(&mut self, index: usize) -> Result<ShoppingListItem, ShoppingListError> {
        let item = self.items.remove(index);
        self.persist()?;
        Ok(item)
    }

    fn persist(&self) -> Result<(), StorageError> {
        // Serializing these types cannot fail
        let json = serde_json::to_string(&self.items).unwrap_or_else(|_| "[]".to_string());
        self.storage.set(SHOPPING_LIST_KEY, &json).inspect_err(|e| {
            tracing::warn!("Shopping list could not be saved: {}", e);
        })
    }
}

/// Keeps a quantity representable in JSON.
///
/// NaN becomes 0 and infinities saturate to the largest finite value, since
/// serde_json writes non-finite floats as `null`.
fn finite_quantity(quantity: f64) -> f64 {
    if quantity.is_nan() {
        0.0
    } else {
        quantity.clamp(f64::MIN, f64::MAX)
    }
}

/// Folds rows sharing a key into the first of them, summing quantities.
fn consolidate(items: Vec<ShoppingListItem>) -> Vec<ShoppingListItem> {
    let before = items.len();
    let mut result: Vec<ShoppingListItem> = Vec::with_capacity(before);

    for item in items {
        let key = item.key();
        match result.iter_mut().find(|existing| existing.matches(&key)) {
            Some(existing) => {
                existing.quantity = finite_quantity(existing.quantity + item.quantity)
            }
            None => result.push(item),
        }
    }

    if result.len() != before {
        tracing::warn!(
            "Merged {} duplicate shopping list row(s) while loading",
            before - result.len()
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn names<S: KeyValueStore>(engine: &ShoppingListEngine<S>) -> Vec<&str> {
        engine.items().iter().map(|i| i.name()).collect()
    }

    /// Engine holding rows A, B, C with A and C checked.
    fn checked_fixture(backend: &MemoryStore) -> ShoppingListEngine<&MemoryStore> {
        let mut engine = ShoppingListEngine::load(backend);
        engine
            .add_ingredients(
                1,
                "Letters",
                &[
                    ExtendedIngredient::new("A", 1.0, ""),
                    ExtendedIngredient::new("B", 1.0, ""),
                    ExtendedIngredient::new("C", 1.0, ""),
                ],
            )
            .unwrap();
        engine.toggle_item(0).unwrap();
        engine.toggle_item(2).unwrap();
        engine
    }

    #[test]
    fn test_empty_when_nothing_stored() {
        let engine = ShoppingListEngine::load(MemoryStore::new());
        assert!(engine.is_empty());
        assert_eq!(engine.total_count(), 0);
        assert_eq!(engine.checked_count(), 0);
    }

    #[test]
    fn test_add_appends_new_items() {
        let mut engine = ShoppingListEngine::load(MemoryStore::new());
        let summary = engine
            .add_ingredients(
                1,
                "Carbonara",
                &[
                    ExtendedIngredient::new("spaghetti", 400.0, "g"),
                    ExtendedIngredient::new("eggs", 4.0, "pieces"),
                ],
            )
            .unwrap();

        assert_eq!(summary, AddSummary { merged: 0, appended: 2 });
        assert_eq!(names(&engine), vec!["spaghetti", "eggs"]);

        let eggs = &engine.items()[1];
        assert_eq!(eggs.quantity, 4.0);
        assert_eq!(eggs.recipe_id, 1);
        assert_eq!(eggs.recipe_title, "Carbonara");
        assert!(!eggs.checked);
    }

    #[test]
    fn test_merge_is_case_insensitive_on_name() {
        let mut engine = ShoppingListEngine::load(MemoryStore::new());
        engine
            .add_ingredients(1, "Aglio", &[ExtendedIngredient::new("Garlic", 3.0, "clove")])
            .unwrap();
        let summary = engine
            .add_ingredients(2, "Bread", &[ExtendedIngredient::new("garlic", 2.0, "clove")])
            .unwrap();

        assert_eq!(summary, AddSummary { merged: 1, appended: 0 });
        assert_eq!(engine.total_count(), 1);
        let item = &engine.items()[0];
        assert_eq!(item.name(), "Garlic");
        assert_eq!(item.unit(), "clove");
        assert_eq!(item.quantity, 5.0);
        // Provenance stays with the first recipe
        assert_eq!(item.recipe_id, 1);
        assert_eq!(item.recipe_title, "Aglio");
    }

    #[test]
    fn test_different_units_never_merge() {
        let mut engine = ShoppingListEngine::load(MemoryStore::new());
        engine
            .add_ingredients(
                1,
                "Bread",
                &[
                    ExtendedIngredient::new("Flour", 200.0, "g"),
                    ExtendedIngredient::new("Flour", 1.0, "cup"),
                ],
            )
            .unwrap();

        assert_eq!(engine.total_count(), 2);
        assert_eq!(engine.find(&ItemKey::new("flour", "g")).unwrap().quantity, 200.0);
        assert_eq!(engine.find(&ItemKey::new("flour", "cup")).unwrap().quantity, 1.0);
    }

    #[test]
    fn test_unit_match_is_exact() {
        let mut engine = ShoppingListEngine::load(MemoryStore::new());
        engine
            .add_ingredients(
                1,
                "Cake",
                &[
                    ExtendedIngredient::new("sugar", 1.0, "Cup"),
                    ExtendedIngredient::new("sugar", 1.0, "cup"),
                ],
            )
            .unwrap();
        assert_eq!(engine.total_count(), 2);
    }

    #[test]
    fn test_readding_recipe_doubles_quantities() {
        let mut engine = ShoppingListEngine::load(MemoryStore::new());
        let recipe = Recipe::new(1, "Carbonara").with_ingredients(vec![
            ExtendedIngredient::new("spaghetti", 400.0, "g"),
            ExtendedIngredient::new("bacon", 200.0, "g"),
        ]);

        engine.add_recipe(&recipe).unwrap();
        engine.add_recipe(&recipe).unwrap();

        assert_eq!(engine.total_count(), 2);
        assert_eq!(engine.items()[0].quantity, 800.0);
        assert_eq!(engine.items()[1].quantity, 400.0);
    }

    #[test]
    fn test_merge_within_single_call() {
        let mut engine = ShoppingListEngine::load(MemoryStore::new());
        let summary = engine
            .add_ingredients(
                1,
                "Omelette",
                &[
                    ExtendedIngredient::new("Eggs", 2.0, ""),
                    ExtendedIngredient::new("milk", 50.0, "ml"),
                    ExtendedIngredient::new("EGGS", 1.0, ""),
                ],
            )
            .unwrap();

        assert_eq!(summary, AddSummary { merged: 1, appended: 2 });
        assert_eq!(names(&engine), vec!["Eggs", "milk"]);
        assert_eq!(engine.items()[0].quantity, 3.0);
    }

    #[test]
    fn test_merge_keeps_position_and_checked_state() {
        let mut engine = ShoppingListEngine::load(MemoryStore::new());
        engine
            .add_ingredients(
                1,
                "First",
                &[
                    ExtendedIngredient::new("onion", 1.0, ""),
                    ExtendedIngredient::new("rice", 200.0, "g"),
                ],
            )
            .unwrap();
        engine.toggle_item(0).unwrap();

        engine
            .add_ingredients(
                2,
                "Second",
                &[
                    ExtendedIngredient::new("beans", 1.0, "can"),
                    ExtendedIngredient::new("Onion", 2.0, ""),
                ],
            )
            .unwrap();

        assert_eq!(names(&engine), vec!["onion", "rice", "beans"]);
        assert!(engine.items()[0].checked);
        assert_eq!(engine.items()[0].quantity, 3.0);
    }

    #[test]
    fn test_zero_and_negative_amounts_pass_through() {
        let mut engine = ShoppingListEngine::load(MemoryStore::new());
        engine
            .add_ingredients(1, "A", &[ExtendedIngredient::new("salt", 0.0, "pinch")])
            .unwrap();
        engine
            .add_ingredients(2, "B", &[ExtendedIngredient::new("salt", 2.0, "pinch")])
            .unwrap();
        engine
            .add_ingredients(3, "C", &[ExtendedIngredient::new("salt", -1.0, "pinch")])
            .unwrap();

        assert_eq!(engine.items()[0].quantity, 1.0);
    }

    #[test]
    fn test_toggle_item() {
        let mut engine = ShoppingListEngine::load(MemoryStore::new());
        engine
            .add_ingredients(1, "R", &[ExtendedIngredient::new("milk", 1.0, "l")])
            .unwrap();

        assert!(engine.toggle_item(0).unwrap());
        assert_eq!(engine.checked_count(), 1);
        assert!(!engine.toggle_item(0).unwrap());
        assert_eq!(engine.checked_count(), 0);
    }

    #[test]
    fn test_quantity_floor() {
        let mut engine = ShoppingListEngine::load(MemoryStore::new());
        engine
            .add_ingredients(1, "R", &[ExtendedIngredient::new("milk", 1.0, "l")])
            .unwrap();

        assert_eq!(engine.update_quantity(0, -5.0).unwrap(), 0.0);
        assert_eq!(engine.items()[0].quantity, 0.0);

        assert_eq!(engine.update_quantity(0, 2.5).unwrap(), 2.5);
        assert_eq!(engine.update_quantity(0, f64::NAN).unwrap(), 0.0);
        // The original amount is untouched
        assert_eq!(engine.items()[0].ingredient.amount, 1.0);
    }

    #[test]
    fn test_remove_item() {
        let backend = MemoryStore::new();
        let mut engine = checked_fixture(&backend);

        let removed = engine.remove_item(1).unwrap();
        assert_eq!(removed.name(), "B");
        assert_eq!(names(&engine), vec!["A", "C"]);
    }

    #[test]
    fn test_stale_index_is_rejected_without_mutation() {
        let backend = MemoryStore::new();
        let mut engine = checked_fixture(&backend);

        let err = engine.toggle_item(3).unwrap_err();
        assert!(matches!(
            err,
            ShoppingListError::IndexOutOfRange { index: 3, len: 3 }
        ));
        assert!(!err.is_unsaved());
        assert!(engine.update_quantity(10, 1.0).is_err());
        assert!(engine.remove_item(3).is_err());
        assert_eq!(engine.total_count(), 3);
        assert_eq!(engine.checked_count(), 2);
    }

    #[test]
    fn test_keyed_mutations() {
        let mut engine = ShoppingListEngine::load(MemoryStore::new());
        engine
            .add_ingredients(
                1,
                "R",
                &[
                    ExtendedIngredient::new("Butter", 100.0, "g"),
                    ExtendedIngredient::new("Butter", 1.0, "tbsp"),
                ],
            )
            .unwrap();
        let key = ItemKey::new("BUTTER", "tbsp");

        assert!(engine.toggle(&key).unwrap());
        assert!(engine.items()[1].checked);
        assert!(!engine.items()[0].checked);

        assert_eq!(engine.set_quantity(&key, 3.0).unwrap(), 3.0);
        assert_eq!(engine.items()[1].quantity, 3.0);

        let removed = engine.remove(&key).unwrap();
        assert_eq!(removed.unit(), "tbsp");
        assert_eq!(engine.total_count(), 1);
        assert_eq!(engine.items()[0].unit(), "g");
    }

    #[test]
    fn test_keyed_mutation_unknown_item() {
        let mut engine = ShoppingListEngine::load(MemoryStore::new());
        let key = ItemKey::new("saffron", "g");
        assert!(matches!(
            engine.toggle(&key),
            Err(ShoppingListError::ItemNotFound(k)) if k == key
        ));
    }

    #[test]
    fn test_clear_checked() {
        let backend = MemoryStore::new();
        let mut engine = checked_fixture(&backend);

        assert_eq!(engine.clear_checked().unwrap(), 2);
        assert_eq!(names(&engine), vec!["B"]);
        assert!(!engine.items()[0].checked);

        // Persisted state matches
        let reloaded = ShoppingListEngine::load(&backend);
        assert_eq!(reloaded.items(), engine.items());

        assert_eq!(engine.clear_checked().unwrap(), 0);
    }

    #[test]
    fn test_checked_and_unchecked_filters() {
        let backend = MemoryStore::new();
        let engine = checked_fixture(&backend);

        let checked: Vec<&str> = engine.checked_items().iter().map(|i| i.name()).collect();
        let unchecked: Vec<&str> = engine.unchecked_items().iter().map(|i| i.name()).collect();
        assert_eq!(checked, vec!["A", "C"]);
        assert_eq!(unchecked, vec!["B"]);
        assert_eq!(engine.total_count(), 3);
        assert_eq!(engine.checked_count(), 2);
    }

    #[test]
    fn test_clear_list_deletes_key() {
        let backend = MemoryStore::new();
        let mut engine = checked_fixture(&backend);
        assert!(backend.contains(SHOPPING_LIST_KEY));

        engine.clear_list().unwrap();
        assert!(engine.is_empty());
        assert!(!backend.contains(SHOPPING_LIST_KEY));
    }

    #[test]
    fn test_roundtrip_through_fresh_instance() {
        let backend = Arc::new(MemoryStore::new());
        let mut engine = ShoppingListEngine::load(Arc::clone(&backend));
        engine
            .add_ingredients(
                7,
                "Stir Fry",
                &[
                    ExtendedIngredient::new("chicken breast", 500.0, "g").with_aisle("Meat"),
                    ExtendedIngredient::new("broccoli", 200.0, "g"),
                ],
            )
            .unwrap();
        engine.toggle_item(1).unwrap();
        engine.update_quantity(0, 750.0).unwrap();

        let reloaded = ShoppingListEngine::load(Arc::clone(&backend));
        assert_eq!(reloaded.items(), engine.items());
    }

    #[test]
    fn test_loads_list_written_by_other_clients() {
        let backend = MemoryStore::new();
        backend.insert_raw(
            SHOPPING_LIST_KEY,
            r#"[{"id":2,"aisle":"Meat","consistency":"solid","amount":200,"unit":"g",
                "name":"bacon","original":"200g bacon","image":"bacon.jpg",
                "recipeId":1,"recipeTitle":"Classic Spaghetti Carbonara",
                "checked":true,"quantity":400}]"#,
        );

        let engine = ShoppingListEngine::load(&backend);
        assert_eq!(engine.total_count(), 1);
        let bacon = &engine.items()[0];
        assert_eq!(bacon.ingredient.aisle, "Meat");
        assert_eq!(bacon.ingredient.amount, 200.0);
        assert_eq!(bacon.quantity, 400.0);
        assert!(bacon.checked);
    }

    #[test]
    fn test_corrupt_storage_yields_empty_list() {
        let backend = MemoryStore::new();
        backend.insert_raw(SHOPPING_LIST_KEY, "definitely not json");

        let mut engine = ShoppingListEngine::load(&backend);
        assert!(engine.is_empty());

        engine
            .add_ingredients(1, "R", &[ExtendedIngredient::new("salt", 1.0, "")])
            .unwrap();
        assert_eq!(ShoppingListEngine::load(&backend).total_count(), 1);
    }

    #[test]
    fn test_duplicate_rows_consolidated_on_load() {
        let backend = MemoryStore::new();
        backend.insert_raw(
            SHOPPING_LIST_KEY,
            r#"[{"amount":1,"unit":"clove","name":"Garlic","recipeId":1,"quantity":3},
                {"amount":1,"unit":"g","name":"rice","recipeId":1,"quantity":100},
                {"amount":1,"unit":"clove","name":"garlic","recipeId":2,"quantity":2,"checked":true}]"#,
        );

        let engine = ShoppingListEngine::load(&backend);
        assert_eq!(names(&engine), vec!["Garlic", "rice"]);
        assert_eq!(engine.items()[0].quantity, 5.0);
        assert_eq!(engine.items()[0].recipe_id, 1);
        assert!(!engine.items()[0].checked);
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let backend = MemoryStore::with_quota(16);
        let mut engine = ShoppingListEngine::load(&backend);

        let result = engine.add_ingredients(1, "R", &[ExtendedIngredient::new("salt", 1.0, "")]);
        assert!(matches!(result, Err(StorageError::QuotaExceeded { .. })));
        assert_eq!(engine.total_count(), 1);

        let err = engine.toggle_item(0).unwrap_err();
        assert!(err.is_unsaved());
        assert!(engine.items()[0].checked);
        assert!(!backend.contains(SHOPPING_LIST_KEY));
    }

    #[test]
    fn test_overflowing_merge_survives_reload() {
        let backend = MemoryStore::new();
        let mut engine = ShoppingListEngine::load(&backend);
        engine
            .add_ingredients(
                1,
                "Pantry",
                &[
                    ExtendedIngredient::new("rice", 1.0, "g"),
                    ExtendedIngredient::new("salt", 1e308, "g"),
                ],
            )
            .unwrap();
        engine
            .add_ingredients(2, "Brine", &[ExtendedIngredient::new("salt", 1e308, "g")])
            .unwrap();

        let salt = engine.find(&ItemKey::new("salt", "g")).unwrap();
        assert_eq!(salt.quantity, f64::MAX);

        let reloaded = ShoppingListEngine::load(&backend);
        assert_eq!(reloaded.total_count(), 2);
        assert_eq!(reloaded.items(), engine.items());
    }

    #[test]
    fn test_non_finite_quantities_survive_reload() {
        let backend = MemoryStore::new();
        let mut engine = ShoppingListEngine::load(&backend);
        engine
            .add_ingredients(
                1,
                "R",
                &[
                    ExtendedIngredient::new("rice", 100.0, "g"),
                    ExtendedIngredient::new("beans", f64::INFINITY, "g"),
                ],
            )
            .unwrap();
        assert_eq!(engine.items()[1].quantity, f64::MAX);
        assert_eq!(engine.items()[1].ingredient.amount, f64::MAX);

        assert_eq!(engine.update_quantity(0, f64::INFINITY).unwrap(), f64::MAX);
        assert_eq!(engine.update_quantity(1, f64::NAN).unwrap(), 0.0);
        assert_eq!(engine.update_quantity(1, f64::NEG_INFINITY).unwrap(), 0.0);

        let reloaded = ShoppingListEngine::load(&backend);
        assert_eq!(reloaded.total_count(), 2);
        assert_eq!(reloaded.items()[0].quantity, f64::MAX);
        assert_eq!(reloaded.items()[1].quantity, 0.0);
    }

    #[test]
    fn test_unsaved_error_displays_storage_cause() {
        let mut engine = ShoppingListEngine::load(MemoryStore::with_quota(16));
        let _ = engine.add_ingredients(1, "R", &[ExtendedIngredient::new("salt", 1.0, "")]);

        let err = engine.toggle_item(0).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("storage quota exceeded"), "{}", message);
    }
}

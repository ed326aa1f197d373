//! Shopping list line items.
//!
//! A line item is an ingredient tagged with the recipe it first came from,
//! a purchased flag and a quantity that can diverge from the original
//! ingredient amount once the item exists.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ingredient::ExtendedIngredient;
use super::recipe::RecipeId;

/// Identity of a shopping list row: lowercase name plus exact unit.
///
/// Two ingredients with equal keys are the same purchasable thing and are
/// consolidated into one row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub name: String,
    pub unit: String,
}

impl ItemKey {
    pub fn new(name: &str, unit: impl Into<String>) -> Self {
        Self {
            name: name.to_lowercase(),
            unit: unit.into(),
        }
    }

    pub fn of(ingredient: &ExtendedIngredient) -> Self {
        Self::new(&ingredient.name, ingredient.unit.clone())
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.unit)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    #[serde(flatten)]
    pub ingredient: ExtendedIngredient,
    pub recipe_id: RecipeId,
    #[serde(default)]
    pub recipe_title: String,
    #[serde(default)]
    pub checked: bool,
    pub quantity: f64,
}

impl ShoppingListItem {
    /// Create an unchecked item whose quantity starts at the ingredient amount.
    pub fn from_ingredient(
        ingredient: &ExtendedIngredient,
        recipe_id: RecipeId,
        recipe_title: impl Into<String>,
    ) -> Self {
        Self {
            ingredient: ingredient.clone(),
            recipe_id,
            recipe_title: recipe_title.into(),
            checked: false,
            quantity: ingredient.amount,
        }
    }

    pub fn key(&self) -> ItemKey {
        ItemKey::of(&self.ingredient)
    }

    pub fn matches(&self, key: &ItemKey) -> bool {
        self.ingredient.unit == key.unit && self.ingredient.name.to_lowercase() == key.name
    }

    pub fn name(&self) -> &str {
        &self.ingredient.name
    }

    pub fn unit(&self) -> &str {
        &self.ingredient.unit
    }
}

/// Format a quantity, removing unnecessary decimal places.
pub fn format_quantity(qty: f64) -> String {
    if qty.fract() == 0.0 {
        format!("{}", qty as i64)
    } else {
        format!("{:.1}", qty)
    }
}

impl fmt::Display for ShoppingListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.checked { "[x]" } else { "[ ]" };
        if self.unit().is_empty() {
            write!(
                f,
                "{} {:<25} {}",
                check,
                self.name(),
                format_quantity(self.quantity)
            )
        } else {
            write!(
                f,
                "{} {:<25} {} {}",
                check,
                self.name(),
                format_quantity(self.quantity),
                self.unit()
            )
        }
    }
}

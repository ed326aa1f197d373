mod ingredient;
mod recipe;
mod search;
mod shopping_item;

pub use ingredient::ExtendedIngredient;
pub use recipe::{AnalyzedInstruction, Equipment, InstructionStep, Recipe, RecipeId, StepIngredient};
pub use search::SearchResponse;
pub use shopping_item::{format_quantity, ItemKey, ShoppingListItem};

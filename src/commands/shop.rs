//! Shopping list CLI commands.
//!
//! Items are addressed by name, plus `--unit` when the same name exists in
//! several units.

use clap::{Args, Subcommand, ValueEnum};

use super::warn_unsaved;
use recipebox_core::{
    format_quantity, ItemKey, KeyValueStore, RecipeId, RecipeSource, ShoppingListEngine,
    ShoppingListError, ShoppingListItem,
};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args)]
pub struct ShopCommand {
    #[command(subcommand)]
    pub command: ShopSubcommand,
}

#[derive(Subcommand)]
pub enum ShopSubcommand {
    /// Add a recipe's ingredients to the shopping list
    Add {
        /// Recipe ID
        recipe_id: RecipeId,
    },

    /// List shopping list items
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Check or uncheck an item
    Check {
        /// Item name
        name: String,

        /// Unit, required when the name appears with several units
        #[arg(long, short)]
        unit: Option<String>,
    },

    /// Set an item's quantity (negative values become 0)
    Qty {
        /// Item name
        name: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: f64,

        /// Unit, required when the name appears with several units
        #[arg(long, short)]
        unit: Option<String>,
    },

    /// Remove an item
    Remove {
        /// Item name
        name: String,

        /// Unit, required when the name appears with several units
        #[arg(long, short)]
        unit: Option<String>,
    },

    /// Remove every item
    Clear,

    /// Remove every checked item
    ClearChecked,
}

impl ShopCommand {
    pub fn run<S: KeyValueStore>(
        &self,
        list: &mut ShoppingListEngine<S>,
        source: &impl RecipeSource,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ShopSubcommand::Add { recipe_id } => {
                let recipe = source.get(*recipe_id)?;
                match list.add_recipe(&recipe) {
                    Ok(summary) => println!(
                        "Added {} ingredient(s) from '{}' ({} new, {} merged)",
                        recipe.extended_ingredients.len(),
                        recipe.title,
                        summary.appended,
                        summary.merged
                    ),
                    Err(e) => {
                        warn_unsaved("shopping list", &e);
                        println!(
                            "Added {} ingredient(s) from '{}'",
                            recipe.extended_ingredients.len(),
                            recipe.title
                        );
                    }
                }
                Ok(())
            }

            ShopSubcommand::List { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(list.items())?);
                    }
                    OutputFormat::Table => print_list(list),
                }
                Ok(())
            }

            ShopSubcommand::Check { name, unit } => {
                let key = resolve_key(list.items(), name, unit.as_deref())?;
                let checked = unsaved_ok(list.toggle(&key), || {
                    list.find(&key).is_some_and(|i| i.checked)
                })?;
                if checked {
                    println!("Checked '{}'", key);
                } else {
                    println!("Unchecked '{}'", key);
                }
                Ok(())
            }

            ShopSubcommand::Qty {
                name,
                quantity,
                unit,
            } => {
                let key = resolve_key(list.items(), name, unit.as_deref())?;
                let stored = unsaved_ok(list.set_quantity(&key, *quantity), || {
                    list.find(&key).map_or(0.0, |i| i.quantity)
                })?;
                println!("Set '{}' to {}", key, format_quantity(stored));
                Ok(())
            }

            ShopSubcommand::Remove { name, unit } => {
                let key = resolve_key(list.items(), name, unit.as_deref())?;
                unsaved_ok(list.remove(&key).map(|_| ()), || ())?;
                println!("Removed '{}' from shopping list", key);
                Ok(())
            }

            ShopSubcommand::Clear => {
                let count = list.total_count();
                if let Err(e) = list.clear_list() {
                    warn_unsaved("shopping list", &e);
                }
                println!("Cleared {} item(s)", count);
                Ok(())
            }

            ShopSubcommand::ClearChecked => {
                let count = list.checked_count();
                if count == 0 {
                    println!("No checked items to clear");
                    return Ok(());
                }
                if let Err(e) = list.clear_checked() {
                    warn_unsaved("shopping list", &e);
                }
                println!("Cleared {} checked item(s)", count);
                Ok(())
            }
        }
    }
}

/// Turns an unsaved-but-applied mutation into a warning plus the current value.
fn unsaved_ok<T>(
    result: Result<T, ShoppingListError>,
    current: impl FnOnce() -> T,
) -> Result<T, ShoppingListError> {
    match result {
        Err(e) if e.is_unsaved() => {
            warn_unsaved("shopping list", &e);
            Ok(current())
        }
        other => other,
    }
}

/// Finds the key of the item called `name` (case-insensitive).
///
/// Without a unit the name must identify exactly one row.
fn resolve_key(
    items: &[ShoppingListItem],
    name: &str,
    unit: Option<&str>,
) -> Result<ItemKey, String> {
    if let Some(unit) = unit {
        let key = ItemKey::new(name, unit);
        return if items.iter().any(|i| i.matches(&key)) {
            Ok(key)
        } else {
            Err(format!("Item not found: {}", key))
        };
    }

    let name_lower = name.to_lowercase();
    let candidates: Vec<&ShoppingListItem> = items
        .iter()
        .filter(|i| i.name().to_lowercase() == name_lower)
        .collect();

    match candidates.as_slice() {
        [] => Err(format!("Item not found: {}", name)),
        [only] => Ok(only.key()),
        many => {
            let units: Vec<&str> = many.iter().map(|i| i.unit()).collect();
            Err(format!(
                "'{}' is listed in several units ({}); pass --unit",
                name,
                units.join(", ")
            ))
        }
    }
}

fn print_list<S: KeyValueStore>(list: &ShoppingListEngine<S>) {
    println!("Shopping List");
    println!("{}", "=".repeat(44));

    if list.is_empty() {
        println!("Your shopping list is empty.");
        println!("\nAdd ingredients with 'recipebox shop add <recipe-id>'.");
        return;
    }

    let unchecked = list.unchecked_items();
    if !unchecked.is_empty() {
        println!("To buy ({}):", unchecked.len());
        for item in &unchecked {
            println!("{}  ({})", item, item.recipe_title);
        }
    }

    let checked = list.checked_items();
    if !checked.is_empty() {
        println!("{}", "-".repeat(44));
        println!("In cart ({}):", checked.len());
        for item in &checked {
            println!("{}", item);
        }
    }

    println!("{}", "-".repeat(44));
    println!(
        "{} of {} items checked",
        list.checked_count(),
        list.total_count()
    );
}

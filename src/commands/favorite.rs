//! Favorite recipe CLI commands.

use clap::{Args, Subcommand, ValueEnum};

use super::recipe::print_recipe_table;
use super::warn_unsaved;
use recipebox_core::{FavoritesStore, KeyValueStore, RecipeId, RecipeSource};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args)]
pub struct FavoriteCommand {
    #[command(subcommand)]
    pub command: FavoriteSubcommand,
}

#[derive(Subcommand)]
pub enum FavoriteSubcommand {
    /// Save a recipe as a favorite
    Add {
        /// Recipe ID
        id: RecipeId,
    },

    /// Remove a recipe from favorites
    Remove {
        /// Recipe ID
        id: RecipeId,
    },

    /// Add the recipe if it is not a favorite, remove it otherwise
    Toggle {
        /// Recipe ID
        id: RecipeId,
    },

    /// List favorite recipes
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Remove all favorites
    Clear,
}

impl FavoriteCommand {
    pub fn run<S: KeyValueStore>(
        &self,
        favorites: &mut FavoritesStore<S>,
        source: &impl RecipeSource,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            FavoriteSubcommand::Add { id } => {
                if favorites.is_favorite(*id) {
                    println!("Recipe {} is already a favorite", id);
                    return Ok(());
                }
                let recipe = source.get(*id)?;
                if let Err(e) = favorites.add(&recipe) {
                    warn_unsaved("favorites", &e);
                }
                println!("Added '{}' to favorites", recipe.title);
                Ok(())
            }

            FavoriteSubcommand::Remove { id } => {
                let title = favorites.get(*id).map(|r| r.title.clone());
                match (favorites.remove(*id), title) {
                    (Ok(false), _) => println!("Recipe {} is not a favorite", id),
                    (result, title) => {
                        if let Err(e) = result {
                            warn_unsaved("favorites", &e);
                        }
                        println!(
                            "Removed '{}' from favorites",
                            title.unwrap_or_else(|| id.to_string())
                        );
                    }
                }
                Ok(())
            }

            FavoriteSubcommand::Toggle { id } => {
                let recipe = match favorites.get(*id) {
                    Some(saved) => saved.clone(),
                    None => source.get(*id)?,
                };
                let now_favorite = match favorites.toggle(&recipe) {
                    Ok(status) => status,
                    Err(e) => {
                        warn_unsaved("favorites", &e);
                        favorites.is_favorite(*id)
                    }
                };
                if now_favorite {
                    println!("Added '{}' to favorites", recipe.title);
                } else {
                    println!("Removed '{}' from favorites", recipe.title);
                }
                Ok(())
            }

            FavoriteSubcommand::List { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(favorites.list())?);
                    }
                    OutputFormat::Table => {
                        if favorites.is_empty() {
                            println!("No favorite recipes yet.");
                            return Ok(());
                        }
                        print_recipe_table(favorites.list());
                        println!("\nTotal: {} favorite(s)", favorites.len());
                    }
                }
                Ok(())
            }

            FavoriteSubcommand::Clear => {
                let count = favorites.len();
                if let Err(e) = favorites.clear() {
                    warn_unsaved("favorites", &e);
                }
                println!("Cleared {} favorite(s)", count);
                Ok(())
            }
        }
    }
}

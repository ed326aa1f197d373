use clap::{Args, Subcommand, ValueEnum};

use crate::config::Config;
use recipebox_core::{Recipe, RecipeId, RecipeSort, RecipeSource, SearchResponse};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum SortBy {
    #[default]
    Relevance,
    ReadyTime,
    Servings,
    Health,
}

impl From<SortBy> for RecipeSort {
    fn from(sort: SortBy) -> Self {
        match sort {
            SortBy::Relevance => RecipeSort::Relevance,
            SortBy::ReadyTime => RecipeSort::ReadyTime,
            SortBy::Servings => RecipeSort::Servings,
            SortBy::Health => RecipeSort::Health,
        }
    }
}

#[derive(Args)]
pub struct RecipeCommand {
    #[command(subcommand)]
    pub command: RecipeSubcommand,
}

#[derive(Subcommand)]
pub enum RecipeSubcommand {
    /// Search recipes by title or summary
    Search {
        /// Search text
        query: String,

        /// Maximum number of results (defaults to search_limit from config)
        #[arg(long, short)]
        limit: Option<usize>,

        /// Result order
        #[arg(long, short, value_enum, default_value = "relevance")]
        sort: SortBy,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a random selection of recipes
    Random {
        /// Maximum number of results (defaults to search_limit from config)
        #[arg(long, short)]
        limit: Option<usize>,

        /// Result order
        #[arg(long, short, value_enum, default_value = "relevance")]
        sort: SortBy,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a recipe's details
    Show {
        /// Recipe ID
        id: RecipeId,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl RecipeCommand {
    pub fn run(
        &self,
        source: &impl RecipeSource,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            RecipeSubcommand::Search {
                query,
                limit,
                sort,
                format,
            } => {
                if query.trim().is_empty() {
                    return Err("Search query cannot be empty".into());
                }
                let limit = limit.unwrap_or(config.search_limit.value);
                let mut response = source.search(query.trim(), limit)?;
                RecipeSort::from(*sort).apply(&mut response.results);
                print_response(&response, format)
            }

            RecipeSubcommand::Random {
                limit,
                sort,
                format,
            } => {
                let limit = limit.unwrap_or(config.search_limit.value);
                let mut response = source.random(limit)?;
                RecipeSort::from(*sort).apply(&mut response.results);
                print_response(&response, format)
            }

            RecipeSubcommand::Show { id, format } => {
                let recipe = source.get(*id)?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&recipe)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", recipe);
                    }
                }
                Ok(())
            }
        }
    }
}

fn print_response(
    response: &SearchResponse,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(response)?);
        }
        OutputFormat::Text => {
            if response.results.is_empty() {
                println!("No recipes found");
                return Ok(());
            }
            print_recipe_table(&response.results);
            println!(
                "\nShowing {} of {} recipe(s)",
                response.results.len(),
                response.total_results
            );
        }
    }
    Ok(())
}

/// Print one line per recipe: id, title, time and diets.
pub(crate) fn print_recipe_table(recipes: &[Recipe]) {
    println!("{:<6}  {:<32}  {:>6}  DIETS", "ID", "TITLE", "MIN");
    println!("{}", "-".repeat(70));
    for recipe in recipes {
        println!(
            "{:<6}  {:<32}  {:>6}  {}",
            recipe.id,
            truncate(&recipe.title, 32),
            recipe.ready_in_minutes,
            recipe.diets.join(", ")
        );
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

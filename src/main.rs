use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{ConfigCommand, FavoriteCommand, RecipeCommand, ShopCommand};
use config::Config;
use recipebox_core::{FavoritesStore, FileStore, SampleCatalog, ShoppingListEngine};

#[derive(Parser)]
#[command(name = "recipebox")]
#[command(version)]
#[command(about = "Find recipes, keep favorites and build a shopping list", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search and view recipes
    Recipe(RecipeCommand),

    /// Manage favorite recipes
    Favorite(FavoriteCommand),

    /// Manage the shopping list
    Shop(ShopCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipebox=warn,recipebox_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Save config path for config init
    let cli_config_path = cli.config.clone();

    let config = Config::load(cli.config)?;
    tracing::debug!("Data directory: {}", config.data_dir.value.display());

    match cli.command {
        Some(Commands::Recipe(cmd)) => {
            let catalog = SampleCatalog::bundled()?;
            cmd.run(&catalog, &config)?;
        }
        Some(Commands::Favorite(cmd)) => {
            let catalog = SampleCatalog::bundled()?;
            let storage = FileStore::new(config.data_dir.value.clone());
            let mut favorites = FavoritesStore::load(storage);
            cmd.run(&mut favorites, &catalog)?;
        }
        Some(Commands::Shop(cmd)) => {
            let catalog = SampleCatalog::bundled()?;
            let storage = FileStore::new(config.data_dir.value.clone());
            let mut list = ShoppingListEngine::load(storage);
            cmd.run(&mut list, &catalog)?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config, cli_config_path)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

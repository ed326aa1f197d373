mod config_cmd;
mod favorite;
mod recipe;
mod shop;

pub use config_cmd::ConfigCommand;
pub use favorite::FavoriteCommand;
pub use recipe::RecipeCommand;
pub use shop::ShopCommand;

/// Report a change that took effect but could not be written to disk.
fn warn_unsaved(what: &str, err: &dyn std::error::Error) {
    eprintln!("Warning: {} could not be saved: {}", what, err);
}

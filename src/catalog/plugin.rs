use anyhow::Result;
use std::path::Path;

/// A launchable game.
///
/// Only `id` and `run` are required; the metadata accessors return `None`
/// when the game does not declare a value and the catalog fills in defaults.
pub trait GamePlugin {
    /// Unique key of the game
    fn id(&self) -> &str;

    /// Declared display name
    fn name(&self) -> Option<&str> {
        None
    }

    /// Declared size in megabytes
    fn size(&self) -> Option<u32> {
        None
    }

    /// Declared cover art path
    fn cover_art(&self) -> Option<&Path> {
        None
    }

    /// Run a game session, returning when the player leaves the game
    fn run(&self) -> Result<()>;
}

/// Source of game plugins for the catalog
pub trait PluginLoader {
    /// Discover every available plugin
    fn load(&self) -> Result<Vec<Box<dyn GamePlugin>>>;
}

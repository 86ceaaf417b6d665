use std::path::PathBuf;

use super::plugin::GamePlugin;

/// Size assumed for a game that does not declare one, in megabytes
pub const DEFAULT_GAME_SIZE_MB: u32 = 10;

/// Cover art used when a game does not declare one
pub const DEFAULT_COVER_ART: &str = "assets/covers/default.png";

/// Metadata describing one game in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDescriptor {
    /// Game ID (manifest file stem)
    pub id: String,
    /// Display name
    pub name: String,
    /// Declared size in megabytes
    pub size: u32,
    /// Cover art path
    pub cover_path: PathBuf,
}

impl GameDescriptor {
    /// Read the declared metadata of a plugin, defaulting what is missing
    pub fn from_plugin(plugin: &dyn GamePlugin) -> Self {
        let id = plugin.id().to_string();
        Self {
            name: plugin.name().map(str::to_string).unwrap_or_else(|| id.clone()),
            size: plugin.size().unwrap_or(DEFAULT_GAME_SIZE_MB),
            cover_path: plugin
                .cover_art()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_COVER_ART)),
            id,
        }
    }
}

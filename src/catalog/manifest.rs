use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use walkdir::WalkDir;

use super::plugin::{GamePlugin, PluginLoader};

/// Contents of a `<id>.toml` game manifest
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct GameManifest {
    /// Display name
    pub name: Option<String>,
    /// Size in megabytes
    pub size: Option<u32>,
    /// Cover art path
    pub cover_art: Option<PathBuf>,
    /// Program started when the game is launched
    pub command: Option<String>,
    /// Arguments passed to the program
    #[serde(default)]
    pub args: Vec<String>,
}

/// Game backed by a manifest and an external program
#[derive(Debug, Clone)]
pub struct ManifestPlugin {
    id: String,
    manifest: GameManifest,
    /// Working directory for the game process
    work_dir: PathBuf,
}

impl ManifestPlugin {
    /// Create a plugin from a parsed manifest
    pub fn new(id: impl Into<String>, manifest: GameManifest, work_dir: PathBuf) -> Self {
        Self {
            id: id.into(),
            manifest,
            work_dir,
        }
    }

    /// Read and parse a manifest file; the file stem becomes the game id
    pub fn from_file(path: &Path) -> Result<Self> {
        let id = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| anyhow!("Invalid manifest file name: {}", path.display()))?;

        let manifest_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        let manifest: GameManifest = toml::from_str(&manifest_str)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))?;

        let work_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self::new(id, manifest, work_dir))
    }
}

impl GamePlugin for ManifestPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> Option<&str> {
        self.manifest.name.as_deref()
    }

    fn size(&self) -> Option<u32> {
        self.manifest.size
    }

    fn cover_art(&self) -> Option<&Path> {
        self.manifest.cover_art.as_deref()
    }

    fn run(&self) -> Result<()> {
        let command = self
            .manifest
            .command
            .as_deref()
            .ok_or_else(|| anyhow!("Game {} has no command to run", self.id))?;

        info!("Starting {} ({})", self.id, command);

        let status = Command::new(command)
            .args(&self.manifest.args)
            .current_dir(&self.work_dir)
            .status()
            .with_context(|| format!("Failed to start {}", command))?;

        if !status.success() {
            return Err(anyhow!("Game {} exited with {}", self.id, status));
        }

        info!("Game {} finished", self.id);
        Ok(())
    }
}

/// Discovers games from `*.toml` manifests in a directory
pub struct ManifestLoader {
    games_dir: PathBuf,
}

impl ManifestLoader {
    /// Create a loader for the given games directory
    pub fn new(games_dir: impl Into<PathBuf>) -> Self {
        Self {
            games_dir: games_dir.into(),
        }
    }
}

impl PluginLoader for ManifestLoader {
    fn load(&self) -> Result<Vec<Box<dyn GamePlugin>>> {
        if !self.games_dir.exists() {
            warn!("Games directory {} does not exist", self.games_dir.display());
            return Ok(Vec::new());
        }

        info!("Scanning {} for games", self.games_dir.display());

        let mut plugins: Vec<Box<dyn GamePlugin>> = Vec::new();

        let walker = WalkDir::new(&self.games_dir).min_depth(1).max_depth(1);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Failed to read games directory entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();

            // Skip non-manifest files
            let is_manifest = path.extension().map_or(false, |ext| ext == "toml");
            if !entry.file_type().is_file() || !is_manifest {
                debug!("Skipping {}", path.display());
                continue;
            }

            match ManifestPlugin::from_file(path) {
                Ok(plugin) => plugins.push(Box::new(plugin)),
                Err(e) => warn!("Skipping game manifest {}: {:#}", path.display(), e),
            }
        }

        plugins.sort_by(|a, b| a.id().cmp(b.id()));

        info!("Discovered {} games", plugins.len());
        Ok(plugins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn loads_manifests_sorted_by_id() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("snake.toml"),
            "name = \"Snake\"\nsize = 12\ncover_art = \"covers/snake.png\"\ncommand = \"snake\"\n",
        )
        .unwrap();
        fs::write(dir.path().join("asteroids.toml"), "size = 30\n").unwrap();

        let plugins = ManifestLoader::new(dir.path()).load().unwrap();
        let ids: Vec<&str> = plugins.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["asteroids", "snake"]);

        assert_eq!(plugins[1].name(), Some("Snake"));
        assert_eq!(plugins[1].size(), Some(12));
        assert_eq!(plugins[1].cover_art(), Some(Path::new("covers/snake.png")));
        assert_eq!(plugins[0].name(), None);
    }

    #[test]
    fn orders_by_id_not_file_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a-b.toml"), "").unwrap();
        fs::write(dir.path().join("a.toml"), "").unwrap();

        let plugins = ManifestLoader::new(dir.path()).load().unwrap();
        let ids: Vec<&str> = plugins.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["a", "a-b"]);
    }

    #[test]
    fn skips_malformed_and_foreign_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("broken.toml"), "size = \"huge\"").unwrap();
        fs::write(dir.path().join("readme.txt"), "not a game").unwrap();
        fs::create_dir(dir.path().join("nested.toml")).unwrap();
        fs::write(dir.path().join("pong.toml"), "").unwrap();

        let plugins = ManifestLoader::new(dir.path()).load().unwrap();
        let ids: Vec<&str> = plugins.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["pong"]);
    }

    #[test]
    fn missing_directory_is_empty() {
        let dir = tempdir().unwrap();
        let plugins = ManifestLoader::new(dir.path().join("absent")).load().unwrap();
        assert!(plugins.is_empty());
    }

    #[test]
    fn run_without_command_fails() {
        let plugin = ManifestPlugin::new("pong", GameManifest::default(), PathBuf::from("."));
        assert!(plugin.run().is_err());
    }
}

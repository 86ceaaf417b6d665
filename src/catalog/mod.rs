pub mod descriptor;
pub mod manifest;
pub mod plugin;

pub use descriptor::GameDescriptor;
pub use manifest::ManifestLoader;
pub use plugin::{GamePlugin, PluginLoader};

use anyhow::{anyhow, Result};
use log::{info, warn};

/// A registered game: its resolved metadata and its entry point
struct CatalogEntry {
    descriptor: GameDescriptor,
    plugin: Box<dyn GamePlugin>,
}

/// Fixed set of games available to the launcher
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from plugins in discovery order
    pub fn from_plugins(plugins: Vec<Box<dyn GamePlugin>>) -> Self {
        let mut entries: Vec<CatalogEntry> = Vec::with_capacity(plugins.len());

        for plugin in plugins {
            if entries.iter().any(|e| e.descriptor.id == plugin.id()) {
                warn!("Ignoring duplicate game id {}", plugin.id());
                continue;
            }

            let descriptor = GameDescriptor::from_plugin(plugin.as_ref());
            entries.push(CatalogEntry { descriptor, plugin });
        }

        Self { entries }
    }

    /// Build a catalog from everything a loader discovers
    pub fn discover(loader: &dyn PluginLoader) -> Result<Self> {
        let catalog = Self::from_plugins(loader.load()?);
        info!("Catalog holds {} games", catalog.len());
        Ok(catalog)
    }

    /// All game descriptors in catalog order
    pub fn list(&self) -> impl Iterator<Item = &GameDescriptor> {
        self.entries.iter().map(|e| &e.descriptor)
    }

    /// Look up a game by id
    pub fn get(&self, id: &str) -> Option<&GameDescriptor> {
        self.entries
            .iter()
            .find(|e| e.descriptor.id == id)
            .map(|e| &e.descriptor)
    }

    /// Whether a game with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run a game's entry point; blocks until the session ends
    pub fn launch(&self, id: &str) -> Result<()> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.descriptor.id == id)
            .ok_or_else(|| anyhow!("Unknown game: {}", id))?;

        info!("Launching {}", entry.descriptor.name);
        entry.plugin.run()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    /// In-memory plugin for tests
    pub struct StubGame {
        pub id: String,
        pub name: Option<String>,
        pub size: Option<u32>,
        pub cover: Option<PathBuf>,
        pub runs: Rc<Cell<u32>>,
        pub fail: bool,
    }

    impl StubGame {
        pub fn sized(id: &str, size: u32) -> Self {
            Self {
                id: id.to_string(),
                name: None,
                size: Some(size),
                cover: None,
                runs: Rc::new(Cell::new(0)),
                fail: false,
            }
        }
    }

    impl GamePlugin for StubGame {
        fn id(&self) -> &str {
            &self.id
        }

        fn name(&self) -> Option<&str> {
            self.name.as_deref()
        }

        fn size(&self) -> Option<u32> {
            self.size
        }

        fn cover_art(&self) -> Option<&Path> {
            self.cover.as_deref()
        }

        fn run(&self) -> Result<()> {
            self.runs.set(self.runs.get() + 1);
            if self.fail {
                Err(anyhow!("crashed"))
            } else {
                Ok(())
            }
        }
    }

    /// Catalog of stub games with the given sizes
    pub fn catalog_of(games: &[(&str, u32)]) -> Catalog {
        Catalog::from_plugins(
            games
                .iter()
                .map(|(id, size)| Box::new(StubGame::sized(id, *size)) as Box<dyn GamePlugin>)
                .collect(),
        )
    }

    #[test]
    fn missing_metadata_is_defaulted() {
        let bare = StubGame {
            size: None,
            ..StubGame::sized("tetris", 0)
        };
        let catalog = Catalog::from_plugins(vec![Box::new(bare)]);

        let game = catalog.get("tetris").unwrap();
        assert_eq!(game.name, "tetris");
        assert_eq!(game.size, 10);
        assert_eq!(game.cover_path, PathBuf::from("assets/covers/default.png"));
    }

    #[test]
    fn keeps_discovery_order_and_drops_duplicates() {
        let mut dup = StubGame::sized("a", 99);
        dup.name = Some("Second A".to_string());
        let catalog = Catalog::from_plugins(vec![
            Box::new(StubGame::sized("b", 1)),
            Box::new(StubGame::sized("a", 2)),
            Box::new(dup),
        ]);

        let ids: Vec<&str> = catalog.list().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(catalog.get("a").unwrap().size, 2);
    }

    #[test]
    fn launch_runs_the_plugin() {
        let game = StubGame::sized("pong", 5);
        let runs = Rc::clone(&game.runs);
        let catalog = Catalog::from_plugins(vec![Box::new(game)]);

        catalog.launch("pong").unwrap();
        assert_eq!(runs.get(), 1);
        assert!(catalog.launch("missing").is_err());
    }
}

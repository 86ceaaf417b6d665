use anyhow::Result;
use log::{debug, error, info};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::library::{InstalledStore, LibraryError, LibraryState, NotificationKind};
use crate::menu::{Menu, MenuCommand, MouseButton, Pos, StorageGauge};

/// Everything the menu screen needs, owned in one place
pub struct Launcher {
    /// Configuration
    config: Config,
    /// Available games
    catalog: Catalog,
    /// Installed games and notifications
    library: LibraryState,
}

impl Launcher {
    /// Create a launcher, loading the installed list from the configured store
    pub fn new(config: Config, catalog: Catalog) -> Self {
        let store = InstalledStore::new(config.paths.state_file.clone());
        let library = LibraryState::load(
            store,
            &catalog,
            config.storage.limit_mb,
            config.notifications.ttl_ticks,
        );

        info!(
            "Launcher ready: {} games, {} installed, {}/{}MB used",
            catalog.len(),
            library.installed().len(),
            library.used_space(),
            library.storage_limit()
        );

        Self {
            config,
            catalog,
            library,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn library(&self) -> &LibraryState {
        &self.library
    }

    /// Current library and store grids
    pub fn menu(&self) -> Menu {
        Menu::build(&self.catalog, &self.library)
    }

    /// Current storage meter values
    pub fn gauge(&self) -> StorageGauge {
        StorageGauge::new(self.library.used_space(), self.library.storage_limit())
    }

    /// Advance the notification countdown by one frame. Hook for a graphical
    /// front end; the console dismisses notifications instead.
    #[allow(dead_code)]
    pub fn tick(&mut self) {
        self.library.tick_notification();
    }

    pub fn dismiss_notification(&mut self) {
        self.library.dismiss_notification();
    }

    /// Handle a mouse click on the menu
    pub fn click(&mut self, button: MouseButton, pos: Pos) -> Result<()> {
        let menu = self.menu();
        if let Some(hit) = menu.hit_test(pos) {
            debug!(
                "{:?} click on {:?} card {} ({})",
                button, hit.section, hit.index, hit.game_id
            );
        }

        match menu.command_for_click(button, pos) {
            Some(command) => self.dispatch(command),
            None => Ok(()),
        }
    }

    /// Carry out a menu command. Only store failures are returned.
    pub fn dispatch(&mut self, command: MenuCommand) -> Result<()> {
        let outcome = match &command {
            MenuCommand::Install(id) => self.library.install(id),
            MenuCommand::Uninstall(id) => self.library.uninstall(id),
            MenuCommand::Launch(id) => {
                self.launch(id);
                Ok(())
            }
        };

        match outcome {
            Ok(()) => Ok(()),
            Err(e) if e.is_fatal() => {
                error!("Failed to save installed games: {}", e);
                Err(e.into())
            }
            Err(e) => {
                info!("{:?} rejected: {}", command, e);
                Ok(())
            }
        }
    }

    /// Run an installed game, reporting failures as a notification
    fn launch(&mut self, id: &str) {
        let Some(game) = self.catalog.get(id) else {
            self.library.notify(
                LibraryError::UnknownGame(id.to_string()).to_string(),
                NotificationKind::Error,
            );
            return;
        };
        let name = game.name.clone();

        if !self.library.is_installed(id) {
            self.library
                .notify(format!("{} is not installed", name), NotificationKind::Warning);
            return;
        }

        self.library
            .notify(format!("Launching {}", name), NotificationKind::Info);

        if let Err(e) = self.catalog.launch(id) {
            error!("Game {} failed: {:#}", id, e);
            self.library
                .notify(format!("Failed to launch {}", name), NotificationKind::Error);
        }
    }
}

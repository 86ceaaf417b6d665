use log::{debug, info, warn};
use std::collections::HashMap;
use thiserror::Error;

use super::notification::{Notification, NotificationKind, NotificationSlot};
use super::store::{InstalledStore, StoreError};
use crate::catalog::{Catalog, GameDescriptor};

/// Outcome of a rejected library operation
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("{0} is already installed")]
    AlreadyInstalled(String),
    #[error("{0} is not installed")]
    NotInstalled(String),
    #[error("not enough space for {id}: {needed}MB more required")]
    InsufficientSpace { id: String, needed: u64 },
    #[error("Unknown game: {0}")]
    UnknownGame(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LibraryError {
    /// Whether the launcher can keep running after this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, LibraryError::Store(_))
    }
}

/// Installed games, the storage quota, and the notification slot
pub struct LibraryState {
    store: InstalledStore,
    /// Catalog metadata keyed by id
    games: HashMap<String, GameDescriptor>,
    installed: Vec<String>,
    storage_limit: u64,
    notification_ttl: u32,
    notification: NotificationSlot,
}

impl LibraryState {
    /// Load the installed list from the store. Never fails; a bad store is an empty library.
    pub fn load(
        store: InstalledStore,
        catalog: &Catalog,
        storage_limit: u64,
        notification_ttl: u32,
    ) -> Self {
        let installed = store.load();
        info!(
            "{} installed games recorded in {}",
            installed.len(),
            store.path().display()
        );

        let games: HashMap<String, GameDescriptor> = catalog
            .list()
            .map(|game| (game.id.clone(), game.clone()))
            .collect();

        for id in installed.iter().filter(|id| !games.contains_key(id.as_str())) {
            warn!("Installed game {} is no longer in the catalog", id);
        }

        Self {
            store,
            games,
            installed,
            storage_limit,
            notification_ttl,
            notification: NotificationSlot::default(),
        }
    }

    /// Installed ids in installation order, orphans included
    pub fn installed(&self) -> &[String] {
        &self.installed
    }

    pub fn is_installed(&self, id: &str) -> bool {
        self.installed.iter().any(|installed| installed == id)
    }

    pub fn storage_limit(&self) -> u64 {
        self.storage_limit
    }

    /// Total size of installed games that are still in the catalog
    pub fn used_space(&self) -> u64 {
        self.installed
            .iter()
            .filter_map(|id| self.games.get(id))
            .map(|game| u64::from(game.size))
            .sum()
    }

    pub fn free_space(&self) -> u64 {
        self.storage_limit.saturating_sub(self.used_space())
    }

    /// Install a game if it fits in the remaining quota
    pub fn install(&mut self, id: &str) -> Result<(), LibraryError> {
        if self.is_installed(id) {
            self.notify("Game already installed!", NotificationKind::Warning);
            return Err(LibraryError::AlreadyInstalled(id.to_string()));
        }

        let Some(game) = self.games.get(id) else {
            let err = LibraryError::UnknownGame(id.to_string());
            self.notify(err.to_string(), NotificationKind::Error);
            return Err(err);
        };
        let name = game.name.clone();
        let required = u64::from(game.size);

        let used = self.used_space();
        if used + required > self.storage_limit {
            let needed = used + required - self.storage_limit;
            debug!("{} needs {}MB, {}MB free", id, required, self.free_space());
            self.notify(format!("Need {}MB more space!", needed), NotificationKind::Error);
            return Err(LibraryError::InsufficientSpace {
                id: id.to_string(),
                needed,
            });
        }

        self.installed.push(id.to_string());
        if let Err(e) = self.save() {
            self.installed.pop();
            return Err(e.into());
        }

        info!("Installed {} ({}MB)", id, required);
        self.notify(format!("{} installed!", name), NotificationKind::Success);
        Ok(())
    }

    /// Remove an installed game. An absent id fails without a notification.
    pub fn uninstall(&mut self, id: &str) -> Result<(), LibraryError> {
        let Some(index) = self.installed.iter().position(|installed| installed == id) else {
            return Err(LibraryError::NotInstalled(id.to_string()));
        };

        let removed = self.installed.remove(index);
        if let Err(e) = self.save() {
            self.installed.insert(index, removed);
            return Err(e.into());
        }

        let name = self
            .games
            .get(id)
            .map(|game| game.name.clone())
            .unwrap_or_else(|| id.to_string());

        info!("Uninstalled {}", id);
        self.notify(format!("{} removed!", name), NotificationKind::Success);
        Ok(())
    }

    /// Write the installed list to the store
    pub fn save(&self) -> Result<(), StoreError> {
        self.store.save(&self.installed)
    }

    /// Show a message, replacing any pending one
    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.notification
            .set(Notification::new(message, kind, self.notification_ttl));
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.get()
    }

    /// Count down the live notification by one frame
    pub fn tick_notification(&mut self) {
        self.notification.tick();
    }

    pub fn dismiss_notification(&mut self) {
        self.notification.clear();
    }
}

pub mod gauge;
pub mod layout;

pub use gauge::StorageGauge;
pub use layout::{Pos, Rect};

use crate::catalog::Catalog;
use crate::library::LibraryState;

/// Mouse button that produced a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// Grid a card belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Installed games
    Library,
    /// Games available to install
    Store,
}

/// Action requested from the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCommand {
    /// Run an installed game
    Launch(String),
    /// Install a store game
    Install(String),
    /// Remove an installed game
    Uninstall(String),
}

/// Card under the cursor
#[derive(Debug, Clone, PartialEq)]
pub struct CardHit<'a> {
    pub section: Section,
    pub index: usize,
    pub game_id: &'a str,
}

/// Snapshot of the two menu grids for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Menu {
    /// Installed games still in the catalog, in install order
    library: Vec<String>,
    /// Catalog games not installed, in catalog order
    store: Vec<String>,
}

impl Menu {
    /// Split the catalog into library and store grids
    pub fn build(catalog: &Catalog, library: &LibraryState) -> Self {
        let installed: Vec<String> = library
            .installed()
            .iter()
            .filter(|id| catalog.contains(id))
            .cloned()
            .collect();

        let store = catalog
            .list()
            .filter(|game| !installed.contains(&game.id))
            .map(|game| game.id.clone())
            .collect();

        Self {
            library: installed,
            store,
        }
    }

    pub fn library(&self) -> &[String] {
        &self.library
    }

    pub fn store(&self) -> &[String] {
        &self.store
    }

    /// Top edge of the store grid
    pub fn store_top(&self) -> f32 {
        layout::store_top(self.library.len())
    }

    /// Every card with its rectangle, library first
    pub fn cards(&self) -> impl Iterator<Item = (Section, &str, Rect)> {
        let store_top = self.store_top();
        let library = self
            .library
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let rect = layout::card_rect(layout::LIBRARY_TOP, i);
                (Section::Library, id.as_str(), rect)
            });
        let store = self
            .store
            .iter()
            .enumerate()
            .map(move |(i, id)| (Section::Store, id.as_str(), layout::card_rect(store_top, i)));
        library.chain(store)
    }

    /// Find the card containing `pos`
    pub fn hit_test(&self, pos: Pos) -> Option<CardHit<'_>> {
        if let Some((index, game_id)) = find_card(&self.library, layout::LIBRARY_TOP, pos) {
            return Some(CardHit {
                section: Section::Library,
                index,
                game_id,
            });
        }

        find_card(&self.store, self.store_top(), pos).map(|(index, game_id)| CardHit {
            section: Section::Store,
            index,
            game_id,
        })
    }

    /// Translate a click into a command
    pub fn command_for_click(&self, button: MouseButton, pos: Pos) -> Option<MenuCommand> {
        let hit = self.hit_test(pos)?;
        let id = hit.game_id.to_string();

        match (button, hit.section) {
            (MouseButton::Left, Section::Library) => Some(MenuCommand::Launch(id)),
            (MouseButton::Left, Section::Store) => Some(MenuCommand::Install(id)),
            (MouseButton::Right, Section::Library) => Some(MenuCommand::Uninstall(id)),
            (MouseButton::Right, Section::Store) => None,
        }
    }
}

/// Index and id of the card in a grid starting at `top` that contains `pos`
fn find_card(ids: &[String], top: f32, pos: Pos) -> Option<(usize, &str)> {
    ids.iter()
        .enumerate()
        .find(|(i, _)| layout::card_rect(top, *i).contains(pos))
        .map(|(i, id)| (i, id.as_str()))
}

mod app;
mod catalog;
mod config;
mod console;
mod library;
mod menu;

use anyhow::{Context, Result};
use log::{info, warn, LevelFilter};
use std::io;

use app::Launcher;
use catalog::{Catalog, ManifestLoader};
use config::Config;

fn main() -> Result<()> {
    // Initialize logger; RUST_LOG overrides the default level
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting MultiGames");

    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Error loading configuration: {:#}", e);
            // Replace the unreadable file with defaults
            let config = Config::default();
            config.save()?;
            config
        }
    };
    config
        .ensure_directories()
        .context("Failed to create launcher directories")?;

    let loader = ManifestLoader::new(config.paths.games_dir.clone());
    let catalog = Catalog::discover(&loader)?;
    if catalog.is_empty() {
        warn!("No games found in {}", config.paths.games_dir.display());
    }

    let mut launcher = Launcher::new(config, catalog);

    let stdin = io::stdin();
    console::run(&mut launcher, stdin.lock(), io::stdout())?;

    info!("Exiting MultiGames");
    Ok(())
}

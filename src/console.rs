use anyhow::{anyhow, Result};
use log::debug;
use std::io::{BufRead, Write};

use crate::app::Launcher;
use crate::menu::{MenuCommand, MouseButton, Pos, Section};

const HELP: &str = "\
Commands:
  list                       show library, store and storage
  install <id>               install a game from the store
  uninstall <id>             remove an installed game
  play <id>                  launch an installed game
  click <left|right> <x> <y> click the menu at a point
  help                       show this text
  quit                       exit the launcher";

/// A parsed console line
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    List,
    Menu(MenuCommand),
    Click(MouseButton, Pos),
    Help,
    Quit,
}

/// Parse one input line; blank lines yield `None`
pub fn parse_line(line: &str) -> Result<Option<ConsoleCommand>> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let game_id = |args: &[&str]| -> Result<String> {
        match args {
            [id] => Ok(id.to_string()),
            _ => Err(anyhow!("{} expects exactly one game id", verb)),
        }
    };

    let command = match verb {
        "list" | "ls" => ConsoleCommand::List,
        "install" => ConsoleCommand::Menu(MenuCommand::Install(game_id(&args)?)),
        "uninstall" | "remove" => ConsoleCommand::Menu(MenuCommand::Uninstall(game_id(&args)?)),
        "play" | "run" => ConsoleCommand::Menu(MenuCommand::Launch(game_id(&args)?)),
        "click" => {
            let [button, x, y] = args.as_slice() else {
                return Err(anyhow!("click expects a button and two coordinates"));
            };
            let button = match *button {
                "left" => MouseButton::Left,
                "right" => MouseButton::Right,
                other => return Err(anyhow!("Unknown mouse button: {}", other)),
            };
            let x: f32 = x.parse().map_err(|_| anyhow!("Invalid x coordinate: {}", x))?;
            let y: f32 = y.parse().map_err(|_| anyhow!("Invalid y coordinate: {}", y))?;
            ConsoleCommand::Click(button, Pos::new(x, y))
        }
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        other => return Err(anyhow!("Unknown command: {}", other)),
    };

    Ok(Some(command))
}

/// Print the library, the store and the storage meter
pub fn render<W: Write>(launcher: &Launcher, out: &mut W) -> Result<()> {
    let menu = launcher.menu();
    let gauge = launcher.gauge();

    writeln!(
        out,
        "MultiGames  [{} MB, {:.0}% used]  {} installed, {} in store",
        gauge.label(),
        gauge.fraction() * 100.0,
        menu.library().len(),
        menu.store().len()
    )?;

    if launcher.catalog().is_empty() {
        writeln!(out, "No games in {}", launcher.config().paths.games_dir.display())?;
    }

    let mut current = None;
    for (section, id, rect) in menu.cards() {
        if current != Some(section) {
            let title = match section {
                Section::Library => "Your Library",
                Section::Store => "Store",
            };
            writeln!(out, "{}", title)?;
            current = Some(section);
        }

        if let Some(game) = launcher.catalog().get(id) {
            writeln!(
                out,
                "  {:<16} {} ({} MB) at ({}, {}) cover {}",
                game.id,
                game.name,
                game.size,
                rect.x,
                rect.y,
                game.cover_path.display()
            )?;
        }
    }

    Ok(())
}

/// Drive the launcher from line-oriented input until `quit` or end of input
pub fn run<R: BufRead, W: Write>(launcher: &mut Launcher, input: R, mut out: W) -> Result<()> {
    render(launcher, &mut out)?;

    for line in input.lines() {
        let line = line?;
        debug!("console input: {}", line);

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        match command {
            ConsoleCommand::List => render(launcher, &mut out)?,
            ConsoleCommand::Menu(command) => launcher.dispatch(command)?,
            ConsoleCommand::Click(button, pos) => launcher.click(button, pos)?,
            ConsoleCommand::Help => writeln!(out, "{}", HELP)?,
            ConsoleCommand::Quit => break,
        }

        // Text output has no frames; show each notification once
        if let Some(notification) = launcher.library().notification() {
            writeln!(out, "[{}] {}", notification.kind, notification.message)?;
        }
        launcher.dismiss_notification();
        out.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::catalog_of;
    use crate::config::Config;
    use tempfile::tempdir;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(
            parse_line("install snake").unwrap(),
            Some(ConsoleCommand::Menu(MenuCommand::Install("snake".to_string())))
        );
        assert_eq!(
            parse_line("click right 10 20.5").unwrap(),
            Some(ConsoleCommand::Click(MouseButton::Right, Pos::new(10.0, 20.5)))
        );
        assert!(parse_line("install").is_err());
        assert!(parse_line("click middle 1 2").is_err());
        assert!(parse_line("dance").is_err());
    }

    #[test]
    fn session_prints_notifications_once() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.paths.state_file = dir.path().join("installed.json");
        config.storage.limit_mb = 10;
        let mut launcher = Launcher::new(config, catalog_of(&[("a", 4), ("b", 8)]));

        let input = "install a\ninstall b\nuninstall b\nlist\nquit\ninstall b\n";
        let mut out = Vec::new();
        run(&mut launcher, input.as_bytes(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[success] a installed!"));
        assert!(text.contains("[error] Need 2MB more space!"));
        assert!(text.contains("4/10"));
        assert_eq!(text.matches("a installed!").count(), 1);
        assert_eq!(launcher.library().installed(), ["a".to_string()]);
    }
}

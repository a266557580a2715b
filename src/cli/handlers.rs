use std::io;

use crate::cli::commands::{Cli, Commands};
use crate::cli::menu::Menu;
use crate::io::config_io::{self, ConfigError};
use crate::model::config::Config;
use crate::ops::manager::TodoList;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Load the config file named on the command line (if any) and apply the
/// flags that override it
pub fn resolve_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = config_io::load_config(cli.config.as_deref())?;
    if let Some(lookup) = cli.lookup {
        config.history.lookup = lookup;
    }
    if cli.json {
        config.menu.json = true;
    }
    Ok(config)
}

pub fn dispatch(cli: Cli, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => cmd_menu(&config),
        Commands::Config => cmd_config(&config, cli.json),
    }
}

fn cmd_menu(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let list = TodoList::with_config(&config.history);
    let stdin = io::stdin();
    let mut menu = Menu::new(stdin.lock(), io::stdout().lock(), list).with_json(config.menu.json);
    menu.run()?;
    Ok(())
}

fn cmd_config(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let text = config_io::render_config(config, json)?;
    println!("{}", text.trim_end());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::LookupMode;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn flags_override_config_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("todo.toml");
        fs::write(&path, "[history]\nlookup = \"description\"\nlimit = 7\n").unwrap();

        let cli = Cli::try_parse_from([
            "todo",
            "--config",
            path.to_str().unwrap(),
            "--lookup",
            "id",
            "--json",
        ])
        .unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.history.lookup, LookupMode::Id);
        assert_eq!(config.history.limit, 7);
        assert!(config.menu.json);
    }

    #[test]
    fn no_flags_means_defaults() {
        let cli = Cli::try_parse_from(["todo"]).unwrap();
        assert_eq!(resolve_config(&cli).unwrap(), Config::default());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["todo", "-c", "/nonexistent/todo.toml"]).unwrap();
        assert!(matches!(
            resolve_config(&cli),
            Err(ConfigError::ReadError { .. })
        ));
    }
}

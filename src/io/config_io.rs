use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Error type for reading and printing the config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("could not serialize config as JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Parse config text. Missing sections and keys take their defaults.
pub fn parse_config(text: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(text)?)
}

/// Read and parse the config file at `path`
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&text)
}

/// Read the config file if one was given, otherwise use defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => read_config(path),
        None => Ok(Config::default()),
    }
}

/// Render a config as TOML, or pretty JSON when `json` is set
pub fn render_config(config: &Config, json: bool) -> Result<String, ConfigError> {
    if json {
        Ok(serde_json::to_string_pretty(config)?)
    } else {
        Ok(toml::to_string(config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::LookupMode;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_config() -> &'static str {
        r#"[history]
lookup = "id"
clear_redo_on_action = true
limit = 50

[menu]
json = true

[log]
level = "debug"
"#
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(sample_config()).unwrap();
        assert_eq!(config.history.lookup, LookupMode::Id);
        assert!(config.history.clear_redo_on_action);
        assert_eq!(config.history.limit, 50);
        assert!(config.menu.json);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.history.lookup, LookupMode::Description);
        assert!(!config.history.clear_redo_on_action);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = parse_config("[history]\nlimit = 10\n").unwrap();
        assert_eq!(config.history.limit, 10);
        assert_eq!(config.history.lookup, LookupMode::Description);
        assert!(!config.menu.json);
    }

    #[test]
    fn test_unknown_lookup_mode_is_parse_error() {
        let err = parse_config("[history]\nlookup = \"position\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_read_config_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("todo.toml");
        fs::write(&path, sample_config()).unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.history.limit, 50);
        assert_eq!(load_config(Some(&path)).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing.toml");
        let err = read_config(&path).unwrap_err();
        match err {
            ConfigError::ReadError { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected ReadError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_without_path_is_default() {
        assert_eq!(load_config(None).unwrap(), Config::default());
    }

    #[test]
    fn test_render_round_trips() {
        let config = parse_config(sample_config()).unwrap();
        let text = render_config(&config, false).unwrap();
        assert_eq!(parse_config(&text).unwrap(), config);

        let json = render_config(&config, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["history"]["lookup"], "id");
        assert_eq!(value["history"]["limit"], 50);
    }
}

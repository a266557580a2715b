use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Configuration from the optional `--config` TOML file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// How undo and redo find the task a history record refers to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    /// Match by description and list position (last match, append at end)
    #[default]
    Description,
    /// Match by task id and restore tasks at their recorded position
    Id,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default)]
    pub lookup: LookupMode,
    /// Drop the redo stack whenever a new add/complete/delete is recorded
    #[serde(default)]
    pub clear_redo_on_action: bool,
    /// Maximum undo depth; 0 keeps everything
    #[serde(default)]
    pub limit: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Print "View Tasks" results as JSON
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Tracing filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

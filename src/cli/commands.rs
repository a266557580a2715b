use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::model::config::LookupMode;

#[derive(Parser)]
#[command(name = "todo", about = concat!("todo v", env!("CARGO_PKG_VERSION"), " - a to-do list with undo and redo"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Read settings from a TOML config file
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// How undo/redo find tasks (overrides the config file)
    #[arg(long, value_enum, global = true)]
    pub lookup: Option<LookupMode>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run the interactive menu (the default)
    Menu,
    /// Print the effective configuration
    Config,
}

//! Configuration management for the gearset tool.
//!
//! Handles:
//! - Command-line argument parsing
//! - Optional TOML config file (explicit path or user config directory)
//! - Merging both over built-in defaults

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;

use crate::encoder::EncodeOptions;

const DEFAULT_LOG_LEVEL: &str = "info";

/// Command-line arguments for the gearset tool
#[derive(Debug, Parser)]
#[command(name = "gearset")]
#[command(about = "Decode and encode equipment sets in macro source")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file to use instead of the user config directory
    #[arg(long, global = true, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    /// Log level for the tool
    #[arg(
        long,
        global = true,
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: Option<String>,
}

/// Subcommands of the gearset tool
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Decode macro source into JSON sets and diagnostics
    Decode {
        /// Macro source file, `-` or absent for stdin
        input: Option<PathBuf>,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
        /// Write output here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Render JSON sets as macro source
    Encode {
        /// JSON file (sets or full decode output), `-` or absent for stdin
        input: Option<PathBuf>,
        /// Only render this base set and its variants
        #[arg(long)]
        view: Option<String>,
        /// Render slots outside the canonical order too
        #[arg(long)]
        keep_unknown_slots: bool,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Decode macro source and render it back in normalized form
    Preview {
        input: Option<PathBuf>,
        #[arg(long)]
        view: Option<String>,
        #[arg(long)]
        keep_unknown_slots: bool,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List the state modes declared in macro source and their defaults
    Modes { input: Option<PathBuf> },
    /// Re-render the preview whenever the macro file changes
    Watch {
        input: PathBuf,
        #[arg(long)]
        view: Option<String>,
        #[arg(long)]
        keep_unknown_slots: bool,
    },
}

/// Settings read from the TOML config file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub log_level: Option<String>,
    pub default_view: Option<String>,
    pub encode: EncodeOptions,
}

impl FileConfig {
    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config file {}", path.display()))
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,
    pub log_level: String,
    /// Base set rendered when a command gives no `--view`
    pub default_view: Option<String>,
    pub encode: EncodeOptions,
    /// Config file that was loaded, if any
    pub config_file: Option<PathBuf>,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let config_file = match args.config {
            Some(path) => Some(path),
            None => default_config_path().filter(|path| path.exists()),
        };

        let file = match &config_file {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        Ok(Self::merge(args.command, args.log_level, file, config_file))
    }

    fn merge(
        command: Command,
        cli_log_level: Option<String>,
        file: FileConfig,
        config_file: Option<PathBuf>,
    ) -> Self {
        let mut encode = file.encode;
        if let Command::Encode {
            keep_unknown_slots: true,
            ..
        }
        | Command::Preview {
            keep_unknown_slots: true,
            ..
        }
        | Command::Watch {
            keep_unknown_slots: true,
            ..
        } = command
        {
            encode.include_unknown_slots = true;
        }

        Config {
            command,
            log_level: cli_log_level
                .or(file.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            default_view: file.default_view,
            encode,
            config_file,
        }
    }

    /// The view to render: `--view` if given, else the configured default
    pub fn effective_view(&self, cli_view: Option<&str>) -> Option<String> {
        cli_view
            .map(str::to_string)
            .or_else(|| self.default_view.clone())
    }
}

/// `<user config dir>/gearset/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gearset").join("config.toml"))
}

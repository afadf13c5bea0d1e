//! Configuration management for the troubleshooting guide.
//!
//! Handles:
//! - Command-line argument parsing
//! - Optional TOML config file (explicit, project, or user-global)
//! - Layering: CLI > config file > defaults

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;

pub const DEFAULT_STORE: &str = "steps.txt";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_STYLE: &str = "style.css";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Project-local config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = ".troubleshoot.toml";

/// Command-line arguments for the troubleshooting guide
#[derive(Debug, Parser)]
#[command(name = "tsg")]
#[command(about = "Searchable, self-editable troubleshooting guide")]
#[command(version)]
pub struct Args {
    /// Path of the backing text file
    #[arg(long, global = true, help = "Backing text file (default: steps.txt)")]
    pub store: Option<PathBuf>,

    /// Explicit config file
    #[arg(long, global = true, help = "TOML config file to load")]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(
        long,
        global = true,
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Serve the guide and editor over HTTP
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// List sections with their identifiers
    List,
    /// Print the rendered blocks of one section (`app<N>` or `N`)
    Show { id: String },
    /// Search section bodies
    Search {
        query: String,
        #[arg(long, help = "Print results as JSON")]
        json: bool,
    },
    /// Append a new section
    Append {
        #[arg(long)]
        name: String,
        #[arg(long, help = "Section body; read from stdin when omitted")]
        body: Option<String>,
    },
    /// Replace the whole store with a file's contents (`-` for stdin)
    Replace { file: PathBuf },
}

/// Contents of a TOML config file; every key optional
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub store: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub style: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Backing text file
    pub store_path: PathBuf,
    pub host: String,
    pub port: u16,
    /// Stylesheet served at `/style.css` when it exists
    pub style_path: PathBuf,
    pub log_level: String,
    /// Config file that contributed values, if any
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            style_path: PathBuf::from(DEFAULT_STYLE),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            config_path: None,
        }
    }
}

impl Config {
    /// Parse the command line and build the configuration
    pub fn from_args_and_env() -> Result<(Self, Command)> {
        let args = Args::parse();
        let command = args.command.clone().unwrap_or(Command::Serve {
            host: None,
            port: None,
        });
        Ok((Self::from_args(&args)?, command))
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: &Args) -> Result<Self> {
        let (file, config_path) = match &args.config {
            Some(path) => (FileConfig::load(path)?, Some(path.clone())),
            None => match Self::discover_config_file() {
                Some(path) => (FileConfig::load(&path)?, Some(path)),
                None => (FileConfig::default(), None),
            },
        };

        let mut config = Self::from_file(file);
        config.config_path = config_path;

        if let Some(store) = &args.store {
            config.store_path = store.clone();
        }
        if let Some(level) = &args.log_level {
            config.log_level = level.clone();
        }
        if let Some(Command::Serve { host, port }) = &args.command {
            if let Some(host) = host {
                config.host = host.clone();
            }
            if let Some(port) = port {
                config.port = *port;
            }
        }

        Ok(config)
    }

    /// Defaults overlaid with a config file
    pub fn from_file(file: FileConfig) -> Self {
        let defaults = Self::default();
        Self {
            store_path: file.store.unwrap_or(defaults.store_path),
            host: file.host.unwrap_or(defaults.host),
            port: file.port.unwrap_or(defaults.port),
            style_path: file.style.unwrap_or(defaults.style_path),
            log_level: file.log_level.unwrap_or(defaults.log_level),
            config_path: None,
        }
    }

    /// Project config in the working directory, then the user config dir
    fn discover_config_file() -> Option<PathBuf> {
        let project = PathBuf::from(PROJECT_CONFIG_FILE);
        if project.is_file() {
            return Some(project);
        }

        dirs::config_dir()
            .map(|dir| dir.join("troubleshoot-guide").join("config.toml"))
            .filter(|path| path.is_file())
    }

    /// Socket address string for the HTTP server
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

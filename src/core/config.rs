//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.menuboard/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MenuboardConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub effects: EffectsConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BoardConfig {
    pub seed: Option<String>,
    pub containers: Option<usize>,
    pub items_per_container: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EffectsConfig {
    pub flash_ms: Option<u64>,
    pub announcements: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_FILE: &str = "menuboard.log";
pub const DEFAULT_SEED: &str = "basic";
pub const DEFAULT_CONTAINERS: usize = 4;
pub const DEFAULT_ITEMS_PER_CONTAINER: usize = 5;
pub const DEFAULT_FLASH_MS: u64 = 700;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub log_level: String,
    pub log_file: String,
    pub seed: String,
    pub containers: usize,
    pub items_per_container: usize,
    pub flash_ms: u64,
    pub announcements: bool,
}

/// Values given on the command line. `None` means the flag was not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub seed: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.menuboard/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".menuboard").join("config.toml"))
}

/// Load config from `~/.menuboard/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MenuboardConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MenuboardConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(MenuboardConfig::default());
    };
    load_config_from(&path)
}

/// Same as [`load_config`], for an explicit path.
pub fn load_config_from(path: &Path) -> Result<MenuboardConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(MenuboardConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: MenuboardConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Menuboard Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "info"                 # "error", "warn", "info", "debug", "trace"
# log_file = "menuboard.log"

# [board]
# seed = "basic"                     # "basic", "generated", or a path to a JSON seed
# containers = 4                     # generated seed only
# items_per_container = 5            # generated seed only

# [effects]
# flash_ms = 700                     # how long a moved card stays highlighted
# announcements = true               # show move announcements in the status line
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_TEMPLATE) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &MenuboardConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &MenuboardConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Seed: CLI → env → config → default
    let seed = cli
        .seed
        .clone()
        .or_else(|| env("MENUBOARD_SEED"))
        .or_else(|| config.board.seed.clone())
        .unwrap_or_else(|| DEFAULT_SEED.to_string());

    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| env("MENUBOARD_LOG_LEVEL"))
        .or_else(|| config.general.log_level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.general.log_file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    ResolvedConfig {
        log_level,
        log_file,
        seed,
        containers: config.board.containers.unwrap_or(DEFAULT_CONTAINERS),
        items_per_container: config
            .board
            .items_per_container
            .unwrap_or(DEFAULT_ITEMS_PER_CONTAINER),
        flash_ms: config.effects.flash_ms.unwrap_or(DEFAULT_FLASH_MS),
        announcements: config.effects.announcements.unwrap_or(true),
    }
}

/// Parses a level name, falling back to `Info` for anything unrecognized.
pub fn parse_level(level: &str) -> log::LevelFilter {
    level.parse().unwrap_or_else(|_| {
        warn!("Unknown log level {:?}, using info", level);
        log::LevelFilter::Info
    })
}

//! Configuration loader
//!
//! Loads client settings from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `ZOTERO_LIBRARY_ID` is absent, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `ZOTERO_API_KEY`: API key (optional for public libraries)
//! - `ZOTERO_LIBRARY_ID`: Numeric user or group id (required)
//! - `ZOTERO_LIBRARY_TYPE`: `user` (default) or `group`
//! - `ZOTERO_BASE_URL`: API root, defaults to `https://api.zotero.org`
//! - `ZOTERO_LOCALE`: Locale for schema lookups
//! - `ZOTERO_TIMEOUT_SECS`: HTTP timeout in seconds
//! - `ZOTERO_RATE_LIMIT_MS`: Minimum spacing between requests, `0` disables
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./zotero.toml` or `./zotero.json` (current working directory)
//! 2. `$XDG_CONFIG_HOME/zotero/config.toml` or `~/.config/zotero/config.toml`

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use zotero_domain::{ClientConfig, LibraryRef, LibraryType, Result, RetryConfig, ZoteroError};

pub const ENV_API_KEY: &str = "ZOTERO_API_KEY";
pub const ENV_LIBRARY_ID: &str = "ZOTERO_LIBRARY_ID";
pub const ENV_LIBRARY_TYPE: &str = "ZOTERO_LIBRARY_TYPE";
pub const ENV_BASE_URL: &str = "ZOTERO_BASE_URL";
pub const ENV_LOCALE: &str = "ZOTERO_LOCALE";
pub const ENV_TIMEOUT_SECS: &str = "ZOTERO_TIMEOUT_SECS";
pub const ENV_RATE_LIMIT_MS: &str = "ZOTERO_RATE_LIMIT_MS";

/// Serializable client settings as found in the environment or a file
///
/// Unset values fall back to the [`ClientConfig`] defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub api_key: Option<String>,
    pub library_id: Option<String>,
    pub library_type: Option<LibraryType>,
    pub base_url: Option<String>,
    pub locale: Option<String>,
    pub timeout_secs: Option<u64>,
    pub rate_limit_ms: Option<u64>,
    pub retry: Option<RetryConfig>,
}

impl ClientSettings {
    /// Fill unset fields of `self` from `fallback`.
    pub fn or(self, fallback: ClientSettings) -> ClientSettings {
        ClientSettings {
            api_key: self.api_key.or(fallback.api_key),
            library_id: self.library_id.or(fallback.library_id),
            library_type: self.library_type.or(fallback.library_type),
            base_url: self.base_url.or(fallback.base_url),
            locale: self.locale.or(fallback.locale),
            timeout_secs: self.timeout_secs.or(fallback.timeout_secs),
            rate_limit_ms: self.rate_limit_ms.or(fallback.rate_limit_ms),
            retry: self.retry.or(fallback.retry),
        }
    }

    /// Validate and convert into a [`ClientConfig`].
    ///
    /// # Errors
    /// Returns `ZoteroError::Config` if the library id is missing or empty.
    pub fn into_config(self) -> Result<ClientConfig> {
        let library_id = self
            .library_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                ZoteroError::Config(format!("library id is required (set {ENV_LIBRARY_ID})"))
            })?;

        let library = LibraryRef {
            library_id: library_id.trim().to_string(),
            library_type: self.library_type.unwrap_or_default(),
        };
        let mut builder = ClientConfig::builder(library);

        if let Some(key) = self.api_key {
            builder = builder.api_key(key);
        }
        if let Some(url) = self.base_url {
            builder = builder.base_url(url);
        }
        if let Some(locale) = self.locale {
            builder = builder.locale(locale);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(ms) = self.rate_limit_ms {
            builder = builder.rate_limit(Duration::from_millis(ms));
        }
        if let Some(retry) = self.retry {
            builder = builder.retry(retry);
        }

        builder.build()
    }
}

/// Load configuration with automatic fallback strategy
///
/// Environment variables win. If the library id is not set there, the first
/// config file found fills whatever the environment left unset.
///
/// # Errors
/// Returns `ZoteroError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<ClientConfig> {
    let env = settings_from_env()?;
    if env.library_id.is_some() {
        tracing::info!("Configuration loaded from environment variables");
        return env.into_config();
    }

    tracing::debug!("{ENV_LIBRARY_ID} not set, trying config file");
    env.or(load_from_file(None)?).into_config()
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `ZoteroError::Config` if `ZOTERO_LIBRARY_ID` is missing or a
/// numeric variable does not parse.
pub fn load_from_env() -> Result<ClientConfig> {
    settings_from_env()?.into_config()
}

/// Read [`ClientSettings`] from the process environment.
pub fn settings_from_env() -> Result<ClientSettings> {
    settings_from_lookup(|key| std::env::var(key).ok())
}

/// Read [`ClientSettings`] through `lookup`, treating empty values as unset.
pub fn settings_from_lookup<F>(lookup: F) -> Result<ClientSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let library_type = get(ENV_LIBRARY_TYPE)
        .map(|raw| {
            raw.parse::<LibraryType>().map_err(|_| {
                ZoteroError::Config(format!(
                    "Invalid {ENV_LIBRARY_TYPE}: {raw} (expected user or group)"
                ))
            })
        })
        .transpose()?;

    Ok(ClientSettings {
        api_key: get(ENV_API_KEY),
        library_id: get(ENV_LIBRARY_ID),
        library_type,
        base_url: get(ENV_BASE_URL),
        locale: get(ENV_LOCALE),
        timeout_secs: parse_number(ENV_TIMEOUT_SECS, get(ENV_TIMEOUT_SECS))?,
        rate_limit_ms: parse_number(ENV_RATE_LIMIT_MS, get(ENV_RATE_LIMIT_MS))?,
        retry: None,
    })
}

fn parse_number(key: &str, raw: Option<String>) -> Result<Option<u64>> {
    raw.map(|value| {
        value.parse::<u64>().map_err(|e| ZoteroError::Config(format!("Invalid {key}: {e}")))
    })
    .transpose()
}

/// Load settings from a file
///
/// If `path` is `None`, probes the standard locations.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `ZoteroError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientSettings> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ZoteroError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ZoteroError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ZoteroError::Config(format!("Failed to read config file: {e}")))?;

    parse_settings(&contents, &config_path)
}

/// Parse settings from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_settings(contents: &str, path: &Path) -> Result<ClientSettings> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ZoteroError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ZoteroError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(ZoteroError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a config file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend([cwd.join("zotero.toml"), cwd.join("zotero.json")]);
    }

    let config_home = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")));
    if let Some(dir) = config_home {
        candidates.extend([dir.join("zotero/config.toml"), dir.join("zotero/config.json")]);
    }

    candidates.into_iter().find(|path| path.exists())
}

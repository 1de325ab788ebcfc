//! Client configuration from flags, environment and config file
//!
//! Precedence: flags (and their env fallbacks) > other `ZOTERO_*` variables >
//! the config file named by `--config` or found in a standard location.

use anyhow::Context;
use tracing::debug;
use zotero_domain::{ClientConfig, LibraryType};
use zotero_infra::config::{load_from_file, probe_config_paths, settings_from_env};
use zotero_infra::ClientSettings;

use crate::args::GlobalArgs;

fn flag_settings(global: &GlobalArgs) -> ClientSettings {
    ClientSettings {
        api_key: global.api_key.clone().filter(|key| !key.is_empty()),
        library_id: global.library.clone().filter(|id| !id.is_empty()),
        library_type: global.library_type.map(LibraryType::from),
        base_url: global.base_url.clone().filter(|url| !url.is_empty()),
        ..ClientSettings::default()
    }
}

fn file_settings(global: &GlobalArgs) -> anyhow::Result<ClientSettings> {
    let path = match &global.config {
        Some(path) => Some(path.clone()),
        None => probe_config_paths(),
    };
    match path {
        Some(path) => {
            debug!(path = %path.display(), "reading config file");
            load_from_file(Some(path.clone()))
                .with_context(|| format!("failed to load {}", path.display()))
        }
        None => Ok(ClientSettings::default()),
    }
}

/// Merged settings before validation.
pub fn resolve(global: &GlobalArgs) -> anyhow::Result<ClientSettings> {
    let env = settings_from_env().context("invalid ZOTERO_* environment")?;
    Ok(flag_settings(global).or(env).or(file_settings(global)?))
}

/// Configuration for the library named by the flags.
pub fn client_config(global: &GlobalArgs) -> anyhow::Result<ClientConfig> {
    Ok(resolve(global)?.into_config()?)
}

/// Configuration for the user library `user_id`, keeping every other setting.
pub fn user_config(global: &GlobalArgs, user_id: &str) -> anyhow::Result<ClientConfig> {
    let settings = ClientSettings {
        library_id: Some(user_id.to_string()),
        library_type: Some(LibraryType::User),
        ..resolve(global)?
    };
    Ok(settings.into_config()?)
}

//! Reading `config.toml` into a [`WebBridgeConfig`].

use std::path::Path;

use tracing::{debug, info};
use webbridge_common::ConfigError;

use crate::schema::WebBridgeConfig;

use super::paths::{create_default_config, default_config_path, io_error};

/// Parse the TOML file at `path`. Absent keys keep their defaults.
///
/// Range checks happen in [`crate::load_config`], not here.
pub fn load_from_path(path: &Path) -> Result<WebBridgeConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let text = std::fs::read_to_string(path).map_err(|e| io_error("read", path, e))?;
    let config = toml::from_str::<WebBridgeConfig>(&text)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;

    debug!(path = %path.display(), "webbridge config loaded");
    Ok(config)
}

/// Load `path`, or write the template there and return defaults when the
/// file is missing.
pub(super) fn load_or_create(path: &Path) -> Result<WebBridgeConfig, ConfigError> {
    match load_from_path(path) {
        Err(ConfigError::FileNotFound(_)) => {
            info!(path = %path.display(), "first run, creating config");
            create_default_config(path)?;
            Ok(WebBridgeConfig::default())
        }
        other => other,
    }
}

/// Load the per-user config, creating it on first run.
pub fn load_default() -> Result<WebBridgeConfig, ConfigError> {
    load_or_create(&default_config_path()?)
}

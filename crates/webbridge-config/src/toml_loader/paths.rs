//! Where the config file lives and how a fresh one is written.

use std::path::{Path, PathBuf};

use tracing::info;
use webbridge_common::ConfigError;

use super::template::default_config_toml;

const APP_DIR: &str = "webbridge";
const FILE_NAME: &str = "config.toml";

/// `{config_dir}/webbridge/config.toml` for the current platform.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir().ok_or_else(|| {
        ConfigError::ParseError("no platform config directory for webbridge".into())
    })?;
    Ok(base.join(APP_DIR).join(FILE_NAME))
}

/// Write the commented template to `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| io_error("create", dir, e))?;
    }
    std::fs::write(path, default_config_toml()).map_err(|e| io_error("write", path, e))?;

    info!(path = %path.display(), "wrote webbridge config template");
    Ok(())
}

pub(super) fn io_error(action: &str, path: &Path, e: std::io::Error) -> ConfigError {
    ConfigError::ParseError(format!("cannot {action} {}: {e}", path.display()))
}

//! Webbridge configuration.
//!
//! TOML-based configuration for the host widget: where content lives,
//! how the webview is built, and how verbose logging is. Every section
//! uses serde defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use webbridge_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("zoom = {}", config.webview.zoom);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{ContentSection, LogLevel, LoggingConfig, WebBridgeConfig, WebViewSection};
pub use toml_loader::{create_default_config, default_config_path, load_default, load_from_path};

use std::path::Path;

use webbridge_common::ConfigError;

/// Load config from `path` if given, otherwise from the platform default
/// location, then validate it.
pub fn load_config(path: Option<&Path>) -> Result<WebBridgeConfig, ConfigError> {
    let config = match path {
        Some(p) => load_from_path(p)?,
        None => load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[webview]\nzoom = 12.0\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("webview.zoom"));
    }

    #[test]
    fn load_config_accepts_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[content]\nroot = \"dist\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.content.root.as_deref(), Some(Path::new("dist")));
    }
}

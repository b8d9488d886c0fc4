//! Configuration validation.
//!
//! Collects every problem into one `ConfigError::ValidationError` so a
//! user sees all mistakes at once.

use webbridge_common::ConfigError;

use crate::schema::WebBridgeConfig;

pub const ZOOM_MIN: f64 = 0.25;
pub const ZOOM_MAX: f64 = 5.0;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &WebBridgeConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_content(&mut errors, config);
    validate_webview(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_content(errors: &mut Vec<String>, config: &WebBridgeConfig) {
    let content = &config.content;
    if let Some(dev_html) = &content.dev_html {
        if content.root.is_none() {
            errors.push("content.dev_html requires content.root".into());
        }
        if dev_html.is_absolute() {
            errors.push(format!(
                "content.dev_html = {} must be relative to content.root",
                dev_html.display()
            ));
        }
    }
}

fn validate_webview(errors: &mut Vec<String>, config: &WebBridgeConfig) {
    let webview = &config.webview;
    validate_range_f64(errors, "webview.zoom", webview.zoom, ZOOM_MIN, ZOOM_MAX);
    if webview.user_agent.trim().is_empty() {
        errors.push("webview.user_agent must not be empty".into());
    }
}

/// Push an error if `value` is outside `[min, max]`.
fn validate_range_f64(errors: &mut Vec<String>, name: &str, value: f64, min: f64, max: f64) {
    if !(min..=max).contains(&value) {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&WebBridgeConfig::default()).is_ok());
    }

    #[test]
    fn zoom_out_of_range() {
        let mut config = WebBridgeConfig::default();
        config.webview.zoom = 0.1;
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("webview.zoom = 0.1"));
    }

    #[test]
    fn nan_zoom_is_rejected() {
        let mut config = WebBridgeConfig::default();
        config.webview.zoom = f64::NAN;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn dev_html_without_root() {
        let mut config = WebBridgeConfig::default();
        config.content.dev_html = Some(PathBuf::from("dev.html"));
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("requires content.root"));
    }

    #[test]
    fn absolute_dev_html_is_rejected() {
        let mut config = WebBridgeConfig::default();
        config.content.root = Some(PathBuf::from("dist"));
        config.content.dev_html = Some(std::env::temp_dir().join("dev.html"));
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("must be relative"));
    }

    #[test]
    fn errors_are_collected() {
        let mut config = WebBridgeConfig::default();
        config.webview.zoom = 9.0;
        config.webview.user_agent = "  ".into();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("webview.zoom"));
        assert!(err.contains("user_agent"));
    }
}

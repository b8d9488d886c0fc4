//! Configuration schema types for webbridge.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod content;
mod logging;
mod webview;

pub use content::*;
pub use logging::*;
pub use webview::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebBridgeConfig {
    pub content: ContentSection,
    pub webview: WebViewSection,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: WebBridgeConfig = toml::from_str("").unwrap();
        assert!(config.content.root.is_none());
        assert!(config.content.dev_html.is_none());
        assert_eq!(config.webview.zoom, 1.0);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: WebBridgeConfig = toml::from_str(
            r#"
[webview]
devtools = true
"#,
        )
        .unwrap();
        assert!(config.webview.devtools);
        assert_eq!(config.webview.user_agent, WebViewSection::default().user_agent);
    }
}

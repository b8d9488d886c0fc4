//! WebView construction settings.

use serde::{Deserialize, Serialize};

/// Settings applied when the webview is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebViewSection {
    /// Identification string sent with every request.
    pub user_agent: String,
    /// Initial zoom factor (valid range: 0.25-5.0).
    pub zoom: f64,
    pub devtools: bool,
    pub transparent: bool,
}

impl Default for WebViewSection {
    fn default() -> Self {
        Self {
            user_agent: format!("webbridge/{}", env!("CARGO_PKG_VERSION")),
            zoom: 1.0,
            devtools: cfg!(debug_assertions),
            transparent: false,
        }
    }
}

/// Settings applied when a render engine is built.
#[derive(Debug, Clone, PartialEq)]
pub struct WebViewConfig {
    /// Whether the WebView background should be transparent.
    pub transparent: bool,
    /// Whether to enable dev tools (always on in debug builds).
    pub devtools: bool,
    /// Custom user agent string. Fixed once the engine exists.
    pub user_agent: Option<String>,
    pub clipboard: bool,
    pub autoplay: bool,
    /// Initial zoom factor.
    pub zoom: f64,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            transparent: false,
            devtools: cfg!(debug_assertions),
            user_agent: Some(format!("webbridge/{}", env!("CARGO_PKG_VERSION"))),
            clipboard: true,
            autoplay: false,
            zoom: 1.0,
        }
    }
}

impl WebViewConfig {
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }
}

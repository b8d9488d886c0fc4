//! Merge command-line overrides with the config file.

use std::path::PathBuf;

use tracing::warn;
use webbridge_config::validation::{ZOOM_MAX, ZOOM_MIN};
use webbridge_config::WebBridgeConfig;
use webbridge_webview::WebViewConfig;

use crate::cli::Args;

/// Everything the app needs to start, after CLI flags override config values.
#[derive(Debug, Clone)]
pub struct LaunchSettings {
    pub content_root: Option<PathBuf>,
    pub dev_html: Option<PathBuf>,
    pub webview: WebViewConfig,
}

impl LaunchSettings {
    pub fn resolve(args: &Args, config: &WebBridgeConfig) -> Self {
        let requested_zoom = args.zoom.unwrap_or(config.webview.zoom);
        let zoom = if (ZOOM_MIN..=ZOOM_MAX).contains(&requested_zoom) {
            requested_zoom
        } else {
            warn!(
                zoom = requested_zoom,
                "zoom outside {ZOOM_MIN}-{ZOOM_MAX}, using 1.0"
            );
            1.0
        };

        let user_agent = Some(config.webview.user_agent.clone()).filter(|ua| !ua.is_empty());

        Self {
            content_root: args.content.clone().or_else(|| config.content.root.clone()),
            dev_html: args
                .dev_html
                .clone()
                .or_else(|| config.content.dev_html.clone()),
            webview: WebViewConfig {
                transparent: config.webview.transparent,
                devtools: config.webview.devtools,
                user_agent,
                zoom,
                ..WebViewConfig::default()
            },
        }
    }
}

/// Filter directive for the subscriber: the CLI flag wins, then the config
/// level scoped to this workspace's crates.
pub fn log_directive(args: &Args, config: Option<&WebBridgeConfig>) -> String {
    if let Some(level) = &args.log_level {
        return level.clone();
    }
    let level = config.map(|c| c.logging.level).unwrap_or_default();
    format!("webbridge={}", level.as_directive())
}

//! Application state driven by the winit event loop.

mod bounds;
mod event_handler;
mod init;
mod polling;

use std::sync::Arc;
use std::time::Instant;

use winit::window::Window;

use webbridge_webview::HostWidget;

use crate::demo::{DemoBridges, DEMO_HTML};
use crate::settings::LaunchSettings;

/// Top-level application state.
pub struct WebBridgeApp {
    settings: LaunchSettings,

    // Windowing
    window: Option<Arc<Window>>,

    // The hosted page and the bridges it talks to
    widget: HostWidget,
    bridges: DemoBridges,

    last_poll: Instant,
    last_title: String,
}

impl WebBridgeApp {
    pub fn new(settings: LaunchSettings) -> Self {
        let bridges = DemoBridges::new();

        let mut widget = HostWidget::new();
        if let Some(root) = &settings.content_root {
            widget.set_web_content(root.clone(), settings.dev_html.as_deref());
        }
        widget.set_dev_html_content(DEMO_HTML);
        widget.register_bridge("data", bridges.data.clone());
        widget.register_bridge("actions", bridges.actions.clone());

        Self {
            settings,
            window: None,
            widget,
            bridges,
            last_poll: Instant::now(),
            last_title: String::new(),
        }
    }
}

//! A titled container that owns at most one host widget.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::engine::ScriptCallback;
use crate::error::WebViewError;
use crate::widget::HostWidget;

pub struct WebViewPanel {
    title: String,
    widget: Option<HostWidget>,
}

impl WebViewPanel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            widget: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Create a fresh widget for `root`, dropping any previous one.
    pub fn setup_webview(
        &mut self,
        root: impl Into<PathBuf>,
        dev_html: Option<&Path>,
    ) -> &mut HostWidget {
        let mut widget = HostWidget::new();
        widget.set_web_content(root, dev_html);
        debug!(panel = %self.title, widget = %widget.id(), "panel widget created");
        self.widget.insert(widget)
    }

    pub fn widget(&self) -> Option<&HostWidget> {
        self.widget.as_ref()
    }

    pub fn widget_mut(&mut self) -> Option<&mut HostWidget> {
        self.widget.as_mut()
    }

    pub fn load(&mut self) -> Result<(), WebViewError> {
        let widget = self.widget.as_mut().ok_or(WebViewError::NotSetUp)?;
        widget.load();
        Ok(())
    }

    /// Drop every bridge the widget exposes. The widget itself stays.
    pub fn cleanup(&mut self) {
        if let Some(widget) = self.widget.as_mut() {
            widget.clear_bridge_objects();
        }
    }

    pub fn reload(&mut self) {
        if let Some(widget) = self.widget.as_mut() {
            widget.reload_content();
        }
    }

    pub fn set_zoom_factor(&mut self, factor: f64) {
        if let Some(widget) = self.widget.as_mut() {
            widget.set_zoom_factor(factor);
        }
    }

    pub fn execute_javascript(&self, script: &str, callback: Option<ScriptCallback>) {
        if let Some(widget) = &self.widget {
            widget.execute_javascript(script, callback);
        }
    }
}

/// Empty panel titled "Asset Browser".
pub fn asset_browser_panel() -> WebViewPanel {
    WebViewPanel::new("Asset Browser")
}

/// Empty panel titled "AI Assistant".
pub fn assistant_panel() -> WebViewPanel {
    WebViewPanel::new("AI Assistant")
}

/// Empty panel titled "Dashboard".
pub fn dashboard_panel() -> WebViewPanel {
    WebViewPanel::new("Dashboard")
}

/// Panel with a widget for `root` that has already started loading.
///
/// Without an engine the load stays pending until one is attached.
pub fn generic_panel(title: impl Into<String>, root: impl Into<PathBuf>) -> WebViewPanel {
    let mut panel = WebViewPanel::new(title);
    panel.setup_webview(root, None).load();
    panel
}

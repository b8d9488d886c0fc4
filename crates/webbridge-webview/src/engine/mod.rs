//! The rendering surface behind a host widget.
//!
//! [`RenderEngine`] is the seam between the widget's lifecycle logic and the
//! actual webview. [`WryEngine`] drives a `wry::WebView`; tests substitute a
//! recording engine.

mod config;
mod wry_engine;

pub use config::WebViewConfig;
pub use wry_engine::WryEngine;

use serde_json::Value;

use crate::error::WebViewError;
use crate::events::WebViewEvent;

/// Receives the JSON result of a script evaluation. Fires at most once.
pub type ScriptCallback = Box<dyn FnOnce(Value) + Send>;

pub trait RenderEngine {
    /// Start navigating to `url`. Completion arrives later as a page load event.
    fn load_url(&mut self, url: &str) -> Result<(), WebViewError>;

    fn reload(&mut self) -> Result<(), WebViewError>;

    fn set_zoom(&mut self, factor: f64) -> Result<(), WebViewError>;

    fn evaluate_script(&self, script: &str) -> Result<(), WebViewError>;

    /// Evaluate `script` and hand its result to `callback` once the page responds.
    fn evaluate_script_with_callback(
        &self,
        script: &str,
        callback: ScriptCallback,
    ) -> Result<(), WebViewError>;

    /// URL currently displayed, empty if unknown.
    fn url(&self) -> String;

    fn set_user_agent(&mut self, user_agent: &str) -> Result<(), WebViewError>;

    fn set_bounds(&mut self, bounds: wry::Rect) -> Result<(), WebViewError>;

    /// Take every event reported since the last drain, oldest first.
    fn drain_events(&mut self) -> Vec<WebViewEvent>;
}

/// Parse a script result as JSON, keeping it as a plain string otherwise.
pub(crate) fn script_result(raw: String) -> Value {
    serde_json::from_str(&raw).unwrap_or(Value::String(raw))
}

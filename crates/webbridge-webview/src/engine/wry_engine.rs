use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use wry::raw_window_handle;
use wry::{WebView, WebViewBuilder};

use crate::error::WebViewError;
use crate::events::{PageLoadState, WebViewEvent};
use crate::ipc::IPC_INIT_SCRIPT;

use super::{script_result, RenderEngine, ScriptCallback, WebViewConfig};

/// A `wry::WebView` embedded as a child of a host window.
pub struct WryEngine {
    webview: WebView,
    /// Event sink filled by the wry handlers, drained by the widget.
    events: Arc<Mutex<Vec<WebViewEvent>>>,
    /// Last URL requested (best-effort tracking).
    current_url: String,
}

impl WryEngine {
    /// Create the WebView as a child of `window`, positioned at `bounds`.
    ///
    /// No content is loaded; the widget navigates once content resolves.
    pub fn build<W: raw_window_handle::HasWindowHandle>(
        window: &W,
        bounds: wry::Rect,
        config: &WebViewConfig,
    ) -> Result<Self, WebViewError> {
        let events = Arc::new(Mutex::new(Vec::new()));

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_transparent(config.transparent)
            .with_devtools(config.devtools)
            .with_clipboard(config.clipboard)
            .with_autoplay(config.autoplay)
            .with_initialization_script(IPC_INIT_SCRIPT);

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = attach_ipc_handler(builder, Arc::clone(&events));
        builder = attach_page_load_handler(builder, Arc::clone(&events));
        builder = attach_title_handler(builder, Arc::clone(&events));
        builder = attach_navigation_handler(builder, Arc::clone(&events));

        let webview = builder.build_as_child(window)?;
        if (config.zoom - 1.0).abs() > f64::EPSILON {
            webview.zoom(config.zoom)?;
        }

        debug!(zoom = config.zoom, "WebView created");

        Ok(Self {
            webview,
            events,
            current_url: String::new(),
        })
    }

    /// Get a reference to the underlying wry WebView.
    pub fn inner(&self) -> &WebView {
        &self.webview
    }
}

impl RenderEngine for WryEngine {
    fn load_url(&mut self, url: &str) -> Result<(), WebViewError> {
        self.current_url = url.to_string();
        self.webview.load_url(url)?;
        Ok(())
    }

    fn reload(&mut self) -> Result<(), WebViewError> {
        self.webview.reload()?;
        Ok(())
    }

    fn set_zoom(&mut self, factor: f64) -> Result<(), WebViewError> {
        self.webview.zoom(factor)?;
        Ok(())
    }

    fn evaluate_script(&self, script: &str) -> Result<(), WebViewError> {
        self.webview.evaluate_script(script)?;
        Ok(())
    }

    fn evaluate_script_with_callback(
        &self,
        script: &str,
        callback: ScriptCallback,
    ) -> Result<(), WebViewError> {
        // wry wants `Fn`; the slot makes sure the caller's callback runs once.
        let slot = Mutex::new(Some(callback));
        self.webview
            .evaluate_script_with_callback(script, move |raw| {
                let callback = slot.lock().ok().and_then(|mut s| s.take());
                if let Some(callback) = callback {
                    callback(script_result(raw));
                }
            })?;
        Ok(())
    }

    fn url(&self) -> String {
        self.webview
            .url()
            .unwrap_or_else(|_| self.current_url.clone())
    }

    fn set_user_agent(&mut self, _user_agent: &str) -> Result<(), WebViewError> {
        Err(WebViewError::Unsupported(
            "user agent can only be set before the WebView is built".into(),
        ))
    }

    fn set_bounds(&mut self, bounds: wry::Rect) -> Result<(), WebViewError> {
        self.webview.set_bounds(bounds)?;
        Ok(())
    }

    fn drain_events(&mut self) -> Vec<WebViewEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => {
                warn!("WebView event queue poisoned");
                Vec::new()
            }
        }
    }
}

fn attach_ipc_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: Arc<Mutex<Vec<WebViewEvent>>>,
) -> WebViewBuilder<'a> {
    builder.with_ipc_handler(move |request| {
        let body = request.body().to_string();

        if serde_json::from_str::<serde_json::Value>(&body).is_err() {
            warn!(body_len = body.len(), "IPC message rejected: invalid JSON");
            return;
        }

        debug!(body_len = body.len(), "IPC message from page");
        if let Ok(mut evts) = events.lock() {
            evts.push(WebViewEvent::IpcMessage { body });
        }
    })
}

fn attach_page_load_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: Arc<Mutex<Vec<WebViewEvent>>>,
) -> WebViewBuilder<'a> {
    builder.with_on_page_load_handler(move |event, url| {
        let state = PageLoadState::from(event);
        debug!(?state, url = %url, "page load");
        if let Ok(mut evts) = events.lock() {
            evts.push(WebViewEvent::PageLoad { state, url });
        }
    })
}

fn attach_title_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: Arc<Mutex<Vec<WebViewEvent>>>,
) -> WebViewBuilder<'a> {
    builder.with_document_title_changed_handler(move |title| {
        debug!(title = %title, "title changed");
        if let Ok(mut evts) = events.lock() {
            evts.push(WebViewEvent::TitleChanged { title });
        }
    })
}

fn attach_navigation_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: Arc<Mutex<Vec<WebViewEvent>>>,
) -> WebViewBuilder<'a> {
    builder.with_navigation_handler(move |url| {
        debug!(url = %url, "navigation");
        if let Ok(mut evts) = events.lock() {
            evts.push(WebViewEvent::NavigationRequested { url });
        }
        true
    })
}

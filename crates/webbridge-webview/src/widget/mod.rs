//! The host widget: content, bridges and a render engine behind one load
//! lifecycle.
//!
//! ```text
//! Unloaded ──load()──> Loading ──page finished──> Loaded
//!     │                   │
//!     └─ no content ──────┴── engine error ─────> Failed
//! ```
//!
//! `load()` always re-enters; a terminal state only describes the most
//! recent attempt.

mod dispatch;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use webbridge_common::WidgetId;

use crate::bridge::SharedBridge;
use crate::content::ContentConfig;
use crate::engine::{RenderEngine, ScriptCallback};
use crate::events::{PageLoadState, WebViewEvent, WidgetEvent};
use crate::ipc::{js_announce_bridges, JS_CLEAR_BRIDGES};
use crate::registry::BridgeRegistry;

/// Reason reported when the engine cannot load resolved content.
pub const ENGINE_FAILURE_REASON: &str = "WebView failed to load content";

/// Runs after every successful load. An `Err` is logged and does not stop
/// the callbacks after it.
pub type LoadCallback = Box<dyn FnMut() -> Result<(), String>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loading,
    Loaded,
    Failed,
}

pub struct HostWidget {
    id: WidgetId,
    content: ContentConfig,
    bridges: BridgeRegistry,
    load_callbacks: Vec<LoadCallback>,
    state: LoadState,
    engine: Option<Box<dyn RenderEngine>>,
    /// URL resolved before an engine was attached.
    pending_url: Option<String>,
    /// URL of the most recent load attempt.
    requested_url: Option<String>,
    events: Vec<WidgetEvent>,
    /// Where inline HTML is written before loading.
    temp_dir: PathBuf,
    title: String,
}

impl Default for HostWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl HostWidget {
    pub fn new() -> Self {
        let id = WidgetId::new();
        let temp_dir = std::env::temp_dir().join("webbridge").join(id.as_str());
        Self {
            id,
            content: ContentConfig::new(),
            bridges: BridgeRegistry::new(),
            load_callbacks: Vec::new(),
            state: LoadState::Unloaded,
            engine: None,
            pending_url: None,
            requested_url: None,
            events: Vec::new(),
            temp_dir,
            title: String::new(),
        }
    }

    pub fn id(&self) -> &WidgetId {
        &self.id
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Last document title reported by the page.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &ContentConfig {
        &self.content
    }

    pub fn bridges(&self) -> &BridgeRegistry {
        &self.bridges
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Override the directory inline HTML is materialized into.
    pub fn set_temp_dir(&mut self, dir: impl Into<PathBuf>) {
        self.temp_dir = dir.into();
    }

    /// Hand the widget its rendering surface. A load requested earlier is
    /// started now.
    pub fn attach_engine(&mut self, engine: Box<dyn RenderEngine>) {
        debug!(widget = %self.id, "render engine attached");
        self.engine = Some(engine);
        if let Some(url) = self.pending_url.take() {
            self.start_engine_load(&url);
        }
    }

    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    // -- content --

    pub fn set_web_content(&mut self, root: impl Into<PathBuf>, dev_html: Option<&Path>) {
        self.content.set_web_content(root, dev_html);
    }

    pub fn set_dev_html_content(&mut self, html: impl Into<String>) {
        self.content.set_dev_html_content(html);
    }

    // -- bridges --

    /// Expose `bridge` to the page under `name`, replacing any previous
    /// registration. A loaded page is told about it right away.
    pub fn register_bridge(&mut self, name: impl Into<String>, bridge: SharedBridge) {
        self.bridges.register(name, bridge);
        if self.state == LoadState::Loaded {
            self.announce_bridges();
        }
    }

    pub fn get_bridge(&self, name: &str) -> Option<SharedBridge> {
        self.bridges.get(name)
    }

    /// Forget every bridge and drop the page-side proxies.
    pub fn clear_bridge_objects(&mut self) {
        self.bridges.clear_all();
        self.run_script(JS_CLEAR_BRIDGES);
    }

    pub fn add_load_callback<F>(&mut self, callback: F)
    where
        F: FnMut() -> Result<(), String> + 'static,
    {
        self.load_callbacks.push(Box::new(callback));
    }

    // -- lifecycle --

    /// Resolve content and hand it to the engine.
    ///
    /// Resolution failure ends the attempt in `Failed` without touching the
    /// engine. Otherwise the widget is `Loading` until the engine reports
    /// the page finished.
    pub fn load(&mut self) {
        let url = match self
            .content
            .resolve()
            .and_then(|source| source.to_url(&self.temp_dir))
        {
            Ok(url) => url,
            Err(e) => {
                warn!(widget = %self.id, error = %e, "content resolution failed");
                self.state = LoadState::Failed;
                self.events.push(WidgetEvent::ContentFailed(e.to_string()));
                return;
            }
        };

        info!(widget = %self.id, url = %url, "loading content");
        self.state = LoadState::Loading;
        self.requested_url = Some(url.clone());

        if self.engine.is_some() {
            self.start_engine_load(&url);
        } else {
            debug!(widget = %self.id, "no engine yet, load deferred");
            self.pending_url = Some(url);
        }
    }

    fn start_engine_load(&mut self, url: &str) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if let Err(e) = engine.load_url(url) {
            warn!(widget = %self.id, error = %e, "engine rejected content");
            self.on_load_finished(false);
        }
    }

    /// Completion of a load attempt as reported by the engine.
    pub fn on_load_finished(&mut self, success: bool) {
        if !success {
            self.state = LoadState::Failed;
            self.events
                .push(WidgetEvent::ContentFailed(ENGINE_FAILURE_REASON.to_string()));
            return;
        }

        self.state = LoadState::Loaded;
        info!(
            widget = %self.id,
            url = self.requested_url.as_deref().unwrap_or_default(),
            bridges = self.bridges.len(),
            "content loaded"
        );
        self.events.push(WidgetEvent::ContentLoaded);
        self.events.push(WidgetEvent::BridgeReady);
        self.announce_bridges();

        for (index, callback) in self.load_callbacks.iter_mut().enumerate() {
            if let Err(e) = callback() {
                warn!(widget = %self.id, index, error = %e, "load callback failed");
            }
        }
    }

    /// Process everything the engine and the bridges produced since the
    /// last call and return the events meant for the host application.
    ///
    /// Call once per event loop turn.
    pub fn pump(&mut self) -> Vec<WidgetEvent> {
        let engine_events = self
            .engine
            .as_mut()
            .map(|e| e.drain_events())
            .unwrap_or_default();

        for event in engine_events {
            self.handle_engine_event(event);
        }

        self.forward_bridge_events();
        std::mem::take(&mut self.events)
    }

    fn handle_engine_event(&mut self, event: WebViewEvent) {
        match event {
            WebViewEvent::PageLoad { state, url } => self.handle_page_load(state, &url),
            WebViewEvent::IpcMessage { body } => self.handle_ipc(&body),
            WebViewEvent::TitleChanged { title } => self.title = title,
            WebViewEvent::NavigationRequested { url } => {
                debug!(widget = %self.id, url = %url, "page navigating");
            }
        }
    }

    fn handle_page_load(&mut self, state: PageLoadState, url: &str) {
        if self.state == LoadState::Unloaded || url == "about:blank" {
            debug!(widget = %self.id, ?state, url, "ignoring page load outside a load cycle");
            return;
        }
        if state == PageLoadState::Finished {
            self.on_load_finished(true);
        }
    }

    fn announce_bridges(&self) {
        let descriptors = self.bridges.descriptors();
        if !descriptors.is_empty() {
            self.run_script(&js_announce_bridges(&descriptors));
        }
    }

    fn run_script(&self, script: &str) {
        if let Some(engine) = &self.engine {
            if let Err(e) = engine.evaluate_script(script) {
                warn!(widget = %self.id, error = %e, "script evaluation failed");
            }
        }
    }

    // -- pass-throughs --

    pub fn reload_content(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            if let Err(e) = engine.reload() {
                warn!(error = %e, "reload failed");
            }
        }
    }

    pub fn set_zoom_factor(&mut self, factor: f64) {
        if let Some(engine) = self.engine.as_mut() {
            if let Err(e) = engine.set_zoom(factor) {
                warn!(factor, error = %e, "zoom failed");
            }
        }
    }

    /// Run `script` in the page. With a callback the result is delivered
    /// once the engine responds; there is no timeout.
    pub fn execute_javascript(&self, script: &str, callback: Option<ScriptCallback>) {
        let Some(engine) = &self.engine else {
            return;
        };
        let result = match callback {
            Some(callback) => engine.evaluate_script_with_callback(script, callback),
            None => engine.evaluate_script(script),
        };
        if let Err(e) = result {
            warn!(error = %e, "script evaluation failed");
        }
    }

    pub fn get_url(&self) -> String {
        self.engine.as_ref().map(|e| e.url()).unwrap_or_default()
    }

    pub fn set_user_agent(&mut self, user_agent: &str) {
        if let Some(engine) = self.engine.as_mut() {
            if let Err(e) = engine.set_user_agent(user_agent) {
                warn!(user_agent, error = %e, "user agent not changed");
            }
        }
    }

    pub fn set_bounds(&mut self, bounds: wry::Rect) {
        if let Some(engine) = self.engine.as_mut() {
            if let Err(e) = engine.set_bounds(bounds) {
                warn!(error = %e, "resize failed");
            }
        }
    }
}

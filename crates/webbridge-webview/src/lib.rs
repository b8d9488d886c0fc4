//! Host a web page inside a desktop window and talk to it through named bridges.
//!
//! Wraps the `wry` crate to provide:
//! - A host widget with a load lifecycle (`Unloaded -> Loading -> Loaded | Failed`)
//! - Content resolution (production build, dev HTML file, inline HTML)
//! - Named bridge objects reachable from page script over IPC
//! - Ready-made data and action bridges with JSON marshalling
//! - Pass-through controls (reload, zoom, script execution, URL, user agent)

pub mod bridge;
pub mod content;
pub mod engine;
pub mod error;
pub mod events;
pub mod ipc;
pub mod panel;
pub mod presets;
pub mod registry;
pub mod widget;

pub use bridge::{
    shared, ActionBridge, ActionHandler, BasicBridge, Bridge, BridgeCore, BridgeEvent, DataBridge,
    Dispatch, ErrorCallback, Item, SharedBridge,
};
pub use content::{validate_content_root, ContentConfig, ContentReport, ContentSource, ENTRY_FILE};
pub use engine::{RenderEngine, ScriptCallback, WebViewConfig, WryEngine};
pub use error::{ContentError, WebViewError};
pub use events::{PageLoadState, WebViewEvent, WidgetEvent};
pub use ipc::BridgeCall;
pub use panel::{
    asset_browser_panel, assistant_panel, dashboard_panel, generic_panel, WebViewPanel,
};
pub use registry::BridgeRegistry;
pub use widget::{HostWidget, LoadCallback, LoadState, ENGINE_FAILURE_REASON};

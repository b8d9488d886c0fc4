//! Engine and widget event types.

use serde::{Deserialize, Serialize};

use crate::bridge::BridgeEvent;

/// State of a page load lifecycle, as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded (DOMContentLoaded + resources).
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Raw events pushed by the render engine for the control thread to consume.
#[derive(Debug, Clone, PartialEq)]
pub enum WebViewEvent {
    /// Page load state changed. Carries the URL.
    PageLoad { state: PageLoadState, url: String },
    /// Document title changed.
    TitleChanged { title: String },
    /// An IPC message was received from JavaScript.
    IpcMessage { body: String },
    /// The page navigated somewhere.
    NavigationRequested { url: String },
}

/// Events the host widget reports to the embedding application.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    ContentLoaded,
    /// Content could not be loaded. Carries the reason.
    ContentFailed(String),
    BridgeReady,
    /// An outbound event from a registered bridge.
    Bridge { name: String, event: BridgeEvent },
}

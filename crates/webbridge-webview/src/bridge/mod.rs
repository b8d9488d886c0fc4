//! Host-side bridge objects reachable by name from page script.
//!
//! Every bridge shares one envelope:
//! - page -> host calls arrive through [`Bridge::invoke`] with JSON arguments
//! - host -> page data leaves as [`BridgeEvent`]s queued on the bridge
//! - serialization and lookup failures become `error_occurred` events,
//!   never `Err` values or panics
//!
//! [`DataBridge`] and [`ActionBridge`] are the two ready-made
//! specializations; [`BasicBridge`] carries only the base contract.

mod action;
mod basic;
mod data;

pub use action::{ActionBridge, ActionHandler};
pub use basic::BasicBridge;
pub use data::{DataBridge, Item, DEFAULT_SEARCH_FIELDS};

use std::fmt;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

/// Version tag reported by [`Bridge::describe`].
pub const BRIDGE_VERSION: &str = "1.0.0";

/// A bridge shared between the application and the widget that hosts it.
pub type SharedBridge = Arc<Mutex<dyn Bridge>>;

/// Called with the message of every error the bridge raises.
pub type ErrorCallback = Box<dyn FnMut(&str) + Send>;

/// Wrap a bridge for registration while keeping a typed handle.
pub fn shared<B: Bridge + 'static>(bridge: B) -> Arc<Mutex<B>> {
    Arc::new(Mutex::new(bridge))
}

/// Outbound event from a bridge to the page (and host observers).
///
/// Payload strings are JSON-encoded; ids and statuses are plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BridgeEvent {
    DataUpdated { data: String },
    StatusChanged { id: String, status: String },
    ErrorOccurred { message: String },
    ItemsLoaded { items: String },
    ItemUpdated { id: String, data: String },
    SearchResults { results: String },
    ActionRequested { action_type: String, params: String },
    ActionCompleted { action_id: String, result: String },
}

impl BridgeEvent {
    /// Event name as seen by page script.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DataUpdated { .. } => "data_updated",
            Self::StatusChanged { .. } => "status_changed",
            Self::ErrorOccurred { .. } => "error_occurred",
            Self::ItemsLoaded { .. } => "items_loaded",
            Self::ItemUpdated { .. } => "item_updated",
            Self::SearchResults { .. } => "search_results",
            Self::ActionRequested { .. } => "action_requested",
            Self::ActionCompleted { .. } => "action_completed",
        }
    }

    /// Positional arguments handed to page listeners.
    pub fn args(&self) -> Vec<&str> {
        match self {
            Self::DataUpdated { data } => vec![data.as_str()],
            Self::StatusChanged { id, status } => vec![id.as_str(), status.as_str()],
            Self::ErrorOccurred { message } => vec![message.as_str()],
            Self::ItemsLoaded { items } => vec![items.as_str()],
            Self::ItemUpdated { id, data } => vec![id.as_str(), data.as_str()],
            Self::SearchResults { results } => vec![results.as_str()],
            Self::ActionRequested {
                action_type,
                params,
            } => vec![action_type.as_str(), params.as_str()],
            Self::ActionCompleted { action_id, result } => {
                vec![action_id.as_str(), result.as_str()]
            }
        }
    }
}

/// Outcome of a bridge-specific method lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The method ran and produced a JSON-encoded return value.
    Returned(String),
    /// The method ran and has no return value.
    Done,
    /// This bridge has no such method.
    Unknown,
}

/// State every bridge carries: the outbound event queue and the error callback.
#[derive(Default)]
pub struct BridgeCore {
    events: Vec<BridgeEvent>,
    error_callback: Option<ErrorCallback>,
}

impl fmt::Debug for BridgeCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeCore")
            .field("events", &self.events)
            .field("error_callback", &self.error_callback.is_some())
            .finish()
    }
}

impl BridgeCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the error callback. Only one is kept.
    pub fn set_error_callback(&mut self, callback: impl FnMut(&str) + Send + 'static) {
        self.error_callback = Some(Box::new(callback));
    }

    pub fn emit(&mut self, event: BridgeEvent) {
        self.events.push(event);
    }

    /// Queue an `error_occurred` event and notify the error callback.
    pub fn emit_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(error = %message, "bridge error");
        if let Some(callback) = self.error_callback.as_mut() {
            callback(&message);
        }
        self.events.push(BridgeEvent::ErrorOccurred { message });
    }

    /// Serialize to JSON, falling back to `"{}"` with an error event.
    pub fn encode<T: Serialize + ?Sized>(&mut self, value: &T) -> String {
        match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                self.emit_error(format!("JSON serialization error: {e}"));
                "{}".to_string()
            }
        }
    }

    /// Parse a JSON object, falling back to an empty object with an error event.
    pub fn decode(&mut self, json: &str) -> Map<String, Value> {
        match serde_json::from_str::<Value>(json) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                self.emit_error(format!(
                    "JSON parsing error: expected an object, got {}",
                    json_kind(&other)
                ));
                Map::new()
            }
            Err(e) => {
                self.emit_error(format!("JSON parsing error: {e}"));
                Map::new()
            }
        }
    }

    /// Events queued since the last drain, oldest first.
    pub fn pending(&self) -> &[BridgeEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<BridgeEvent> {
        std::mem::take(&mut self.events)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Read argument `index` as a string. Non-string JSON values are rendered
/// as JSON text; missing arguments read as empty.
pub(crate) fn arg_str(args: &[Value], index: usize) -> String {
    match args.get(index) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// The contract shared by all bridges.
///
/// Implementors supply their identity and [`Bridge::call`]; the base
/// methods (`get_bridge_info`, `log_message`, `handle_error`) come for free.
pub trait Bridge: Send {
    /// Type name reported to the page.
    fn bridge_type(&self) -> &'static str;

    /// Fixed capability list for this bridge type.
    fn capabilities(&self) -> &'static [&'static str] {
        &["basic_communication"]
    }

    fn core(&self) -> &BridgeCore;

    fn core_mut(&mut self) -> &mut BridgeCore;

    /// Run a bridge-specific page method.
    fn call(&mut self, method: &str, args: &[Value]) -> Dispatch;

    /// Descriptor `{bridge_type, version, capabilities}` as JSON.
    fn describe(&self) -> String {
        serde_json::json!({
            "bridge_type": self.bridge_type(),
            "version": BRIDGE_VERSION,
            "capabilities": self.capabilities(),
        })
        .to_string()
    }

    /// Forward a page log line to host logging.
    fn log(&self, message: &str) {
        info!(target: "webbridge::page", bridge = self.bridge_type(), "{message}");
    }

    /// Raise a page-reported error on the host side.
    fn report_error(&mut self, message: &str) {
        self.core_mut()
            .emit_error(format!("JavaScript error: {message}"));
    }

    fn set_error_callback(&mut self, callback: ErrorCallback) {
        self.core_mut().error_callback = Some(callback);
    }

    /// Queue a `status_changed` event.
    fn emit_status(&mut self, id: &str, status: &str) {
        self.core_mut().emit(BridgeEvent::StatusChanged {
            id: id.to_string(),
            status: status.to_string(),
        });
    }

    fn drain_events(&mut self) -> Vec<BridgeEvent> {
        self.core_mut().drain()
    }

    /// Page-facing entry point. Returns the JSON-encoded result, if the
    /// method has one. Unknown methods raise an error event.
    fn invoke(&mut self, method: &str, args: &[Value]) -> Option<String> {
        match self.call(method, args) {
            Dispatch::Returned(json) => return Some(json),
            Dispatch::Done => return None,
            Dispatch::Unknown => {}
        }

        match method {
            "get_bridge_info" => Some(self.describe()),
            "log_message" => {
                self.log(&arg_str(args, 0));
                None
            }
            "handle_error" => {
                self.report_error(&arg_str(args, 0));
                None
            }
            _ => {
                self.core_mut()
                    .emit_error(format!("Unknown method: {method}"));
                None
            }
        }
    }
}

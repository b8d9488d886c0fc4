//! IPC protocol between host bridges and page script.
//!
//! Messages flow in both directions:
//! - **JS -> Rust**: `window.webbridge.call(bridge, method, ...args)` posts
//!   `{"bridge", "method", "args", "call_id"}` through `window.ipc.postMessage`,
//!   which triggers the `ipc_handler` registered on the WebView.
//! - **Rust -> JS**: the host evaluates `window.webbridge._resolve(...)` to
//!   settle a call and `window.webbridge._dispatch(...)` to deliver events.
//!
//! All return values and event arguments are strings, most of them
//! JSON-encoded; the page decides when to `JSON.parse`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bridge::BridgeEvent;

/// A method call from the page to a named bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeCall {
    /// Registration name of the target bridge.
    pub bridge: String,
    pub method: String,
    #[serde(default)]
    pub args: Vec<Value>,
    /// Present when the page awaits a result.
    #[serde(default)]
    pub call_id: Option<u64>,
}

impl BridgeCall {
    /// Parse a call from a raw JSON string (from JS postMessage).
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// JavaScript that sets up the bridge client on the page side.
/// Injected as an initialization script into every WebView.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    if (window.webbridge) { return; }
    var pending = {};
    var listeners = {};
    var nextId = 1;

    function proxy(name, info) {
        return {
            info: info,
            call: function(method) {
                var args = Array.prototype.slice.call(arguments, 1);
                return window.webbridge.call.apply(null, [name, method].concat(args));
            },
            on: function(event, callback) {
                window.webbridge.on(name, event, callback);
            }
        };
    }

    window.webbridge = {
        bridges: {},
        call: function(bridge, method) {
            var args = Array.prototype.slice.call(arguments, 2);
            var callId = nextId++;
            return new Promise(function(resolve) {
                pending[callId] = resolve;
                window.ipc.postMessage(JSON.stringify({
                    bridge: bridge,
                    method: method,
                    args: args,
                    call_id: callId
                }));
            });
        },
        on: function(bridge, event, callback) {
            var key = bridge + ':' + event;
            (listeners[key] = listeners[key] || []).push(callback);
        },
        _resolve: function(callId, result) {
            var resolve = pending[callId];
            if (resolve) {
                delete pending[callId];
                resolve(result);
            }
        },
        _dispatch: function(bridge, event, args) {
            var list = listeners[bridge + ':' + event] || [];
            for (var i = 0; i < list.length; i++) {
                try { list[i].apply(null, args); } catch (e) { console.error(e); }
            }
        },
        _announce: function(entries) {
            for (var i = 0; i < entries.length; i++) {
                var name = entries[i][0];
                var info;
                try { info = JSON.parse(entries[i][1]); } catch (e) { info = {}; }
                this.bridges[name] = proxy(name, info);
            }
            window.dispatchEvent(new CustomEvent('webbridge-ready'));
        },
        _clear: function() {
            this.bridges = {};
            listeners = {};
            for (var id in pending) { pending[id](null); }
            pending = {};
        }
    };
})();
"#;

/// Script that drops every page-side bridge proxy and listener.
pub const JS_CLEAR_BRIDGES: &str = "window.webbridge && window.webbridge._clear();";

fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Generate a JS snippet that settles a pending page call.
pub fn js_resolve_call(call_id: u64, result: Option<&str>) -> String {
    let result = result.map(js_string).unwrap_or_else(|| "null".to_string());
    format!("window.webbridge._resolve({call_id}, {result});")
}

/// Generate a JS snippet that delivers a bridge event to page listeners.
pub fn js_dispatch_event(bridge: &str, event: &BridgeEvent) -> String {
    let args = serde_json::to_string(&event.args()).unwrap_or_else(|_| "[]".to_string());
    format!(
        "window.webbridge._dispatch({}, {}, {});",
        js_string(bridge),
        js_string(event.name()),
        args,
    )
}

/// Generate a JS snippet that creates page-side proxies for `(name, descriptor)` pairs.
pub fn js_announce_bridges(descriptors: &[(String, String)]) -> String {
    let entries = serde_json::to_string(descriptors).unwrap_or_else(|_| "[]".to_string());
    format!("window.webbridge._announce({entries});")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_full_call() {
        let call = BridgeCall::from_json(
            r#"{"bridge":"data","method":"get_item","args":["3"],"call_id":7}"#,
        )
        .unwrap();
        assert_eq!(call.bridge, "data");
        assert_eq!(call.method, "get_item");
        assert_eq!(call.args, vec![json!("3")]);
        assert_eq!(call.call_id, Some(7));
    }

    #[test]
    fn parse_call_without_args_or_id() {
        let call = BridgeCall::from_json(r#"{"bridge":"actions","method":"get_available_actions"}"#)
            .unwrap();
        assert!(call.args.is_empty());
        assert!(call.call_id.is_none());
    }

    #[test]
    fn reject_malformed_calls() {
        assert!(BridgeCall::from_json("not json").is_none());
        assert!(BridgeCall::from_json(r#"{"method":"x"}"#).is_none());
        assert!(BridgeCall::from_json(r#"{"bridge":1,"method":"x"}"#).is_none());
    }

    #[test]
    fn resolve_quotes_result_as_js_string() {
        assert_eq!(
            js_resolve_call(3, Some(r#"{"a":"b"}"#)),
            r#"window.webbridge._resolve(3, "{\"a\":\"b\"}");"#
        );
        assert_eq!(js_resolve_call(4, None), "window.webbridge._resolve(4, null);");
    }

    #[test]
    fn dispatch_event_script() {
        let event = BridgeEvent::ItemUpdated {
            id: "1".into(),
            data: r#"{"x":1}"#.into(),
        };
        assert_eq!(
            js_dispatch_event("data", &event),
            r#"window.webbridge._dispatch("data", "item_updated", ["1","{\"x\":1}"]);"#
        );
    }

    #[test]
    fn dispatch_escapes_hostile_names() {
        let event = BridgeEvent::ErrorOccurred {
            message: "</script><script>alert(1)".into(),
        };
        let script = js_dispatch_event("a\"); evil(\"", &event);
        assert!(script.starts_with(r#"window.webbridge._dispatch("a\"); evil(\"""#));
    }

    #[test]
    fn announce_script_lists_entries() {
        let script = js_announce_bridges(&[("data".into(), "{}".into())]);
        assert_eq!(script, r#"window.webbridge._announce([["data","{}"]]);"#);
    }

    #[test]
    fn init_script_defines_client() {
        assert!(IPC_INIT_SCRIPT.contains("window.webbridge ="));
        assert!(IPC_INIT_SCRIPT.contains("window.ipc.postMessage"));
        assert!(IPC_INIT_SCRIPT.contains("_resolve"));
        assert!(IPC_INIT_SCRIPT.contains("_dispatch"));
        assert!(IPC_INIT_SCRIPT.contains("_clear"));
    }
}

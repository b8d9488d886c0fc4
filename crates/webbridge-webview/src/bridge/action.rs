//! Action dispatch bridge: page script requests named actions, host-side
//! handlers run them.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

use super::{arg_str, Bridge, BridgeCore, BridgeEvent, Dispatch};

/// Handler for one action type. Receives the decoded params; `Err` carries
/// the failure message raised back to the page as an error event.
pub type ActionHandler = Box<dyn FnMut(&Map<String, Value>) -> Result<Value, String> + Send>;

#[derive(Default)]
pub struct ActionBridge {
    core: BridgeCore,
    handlers: IndexMap<String, ActionHandler>,
}

impl std::fmt::Debug for ActionBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionBridge")
            .field("core", &self.core)
            .field("actions", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ActionBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the handler for `action_type`, replacing any previous one.
    pub fn register_action_handler<F>(&mut self, action_type: impl Into<String>, handler: F)
    where
        F: FnMut(&Map<String, Value>) -> Result<Value, String> + Send + 'static,
    {
        let action_type = action_type.into();
        debug!(action_type = %action_type, "action handler registered");
        self.handlers.insert(action_type, Box::new(handler));
    }

    pub fn has_action(&self, action_type: &str) -> bool {
        self.handlers.contains_key(action_type)
    }

    /// Run the handler for `action_type` with the decoded `params_json`.
    ///
    /// Emits `action_requested` before the handler runs and
    /// `action_completed` after it returns. The completion is keyed by
    /// `params.action_id` (a string, or a number as its JSON text) when
    /// present, otherwise by the action type. A
    /// `null` result is reported as `{}`.
    pub fn execute_action(&mut self, action_type: &str, params_json: &str) {
        let params = self.core.decode(params_json);

        let Some(handler) = self.handlers.get_mut(action_type) else {
            self.core
                .emit_error(format!("No handler registered for action: {action_type}"));
            return;
        };

        self.core.emit(BridgeEvent::ActionRequested {
            action_type: action_type.to_string(),
            params: params_json.to_string(),
        });

        match handler(&params) {
            Ok(result) => {
                let action_id = match params.get("action_id") {
                    Some(Value::String(id)) => id.clone(),
                    Some(Value::Number(id)) => id.to_string(),
                    _ => action_type.to_string(),
                };
                let result = match result {
                    Value::Null => Value::Object(Map::new()),
                    other => other,
                };
                let result = self.core.encode(&result);
                debug!(action_type, action_id = %action_id, "action completed");
                self.core
                    .emit(BridgeEvent::ActionCompleted { action_id, result });
            }
            Err(message) => {
                self.core
                    .emit_error(format!("Action execution error: {message}"));
            }
        }
    }

    /// Registered action types, in registration order, as a JSON array.
    pub fn get_available_actions(&mut self) -> String {
        let actions: Vec<&String> = self.handlers.keys().collect();
        match serde_json::to_string(&actions) {
            Ok(json) => json,
            Err(e) => {
                self.core
                    .emit_error(format!("JSON serialization error: {e}"));
                "{}".to_string()
            }
        }
    }

    /// Emit `action_completed` for work that finished outside a handler.
    pub fn trigger_action_result(&mut self, action_id: &str, result: &Value) {
        let result = self.core.encode(result);
        self.core.emit(BridgeEvent::ActionCompleted {
            action_id: action_id.to_string(),
            result,
        });
    }
}

impl Bridge for ActionBridge {
    fn bridge_type(&self) -> &'static str {
        "ActionBridge"
    }

    fn capabilities(&self) -> &'static [&'static str] {
        &["action_handling", "async_operations"]
    }

    fn core(&self) -> &BridgeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut BridgeCore {
        &mut self.core
    }

    fn call(&mut self, method: &str, args: &[Value]) -> Dispatch {
        match method {
            "execute_action" => {
                let params = match args.get(1) {
                    Some(Value::String(raw)) => raw.clone(),
                    Some(Value::Null) | None => "{}".to_string(),
                    Some(other) => other.to_string(),
                };
                self.execute_action(&arg_str(args, 0), &params);
                Dispatch::Done
            }
            "get_available_actions" => Dispatch::Returned(self.get_available_actions()),
            _ => Dispatch::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn ok_bridge() -> ActionBridge {
        let mut bridge = ActionBridge::new();
        bridge.register_action_handler("save", |_params| Ok(json!({"status": "ok"})));
        bridge
    }

    #[test]
    fn execute_emits_requested_then_completed_keyed_by_action_id() {
        let mut bridge = ok_bridge();
        bridge.execute_action("save", r#"{"action_id":"a1"}"#);

        assert_eq!(
            bridge.drain_events(),
            vec![
                BridgeEvent::ActionRequested {
                    action_type: "save".into(),
                    params: r#"{"action_id":"a1"}"#.into(),
                },
                BridgeEvent::ActionCompleted {
                    action_id: "a1".into(),
                    result: r#"{"status":"ok"}"#.into(),
                },
            ]
        );
    }

    #[test]
    fn completion_falls_back_to_action_type() {
        let mut bridge = ok_bridge();
        bridge.execute_action("save", "{}");

        let events = bridge.drain_events();
        assert_eq!(events[1].args(), vec!["save", r#"{"status":"ok"}"#]);
    }

    #[test]
    fn numeric_action_id_keys_the_completion() {
        let mut bridge = ok_bridge();
        bridge.execute_action("save", r#"{"action_id": 42}"#);

        let events = bridge.drain_events();
        assert_eq!(events[1].args()[0], "42");

        bridge.execute_action("save", r#"{"action_id": true}"#);
        let events = bridge.drain_events();
        assert_eq!(events[1].args()[0], "save");
    }

    #[test]
    fn handler_receives_decoded_params() {
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);

        let mut bridge = ActionBridge::new();
        bridge.register_action_handler("open", move |params| {
            *sink.lock().unwrap() = params.get("file").cloned();
            Ok(Value::Null)
        });
        bridge.execute_action("open", r#"{"file": "notes.txt"}"#);

        assert_eq!(*seen.lock().unwrap(), Some(json!("notes.txt")));
    }

    #[test]
    fn null_result_is_reported_as_empty_object() {
        let mut bridge = ActionBridge::new();
        bridge.register_action_handler("noop", |_| Ok(Value::Null));
        bridge.execute_action("noop", "{}");

        let events = bridge.drain_events();
        assert_eq!(
            events[1],
            BridgeEvent::ActionCompleted {
                action_id: "noop".into(),
                result: "{}".into(),
            }
        );
    }

    #[test]
    fn unregistered_action_raises_error_and_never_completes() {
        let mut bridge = ok_bridge();
        bridge.execute_action("delete", r#"{"action_id":"a2"}"#);

        assert_eq!(
            bridge.drain_events(),
            vec![BridgeEvent::ErrorOccurred {
                message: "No handler registered for action: delete".into()
            }]
        );
    }

    #[test]
    fn failing_handler_becomes_error_event() {
        let mut bridge = ActionBridge::new();
        bridge.register_action_handler("explode", |_| Err("disk full".to_string()));
        bridge.execute_action("explode", "{}");

        let events = bridge.drain_events();
        let kinds: Vec<&str> = events.iter().map(BridgeEvent::name).collect();
        assert_eq!(kinds, vec!["action_requested", "error_occurred"]);
        assert_eq!(events[1].args(), vec!["Action execution error: disk full"]);
    }

    #[test]
    fn malformed_params_still_run_handler_with_empty_params() {
        let mut bridge = ok_bridge();
        bridge.execute_action("save", "{broken");

        let kinds: Vec<&str> = bridge.drain_events().iter().map(BridgeEvent::name).collect();
        assert_eq!(
            kinds,
            vec!["error_occurred", "action_requested", "action_completed"]
        );
    }

    #[test]
    fn last_registration_wins() {
        let mut bridge = ok_bridge();
        bridge.register_action_handler("save", |_| Ok(json!({"status": "second"})));
        bridge.execute_action("save", "{}");

        let events = bridge.drain_events();
        assert_eq!(events[1].args()[1], r#"{"status":"second"}"#);
        assert_eq!(bridge.get_available_actions(), r#"["save"]"#);
    }

    #[test]
    fn available_actions_in_registration_order() {
        let mut bridge = ActionBridge::new();
        bridge.register_action_handler("b", |_| Ok(Value::Null));
        bridge.register_action_handler("a", |_| Ok(Value::Null));
        assert_eq!(bridge.get_available_actions(), r#"["b","a"]"#);
        assert!(bridge.has_action("a"));
        assert!(!bridge.has_action("c"));
    }

    #[test]
    fn trigger_action_result_bypasses_handlers() {
        let mut bridge = ActionBridge::new();
        bridge.trigger_action_result("job-7", &json!({"done": true}));

        assert_eq!(
            bridge.drain_events(),
            vec![BridgeEvent::ActionCompleted {
                action_id: "job-7".into(),
                result: r#"{"done":true}"#.into(),
            }]
        );
    }

    #[test]
    fn execute_action_via_invoke() {
        let mut bridge = ok_bridge();
        assert!(bridge
            .invoke("execute_action", &[json!("save"), json!(r#"{"action_id":"p1"}"#)])
            .is_none());
        let events = bridge.drain_events();
        assert_eq!(events[1].args()[0], "p1");

        let listed = bridge.invoke("get_available_actions", &[]).unwrap();
        assert_eq!(listed, r#"["save"]"#);
    }

    #[test]
    fn invoke_accepts_params_as_object() {
        let mut bridge = ok_bridge();
        bridge.invoke("execute_action", &[json!("save"), json!({"action_id": "p2"})]);
        let events = bridge.drain_events();
        assert_eq!(events[1].args()[0], "p2");
    }
}

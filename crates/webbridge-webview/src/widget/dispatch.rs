//! Routing between page script and registered bridges.

use tracing::{debug, warn};

use crate::events::WidgetEvent;
use crate::ipc::{js_dispatch_event, js_resolve_call, BridgeCall};

use super::HostWidget;

impl HostWidget {
    /// Handle a single IPC message from the page.
    ///
    /// Calls to unregistered bridges resolve to `null` on the page side.
    pub(super) fn handle_ipc(&mut self, body: &str) {
        let Some(call) = BridgeCall::from_json(body) else {
            warn!(
                widget = %self.id,
                body_len = body.len(),
                "IPC message rejected: not a bridge call"
            );
            return;
        };

        debug!(
            widget = %self.id,
            bridge = %call.bridge,
            method = %call.method,
            "bridge call"
        );

        let result = match self.bridges.get(&call.bridge) {
            Some(bridge) => match bridge.lock() {
                Ok(mut bridge) => bridge.invoke(&call.method, &call.args),
                Err(_) => {
                    warn!(bridge = %call.bridge, "bridge lock poisoned, call dropped");
                    None
                }
            },
            None => {
                warn!(bridge = %call.bridge, method = %call.method, "call to unregistered bridge");
                None
            }
        };

        if let Some(call_id) = call.call_id {
            self.run_script(&js_resolve_call(call_id, result.as_deref()));
        }
    }

    /// Deliver queued bridge events to page listeners and to the host.
    pub(super) fn forward_bridge_events(&mut self) {
        for (name, event) in self.bridges.drain_events() {
            self.run_script(&js_dispatch_event(&name, &event));
            self.events.push(WidgetEvent::Bridge { name, event });
        }
    }
}

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::bridge::{Bridge, BridgeEvent, SharedBridge};

/// Maps registration names to the bridges a widget exposes to its page.
///
/// Registration is last-write-wins. The registry holds shared handles only;
/// the application owns bridge lifetime.
#[derive(Default)]
pub struct BridgeRegistry {
    bridges: IndexMap<String, SharedBridge>,
}

impl BridgeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bridge` under `name`, replacing any previous registration.
    pub fn register(&mut self, name: impl Into<String>, bridge: SharedBridge) {
        let name = name.into();
        if self.bridges.insert(name.clone(), bridge).is_some() {
            debug!(name = %name, "bridge registration replaced");
        } else {
            debug!(name = %name, "bridge registered");
        }
    }

    /// Look up a bridge by name. Absence is not an error.
    pub fn get(&self, name: &str) -> Option<SharedBridge> {
        self.bridges.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bridges.contains_key(name)
    }

    /// Forget every registration.
    pub fn clear_all(&mut self) {
        debug!(count = self.bridges.len(), "clearing bridge registrations");
        self.bridges.clear();
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.bridges.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.bridges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bridges.is_empty()
    }

    /// Registrations with each bridge's descriptor, for announcing to the page.
    pub fn descriptors(&self) -> Vec<(String, String)> {
        let mut out = Vec::with_capacity(self.bridges.len());
        for (name, bridge) in &self.bridges {
            match bridge.lock() {
                Ok(b) => out.push((name.clone(), b.describe())),
                Err(_) => warn!(name = %name, "bridge lock poisoned, not announced"),
            }
        }
        out
    }

    /// Drain queued events from every bridge, tagged with the bridge name.
    pub fn drain_events(&self) -> Vec<(String, BridgeEvent)> {
        let mut out = Vec::new();
        for (name, bridge) in &self.bridges {
            match bridge.lock() {
                Ok(mut b) => out.extend(b.drain_events().into_iter().map(|e| (name.clone(), e))),
                Err(_) => warn!(name = %name, "bridge lock poisoned, events dropped"),
            }
        }
        out
    }
}

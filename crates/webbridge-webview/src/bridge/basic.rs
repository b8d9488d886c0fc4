use serde_json::Value;

use super::{Bridge, BridgeCore, Dispatch};

/// A bridge with only the base contract: introspection, page logging,
/// and page error reporting.
#[derive(Debug, Default)]
pub struct BasicBridge {
    core: BridgeCore,
}

impl BasicBridge {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Bridge for BasicBridge {
    fn bridge_type(&self) -> &'static str {
        "BasicBridge"
    }

    fn core(&self) -> &BridgeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut BridgeCore {
        &mut self.core
    }

    fn call(&mut self, _method: &str, _args: &[Value]) -> Dispatch {
        Dispatch::Unknown
    }
}

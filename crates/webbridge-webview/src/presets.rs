//! Ready-made widget setups for common cases.
//!
//! Each preset returns the widget unloaded; call `load()` once an engine is
//! attached. Typed bridge handles are returned alongside so the application
//! keeps ownership of its bridges.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::bridge::{
    shared, ActionBridge, ActionHandler, BasicBridge, DataBridge, Item, SharedBridge,
};
use crate::widget::HostWidget;

/// Bridge name used by [`data_widget`].
pub const DATA_BRIDGE_NAME: &str = "data";
/// Bridge name used by [`action_widget`].
pub const ACTION_BRIDGE_NAME: &str = "actions";
/// Bridge name used by [`debug_widget`].
pub const DEBUG_BRIDGE_NAME: &str = "debug";

/// Widget for a production build with the given bridges registered.
pub fn simple_widget(
    root: impl Into<PathBuf>,
    bridges: impl IntoIterator<Item = (String, SharedBridge)>,
) -> HostWidget {
    let mut widget = HostWidget::new();
    widget.set_web_content(root, None);
    register_all(&mut widget, bridges);
    widget
}

/// Widget with a [`DataBridge`] named `data` preloaded with `items`.
pub fn data_widget(
    root: impl Into<PathBuf>,
    items: Vec<Item>,
) -> (HostWidget, Arc<Mutex<DataBridge>>) {
    let mut bridge = DataBridge::new();
    bridge.set_items(items);
    let bridge = shared(bridge);

    let mut widget = HostWidget::new();
    widget.set_web_content(root, None);
    widget.register_bridge(DATA_BRIDGE_NAME, bridge.clone());
    (widget, bridge)
}

/// Widget with an [`ActionBridge`] named `actions` holding `handlers`.
pub fn action_widget(
    root: impl Into<PathBuf>,
    handlers: impl IntoIterator<Item = (String, ActionHandler)>,
) -> (HostWidget, Arc<Mutex<ActionBridge>>) {
    let mut bridge = ActionBridge::new();
    for (action_type, handler) in handlers {
        bridge.register_action_handler(action_type, handler);
    }
    let bridge = shared(bridge);

    let mut widget = HostWidget::new();
    widget.set_web_content(root, None);
    widget.register_bridge(ACTION_BRIDGE_NAME, bridge.clone());
    (widget, bridge)
}

/// Widget rendering inline HTML, for development without a build.
pub fn development_widget(
    html: impl Into<String>,
    bridges: impl IntoIterator<Item = (String, SharedBridge)>,
) -> HostWidget {
    let mut widget = HostWidget::new();
    widget.set_dev_html_content(html);
    register_all(&mut widget, bridges);
    widget
}

/// Widget with a basic `debug` bridge and a load callback that logs.
pub fn debug_widget(root: impl Into<PathBuf>) -> (HostWidget, Arc<Mutex<BasicBridge>>) {
    let root = root.into();
    let bridge = shared(BasicBridge::new());

    let mut widget = HostWidget::new();
    widget.set_web_content(root.clone(), None);
    let id = widget.id().clone();
    widget.add_load_callback(move || {
        debug!(widget = %id, root = %root.display(), "debug widget loaded");
        Ok(())
    });
    widget.register_bridge(DEBUG_BRIDGE_NAME, bridge.clone());
    (widget, bridge)
}

fn register_all(
    widget: &mut HostWidget,
    bridges: impl IntoIterator<Item = (String, SharedBridge)>,
) {
    for (name, bridge) in bridges {
        widget.register_bridge(name, bridge);
    }
}

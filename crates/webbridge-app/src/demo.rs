//! Sample bridges and page shown when the app runs.

use std::sync::{Arc, Mutex};

use serde_json::{json, Map, Value};
use tracing::info;
use webbridge_common::new_short_id;
use webbridge_webview::{shared, ActionBridge, Bridge, DataBridge, Item};

/// The bridges the demo page talks to, kept by the app for their lifetime.
pub struct DemoBridges {
    pub data: Arc<Mutex<DataBridge>>,
    pub actions: Arc<Mutex<ActionBridge>>,
}

impl DemoBridges {
    pub fn new() -> Self {
        let mut data = DataBridge::new().with_search_fields(["name", "type", "status"]);
        data.set_items(sample_items());
        let data = shared(data);

        let mut actions = ActionBridge::new();
        register_actions(&mut actions, &data);

        Self {
            data,
            actions: shared(actions),
        }
    }
}

pub fn sample_items() -> Vec<Item> {
    [
        ("1", "Desktop Application", "Native", "active"),
        ("2", "Web Interface", "React", "loading"),
        ("3", "Mobile App", "Flutter", "planned"),
        ("4", "API Server", "Axum", "active"),
    ]
    .into_iter()
    .map(|(id, name, kind, status)| {
        let mut item = Map::new();
        item.insert("id".into(), json!(id));
        item.insert("name".into(), json!(name));
        item.insert("type".into(), json!(kind));
        item.insert("status".into(), json!(status));
        item
    })
    .collect()
}

fn required_str<'a>(params: &'a Map<String, Value>, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("missing {key}"))
}

/// Wire the demo actions to the data bridge they mutate.
pub fn register_actions(actions: &mut ActionBridge, data: &Arc<Mutex<DataBridge>>) {
    let store = Arc::clone(data);
    actions.register_action_handler("update_status", move |params| {
        let id = required_str(params, "item_id")?;
        let status = required_str(params, "status")?;
        let mut data = store.lock().map_err(|_| "data bridge unavailable")?;
        if data.item(id).is_none() {
            return Err(format!("no item with id {id}"));
        }

        let mut fields = Map::new();
        fields.insert("status".into(), json!(status));
        data.update_item(id, fields);
        data.emit_status(id, status);
        Ok(json!({"success": true, "item_id": id, "new_status": status}))
    });

    let store = Arc::clone(data);
    actions.register_action_handler("add_item", move |params| {
        let mut item = Map::new();
        let id = format!("new_{}", new_short_id());
        item.insert("id".into(), json!(id));
        item.insert(
            "name".into(),
            params.get("name").cloned().unwrap_or_else(|| json!("New Item")),
        );
        item.insert(
            "type".into(),
            params.get("type").cloned().unwrap_or_else(|| json!("Unknown")),
        );
        item.insert("status".into(), json!("created"));

        let mut data = store.lock().map_err(|_| "data bridge unavailable")?;
        data.add_item(item.clone());
        Ok(json!({"success": true, "item": item}))
    });

    let store = Arc::clone(data);
    actions.register_action_handler("delete_item", move |params| {
        let id = required_str(params, "item_id")?;
        let mut data = store.lock().map_err(|_| "data bridge unavailable")?;
        data.remove_item(id);
        Ok(json!({"success": true, "deleted_id": id}))
    });

    actions.register_action_handler("show_notification", |params| {
        let message = params
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("No message");
        let level = params.get("level").and_then(Value::as_str).unwrap_or("info");
        info!(target: "webbridge::notification", level, "{message}");
        Ok(json!({"success": true, "displayed": true}))
    });
}

/// Inline page used when no content directory provides one.
pub const DEMO_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>webbridge demo</title>
<style>
  body { font-family: system-ui, sans-serif; margin: 24px; background: #1e1e1e; color: #ddd; }
  .item { padding: 8px 12px; margin: 4px 0; background: #2a2a2a; border-radius: 4px; }
  .status { float: right; color: #8ab4f8; }
  input, button { padding: 6px 10px; margin-right: 6px; }
  #log { font-family: monospace; font-size: 12px; color: #999; margin-top: 16px; }
</style>
</head>
<body>
<h1>webbridge demo</h1>
<div>
  <input id="search" placeholder="Search items...">
  <button id="add">Add item</button>
</div>
<div id="items"></div>
<div id="log"></div>
<script>
  function log(line) {
    var entry = document.createElement('div');
    entry.textContent = line;
    document.getElementById('log').prepend(entry);
  }

  function render(items) {
    var list = document.getElementById('items');
    list.innerHTML = '';
    items.forEach(function (item) {
      var row = document.createElement('div');
      row.className = 'item';
      row.textContent = item.name + ' (' + item.type + ')';
      var status = document.createElement('span');
      status.className = 'status';
      status.textContent = item.status;
      status.onclick = function () {
        var next = item.status === 'active' ? 'paused' : 'active';
        window.webbridge.call('actions', 'execute_action', 'update_status',
          JSON.stringify({ item_id: item.id, status: next }));
      };
      row.appendChild(status);
      list.appendChild(row);
    });
  }

  window.addEventListener('webbridge-ready', function () {
    var data = window.webbridge.bridges.data;
    var actions = window.webbridge.bridges.actions;
    if (!data || !actions) { return; }

    data.on('items_loaded', function (json) { render(JSON.parse(json)); });
    data.on('search_results', function (json) { render(JSON.parse(json)); });
    data.on('status_changed', function (id, status) { log('status ' + id + ' -> ' + status); });
    data.on('error_occurred', function (message) { log('error: ' + message); });
    actions.on('action_completed', function (id, result) { log('done ' + id + ' ' + result); });

    data.call('get_all_items').then(function (json) { render(JSON.parse(json)); });
    actions.call('get_available_actions').then(function (json) { log('actions: ' + json); });

    document.getElementById('search').addEventListener('input', function (e) {
      var query = e.target.value;
      if (query === '') {
        data.call('get_all_items').then(function (json) { render(JSON.parse(json)); });
      } else {
        data.call('request_search', query);
      }
    });
    document.getElementById('add').onclick = function () {
      actions.call('execute_action', 'add_item', JSON.stringify({ name: 'Added from page', type: 'Web' }));
    };
    data.call('log_message', 'demo page ready');
  });
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use webbridge_webview::BridgeEvent;

    fn params(value: Value) -> String {
        value.to_string()
    }

    #[test]
    fn demo_starts_with_sample_items() {
        let bridges = DemoBridges::new();
        let mut data = bridges.data.lock().unwrap();
        assert_eq!(data.len(), 4);

        let names: Vec<&str> = data.drain_events().iter().map(BridgeEvent::name).collect();
        assert_eq!(names, vec!["items_loaded", "data_updated"]);
    }

    #[test]
    fn search_covers_type_and_status() {
        let bridges = DemoBridges::new();
        let data = bridges.data.lock().unwrap();
        assert_eq!(data.search("flutter").len(), 1);
        assert_eq!(data.search("ACTIVE").len(), 2);
    }

    #[test]
    fn update_status_changes_the_item() {
        let bridges = DemoBridges::new();
        bridges.actions.lock().unwrap().execute_action(
            "update_status",
            &params(json!({"item_id": "3", "status": "active"})),
        );

        let data = bridges.data.lock().unwrap();
        assert_eq!(data.item("3").unwrap()["status"], "active");
    }

    #[test]
    fn update_status_of_unknown_item_fails_without_status_event() {
        let bridges = DemoBridges::new();
        bridges.data.lock().unwrap().drain_events();

        let mut actions = bridges.actions.lock().unwrap();
        actions.execute_action(
            "update_status",
            &params(json!({"item_id": "99", "status": "active"})),
        );

        let names: Vec<&str> = actions.drain_events().iter().map(BridgeEvent::name).collect();
        assert_eq!(names, vec!["action_requested", "error_occurred"]);
        assert!(bridges.data.lock().unwrap().drain_events().is_empty());
    }

    #[test]
    fn add_and_delete_round_trip() {
        let bridges = DemoBridges::new();
        bridges
            .actions
            .lock()
            .unwrap()
            .execute_action("add_item", &params(json!({"name": "CLI"})));
        assert_eq!(bridges.data.lock().unwrap().len(), 5);

        let new_id = bridges
            .data
            .lock()
            .unwrap()
            .items()
            .last()
            .and_then(|item| item["id"].as_str().map(str::to_string))
            .unwrap();
        assert!(new_id.starts_with("new_"));

        bridges
            .actions
            .lock()
            .unwrap()
            .execute_action("delete_item", &params(json!({"item_id": new_id})));
        assert_eq!(bridges.data.lock().unwrap().len(), 4);
    }

    #[test]
    fn missing_params_become_error_events() {
        let bridges = DemoBridges::new();
        let mut actions = bridges.actions.lock().unwrap();
        actions.execute_action("delete_item", "{}");

        let events = actions.drain_events();
        assert_eq!(
            events.last(),
            Some(&BridgeEvent::ErrorOccurred {
                message: "Action execution error: missing item_id".into()
            })
        );
    }

    #[test]
    fn demo_page_uses_the_bridge_client() {
        assert!(DEMO_HTML.contains("webbridge-ready"));
        assert!(DEMO_HTML.contains("window.webbridge.bridges.data"));
    }
}

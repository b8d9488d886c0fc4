//! Data synchronization bridge.
//!
//! Holds an ordered set of item records keyed by id and keeps the page in
//! sync: every mutation is followed by the matching event, full-list
//! mutations re-broadcast the whole set.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

use super::{arg_str, Bridge, BridgeCore, BridgeEvent, Dispatch};

/// One item record: a JSON object with a string `id` plus open fields.
pub type Item = Map<String, Value>;

/// Fields searched by [`DataBridge::request_search`] unless overridden.
pub const DEFAULT_SEARCH_FIELDS: &[&str] = &["name", "description"];

#[derive(Debug)]
pub struct DataBridge {
    core: BridgeCore,
    items: IndexMap<String, Item>,
    search_fields: Vec<String>,
}

impl Default for DataBridge {
    fn default() -> Self {
        Self {
            core: BridgeCore::new(),
            items: IndexMap::new(),
            search_fields: DEFAULT_SEARCH_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

fn item_id(item: &Item) -> Option<&str> {
    item.get("id").and_then(Value::as_str)
}

impl DataBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the fields matched by [`DataBridge::request_search`].
    pub fn with_search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Replace the whole item set and broadcast it.
    ///
    /// Records without a string `id` cannot be indexed; each one is skipped
    /// with an error event.
    pub fn set_items(&mut self, items: Vec<Item>) {
        let mut indexed = IndexMap::with_capacity(items.len());
        for item in items {
            match item_id(&item).map(str::to_string) {
                Some(id) => {
                    indexed.insert(id, item);
                }
                None => self.core.emit_error("Item missing id field, skipped"),
            }
        }
        self.items = indexed;
        self.broadcast();
    }

    /// Emit `items_loaded` and `data_updated` with the current list.
    fn broadcast(&mut self) {
        let list: Vec<&Item> = self.items.values().collect();
        let json = match serde_json::to_string(&list) {
            Ok(json) => json,
            Err(e) => {
                self.core
                    .emit_error(format!("JSON serialization error: {e}"));
                "{}".to_string()
            }
        };
        debug!(count = self.items.len(), "broadcasting item list");
        self.core.emit(BridgeEvent::ItemsLoaded {
            items: json.clone(),
        });
        self.core.emit(BridgeEvent::DataUpdated { data: json });
    }

    pub fn get_all_items(&mut self) -> String {
        let list: Vec<Item> = self.items.values().cloned().collect();
        self.core.encode(&list)
    }

    /// The item as JSON, or `{}` for an unknown id.
    pub fn get_item(&mut self, id: &str) -> String {
        match self.items.get(id).cloned() {
            Some(item) => self.core.encode(&item),
            None => "{}".to_string(),
        }
    }

    /// Merge `fields` into an existing item.
    ///
    /// The `item_updated` event carries only the partial fields. The `id`
    /// field is never rewritten since it is the item's key.
    pub fn update_item(&mut self, id: &str, fields: Item) {
        let Some(item) = self.items.get_mut(id) else {
            self.core.emit_error(format!("Item not found: {id}"));
            return;
        };
        for (key, value) in &fields {
            if key != "id" {
                item.insert(key.clone(), value.clone());
            }
        }
        let data = self.core.encode(&fields);
        self.core.emit(BridgeEvent::ItemUpdated {
            id: id.to_string(),
            data,
        });
    }

    /// Items whose search fields contain `query`, case-insensitively.
    pub fn search(&self, query: &str) -> Vec<&Item> {
        let needle = query.to_lowercase();
        self.items
            .values()
            .filter(|item| {
                self.search_fields.iter().any(|field| {
                    item.get(field)
                        .and_then(Value::as_str)
                        .is_some_and(|text| text.to_lowercase().contains(&needle))
                })
            })
            .collect()
    }

    /// Run [`DataBridge::search`] and emit `search_results`.
    pub fn request_search(&mut self, query: &str) {
        let results: Vec<Item> = self.search(query).into_iter().cloned().collect();
        debug!(query, matches = results.len(), "search");
        let json = self.core.encode(&results);
        self.core.emit(BridgeEvent::SearchResults { results: json });
    }

    /// Append an item and broadcast.
    ///
    /// An item without a string `id` is rejected with an error event. An
    /// existing id is replaced in place.
    pub fn add_item(&mut self, item: Item) {
        let Some(id) = item_id(&item).map(str::to_string) else {
            self.core.emit_error("Item missing id field");
            return;
        };
        let data = self.core.encode(&item);
        self.items.insert(id.clone(), item);
        self.core.emit(BridgeEvent::ItemUpdated { id, data });
        self.broadcast();
    }

    pub fn remove_item(&mut self, id: &str) {
        if self.items.shift_remove(id).is_none() {
            self.core
                .emit_error(format!("Item not found for removal: {id}"));
            return;
        }
        self.broadcast();
    }
}

impl Bridge for DataBridge {
    fn bridge_type(&self) -> &'static str {
        "DataBridge"
    }

    fn capabilities(&self) -> &'static [&'static str] {
        &["data_sync", "search", "item_management"]
    }

    fn core(&self) -> &BridgeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut BridgeCore {
        &mut self.core
    }

    fn call(&mut self, method: &str, args: &[Value]) -> Dispatch {
        match method {
            "get_all_items" => Dispatch::Returned(self.get_all_items()),
            "get_item" => Dispatch::Returned(self.get_item(&arg_str(args, 0))),
            "request_search" => {
                self.request_search(&arg_str(args, 0));
                Dispatch::Done
            }
            _ => Dispatch::Unknown,
        }
    }
}

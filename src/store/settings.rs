use std::collections::HashMap;
use std::sync::RwLock;

use log::warn;
use serde::Serialize;
use serde_json::{Map, Value};

// Namespace this backend reads its own settings from.
pub const PLUGIN_NAMESPACE: &str = "plugin_timesheet";

// Fallbacks when a setting is missing or does not coerce to an integer.
pub const DEFAULT_LIST_SIZE: u32 = 25;
pub const DEFAULT_PRECISION: u32 = 2;

// Process-wide settings, grouped by namespace. Mutated from outside (the
// admin routes or the seed); the report code only ever reads it.
#[derive(Default)]
pub struct SettingsStore {
    namespaces: RwLock<HashMap<String, Map<String, Value>>>,
}

impl SettingsStore {
    pub fn new() -> Self {
        SettingsStore::default()
    }

    // Whole-namespace assignment, replacing any previous values.
    pub fn replace(&self, namespace: &str, values: Map<String, Value>) {
        self.namespaces
            .write()
            .expect("settings lock poisoned")
            .insert(namespace.to_string(), values);
    }

    pub fn namespace(&self, namespace: &str) -> Map<String, Value> {
        self.namespaces
            .read()
            .expect("settings lock poisoned")
            .get(namespace)
            .cloned()
            .unwrap_or_default()
    }
}

// Display settings for the report views.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportSettings {
    pub list_size: u32,
    pub precision: u32,
}

impl ReportSettings {
    // Reads the plugin namespace. The store hands values back untyped, so
    // JSON numbers and numeric strings both coerce to integers here.
    pub fn read(store: &SettingsStore) -> ReportSettings {
        let values = store.namespace(PLUGIN_NAMESPACE);
        ReportSettings {
            list_size: coerce(values.get("list_size"), "list_size", DEFAULT_LIST_SIZE),
            precision: coerce(values.get("precision"), "precision", DEFAULT_PRECISION),
        }
    }
}

fn coerce(value: Option<&Value>, key: &str, default: u32) -> u32 {
    match value {
        None => default,
        Some(Value::Number(n)) => match n.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(n) => n,
            None => {
                warn!("Ignoring out-of-range {} setting: {}", key, n);
                default
            }
        },
        Some(Value::String(s)) => match s.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                warn!("Ignoring non-numeric {} setting: {:?}", key, s);
                default
            }
        },
        Some(other) => {
            warn!("Ignoring malformed {} setting: {}", key, other);
            default
        }
    }
}

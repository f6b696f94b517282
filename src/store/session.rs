use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// Session entry the signed-in user id lives under. Written by the host
// authentication layer (the demo seed, in this backend), only read here.
pub const USER_ID_KEY: &str = "user_id";

// Well-known session entry holding the last-used report filter.
pub const TIMESHEET_FILTER_KEY: &str = "timesheet_filter";

// Opaque per-browser-session key-value store. Values stay raw JSON; typed
// access happens through the schema structs below.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, HashMap<String, Value>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore::default()
    }

    pub fn create(&self) -> String {
        let session_id = Uuid::new_v4().to_string();
        self.write().insert(session_id.clone(), HashMap::new());
        session_id
    }

    pub fn get(&self, session_id: &str, key: &str) -> Option<Value> {
        self.read().get(session_id)?.get(key).cloned()
    }

    pub fn insert(&self, session_id: &str, key: &str, value: Value) {
        self.write()
            .entry(session_id.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    pub fn remove(&self, session_id: &str, key: &str) {
        if let Some(session) = self.write().get_mut(session_id) {
            session.remove(key);
        }
    }

    pub fn sign_in(&self, session_id: &str, user_id: i32) {
        self.insert(session_id, USER_ID_KEY, Value::from(user_id));
    }

    pub fn user_id(&self, session_id: &str) -> Option<i32> {
        let id = self.get(session_id, USER_ID_KEY)?.as_i64()?;
        i32::try_from(id).ok()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, HashMap<String, Value>>> {
        self.sessions.read().expect("session lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, HashMap<String, Value>>> {
        self.sessions.write().expect("session lock poisoned")
    }
}

// The last-used report filter as it is written into the session. Project ids
// and dates stay strings in storage; parsing happens on the way out, and
// only in this module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedFilter {
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub date_to: Option<String>,
}

impl SavedFilter {
    // None when the session has no saved filter, or when the stored value
    // no longer decodes (it is discarded in that case).
    pub fn restore(store: &SessionStore, session_id: &str) -> Option<SavedFilter> {
        let value = store.get(session_id, TIMESHEET_FILTER_KEY)?;
        match serde_json::from_value(value) {
            Ok(filter) => Some(filter),
            Err(e) => {
                warn!(
                    "Discarding undecodable timesheet filter in session {}: {}",
                    session_id, e
                );
                None
            }
        }
    }

    // Overwrites whatever filter the session held before.
    pub fn persist(&self, store: &SessionStore, session_id: &str) {
        if let Ok(value) = serde_json::to_value(self) {
            store.insert(session_id, TIMESHEET_FILTER_KEY, value);
        }
    }

    // Removes the whole entry; a later restore sees nothing.
    pub fn reset(store: &SessionStore, session_id: &str) {
        store.remove(session_id, TIMESHEET_FILTER_KEY);
    }

    pub fn date_range(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        (
            parse_date(self.date_from.as_deref()),
            parse_date(self.date_to.as_deref()),
        )
    }
}

// ISO `YYYY-MM-DD` or nothing. Blank input is simply unset; anything else
// that fails to parse is logged and treated as unset too.
pub fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    let raw = value?.trim();
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            warn!("Ignoring unparsable report date: {}", raw);
            None
        }
    }
}

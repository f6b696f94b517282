use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize)]
pub struct AdminDefaultResponse {
    pub success: bool,
    pub message: String,
}

// Raw values to store under the plugin namespace, as given.
#[derive(Deserialize)]
pub struct UpdateSettingsRequest {
    pub settings: Map<String, Value>,
}

// The stored raw values plus what the report code makes of them.
#[derive(Serialize)]
pub struct SettingsResponse {
    pub settings: Map<String, Value>,
    pub list_size: u32,
    pub precision: u32,
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub entry_id: i32,
    pub project_id: i32,
    pub user_id: i32,
    pub spent_on: NaiveDate,
    pub hours: f64,
    pub activity: String,
    pub comments: String,
}

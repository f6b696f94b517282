use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i32,
    pub user_name: String,
    pub user_email: String,
    pub admin: bool,
}

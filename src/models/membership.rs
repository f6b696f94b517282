use serde::{Deserialize, Serialize};

// Links a user to a project. Any permission set is enough for the project
// to count as visible; permission-level gating stays with the host app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub user_id: i32,
    pub project_id: i32,
    pub permissions: Vec<String>,
}

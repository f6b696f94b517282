use std::collections::HashSet;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::models::membership::Membership;
use crate::models::project::Project;
use crate::models::time_entry::TimeEntry;
use crate::models::user::User;

#[derive(Default)]
struct DirectoryInner {
    users: Vec<User>,
    projects: Vec<Project>,
    memberships: Vec<Membership>,
    time_entries: Vec<TimeEntry>,
}

// Registry of users, projects, memberships and logged time. Projects keep
// insertion order, which is also the order reports list them in.
#[derive(Default)]
pub struct Directory {
    inner: RwLock<DirectoryInner>,
}

impl Directory {
    pub fn new() -> Self {
        Directory::default()
    }

    pub fn add_user(&self, user: User) {
        self.write().users.push(user);
    }

    pub fn add_project(&self, project: Project) {
        self.write().projects.push(project);
    }

    pub fn add_membership(&self, membership: Membership) {
        self.write().memberships.push(membership);
    }

    pub fn add_time_entry(&self, entry: TimeEntry) {
        self.write().time_entries.push(entry);
    }

    pub fn user(&self, user_id: i32) -> Option<User> {
        self.read().users.iter().find(|u| u.user_id == user_id).cloned()
    }

    pub fn user_name(&self, user_id: i32) -> Option<String> {
        self.user(user_id).map(|u| u.user_name)
    }

    pub fn projects(&self) -> Vec<Project> {
        self.read().projects.clone()
    }

    pub fn project_name(&self, project_id: i32) -> Option<String> {
        self.read()
            .projects
            .iter()
            .find(|p| p.project_id == project_id)
            .map(|p| p.project_name.clone())
    }

    pub fn member_project_ids(&self, user_id: i32) -> HashSet<i32> {
        self.read()
            .memberships
            .iter()
            .filter(|m| m.user_id == user_id)
            .map(|m| m.project_id)
            .collect()
    }

    // Entries for the given projects whose spent_on date falls inside the
    // inclusive window. A missing bound leaves that side open.
    pub fn time_entries(
        &self,
        project_ids: &[i32],
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Vec<TimeEntry> {
        let scope: HashSet<i32> = project_ids.iter().copied().collect();
        self.read()
            .time_entries
            .iter()
            .filter(|e| scope.contains(&e.project_id))
            .filter(|e| date_from.map_or(true, |from| e.spent_on >= from))
            .filter(|e| date_to.map_or(true, |to| e.spent_on <= to))
            .cloned()
            .collect()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, DirectoryInner> {
        self.inner.read().expect("directory lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, DirectoryInner> {
        self.inner.write().expect("directory lock poisoned")
    }
}

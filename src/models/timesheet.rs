use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use super::project::Project;
use super::time_entry::TimeEntry;

// The per-request report filter: which projects the viewer may query, which
// ones the current report actually covers, the date window, and the matched
// time entries. Built fresh on every request, never cached.
#[derive(Debug, Clone, Serialize)]
pub struct Timesheet {
    pub allowed_projects: Vec<Project>,
    pub projects: Vec<Project>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub time_entries: Vec<TimeEntry>,
}

impl Timesheet {
    pub fn new(allowed_projects: Vec<Project>) -> Self {
        Timesheet {
            allowed_projects,
            projects: Vec::new(),
            date_from: None,
            date_to: None,
            time_entries: Vec::new(),
        }
    }
}

// Everything project visibility depends on for one viewer.
#[derive(Debug, Clone)]
pub enum VisibilityContext {
    Anonymous,
    SignedIn {
        is_admin: bool,
        member_project_ids: HashSet<i32>,
    },
}

impl VisibilityContext {
    // Projects the viewer may query, in the order `all_projects` lists them.
    // Admins see every project, signed-in users see public projects plus the
    // ones they hold a membership in, anonymous viewers see none.
    pub fn allowed_projects(&self, all_projects: &[Project]) -> Vec<Project> {
        match self {
            VisibilityContext::Anonymous => Vec::new(),
            VisibilityContext::SignedIn { is_admin: true, .. } => all_projects.to_vec(),
            VisibilityContext::SignedIn {
                member_project_ids, ..
            } => all_projects
                .iter()
                .filter(|p| p.is_public || member_project_ids.contains(&p.project_id))
                .cloned()
                .collect(),
        }
    }
}

// Intersects the requested project ids with the allowed set, keeping the
// order of `allowed`. Ids that are malformed or point outside the allowed
// set are dropped without complaint. An empty request means "everything
// visible" and returns `allowed` unchanged.
pub fn effective_projects(requested_ids: &[String], allowed: &[Project]) -> Vec<Project> {
    if requested_ids.is_empty() {
        return allowed.to_vec();
    }
    let requested: HashSet<i32> = requested_ids
        .iter()
        .filter_map(|id| id.trim().parse().ok())
        .collect();
    allowed
        .iter()
        .filter(|p| requested.contains(&p.project_id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(project_id: i32, is_public: bool) -> Project {
        Project {
            project_id,
            project_name: format!("Project {}", project_id),
            is_public,
        }
    }

    fn signed_in(is_admin: bool, member_project_ids: &[i32]) -> VisibilityContext {
        VisibilityContext::SignedIn {
            is_admin,
            member_project_ids: member_project_ids.iter().copied().collect(),
        }
    }

    #[test]
    fn anonymous_viewers_see_no_projects() {
        let all = vec![project(1, true), project(2, false)];
        assert!(VisibilityContext::Anonymous.allowed_projects(&all).is_empty());
    }

    #[test]
    fn non_members_see_only_public_projects() {
        let all = vec![project(1, false), project(2, true), project(3, true)];
        let allowed = signed_in(false, &[]).allowed_projects(&all);
        assert_eq!(allowed, vec![project(2, true), project(3, true)]);
    }

    #[test]
    fn members_see_their_projects_plus_public_ones() {
        let all = vec![project(1, false), project(2, false), project(3, true)];
        let allowed = signed_in(false, &[1]).allowed_projects(&all);
        assert_eq!(allowed, vec![project(1, false), project(3, true)]);
    }

    #[test]
    fn admins_see_every_project_regardless_of_membership() {
        let all = vec![project(1, false), project(2, false), project(3, true)];
        let allowed = signed_in(true, &[]).allowed_projects(&all);
        assert_eq!(allowed, all);
    }

    #[test]
    fn allowed_projects_keep_insertion_order() {
        let all = vec![project(5, true), project(1, true), project(9, true)];
        let allowed = signed_in(false, &[]).allowed_projects(&all);
        let ids: Vec<i32> = allowed.iter().map(|p| p.project_id).collect();
        assert_eq!(ids, vec![5, 1, 9]);
    }

    #[test]
    fn empty_request_defaults_to_the_full_allowed_set() {
        let allowed = vec![project(1, false), project(3, true)];
        assert_eq!(effective_projects(&[], &allowed), allowed);
    }

    #[test]
    fn requested_scope_is_clamped_to_the_allowed_set() {
        // Member of project 1 only; project 2 exists but is off limits and
        // the public project 3 is not part of the request.
        let allowed = vec![project(1, false), project(3, true)];
        let requested = vec!["1".to_string(), "2".to_string()];
        assert_eq!(
            effective_projects(&requested, &allowed),
            vec![project(1, false)]
        );
    }

    #[test]
    fn foreign_and_malformed_ids_are_dropped_silently() {
        let allowed = vec![project(1, false)];
        let requested = vec!["99".to_string(), "not-a-number".to_string(), "1".to_string()];
        assert_eq!(
            effective_projects(&requested, &allowed),
            vec![project(1, false)]
        );
    }

    #[test]
    fn effective_projects_follow_allowed_order_not_request_order() {
        let allowed = vec![project(1, false), project(2, false)];
        let requested = vec!["2".to_string(), "1".to_string()];
        let ids: Vec<i32> = effective_projects(&requested, &allowed)
            .iter()
            .map(|p| p.project_id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }
}

use actix_web::{http::header, web, HttpRequest, HttpResponse, Responder};
use log::info;

use super::timesheet_models::{
    CreateReportRequest, CsvRow, NoProjectsResponse, TimesheetResponse, csv_body,
};
use crate::models::timesheet::{Timesheet, VisibilityContext, effective_projects};
use crate::models::user::User;
use crate::store::directory::Directory;
use crate::store::session::{SavedFilter, SessionStore, parse_date};
use crate::store::settings::{ReportSettings, SettingsStore};

fn session_id(req: &HttpRequest) -> Option<String> {
    req.cookie("session_id").map(|c| c.value().to_string())
}

// Resolves the signed-in user behind the session cookie, if any.
fn current_user(
    session_id: Option<&str>,
    sessions: &SessionStore,
    directory: &Directory,
) -> Option<User> {
    let user_id = sessions.user_id(session_id?)?;
    directory.user(user_id)
}

fn visibility_context(user: Option<&User>, directory: &Directory) -> VisibilityContext {
    match user {
        None => VisibilityContext::Anonymous,
        Some(user) => VisibilityContext::SignedIn {
            is_admin: user.admin,
            member_project_ids: directory.member_project_ids(user.user_id),
        },
    }
}

fn no_projects() -> HttpResponse {
    HttpResponse::Ok().json(NoProjectsResponse {
        no_projects: true,
        message: "You do not have access to any projects".to_string(),
    })
}

// Handler for the report page: builds a fresh timesheet and restores the
// last-used filter from the session. Never runs the report itself, so the
// entry list is always empty here.
pub async fn index(
    directory: web::Data<Directory>,
    sessions: web::Data<SessionStore>,
    settings: web::Data<SettingsStore>,
    req: HttpRequest,
) -> impl Responder {
    let session_id = session_id(&req);
    let user = current_user(session_id.as_deref(), &sessions, &directory);
    info!(
        "Received timesheet index request from user {:?}",
        user.as_ref().map(|u| &u.user_name)
    );

    let context = visibility_context(user.as_ref(), &directory);
    let allowed = context.allowed_projects(&directory.projects());
    if allowed.is_empty() {
        return no_projects();
    }

    let mut timesheet = Timesheet::new(allowed);
    let saved = session_id
        .as_deref()
        .and_then(|sid| SavedFilter::restore(&sessions, sid));
    match saved {
        Some(saved) => {
            timesheet.projects = effective_projects(&saved.projects, &timesheet.allowed_projects);
            let (date_from, date_to) = saved.date_range();
            timesheet.date_from = date_from;
            timesheet.date_to = date_to;
        }
        None => {
            // No saved filter: the report scope defaults to everything visible.
            timesheet.projects = timesheet.allowed_projects.clone();
        }
    }

    let report_settings = ReportSettings::read(&settings);
    HttpResponse::Ok().json(TimesheetResponse {
        timesheet,
        list_size: report_settings.list_size,
        precision: report_settings.precision,
    })
}

// Handler for a filter submission: clamps the requested projects to the
// allowed set, runs the report, and remembers the accepted filter in the
// session. Responds as JSON or, on request, as CSV.
pub async fn create(
    directory: web::Data<Directory>,
    sessions: web::Data<SessionStore>,
    settings: web::Data<SettingsStore>,
    req: HttpRequest,
    request: web::Json<CreateReportRequest>,
) -> impl Responder {
    let session_id = session_id(&req);
    let user = current_user(session_id.as_deref(), &sessions, &directory);
    info!(
        "Received report request from user {:?} for projects {:?}",
        user.as_ref().map(|u| &u.user_name),
        request.timesheet.projects
    );

    let context = visibility_context(user.as_ref(), &directory);
    let allowed = context.allowed_projects(&directory.projects());
    if allowed.is_empty() {
        return no_projects();
    }

    let mut timesheet = Timesheet::new(allowed);
    timesheet.projects = effective_projects(&request.timesheet.projects, &timesheet.allowed_projects);
    timesheet.date_from = parse_date(request.timesheet.date_from.as_deref());
    timesheet.date_to = parse_date(request.timesheet.date_to.as_deref());

    let project_ids: Vec<i32> = timesheet.projects.iter().map(|p| p.project_id).collect();
    timesheet.time_entries =
        directory.time_entries(&project_ids, timesheet.date_from, timesheet.date_to);

    if !request.query_only {
        // Saved-report records live in the host application; without the
        // query-only flag the submission still just runs the query here.
        info!("Report submitted without the query-only flag; treating it as a query");
    }

    if let Some(session_id) = session_id.as_deref() {
        let saved = SavedFilter {
            projects: project_ids.iter().map(|id| id.to_string()).collect(),
            date_from: timesheet.date_from.map(|d| d.to_string()),
            date_to: timesheet.date_to.map(|d| d.to_string()),
        };
        saved.persist(&sessions, session_id);
    }

    if request.format.as_deref() == Some("csv") {
        let rows: Vec<CsvRow> = timesheet
            .time_entries
            .iter()
            .map(|entry| CsvRow {
                spent_on: entry.spent_on.to_string(),
                user: directory
                    .user_name(entry.user_id)
                    .unwrap_or_else(|| entry.user_id.to_string()),
                project: directory
                    .project_name(entry.project_id)
                    .unwrap_or_else(|| entry.project_id.to_string()),
                activity: entry.activity.clone(),
                comments: entry.comments.clone(),
                hours: entry.hours,
            })
            .collect();
        return HttpResponse::Ok()
            .content_type("text/csv")
            .insert_header((
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"timesheet.csv\"",
            ))
            .body(csv_body(&rows));
    }

    let report_settings = ReportSettings::read(&settings);
    HttpResponse::Ok().json(TimesheetResponse {
        timesheet,
        list_size: report_settings.list_size,
        precision: report_settings.precision,
    })
}

// Handler to drop the remembered filter and send the client back to the
// report page.
pub async fn reset(sessions: web::Data<SessionStore>, req: HttpRequest) -> impl Responder {
    if let Some(session_id) = session_id(&req) {
        SavedFilter::reset(&sessions, &session_id);
        info!("Cleared the saved timesheet filter for session {}", session_id);
    }
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/api-timesheet"))
        .finish()
}

use actix_web::{web, App, HttpResponse, HttpServer};
use chrono::NaiveDate;
use dotenv::dotenv;
use log::info;
use serde_json::json;
use std::env;

use timesheet_backend::models::membership::Membership;
use timesheet_backend::models::project::Project;
use timesheet_backend::models::time_entry::TimeEntry;
use timesheet_backend::models::user::User;
use timesheet_backend::routes::routes;
use timesheet_backend::store::directory::Directory;
use timesheet_backend::store::session::SessionStore;
use timesheet_backend::store::settings::{PLUGIN_NAMESPACE, SettingsStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let directory = web::Data::new(Directory::new());
    let sessions = web::Data::new(SessionStore::new());
    let settings = web::Data::new(SettingsStore::new());

    seed_demo_data(&directory, &sessions, &settings);

    let server_address = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    println!("Server running at http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .app_data(directory.clone())
            .app_data(sessions.clone())
            .app_data(settings.clone())
            .route(
                "/",
                web::get().to(|| async {
                    HttpResponse::Ok().body("Hello, this is the timesheet backend.")
                }),
            )
            .configure(routes::timesheet_configure)
            .configure(routes::admin_configure)
    })
    .bind(server_address.as_str())?
    .run()
    .await
}

// Stands in for the host application: a couple of users, projects and
// logged hours, plus one ready-made session per user so the API can be
// exercised with curl right away.
fn seed_demo_data(directory: &Directory, sessions: &SessionStore, settings: &SettingsStore) {
    directory.add_user(User {
        user_id: 1,
        user_name: "alice".to_string(),
        user_email: "alice@example.com".to_string(),
        admin: false,
    });
    directory.add_user(User {
        user_id: 2,
        user_name: "ben".to_string(),
        user_email: "ben@example.com".to_string(),
        admin: true,
    });

    directory.add_project(Project {
        project_id: 1,
        project_name: "Website Redesign".to_string(),
        is_public: false,
    });
    directory.add_project(Project {
        project_id: 2,
        project_name: "Internal Tooling".to_string(),
        is_public: false,
    });
    directory.add_project(Project {
        project_id: 3,
        project_name: "Open Documentation".to_string(),
        is_public: true,
    });

    directory.add_membership(Membership {
        user_id: 1,
        project_id: 1,
        permissions: vec!["view_time_entries".to_string()],
    });

    let entries = [
        (1, 1, 1, "2026-08-03", 6.0, "Development", "Navigation rework"),
        (2, 1, 1, "2026-08-04", 2.5, "Code review", ""),
        (3, 2, 2, "2026-08-04", 4.0, "Maintenance", "CI runners"),
        (4, 3, 1, "2026-08-05", 1.5, "Documentation", "Getting-started guide"),
    ];
    for (entry_id, project_id, user_id, spent_on, hours, activity, comments) in entries {
        directory.add_time_entry(TimeEntry {
            entry_id,
            project_id,
            user_id,
            spent_on: NaiveDate::parse_from_str(spent_on, "%Y-%m-%d").expect("valid seed date"),
            hours,
            activity: activity.to_string(),
            comments: comments.to_string(),
        });
    }

    let mut plugin = serde_json::Map::new();
    plugin.insert("list_size".to_string(), json!(25));
    plugin.insert("precision".to_string(), json!("2"));
    settings.replace(PLUGIN_NAMESPACE, plugin);

    for (user_id, user_name) in [(1, "alice"), (2, "ben")] {
        let session_id = sessions.create();
        sessions.sign_in(&session_id, user_id);
        info!("Demo session for {}: {}", user_name, session_id);
    }
}

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::info;

use super::admin_models::{AdminDefaultResponse, SettingsResponse, UpdateSettingsRequest};
use crate::models::user::User;
use crate::store::directory::Directory;
use crate::store::session::SessionStore;
use crate::store::settings::{PLUGIN_NAMESPACE, ReportSettings, SettingsStore};

// Only administrators may touch the plugin settings.
fn require_admin(
    req: &HttpRequest,
    sessions: &SessionStore,
    directory: &Directory,
) -> Result<User, HttpResponse> {
    let session_id = match req.cookie("session_id") {
        Some(cookie) => cookie.value().to_string(),
        None => {
            info!("Session ID not found in cookies for an admin request");
            return Err(HttpResponse::BadRequest().json(AdminDefaultResponse {
                success: false,
                message: "Session ID not found".to_string(),
            }));
        }
    };

    let user = sessions
        .user_id(&session_id)
        .and_then(|user_id| directory.user(user_id));
    match user {
        Some(user) if user.admin => Ok(user),
        Some(user) => {
            info!("User {} is not an administrator", user.user_name);
            Err(HttpResponse::Forbidden().json(AdminDefaultResponse {
                success: false,
                message: "Administrator access required".to_string(),
            }))
        }
        None => Err(HttpResponse::BadRequest().json(AdminDefaultResponse {
            success: false,
            message: "Invalid session ID".to_string(),
        })),
    }
}

pub async fn get_settings(
    directory: web::Data<Directory>,
    sessions: web::Data<SessionStore>,
    settings: web::Data<SettingsStore>,
    req: HttpRequest,
) -> impl Responder {
    if let Err(response) = require_admin(&req, &sessions, &directory) {
        return response;
    }

    let report_settings = ReportSettings::read(&settings);
    HttpResponse::Ok().json(SettingsResponse {
        settings: settings.namespace(PLUGIN_NAMESPACE),
        list_size: report_settings.list_size,
        precision: report_settings.precision,
    })
}

pub async fn update_settings(
    directory: web::Data<Directory>,
    sessions: web::Data<SessionStore>,
    settings: web::Data<SettingsStore>,
    req: HttpRequest,
    request: web::Json<UpdateSettingsRequest>,
) -> impl Responder {
    let admin = match require_admin(&req, &sessions, &directory) {
        Ok(user) => user,
        Err(response) => return response,
    };

    settings.replace(PLUGIN_NAMESPACE, request.into_inner().settings);
    info!("Plugin settings replaced by {}", admin.user_name);

    HttpResponse::Ok().json(AdminDefaultResponse {
        success: true,
        message: "Settings updated successfully".to_string(),
    })
}

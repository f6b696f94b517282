use actix_web::web;

use super::admin::admin_handlers;
use super::timesheet::timesheet_handlers;

pub fn timesheet_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api-timesheet")
            .route("", web::get().to(timesheet_handlers::index))
            .route("/", web::get().to(timesheet_handlers::index))
            .route("/report", web::post().to(timesheet_handlers::create))
            .route("/reset", web::delete().to(timesheet_handlers::reset)),
    );
}

pub fn admin_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/settings", web::get().to(admin_handlers::get_settings))
            .route("/settings", web::put().to(admin_handlers::update_settings)),
    );
}

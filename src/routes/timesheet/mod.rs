pub mod timesheet_handlers;
pub mod timesheet_models;

use serde::{Deserialize, Serialize};

use crate::models::timesheet::Timesheet;

// Report request: the filter form fields of a submission.
#[derive(Deserialize)]
pub struct CreateReportRequest {
    #[serde(rename = "query-only", default)]
    pub query_only: bool,
    #[serde(default)]
    pub timesheet: TimesheetParams,
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct TimesheetParams {
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub date_to: Option<String>,
}

// Everything the report views need, by name.
#[derive(Serialize)]
pub struct TimesheetResponse {
    pub timesheet: Timesheet,
    pub list_size: u32,
    pub precision: u32,
}

// Sent when the viewer cannot see any project at all.
#[derive(Serialize)]
pub struct NoProjectsResponse {
    pub no_projects: bool,
    pub message: String,
}

// One line of the CSV report, names already resolved.
pub struct CsvRow {
    pub spent_on: String,
    pub user: String,
    pub project: String,
    pub activity: String,
    pub comments: String,
    pub hours: f64,
}

pub fn csv_body(rows: &[CsvRow]) -> String {
    let mut out = String::from("date,user,project,activity,comments,hours\n");
    for row in rows {
        let fields = [
            csv_field(&row.spent_on),
            csv_field(&row.user),
            csv_field(&row.project),
            csv_field(&row.activity),
            csv_field(&row.comments),
            row.hours.to_string(),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

fn csv_field(field: &str) -> String {
    if field.contains(&[',', '"', '\n'][..]) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub mod attendance;
pub mod auth;
pub mod health;
pub mod metrics;
pub mod report;
pub mod swagger;
pub mod timetable;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::utils::AppError;

/// Registers every route. Shared by `main` and the endpoint tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        // Health & metrics
        .route("/", web::get().to(health::root))
        .route("/health", web::get().to(health::health_check))
        .route("/metrics", web::get().to(metrics::get_metrics))
        // Credentials
        .route("/register", web::post().to(auth::register))
        .route("/login", web::post().to(auth::login))
        // Attendance
        .route("/mark-attendance", web::post().to(attendance::mark_attendance))
        .route(
            "/attendance/{studentId}/{date}",
            web::get().to(attendance::get_attendance),
        )
        // Timetable
        .route("/timetable", web::post().to(timetable::save_timetable))
        .route("/timetable/{studentId}", web::get().to(timetable::get_timetable))
        // Report
        .route("/report/{studentId}", web::get().to(report::get_report));
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("❌ Rejected body on {} {}: {}", req.method(), req.path(), err);
    AppError::MalformedPayload(err.to_string()).into()
}

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Service API",
        version = "1.0.0",
        description = "Registers students, records daily attendance per teaching hour, stores weekly timetables and reports per-subject attendance percentages."
    ),
    paths(
        // Health & Metrics
        crate::api::health::root,
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Auth
        crate::api::auth::register,
        crate::api::auth::login,

        // Attendance
        crate::api::attendance::mark_attendance,
        crate::api::attendance::get_attendance,

        // Timetable
        crate::api::timetable::save_timetable,
        crate::api::timetable::get_timetable,

        // Report
        crate::api::report::get_report,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::CredentialsRequest,
            crate::models::AuthResponse,
            crate::models::UserResponse,
            crate::models::MarkAttendanceRequest,
            crate::models::AttendanceEntry,
            crate::models::AttendanceStatus,
            crate::models::AttendanceRecordResponse,
            crate::models::MessageResponse,
            crate::models::SaveTimetableRequest,
            crate::models::WeeklySchedule,
            crate::models::TimetableResponse,
            crate::models::SaveTimetableResponse,
            crate::models::SubjectReport,
        )
    ),
    tags(
        (name = "Health", description = "Liveness, storage health and request counters."),
        (name = "Auth", description = "Username/password registration and login. Responses never include credential material."),
        (name = "Attendance", description = "Per-day attendance; saving a day replaces it entirely."),
        (name = "Timetable", description = "One weekly timetable per student, created or replaced on save."),
        (name = "Report", description = "Per-subject totals and presence percentages over the full history."),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/register",
            "/login",
            "/mark-attendance",
            "/attendance/{studentId}/{date}",
            "/timetable",
            "/timetable/{studentId}",
            "/report/{studentId}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}

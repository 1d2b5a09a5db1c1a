use actix_web::{web, HttpResponse};

use crate::{
    models::{AttendanceRecordResponse, MarkAttendanceRequest, MessageResponse},
    services::attendance_service,
    state::AppState,
    utils::AppError,
};

/// POST /mark-attendance - Replaces the student's attendance for the day
#[utoipa::path(
    post,
    path = "/mark-attendance",
    tag = "Attendance",
    request_body = MarkAttendanceRequest,
    responses(
        (status = 200, description = "Attendance saved", body = MessageResponse),
        (status = 400, description = "Missing fields or malformed body"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn mark_attendance(
    state: web::Data<AppState>,
    request: web::Json<MarkAttendanceRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    log::info!(
        "🗓️  POST /mark-attendance - student: {}, date: {}",
        request.student_id.as_deref().unwrap_or("N/A"),
        request.date.as_deref().unwrap_or("N/A")
    );

    attendance_service::mark_attendance(state.store.as_ref(), request).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Attendance saved")))
}

/// GET /attendance/{studentId}/{date}
#[utoipa::path(
    get,
    path = "/attendance/{studentId}/{date}",
    tag = "Attendance",
    params(
        ("studentId" = String, Path, description = "Student identifier"),
        ("date" = String, Path, description = "Calendar day, e.g. 2024-03-01")
    ),
    responses(
        (status = 200, description = "Attendance for the day", body = AttendanceRecordResponse),
        (status = 404, description = "No attendance found for this date")
    )
)]
pub async fn get_attendance(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (student_id, date) = path.into_inner();
    log::info!("📋 GET /attendance/{}/{}", student_id, date);

    let record =
        attendance_service::get_attendance_for_day(state.store.as_ref(), &student_id, &date).await?;

    Ok(HttpResponse::Ok().json(AttendanceRecordResponse::from(record)))
}

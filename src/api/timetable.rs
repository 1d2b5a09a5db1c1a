use actix_web::{web, HttpResponse};

use crate::{
    models::{SaveTimetableRequest, SaveTimetableResponse, TimetableResponse},
    services::timetable_service,
    state::AppState,
    utils::AppError,
};

/// POST /timetable - Creates or replaces the student's weekly timetable
#[utoipa::path(
    post,
    path = "/timetable",
    tag = "Timetable",
    request_body = SaveTimetableRequest,
    responses(
        (status = 200, description = "Timetable saved", body = SaveTimetableResponse),
        (status = 400, description = "Missing fields or malformed body"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn save_timetable(
    state: web::Data<AppState>,
    request: web::Json<SaveTimetableRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    log::info!(
        "📅 POST /timetable - student: {}",
        request.student_id.as_deref().unwrap_or("N/A")
    );

    let timetable = timetable_service::save_timetable(state.store.as_ref(), request).await?;

    Ok(HttpResponse::Ok().json(SaveTimetableResponse {
        message: "Timetable saved".to_string(),
        data: timetable.into(),
    }))
}

/// GET /timetable/{studentId} - `{}` when the student has no timetable yet
#[utoipa::path(
    get,
    path = "/timetable/{studentId}",
    tag = "Timetable",
    params(("studentId" = String, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "The timetable, or an empty object when none is set", body = TimetableResponse),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn get_timetable(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let student_id = path.into_inner();
    log::info!("📅 GET /timetable/{}", student_id);

    match timetable_service::get_timetable(state.store.as_ref(), &student_id).await? {
        Some(timetable) => Ok(HttpResponse::Ok().json(TimetableResponse::from(timetable))),
        None => Ok(HttpResponse::Ok().json(serde_json::json!({}))),
    }
}

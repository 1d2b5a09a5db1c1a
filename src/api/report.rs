use actix_web::{web, HttpResponse};

use crate::{models::SubjectReport, services::report_service, state::AppState, utils::AppError};

/// GET /report/{studentId} - Per-subject attendance percentages
#[utoipa::path(
    get,
    path = "/report/{studentId}",
    tag = "Report",
    params(("studentId" = String, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "One entry per subject, in order of first appearance", body = Vec<SubjectReport>),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn get_report(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let student_id = path.into_inner();
    log::info!("📊 GET /report/{}", student_id);

    let report = report_service::build_report(state.store.as_ref(), &student_id).await?;
    log::info!("✅ Report for {} covers {} subjects", student_id, report.len());

    Ok(HttpResponse::Ok().json(report))
}

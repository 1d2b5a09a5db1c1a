use crate::{
    database::AttendanceRepository,
    models::{AttendanceRecord, MarkAttendanceRequest},
    utils::AppError,
};

/// Full-day overwrite: whatever was stored for (studentId, date) is replaced
/// by the request's entries.
pub async fn mark_attendance<R>(repo: &R, request: MarkAttendanceRequest) -> Result<(), AppError>
where
    R: AttendanceRepository + ?Sized,
{
    let record = request.validate()?;
    log::debug!(
        "Saving {} entries for {} on {}",
        record.daily_attendance.len(),
        record.student_id,
        record.date
    );

    repo.replace_attendance(record)
        .await
        .map_err(AppError::store("Server error"))
}

pub async fn get_attendance_for_day<R>(
    repo: &R,
    student_id: &str,
    date: &str,
) -> Result<AttendanceRecord, AppError>
where
    R: AttendanceRepository + ?Sized,
{
    repo.find_attendance(student_id, date)
        .await
        .map_err(AppError::store("Error fetching attendance"))?
        .ok_or_else(|| AppError::NotFound("No attendance found for this date".to_string()))
}

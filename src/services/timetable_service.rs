use crate::{
    database::TimetableRepository,
    models::{SaveTimetableRequest, Timetable},
    utils::AppError,
};

pub async fn save_timetable<R>(repo: &R, request: SaveTimetableRequest) -> Result<Timetable, AppError>
where
    R: TimetableRepository + ?Sized,
{
    let timetable = request.validate()?;

    repo.upsert_timetable(timetable)
        .await
        .map_err(AppError::store("Error saving timetable"))
}

/// `None` means no timetable was ever saved for the student.
pub async fn get_timetable<R>(repo: &R, student_id: &str) -> Result<Option<Timetable>, AppError>
where
    R: TimetableRepository + ?Sized,
{
    repo.find_timetable(student_id)
        .await
        .map_err(AppError::store("Error fetching timetable"))
}

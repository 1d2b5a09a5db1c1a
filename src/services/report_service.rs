use std::collections::HashMap;

use crate::{
    database::AttendanceRepository,
    models::{AttendanceRecord, AttendanceStatus, SubjectReport},
    utils::AppError,
};

/// Rolls up the student's full attendance history per subject.
pub async fn build_report<R>(repo: &R, student_id: &str) -> Result<Vec<SubjectReport>, AppError>
where
    R: AttendanceRepository + ?Sized,
{
    let records = repo
        .list_attendance(student_id)
        .await
        .map_err(AppError::store("Error generating report"))?;

    log::debug!("Building report for {} from {} records", student_id, records.len());

    Ok(summarize(&records))
}

/// Groups every entry by subject, in order of first appearance. Entries
/// without a subject are ignored.
pub fn summarize(records: &[AttendanceRecord]) -> Vec<SubjectReport> {
    let mut tallies: Vec<(&str, u32, u32)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in records.iter().flat_map(|r| &r.daily_attendance) {
        let Some(subject) = entry.subject.as_deref().filter(|s| !s.is_empty()) else {
            continue;
        };

        let slot = *index.entry(subject).or_insert_with(|| {
            tallies.push((subject, 0, 0));
            tallies.len() - 1
        });

        let tally = &mut tallies[slot];
        tally.1 += 1;
        if entry.status == AttendanceStatus::Present {
            tally.2 += 1;
        }
    }

    tallies
        .into_iter()
        .map(|(subject, total, present)| SubjectReport {
            subject: subject.to_string(),
            total,
            present,
            percentage: percentage(present, total),
        })
        .collect()
}

/// Two decimals; exact half ties round up (3.125 -> "3.13").
fn percentage(present: u32, total: u32) -> String {
    let value = f64::from(present) / f64::from(total) * 100.0;
    format!("{:.2}", (value * 100.0).round() / 100.0)
}

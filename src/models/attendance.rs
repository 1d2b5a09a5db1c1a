use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::{missing, non_blank};
use crate::utils::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub enum AttendanceStatus {
    Present,
    #[default]
    Absent,
}

/// One teaching hour within a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AttendanceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default)]
    pub status: AttendanceStatus,
}

/// Document stored in the `attendances` collection, one per (studentId, date).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub student_id: String,
    pub date: String,
    #[serde(default)]
    pub daily_attendance: Vec<AttendanceEntry>,
}

/// Body of `POST /mark-attendance`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    pub student_id: Option<String>,
    pub date: Option<String>,
    pub daily_attendance: Option<Vec<AttendanceEntry>>,
}

impl MarkAttendanceRequest {
    /// An empty `dailyAttendance` list is accepted; an absent one is not.
    pub fn validate(self) -> Result<AttendanceRecord, AppError> {
        match (non_blank(self.student_id), non_blank(self.date), self.daily_attendance) {
            (Some(student_id), Some(date), Some(daily_attendance)) => Ok(AttendanceRecord {
                id: None,
                student_id,
                date,
                daily_attendance,
            }),
            (student_id, date, entries) => Err(missing(&[
                ("studentId", student_id.is_none()),
                ("date", date.is_none()),
                ("dailyAttendance", entries.is_none()),
            ])),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecordResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub student_id: String,
    pub date: String,
    pub daily_attendance: Vec<AttendanceEntry>,
}

impl From<AttendanceRecord> for AttendanceRecordResponse {
    fn from(record: AttendanceRecord) -> Self {
        AttendanceRecordResponse {
            id: record.id.map(|id| id.to_hex()).unwrap_or_default(),
            student_id: record.student_id,
            date: record.date,
            daily_attendance: record.daily_attendance,
        }
    }
}

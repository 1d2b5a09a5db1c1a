use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::{missing, non_blank};
use crate::utils::AppError;

/// Subject names per teaching day, in period order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct WeeklySchedule {
    #[serde(default)]
    pub monday: Vec<String>,
    #[serde(default)]
    pub tuesday: Vec<String>,
    #[serde(default)]
    pub wednesday: Vec<String>,
    #[serde(default)]
    pub thursday: Vec<String>,
    #[serde(default)]
    pub friday: Vec<String>,
}

/// Document stored in the `timetables` collection, one per student.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timetable {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub student_id: String,
    #[serde(default)]
    pub timetable: WeeklySchedule,
}

/// Body of `POST /timetable`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveTimetableRequest {
    pub student_id: Option<String>,
    pub timetable: Option<WeeklySchedule>,
}

impl SaveTimetableRequest {
    pub fn validate(self) -> Result<Timetable, AppError> {
        match (non_blank(self.student_id), self.timetable) {
            (Some(student_id), Some(timetable)) => Ok(Timetable {
                id: None,
                student_id,
                timetable,
            }),
            (student_id, timetable) => Err(missing(&[
                ("studentId", student_id.is_none()),
                ("timetable", timetable.is_none()),
            ])),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimetableResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub student_id: String,
    pub timetable: WeeklySchedule,
}

impl From<Timetable> for TimetableResponse {
    fn from(timetable: Timetable) -> Self {
        TimetableResponse {
            id: timetable.id.map(|id| id.to_hex()).unwrap_or_default(),
            student_id: timetable.student_id,
            timetable: timetable.timetable,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SaveTimetableResponse {
    pub message: String,
    pub data: TimetableResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_days_default_to_empty_and_extra_keys_are_dropped() {
        let schedule: WeeklySchedule = serde_json::from_value(json!({
            "monday": ["Math", "Physics"],
            "saturday": ["Sports"]
        }))
        .unwrap();

        assert_eq!(schedule.monday, vec!["Math", "Physics"]);
        assert!(schedule.friday.is_empty());
        assert!(serde_json::to_value(&schedule).unwrap().get("saturday").is_none());
    }

    #[test]
    fn null_timetable_counts_as_missing() {
        let request: SaveTimetableRequest =
            serde_json::from_value(json!({ "studentId": "s1", "timetable": null })).unwrap();
        match request.validate() {
            Err(AppError::MissingFields(fields)) => assert_eq!(fields, vec!["timetable"]),
            other => panic!("unexpected: {:?}", other),
        }
    }
}

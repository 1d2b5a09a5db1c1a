pub mod attendance;
pub mod report;
pub mod timetable;
pub mod user;

pub use attendance::*;
pub use report::*;
pub use timetable::*;
pub use user::*;

use crate::utils::AppError;

/// Treats empty and whitespace-only strings as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn missing(fields: &[(&'static str, bool)]) -> AppError {
    AppError::MissingFields(
        fields
            .iter()
            .filter(|(_, absent)| *absent)
            .map(|(name, _)| *name)
            .collect(),
    )
}

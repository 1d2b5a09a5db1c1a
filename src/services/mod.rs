pub mod attendance_service;
pub mod auth_service;
pub mod report_service;
pub mod timetable_service;

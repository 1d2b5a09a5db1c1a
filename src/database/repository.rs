//! Storage traits shared by the MongoDB and in-memory backends.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AttendanceRecord, Timetable, User};

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique key is already taken.
    #[error("{entity} already exists: {key}")]
    AlreadyExists { entity: &'static str, key: String },

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// The backend answered with something we cannot interpret.
    #[error("Unexpected document: {0}")]
    InvalidDocument(String),
}

impl StoreError {
    pub fn already_exists(entity: &'static str, key: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity,
            key: key.into(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Inserts a new user and returns it with its assigned id. Fails with
    /// [`StoreError::AlreadyExists`] when the username is taken.
    async fn create_user(&self, user: User) -> StoreResult<User>;
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Stores `record` as the only record for its (student, date) pair,
    /// replacing any previous one in a single operation.
    async fn replace_attendance(&self, record: AttendanceRecord) -> StoreResult<()>;

    async fn find_attendance(
        &self,
        student_id: &str,
        date: &str,
    ) -> StoreResult<Option<AttendanceRecord>>;

    /// All records of a student in storage order.
    async fn list_attendance(&self, student_id: &str) -> StoreResult<Vec<AttendanceRecord>>;
}

#[async_trait]
pub trait TimetableRepository: Send + Sync {
    /// Inserts or replaces the student's timetable and returns the stored
    /// document.
    async fn upsert_timetable(&self, timetable: Timetable) -> StoreResult<Timetable>;

    async fn find_timetable(&self, student_id: &str) -> StoreResult<Option<Timetable>>;
}

/// A complete storage backend.
#[async_trait]
pub trait Store: UserRepository + AttendanceRepository + TimetableRepository {
    fn backend_name(&self) -> &'static str;

    async fn ping(&self) -> StoreResult<()>;

    /// Releases backend resources. Called once the HTTP server has stopped.
    async fn shutdown(&self);
}

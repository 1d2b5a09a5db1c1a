use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::ReturnDocument;

use super::{
    AttendanceRepository, MongoDB, Store, StoreError, StoreResult, TimetableRepository,
    UserRepository, ATTENDANCES, TIMETABLES, USERS,
};
use crate::models::{AttendanceRecord, Timetable, User};

const DUPLICATE_KEY: i32 = 11000;

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY,
        _ => false,
    }
}

#[async_trait]
impl UserRepository for MongoDB {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let user = self
            .collection::<User>(USERS)
            .find_one(doc! { "username": username })
            .await?;
        Ok(user)
    }

    async fn create_user(&self, user: User) -> StoreResult<User> {
        let user = User { id: None, ..user };

        let result = self
            .collection::<User>(USERS)
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    StoreError::already_exists("User", user.username.as_str())
                } else {
                    StoreError::Database(e)
                }
            })?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::InvalidDocument(format!("user id is not an ObjectId: {}", result.inserted_id))
        })?;

        Ok(User { id: Some(id), ..user })
    }
}

#[async_trait]
impl AttendanceRepository for MongoDB {
    async fn replace_attendance(&self, record: AttendanceRecord) -> StoreResult<()> {
        let filter = doc! { "studentId": &record.student_id, "date": &record.date };
        // An existing document keeps its _id, so the replacement carries none.
        let record = AttendanceRecord { id: None, ..record };

        self.collection::<AttendanceRecord>(ATTENDANCES)
            .replace_one(filter, &record)
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn find_attendance(
        &self,
        student_id: &str,
        date: &str,
    ) -> StoreResult<Option<AttendanceRecord>> {
        let record = self
            .collection::<AttendanceRecord>(ATTENDANCES)
            .find_one(doc! { "studentId": student_id, "date": date })
            .await?;
        Ok(record)
    }

    async fn list_attendance(&self, student_id: &str) -> StoreResult<Vec<AttendanceRecord>> {
        let cursor = self
            .collection::<AttendanceRecord>(ATTENDANCES)
            .find(doc! { "studentId": student_id })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}

#[async_trait]
impl TimetableRepository for MongoDB {
    async fn upsert_timetable(&self, timetable: Timetable) -> StoreResult<Timetable> {
        let filter = doc! { "studentId": &timetable.student_id };
        let student_id = timetable.student_id.clone();
        let timetable = Timetable { id: None, ..timetable };

        self.collection::<Timetable>(TIMETABLES)
            .find_one_and_replace(filter, &timetable)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| {
                StoreError::InvalidDocument(format!("upsert returned no timetable for {}", student_id))
            })
    }

    async fn find_timetable(&self, student_id: &str) -> StoreResult<Option<Timetable>> {
        let timetable = self
            .collection::<Timetable>(TIMETABLES)
            .find_one(doc! { "studentId": student_id })
            .await?;
        Ok(timetable)
    }
}

#[async_trait]
impl Store for MongoDB {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn ping(&self) -> StoreResult<()> {
        self.database().run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn shutdown(&self) {
        log::info!("🔌 Closing MongoDB connections");
        self.client().clone().shutdown().await;
    }
}

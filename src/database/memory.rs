//! In-process store, selected with `STORAGE_BACKEND=memory` and used by the
//! tests. Data lives only as long as the process.

use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{
    AttendanceRepository, Store, StoreError, StoreResult, TimetableRepository, UserRepository,
};
use crate::models::{AttendanceRecord, Timetable, User};

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
    // Vec keeps insertion order, which the report relies on.
    attendances: RwLock<Vec<AttendanceRecord>>,
    timetables: RwLock<HashMap<String, Timetable>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(username).cloned())
    }

    async fn create_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(StoreError::already_exists("User", user.username));
        }
        let user = User {
            id: Some(ObjectId::new()),
            ..user
        };
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }
}

#[async_trait]
impl AttendanceRepository for MemoryStore {
    async fn replace_attendance(&self, record: AttendanceRecord) -> StoreResult<()> {
        let mut attendances = self.attendances.write().await;
        let existing = attendances
            .iter_mut()
            .find(|r| r.student_id == record.student_id && r.date == record.date);

        match existing {
            Some(slot) => {
                slot.daily_attendance = record.daily_attendance;
            }
            None => attendances.push(AttendanceRecord {
                id: Some(ObjectId::new()),
                ..record
            }),
        }
        Ok(())
    }

    async fn find_attendance(
        &self,
        student_id: &str,
        date: &str,
    ) -> StoreResult<Option<AttendanceRecord>> {
        let attendances = self.attendances.read().await;
        Ok(attendances
            .iter()
            .find(|r| r.student_id == student_id && r.date == date)
            .cloned())
    }

    async fn list_attendance(&self, student_id: &str) -> StoreResult<Vec<AttendanceRecord>> {
        let attendances = self.attendances.read().await;
        Ok(attendances
            .iter()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TimetableRepository for MemoryStore {
    async fn upsert_timetable(&self, timetable: Timetable) -> StoreResult<Timetable> {
        let mut timetables = self.timetables.write().await;
        let stored = timetables
            .entry(timetable.student_id.clone())
            .and_modify(|existing| existing.timetable = timetable.timetable.clone())
            .or_insert_with(|| Timetable {
                id: Some(ObjectId::new()),
                ..timetable
            });
        Ok(stored.clone())
    }

    async fn find_timetable(&self, student_id: &str) -> StoreResult<Option<Timetable>> {
        let timetables = self.timetables.read().await;
        Ok(timetables.get(student_id).cloned())
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn shutdown(&self) {}
}

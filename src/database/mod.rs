mod memory;
mod mongo;
mod repository;

pub use memory::MemoryStore;
pub use repository::*;

use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use std::time::Duration;

pub const USERS: &str = "users";
pub const ATTENDANCES: &str = "attendances";
pub const TIMETABLES: &str = "timetables";

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    /// Connects, verifies the server answers and creates the unique indexes.
    /// `fallback_db` is used when the URI names no database.
    pub async fn new(uri: &str, fallback_db: &str) -> StoreResult<Self> {
        let mut client_options = ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        // Timeouts given in the URI win.
        client_options.connect_timeout = client_options
            .connect_timeout
            .or(Some(Duration::from_secs(5)));
        client_options.server_selection_timeout = client_options
            .server_selection_timeout
            .or(Some(Duration::from_secs(5)));

        let db_name = client_options
            .default_database
            .clone()
            .unwrap_or_else(|| fallback_db.to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names().await?;
        log::info!("✅ MongoDB connected, database: {}", db_name);

        let mongodb = Self { client, db };
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Unique indexes backing username uniqueness and the one-document-per-key
    /// rule of attendance records and timetables.
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        self.create_unique_index(USERS, doc! { "username": 1 }).await;
        self.create_unique_index(ATTENDANCES, doc! { "studentId": 1, "date": 1 })
            .await;
        self.create_unique_index(TIMETABLES, doc! { "studentId": 1 }).await;

        log::info!("✅ Database indexes ready");
    }

    async fn create_unique_index(&self, collection: &str, keys: Document) {
        let fields = keys.keys().cloned().collect::<Vec<_>>().join(", ");
        let index = IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match self.collection::<Document>(collection).create_index(index).await {
            Ok(_) => log::info!("   ✅ Index ready: {}({})", collection, fields),
            Err(e) => log::warn!(
                "   ⚠️  Could not create unique index {}({}): {}",
                collection,
                fields,
                e
            ),
        }
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceEntry, AttendanceRecord, AttendanceStatus};

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_attendance_replace() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://127.0.0.1:27017/attendance_test".to_string());

        let db = MongoDB::new(&uri, "attendance_test").await.unwrap();
        db.ping().await.unwrap();

        let student_id = mongodb::bson::oid::ObjectId::new().to_hex();
        let record = |subject: &str| AttendanceRecord {
            id: None,
            student_id: student_id.clone(),
            date: "2024-03-01".into(),
            daily_attendance: vec![AttendanceEntry {
                hour: Some(1),
                subject: Some(subject.into()),
                status: AttendanceStatus::Present,
            }],
        };

        db.replace_attendance(record("Math")).await.unwrap();
        db.replace_attendance(record("Physics")).await.unwrap();

        let records = db.list_attendance(&student_id).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].daily_attendance[0].subject.as_deref(),
            Some("Physics")
        );

        db.collection::<Document>(ATTENDANCES)
            .delete_many(doc! { "studentId": &student_id })
            .await
            .unwrap();
    }
}

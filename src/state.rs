use std::sync::Arc;

use crate::{
    config::{Config, StorageBackend},
    database::{MemoryStore, MongoDB, Store, StoreResult},
};

/// Shared handler state, injected with `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    pub fn in_memory(bcrypt_cost: u32) -> Self {
        Self::new(Arc::new(MemoryStore::new()), bcrypt_cost)
    }

    /// Opens the configured backend. MongoDB must be reachable at startup.
    pub async fn from_config(config: &Config) -> StoreResult<Self> {
        match config.storage {
            StorageBackend::MongoDb => {
                let db = MongoDB::new(&config.database_url, &config.database_name).await?;
                Ok(Self::new(Arc::new(db), config.bcrypt_cost))
            }
            StorageBackend::Memory => {
                log::warn!("⚠️  Using in-memory storage: data is lost on restart");
                Ok(Self::in_memory(config.bcrypt_cost))
            }
        }
    }
}

use crate::core::errors::RoomshareError;
use crate::infrastructure::storage::{Collection, RecordStore, record_id};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Keeps each collection in insertion order so listing is stable.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    collections: Arc<RwLock<HashMap<Collection, Vec<Value>>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        InMemoryRecordStore {
            collections: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn require_id(collection: Collection, record: &Value) -> Result<String, RoomshareError> {
    record_id(record)
        .map(String::from)
        .ok_or_else(|| RoomshareError::StorageError(format!("Record for {} has no _id", collection)))
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Value>, RoomshareError> {
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).cloned().unwrap_or_default())
    }

    async fn get_by_id(&self, collection: Collection, id: &str) -> Result<Option<Value>, RoomshareError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|records| records.iter().find(|r| record_id(r) == Some(id)).cloned()))
    }

    async fn create(&self, collection: Collection, record: Value) -> Result<Value, RoomshareError> {
        let id = require_id(collection, &record)?;
        let mut collections = self.collections.write().await;
        let records = collections.entry(collection).or_default();
        if records.iter().any(|r| record_id(r) == Some(id.as_str())) {
            return Err(RoomshareError::StorageError(format!(
                "Record {} already exists in {}",
                id, collection
            )));
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, collection: Collection, record: Value) -> Result<Value, RoomshareError> {
        let id = require_id(collection, &record)?;
        let mut collections = self.collections.write().await;
        let slot = collections
            .get_mut(&collection)
            .and_then(|records| records.iter_mut().find(|r| record_id(r) == Some(id.as_str())))
            .ok_or_else(|| RoomshareError::StorageError(format!("Record {} not found in {}", id, collection)))?;
        *slot = record.clone();
        Ok(record)
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), RoomshareError> {
        let mut collections = self.collections.write().await;
        let records = collections.entry(collection).or_default();
        let before = records.len();
        records.retain(|r| record_id(r) != Some(id));
        if records.len() == before {
            return Err(RoomshareError::StorageError(format!(
                "Record {} not found in {}",
                id, collection
            )));
        }
        Ok(())
    }
}

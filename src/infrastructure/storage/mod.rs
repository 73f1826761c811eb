use crate::core::errors::RoomshareError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Named collections of the external record store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    #[serde(rename = "listings")]
    Listings,
    #[serde(rename = "roommate-groups")]
    RoommateGroups,
    #[serde(rename = "group-expenses")]
    GroupExpenses,
    #[serde(rename = "user-profiles")]
    UserProfiles,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Listings => "listings",
            Collection::RoommateGroups => "roommate-groups",
            Collection::GroupExpenses => "group-expenses",
            Collection::UserProfiles => "user-profiles",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Field holding a record's identifier.
pub const ID_FIELD: &str = "_id";

pub fn record_id(record: &Value) -> Option<&str> {
    record.get(ID_FIELD).and_then(Value::as_str)
}

/// Plain CRUD over JSON records. No filtering, sorting or paging happens
/// here; callers fetch a whole collection and work on it in memory.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list(&self, collection: Collection) -> Result<Vec<Value>, RoomshareError>;
    async fn get_by_id(&self, collection: Collection, id: &str) -> Result<Option<Value>, RoomshareError>;
    async fn create(&self, collection: Collection, record: Value) -> Result<Value, RoomshareError>;
    /// Replaces the whole record with the same `_id`.
    async fn update(&self, collection: Collection, record: Value) -> Result<Value, RoomshareError>;
    async fn delete(&self, collection: Collection, id: &str) -> Result<(), RoomshareError>;
}

pub mod in_memory;

pub mod in_memory;

use crate::core::errors::RoomshareError;
use crate::core::models::audit::AppLog;
use async_trait::async_trait;

/// Sink for the application's action log.
#[async_trait]
pub trait LoggingService: Send + Sync {
    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<(), RoomshareError>;
    async fn get_logs(&self) -> Result<Vec<AppLog>, RoomshareError>;
    async fn get_user_logs(&self, user_id: &str) -> Result<Vec<AppLog>, RoomshareError>;
}

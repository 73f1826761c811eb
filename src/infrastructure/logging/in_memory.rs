use crate::core::errors::RoomshareError;
use crate::core::models::audit::AppLog;
use crate::infrastructure::logging::LoggingService;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryLogging {
    logs: Arc<RwLock<Vec<AppLog>>>,
}

impl InMemoryLogging {
    pub fn new() -> Self {
        InMemoryLogging {
            logs: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl LoggingService for InMemoryLogging {
    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<(), RoomshareError> {
        if !details.is_object() {
            return Err(RoomshareError::LoggingError(format!(
                "Details for {} must be a JSON object",
                action
            )));
        }
        let mut logs = self.logs.write().await;
        logs.push(AppLog {
            id: Uuid::new_v4().to_string(),
            action: action.to_string(),
            user_id: user_id.map(String::from),
            details,
            timestamp: chrono::Utc::now(),
        });
        Ok(())
    }

    async fn get_logs(&self) -> Result<Vec<AppLog>, RoomshareError> {
        let logs = self.logs.read().await;
        Ok(logs.clone())
    }

    async fn get_user_logs(&self, user_id: &str) -> Result<Vec<AppLog>, RoomshareError> {
        let logs = self.logs.read().await;
        Ok(logs
            .iter()
            .filter(|l| l.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }
}

use async_trait::async_trait;

/// Logging collaborator for bot activity
#[async_trait]
pub trait EventLog: Send + Sync {
    async fn log(&self, message: &str);

    async fn log_exception(&self, context: &str, error: &(dyn std::error::Error + Send + Sync));
}

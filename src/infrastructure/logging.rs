//! Logging setup and the tracing-backed event log

use async_trait::async_trait;

use crate::domain::traits::EventLog;

/// Initialize the global subscriber. `RUST_LOG` refines the default `info`.
pub fn init() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();
}

/// Event log writing bot activity to the `bot_activity` tracing target
#[derive(Debug, Default, Clone)]
pub struct TracingEventLog;

#[async_trait]
impl EventLog for TracingEventLog {
    async fn log(&self, message: &str) {
        tracing::info!(target: "bot_activity", "{}", message);
    }

    async fn log_exception(&self, context: &str, error: &(dyn std::error::Error + Send + Sync)) {
        let mut chain = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            chain.push_str(": ");
            chain.push_str(&cause.to_string());
            source = cause.source();
        }
        tracing::error!(target: "bot_activity", context = %context, "Error in {}: {}", context, chain);
    }
}

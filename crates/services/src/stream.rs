//! Stream lifecycle - start, stop, status, and metadata updates

use std::sync::Arc;

use tracing::{info, instrument};

use contracts::{AggregateReport, Operation, PlatformExecutor};
use dispatcher::FanOutCoordinator;

/// Stream lifecycle operations across all registered platforms
pub struct StreamService<E> {
    coordinator: Arc<FanOutCoordinator<E>>,
}

impl<E> StreamService<E>
where
    E: PlatformExecutor + Send + Sync + 'static,
{
    /// Create a service over a shared coordinator
    pub fn new(coordinator: Arc<FanOutCoordinator<E>>) -> Self {
        Self { coordinator }
    }

    /// Start streaming on every platform
    #[instrument(name = "stream_start", skip(self))]
    pub async fn start_streaming(&self) -> AggregateReport {
        let report = self.coordinator.dispatch(&Operation::start_stream()).await;
        info!(
            live = report.success_count(),
            failed = report.failure_count(),
            "Stream start dispatched"
        );
        report
    }

    /// Stop streaming on every platform
    #[instrument(name = "stream_stop", skip(self))]
    pub async fn stop_streaming(&self) -> AggregateReport {
        let report = self.coordinator.dispatch(&Operation::stop_stream()).await;
        info!(
            stopped = report.success_count(),
            failed = report.failure_count(),
            "Stream stop dispatched"
        );
        report
    }

    /// Fetch current stream status from every platform
    #[instrument(name = "stream_status", skip(self))]
    pub async fn stream_status(&self) -> AggregateReport {
        self.coordinator.dispatch(&Operation::stream_status()).await
    }

    /// Push updated stream metadata (title, reels, tags) to every platform
    #[instrument(name = "stream_update_info", skip(self, info))]
    pub async fn update_stream_info(&self, info: serde_json::Value) -> AggregateReport {
        self.coordinator
            .dispatch(&Operation::update_stream_info(info))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{coordinator, TableExecutor};

    #[tokio::test]
    async fn test_start_reaches_every_platform() {
        let coordinator = Arc::new(coordinator(
            &["twitch", "youtube", "facebook"],
            TableExecutor::new().respond("/startStream", serde_json::json!({"live": true})),
        ));
        let service = StreamService::new(coordinator);

        let report = service.start_streaming().await;
        assert_eq!(report.success_count(), 3);
        assert!(report.successes().iter().all(|s| s.body["live"] == true));
    }

    #[tokio::test]
    async fn test_stop_survives_single_platform_outage() {
        let coordinator = Arc::new(coordinator(
            &["twitch", "youtube"],
            TableExecutor::new().failing("twitch"),
        ));
        let service = StreamService::new(coordinator);

        let report = service.stop_streaming().await;
        assert_eq!(report.success_count(), 1);
        assert_eq!(report.failures()[0].platform_id.as_str(), "twitch");
    }

    #[tokio::test]
    async fn test_update_carries_payload() {
        let coordinator = Arc::new(coordinator(&["twitch"], TableExecutor::new()));
        let service = StreamService::new(coordinator);

        let report = service
            .update_stream_info(serde_json::json!({"title": "finale"}))
            .await;
        assert_eq!(report.success_count(), 1);
    }
}

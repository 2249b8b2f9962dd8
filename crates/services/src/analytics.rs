//! Analytics collection - viewers, engagement, content performance

use std::sync::Arc;

use tracing::{info, instrument};

use contracts::{AggregateReport, Operation, PlatformExecutor};
use dispatcher::FanOutCoordinator;

/// One round of analytics fetched from every platform
#[derive(Debug)]
pub struct AnalyticsOverview {
    pub viewers: AggregateReport,
    pub engagement: AggregateReport,
    pub performance: AggregateReport,
}

impl AnalyticsOverview {
    /// Total viewer count summed across platforms that answered.
    ///
    /// Platforms report `{"viewers": <n>}`; bodies without the field
    /// contribute zero.
    pub fn total_viewers(&self) -> u64 {
        self.viewers
            .successes()
            .iter()
            .filter_map(|s| s.body["viewers"].as_u64())
            .sum()
    }
}

/// Analytics fetches across all registered platforms
pub struct AnalyticsService<E> {
    coordinator: Arc<FanOutCoordinator<E>>,
}

impl<E> AnalyticsService<E>
where
    E: PlatformExecutor + Send + Sync + 'static,
{
    /// Create a service over a shared coordinator
    pub fn new(coordinator: Arc<FanOutCoordinator<E>>) -> Self {
        Self { coordinator }
    }

    /// Fetch viewer analytics
    #[instrument(name = "analytics_viewers", skip(self))]
    pub async fn viewer_analytics(&self) -> AggregateReport {
        self.coordinator
            .dispatch(&Operation::viewer_analytics())
            .await
    }

    /// Fetch engagement analytics (likes, shares, comments)
    #[instrument(name = "analytics_engagement", skip(self))]
    pub async fn engagement_analytics(&self) -> AggregateReport {
        self.coordinator
            .dispatch(&Operation::engagement_analytics())
            .await
    }

    /// Fetch content performance analytics
    #[instrument(name = "analytics_performance", skip(self))]
    pub async fn content_performance(&self) -> AggregateReport {
        self.coordinator
            .dispatch(&Operation::content_performance())
            .await
    }

    /// Fetch all three analytics families
    #[instrument(name = "analytics_collect", skip(self))]
    pub async fn collect(&self) -> AnalyticsOverview {
        let overview = AnalyticsOverview {
            viewers: self.viewer_analytics().await,
            engagement: self.engagement_analytics().await,
            performance: self.content_performance().await,
        };
        info!(
            total_viewers = overview.total_viewers(),
            "Analytics collected"
        );
        overview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{coordinator, TableExecutor};

    #[tokio::test]
    async fn test_total_viewers_sums_answering_platforms() {
        let coordinator = Arc::new(coordinator(
            &["twitch", "youtube", "facebook"],
            TableExecutor::new()
                .respond("/analytics/viewers", serde_json::json!({"viewers": 120}))
                .failing("facebook"),
        ));
        let service = AnalyticsService::new(coordinator);

        let overview = service.collect().await;
        // facebook is down; twitch + youtube answer with 120 each
        assert_eq!(overview.total_viewers(), 240);
        assert_eq!(overview.viewers.failure_count(), 1);
    }

    #[tokio::test]
    async fn test_bodies_without_viewer_field_contribute_zero() {
        let coordinator = Arc::new(coordinator(
            &["twitch"],
            TableExecutor::new().respond("/analytics/viewers", serde_json::json!({"other": 1})),
        ));
        let service = AnalyticsService::new(coordinator);

        let overview = service.collect().await;
        assert_eq!(overview.total_viewers(), 0);
    }

    #[tokio::test]
    async fn test_collect_issues_all_three_fetches() {
        let coordinator = Arc::new(coordinator(&["twitch"], TableExecutor::new()));
        let metrics_handle = Arc::clone(&coordinator);
        let service = AnalyticsService::new(coordinator);

        service.collect().await;
        assert_eq!(metrics_handle.metrics().dispatch_count, 3);
    }
}

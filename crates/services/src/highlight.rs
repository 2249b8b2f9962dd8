//! Highlight reel generation from per-platform stream events

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use contracts::{AggregateReport, PlatformExecutor};
use dispatcher::FanOutCoordinator;

use crate::stream::StreamService;

/// One event reported in a platform's stream status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamEvent {
    /// Event category as reported by the platform (e.g. "highlight", "chat")
    #[serde(rename = "type")]
    pub kind: String,

    /// Engagement score for the event
    #[serde(default)]
    pub engagement: f64,

    /// Seconds into the stream, when the platform reports it
    #[serde(default)]
    pub timestamp: Option<u64>,
}

impl StreamEvent {
    /// Whether this event qualifies for a highlight reel at the given
    /// engagement threshold
    pub fn is_key_moment(&self, threshold: f64) -> bool {
        self.kind == "highlight" && self.engagement > threshold
    }
}

/// A generated highlight reel
#[derive(Debug)]
pub struct HighlightReel {
    /// Key moments that made the cut, in reported order
    pub moments: Vec<StreamEvent>,
    /// Publish report, present only when the reel was non-empty
    pub publish: Option<AggregateReport>,
}

impl HighlightReel {
    pub fn is_empty(&self) -> bool {
        self.moments.is_empty()
    }
}

/// Builds highlight reels from live stream status
pub struct HighlightService<E> {
    streams: StreamService<E>,
    threshold: f64,
}

/// Select the events that qualify as key moments
pub fn identify_key_moments(events: &[StreamEvent], threshold: f64) -> Vec<StreamEvent> {
    events
        .iter()
        .filter(|e| e.is_key_moment(threshold))
        .cloned()
        .collect()
}

impl<E> HighlightService<E>
where
    E: PlatformExecutor + Send + Sync + 'static,
{
    /// Create a service with the studio's engagement threshold
    pub fn new(coordinator: Arc<FanOutCoordinator<E>>, threshold: f64) -> Self {
        Self {
            streams: StreamService::new(coordinator),
            threshold,
        }
    }

    /// Fetch stream status everywhere, collect qualifying events, and
    /// publish the reel back as updated stream info.
    ///
    /// An empty reel is not published.
    #[instrument(name = "highlight_generate", skip(self), fields(threshold = self.threshold))]
    pub async fn generate_reel(&self) -> HighlightReel {
        let status = self.streams.stream_status().await;

        let mut moments = Vec::new();
        for success in status.successes() {
            let events = Self::parse_events(&success.body);
            debug!(
                platform = %success.platform_id,
                events = events.len(),
                "Collected stream events"
            );
            moments.extend(identify_key_moments(&events, self.threshold));
        }

        if moments.is_empty() {
            info!("No key moments above threshold, skipping reel");
            return HighlightReel {
                moments,
                publish: None,
            };
        }

        let payload = serde_json::json!({ "highlight_reel": moments });
        let publish = self.streams.update_stream_info(payload).await;
        info!(
            moments = moments.len(),
            published = publish.success_count(),
            "Highlight reel published"
        );

        HighlightReel {
            moments,
            publish: Some(publish),
        }
    }

    /// Extract events from a status body; malformed entries are skipped
    fn parse_events(body: &serde_json::Value) -> Vec<StreamEvent> {
        body["events"]
            .as_array()
            .map(|events| {
                events
                    .iter()
                    .filter_map(|e| serde_json::from_value(e.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

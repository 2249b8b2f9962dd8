//! Mock Studio Example
//!
//! Runs a full studio session against a scripted in-process executor, so no
//! real platform APIs (or network) are required.
//!
//! Run with: cargo run --bin mock_studio

use std::sync::Arc;

use config_loader::{ConfigFormat, ConfigLoader};
use contracts::{ErrorKind, Operation, Outcome, PlatformConfig, PlatformExecutor};
use dispatcher::{FanOutCoordinator, PlatformRegistry};
use observability::DispatchMetricsAggregator;
use services::{AnalyticsService, HighlightService, ModerationService, StreamService};

const DEMO_CONFIG: &str = r#"
[studio]
name = "mock-studio"
highlight_threshold = 75.0

[dispatch]
request_timeout_sec = 5

[[platforms]]
id = "twitch"
base_url = "https://api.twitch.example/v1"
credential = "twitch-demo-token"

[[platforms]]
id = "youtube"
base_url = "https://api.youtube.example/v3"
credential = "youtube-demo-token"

[[platforms]]
id = "facebook"
base_url = "https://api.facebook.example/v18"
credential = "facebook-demo-token"
"#;

/// Scripted executor: facebook is down for maintenance, everyone else
/// answers with canned studio payloads.
struct ScriptedExecutor;

impl PlatformExecutor for ScriptedExecutor {
    async fn execute(&self, config: &PlatformConfig, operation: &Operation) -> Outcome {
        if config.id.as_str() == "facebook" {
            return Outcome::failure(
                config.id.clone(),
                ErrorKind::HttpStatus(503),
                "scheduled maintenance",
            );
        }

        let body = match operation.endpoint.as_str() {
            "/startStream" => serde_json::json!({"live": true}),
            "/stopStream" => serde_json::json!({"live": false}),
            "/stream/status" => serde_json::json!({
                "live": true,
                "events": [
                    {"type": "highlight", "engagement": 91.0, "timestamp": 45},
                    {"type": "highlight", "engagement": 60.0, "timestamp": 90},
                    {"type": "chat", "engagement": 99.0}
                ]
            }),
            "/analytics/viewers" => serde_json::json!({"viewers": 150}),
            "/analytics/engagement" => serde_json::json!({"likes": 42, "shares": 7}),
            "/analytics/performance" => serde_json::json!({"score": 0.87}),
            "/moderation/filter" => serde_json::json!({"action": "timeout"}),
            _ => serde_json::json!({}),
        };
        Outcome::success(config.id.clone(), body)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("Starting Mock Studio Demo");

    // ==== Stage 1: Load the blueprint ====
    let blueprint = ConfigLoader::load_from_str(DEMO_CONFIG, ConfigFormat::Toml)?;
    tracing::info!(
        studio = %blueprint.studio.name,
        platforms = blueprint.platforms.len(),
        "Blueprint loaded"
    );

    // ==== Stage 2: Wire the dispatch stack ====
    let registry = PlatformRegistry::from_configs(blueprint.platforms.clone())?;
    let coordinator = Arc::new(FanOutCoordinator::new(registry, ScriptedExecutor));

    let streams = StreamService::new(Arc::clone(&coordinator));
    let analytics = AnalyticsService::new(Arc::clone(&coordinator));
    let moderation = ModerationService::new(Arc::clone(&coordinator));
    let highlights = HighlightService::new(
        Arc::clone(&coordinator),
        blueprint.studio.highlight_threshold,
    );

    let mut aggregator = DispatchMetricsAggregator::new();

    // ==== Stage 3: Go live ====
    let report = streams.start_streaming().await;
    aggregator.update(&report, 0.0);
    println!("start -> {report}");

    // ==== Stage 4: Moderation round ====
    let summary = moderation.activate().await;
    aggregator.update(&summary.filter, 0.0);
    aggregator.update(&summary.manage, 0.0);
    for event in summary.enforcements() {
        println!("moderation -> {}: {}", event.platform_id, event.action);
    }

    // ==== Stage 5: Analytics round ====
    let overview = analytics.collect().await;
    aggregator.update(&overview.viewers, 0.0);
    aggregator.update(&overview.engagement, 0.0);
    aggregator.update(&overview.performance, 0.0);
    println!("analytics -> {} total viewers", overview.total_viewers());

    // ==== Stage 6: Highlight reel ====
    let reel = highlights.generate_reel().await;
    println!("highlights -> {} qualifying moment(s)", reel.moments.len());
    if let Some(publish) = reel.publish {
        aggregator.update(&publish, 0.0);
    }

    // ==== Stage 7: Wrap up ====
    let report = streams.stop_streaming().await;
    aggregator.update(&report, 0.0);
    println!("stop -> {report}");

    println!("\n{}", aggregator.summary());

    tracing::info!("Mock Studio Demo complete");
    Ok(())
}

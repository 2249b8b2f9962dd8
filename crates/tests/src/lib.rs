//! # Integration Tests
//!
//! Cross-crate and end-to-end tests.
//!
//! Covers:
//! - Contract sanity checks
//! - Dispatch properties (conservation, isolation, determinism, timeouts)
//! - HTTP end-to-end scenarios against local fixture servers

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
    }

    #[test]
    fn test_report_display_names_counts() {
        let report = contracts::AggregateReport::from_outcomes(vec![
            contracts::Outcome::success("twitch", serde_json::json!({})),
            contracts::Outcome::failure(
                "facebook",
                contracts::ErrorKind::HttpStatus(500),
                "server error",
            ),
        ]);
        let rendered = report.to_string();
        assert!(rendered.contains('1'));
        assert!(rendered.contains("facebook"));
    }
}

#[cfg(test)]
mod dispatch_properties {
    use std::time::Duration;

    use contracts::{
        ContractError, ErrorKind, Operation, Outcome, PlatformConfig, PlatformExecutor,
        PlatformId,
    };
    use dispatcher::{DispatchOptions, FanOutCoordinator, PlatformRegistry};

    /// Deterministic stub: fails the platforms it is told to, optionally
    /// sleeping per platform to scramble completion order.
    struct ScriptedExecutor {
        fail: Vec<String>,
        delays_ms: Vec<(String, u64)>,
    }

    impl ScriptedExecutor {
        fn ok() -> Self {
            Self {
                fail: Vec::new(),
                delays_ms: Vec::new(),
            }
        }

        fn failing(ids: &[&str]) -> Self {
            Self {
                fail: ids.iter().map(|s| s.to_string()).collect(),
                delays_ms: Vec::new(),
            }
        }

        fn with_delay(mut self, id: &str, ms: u64) -> Self {
            self.delays_ms.push((id.to_string(), ms));
            self
        }
    }

    impl PlatformExecutor for ScriptedExecutor {
        async fn execute(&self, config: &PlatformConfig, _operation: &Operation) -> Outcome {
            if let Some((_, ms)) = self
                .delays_ms
                .iter()
                .find(|(id, _)| id == config.id.as_str())
            {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
            if self.fail.iter().any(|id| id == config.id.as_str()) {
                Outcome::failure(config.id.clone(), ErrorKind::Transport, "unreachable")
            } else {
                Outcome::success(config.id.clone(), serde_json::json!({"ok": true}))
            }
        }
    }

    fn registry(ids: &[&str]) -> PlatformRegistry {
        PlatformRegistry::from_configs(ids.iter().map(|id| PlatformConfig {
            id: PlatformId::from(*id),
            base_url: format!("https://api.{id}.example"),
            credential: format!("{id}-token"),
        }))
        .unwrap()
    }

    /// Every dispatch yields exactly one outcome per platform.
    #[tokio::test]
    async fn test_outcome_conservation() {
        let ids = ["twitch", "youtube", "facebook", "kick"];
        let coordinator = FanOutCoordinator::new(registry(&ids), ScriptedExecutor::failing(&["kick"]));

        let report = coordinator.dispatch(&Operation::stream_status()).await;
        assert_eq!(report.total(), ids.len());
        assert_eq!(report.success_count() + report.failure_count(), ids.len());
    }

    /// One failing platform never disturbs the outcomes of the others.
    #[tokio::test]
    async fn test_fault_isolation() {
        let coordinator = FanOutCoordinator::new(
            registry(&["twitch", "youtube", "facebook"]),
            ScriptedExecutor::failing(&["youtube"]),
        );

        let report = coordinator.dispatch(&Operation::start_stream()).await;
        let failed: Vec<&str> = report
            .failures()
            .iter()
            .map(|f| f.platform_id.as_str())
            .collect();
        assert_eq!(failed, vec!["youtube"]);
        let succeeded: Vec<&str> = report
            .successes()
            .iter()
            .map(|s| s.platform_id.as_str())
            .collect();
        assert_eq!(succeeded, vec!["facebook", "twitch"]);
    }

    /// Re-dispatching the same operation gives the same aggregate shape.
    #[tokio::test]
    async fn test_dispatch_is_repeatable() {
        let coordinator = FanOutCoordinator::new(
            registry(&["twitch", "youtube"]),
            ScriptedExecutor::failing(&["twitch"]),
        );

        let first = coordinator.dispatch(&Operation::stream_status()).await;
        let second = coordinator.dispatch(&Operation::stream_status()).await;
        assert_eq!(first.success_count(), second.success_count());
        assert_eq!(first.failure_count(), second.failure_count());
        assert_eq!(
            first.failures()[0].platform_id,
            second.failures()[0].platform_id
        );
    }

    /// Report ordering is by platform id, never completion order.
    #[tokio::test]
    async fn test_report_order_is_independent_of_completion_order() {
        // "alpha" finishes last on purpose
        let coordinator = FanOutCoordinator::new(
            registry(&["alpha", "beta", "gamma"]),
            ScriptedExecutor::ok().with_delay("alpha", 80),
        );

        let report = coordinator.dispatch(&Operation::stream_status()).await;
        let order: Vec<&str> = report
            .successes()
            .iter()
            .map(|s| s.platform_id.as_str())
            .collect();
        assert_eq!(order, vec!["alpha", "beta", "gamma"]);
    }

    /// A call still pending at the deadline becomes a timeout failure while
    /// finished calls keep their outcomes, and the dispatch itself returns
    /// shortly after the deadline rather than waiting the call out.
    #[tokio::test]
    async fn test_deadline_spares_completed_calls() {
        let coordinator = FanOutCoordinator::with_options(
            registry(&["fast", "slow"]),
            ScriptedExecutor::ok().with_delay("slow", 300),
            DispatchOptions {
                deadline: Some(Duration::from_millis(50)),
            },
        );

        let started = std::time::Instant::now();
        let report = coordinator.dispatch(&Operation::stream_status()).await;
        assert!(
            started.elapsed() < Duration::from_millis(250),
            "dispatch outlived its deadline: {:?}",
            started.elapsed()
        );
        assert_eq!(report.success_count(), 1);
        assert_eq!(report.successes()[0].platform_id.as_str(), "fast");
        assert_eq!(report.failures()[0].platform_id.as_str(), "slow");
        assert_eq!(report.failures()[0].kind, ErrorKind::Timeout);
    }

    /// Registry rejects duplicates at registration and unknown ids at lookup.
    #[test]
    fn test_registry_errors() {
        let mut reg = registry(&["twitch"]);
        let dup = reg.register(PlatformConfig {
            id: PlatformId::from("twitch"),
            base_url: "https://elsewhere.example".into(),
            credential: "other".into(),
        });
        assert!(matches!(dup, Err(ContractError::DuplicatePlatform { .. })));

        let missing = reg.get(&PlatformId::from("tiktok"));
        assert!(matches!(
            missing,
            Err(ContractError::UnknownPlatform { .. })
        ));
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{ErrorKind, Operation, PlatformConfig, PlatformId};
    use dispatcher::{DispatchOptions, FanOutCoordinator, PlatformRegistry};
    use executor::HttpExecutor;
    use observability::DispatchMetricsAggregator;
    use services::{AnalyticsService, ModerationAction, ModerationService, StreamService};

    /// Spawn a local fixture server, returning its base URL
    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// A healthy platform fixture answering every studio endpoint
    fn healthy_platform(viewers: u64) -> Router {
        Router::new()
            .route(
                "/startStream",
                post(|| async { Json(serde_json::json!({"live": true})) }),
            )
            .route(
                "/stopStream",
                post(|| async { Json(serde_json::json!({"live": false})) }),
            )
            .route(
                "/stream/status",
                get(|| async { Json(serde_json::json!({"live": true, "events": []})) }),
            )
            .route(
                "/analytics/viewers",
                get(move || async move { Json(serde_json::json!({"viewers": viewers})) }),
            )
            .route(
                "/analytics/engagement",
                get(|| async { Json(serde_json::json!({"likes": 10, "shares": 3})) }),
            )
            .route(
                "/analytics/performance",
                get(|| async { Json(serde_json::json!({"score": 0.9})) }),
            )
            .route(
                "/moderation/filter",
                post(|| async { Json(serde_json::json!({"action": "timeout"})) }),
            )
            .route(
                "/moderation/manage",
                post(|| async { Json(serde_json::json!({"managed": true})) }),
            )
    }

    /// A platform fixture that is hard down
    fn broken_platform() -> Router {
        Router::new().fallback(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "maintenance") })
    }

    async fn studio_coordinator() -> Arc<FanOutCoordinator<HttpExecutor>> {
        let twitch = serve(healthy_platform(120)).await;
        let youtube = serve(healthy_platform(80)).await;
        let facebook = serve(broken_platform()).await;

        let configs = [
            ("twitch", twitch),
            ("youtube", youtube),
            ("facebook", facebook),
        ]
        .into_iter()
        .map(|(id, base_url)| PlatformConfig {
            id: PlatformId::from(id),
            base_url,
            credential: format!("{id}-token"),
        });

        let registry = PlatformRegistry::from_configs(configs).unwrap();
        let executor = HttpExecutor::new(Duration::from_secs(2)).unwrap();
        Arc::new(FanOutCoordinator::with_options(
            registry,
            executor,
            DispatchOptions::default(),
        ))
    }

    /// Full scenario: twitch and youtube answer, facebook is down with
    /// HTTP 500, and the session-level operations keep working.
    #[tokio::test]
    async fn test_two_live_platforms_survive_one_outage() {
        let coordinator = studio_coordinator().await;

        let streams = StreamService::new(Arc::clone(&coordinator));
        let report = streams.start_streaming().await;

        assert_eq!(report.total(), 3);
        assert_eq!(report.success_count(), 2);
        let failure = &report.failures()[0];
        assert_eq!(failure.platform_id.as_str(), "facebook");
        assert_eq!(failure.kind, ErrorKind::HttpStatus(500));
        assert!(failure.message.contains("maintenance"));

        // Stopping still reaches the healthy platforms
        let report = streams.stop_streaming().await;
        assert_eq!(report.success_count(), 2);
    }

    #[tokio::test]
    async fn test_analytics_aggregate_across_live_platforms() {
        let coordinator = studio_coordinator().await;
        let analytics = AnalyticsService::new(coordinator);

        let overview = analytics.collect().await;
        assert_eq!(overview.total_viewers(), 200);
        assert_eq!(overview.viewers.failure_count(), 1);
        assert_eq!(overview.engagement.success_count(), 2);
        assert_eq!(overview.performance.success_count(), 2);
    }

    #[tokio::test]
    async fn test_moderation_decisions_from_live_platforms() {
        let coordinator = studio_coordinator().await;
        let moderation = ModerationService::new(coordinator);

        let summary = moderation.activate().await;
        // Filter and manage decisions from both live platforms; only the
        // filter responses carry an enforced action
        assert_eq!(summary.events.len(), 4);
        assert_eq!(summary.enforcements().count(), 2);
        assert!(summary
            .enforcements()
            .all(|e| e.action == ModerationAction::Timeout));
        assert_eq!(summary.filter.failure_count(), 1);
    }

    #[tokio::test]
    async fn test_subset_dispatch_skips_the_broken_platform() {
        let coordinator = studio_coordinator().await;

        let targets = vec![PlatformId::from("twitch"), PlatformId::from("youtube")];
        let report = coordinator
            .dispatch_to(&Operation::stream_status(), &targets)
            .await
            .unwrap();
        assert_eq!(report.total(), 2);
        assert!(report.all_succeeded());
    }

    /// Folding live dispatch reports into the session aggregator yields the
    /// end-of-session summary the CLI prints.
    #[tokio::test]
    async fn test_session_summary_aggregates_live_dispatches() {
        let coordinator = studio_coordinator().await;
        let streams = StreamService::new(Arc::clone(&coordinator));
        let mut aggregator = DispatchMetricsAggregator::new();

        let report = streams.start_streaming().await;
        aggregator.update(&report, 12.0);
        let report = streams.stop_streaming().await;
        aggregator.update(&report, 8.0);

        assert_eq!(aggregator.total_dispatches, 2);
        assert_eq!(aggregator.total_successes, 4);
        assert_eq!(aggregator.total_failures, 2);
        assert_eq!(aggregator.platform_failures.get("facebook"), Some(&2));

        let summary = aggregator.summary().to_string();
        assert!(summary.contains("Dispatches: 2"));
        assert!(summary.contains("facebook: 2"));
    }

    /// Config file to live dispatch: the blueprint wires the whole stack.
    #[tokio::test]
    async fn test_blueprint_drives_the_dispatch_stack() {
        let base_url = serve(healthy_platform(42)).await;

        let config = format!(
            r#"
[studio]
name = "e2e"

[dispatch]
request_timeout_sec = 2

[[platforms]]
id = "twitch"
base_url = "{base_url}"
credential = "twitch-token"
"#
        );

        let blueprint = ConfigLoader::load_from_str(&config, ConfigFormat::Toml).unwrap();
        let registry = PlatformRegistry::from_configs(blueprint.platforms.clone()).unwrap();
        let executor = HttpExecutor::from_dispatch_config(&blueprint.dispatch).unwrap();
        let coordinator = FanOutCoordinator::new(registry, executor);

        let report = coordinator.dispatch(&Operation::viewer_analytics()).await;
        assert_eq!(report.success_count(), 1);
        assert_eq!(report.successes()[0].body["viewers"], 42);
    }
}

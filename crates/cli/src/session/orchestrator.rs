//! Session orchestrator - coordinates the studio services over one session.
//!
//! Mirrors a live studio session: go live everywhere, run a moderation
//! round, collect analytics, then serve commands until shutdown. On
//! shutdown, streams are stopped everywhere before the summary is printed.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{info, warn};

use contracts::{AggregateReport, CommandSource, StudioBlueprint};
use dispatcher::{DispatchOptions, FanOutCoordinator, PlatformRegistry};
use executor::HttpExecutor;
use observability::record_dispatch_report;
use services::{
    AnalyticsService, CommandRouter, HighlightService, ModerationService, StreamService,
    StudioCommand,
};

use super::{SessionStats, StdinCommandSource};

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// The studio blueprint configuration
    pub blueprint: StudioBlueprint,

    /// Session duration (None = run until shutdown signal)
    pub duration: Option<Duration>,

    /// Whether to run a moderation round at session start
    pub moderation: bool,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,
}

/// Main session orchestrator
pub struct Session {
    config: SessionConfig,
}

impl Session {
    /// Create a new session with the given configuration
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Run the session to completion
    ///
    /// `shutdown` resolving ends the session the same way the configured
    /// duration does: streams are stopped and the stats returned.
    pub async fn run(self, shutdown: impl Future<Output = ()>) -> Result<SessionStats> {
        let start_time = Instant::now();
        let blueprint = &self.config.blueprint;

        // Initialize Metrics (optional)
        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
            info!("Metrics endpoint available on port {}", port);
        }

        // Wire registry, executor, coordinator
        let registry = PlatformRegistry::from_configs(blueprint.platforms.clone())
            .context("Failed to build platform registry")?;
        let platforms = registry.len();

        let executor = HttpExecutor::from_dispatch_config(&blueprint.dispatch)
            .context("Failed to build HTTP executor")?;
        let options = DispatchOptions {
            deadline: blueprint.dispatch.deadline_sec.map(Duration::from_secs),
        };
        let coordinator = Arc::new(FanOutCoordinator::with_options(registry, executor, options));

        let streams = StreamService::new(Arc::clone(&coordinator));
        let analytics = AnalyticsService::new(Arc::clone(&coordinator));
        let moderation = ModerationService::new(Arc::clone(&coordinator));
        let highlights = HighlightService::new(
            Arc::clone(&coordinator),
            blueprint.studio.highlight_threshold,
        );

        let mut stats = SessionStats {
            platforms,
            ..Default::default()
        };

        // Go live
        info!(studio = %blueprint.studio.name, platforms, "Going live");
        let report = Self::observed(&mut stats, "/startStream", streams.start_streaming()).await;
        if report.success_count() == 0 && report.total() > 0 {
            warn!("No platform accepted the stream start");
        }

        // Opening moderation round
        if self.config.moderation {
            let started = Instant::now();
            let summary = moderation.activate().await;
            Self::record(&mut stats, "/moderation/filter", &summary.filter, started);
            Self::record(&mut stats, "/moderation/manage", &summary.manage, started);
            stats.enforcements += summary.enforcements().count() as u64;
            for event in summary.enforcements() {
                info!(platform = %event.platform_id, action = %event.action, "Moderation enforcement");
            }
        }

        // First analytics round
        Self::collect_analytics(&mut stats, &analytics).await;

        // Command loop
        let router = CommandRouter::new();
        let mut source = StdinCommandSource::new();
        let mut input_closed = false;

        tokio::pin!(shutdown);
        let session_timer = async {
            match self.config.duration {
                Some(duration) => tokio::time::sleep(duration).await,
                None => std::future::pending().await,
            }
        };
        tokio::pin!(session_timer);

        info!("Session ready - accepting commands");

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    warn!("Shutdown signal received, ending session");
                    break;
                }
                _ = &mut session_timer => {
                    info!("Session duration elapsed, ending session");
                    break;
                }
                line = source.next_command(), if !input_closed => {
                    let Some(line) = line else {
                        info!("Command input closed");
                        input_closed = true;
                        continue;
                    };
                    match router.parse(&line) {
                        Some(StudioCommand::Quit) => {
                            stats.commands_handled += 1;
                            info!("Quit command received, ending session");
                            break;
                        }
                        Some(command) => {
                            stats.commands_handled += 1;
                            self.handle_command(
                                command,
                                &mut stats,
                                &streams,
                                &analytics,
                                &moderation,
                                &highlights,
                            )
                            .await;
                        }
                        None => {
                            println!("Unrecognized command: {line}");
                        }
                    }
                }
            }
        }

        // Stop streams everywhere before reporting
        info!("Stopping streams...");
        let report = Self::observed(&mut stats, "/stopStream", streams.stop_streaming()).await;
        for failure in report.failures() {
            warn!(
                platform = %failure.platform_id,
                kind = %failure.kind,
                "Stream did not stop cleanly"
            );
        }

        stats.duration = start_time.elapsed();
        info!(
            duration_secs = stats.duration.as_secs_f64(),
            "Session shutdown complete"
        );

        Ok(stats)
    }

    async fn handle_command<E>(
        &self,
        command: StudioCommand,
        stats: &mut SessionStats,
        streams: &StreamService<E>,
        analytics: &AnalyticsService<E>,
        moderation: &ModerationService<E>,
        highlights: &HighlightService<E>,
    ) where
        E: contracts::PlatformExecutor + Send + Sync + 'static,
    {
        match command {
            StudioCommand::StartStream => {
                let report =
                    Self::observed(stats, "/startStream", streams.start_streaming()).await;
                println!("{report}");
            }
            StudioCommand::StopStream => {
                let report = Self::observed(stats, "/stopStream", streams.stop_streaming()).await;
                println!("{report}");
            }
            StudioCommand::Status => {
                let report = Self::observed(stats, "/stream/status", streams.stream_status()).await;
                println!("{report}");
            }
            StudioCommand::Analytics => {
                Self::collect_analytics(stats, analytics).await;
            }
            StudioCommand::Moderate => {
                let started = Instant::now();
                let summary = moderation.activate().await;
                Self::record(stats, "/moderation/filter", &summary.filter, started);
                Self::record(stats, "/moderation/manage", &summary.manage, started);
                stats.enforcements += summary.enforcements().count() as u64;
                println!(
                    "Moderation: {} decision(s), {} enforcement(s)",
                    summary.events.len(),
                    summary.enforcements().count()
                );
            }
            StudioCommand::Highlights => {
                let started = Instant::now();
                let reel = highlights.generate_reel().await;
                stats.key_moments += reel.moments.len() as u64;
                if let Some(ref publish) = reel.publish {
                    Self::record(stats, "/stream/update", publish, started);
                    println!(
                        "Highlight reel: {} moment(s) published to {} platform(s)",
                        reel.moments.len(),
                        publish.success_count()
                    );
                } else {
                    println!("Highlight reel: no qualifying moments");
                }
            }
            // Quit is handled by the caller
            StudioCommand::Quit => {}
        }
    }

    async fn collect_analytics<E>(stats: &mut SessionStats, analytics: &AnalyticsService<E>)
    where
        E: contracts::PlatformExecutor + Send + Sync + 'static,
    {
        let started = Instant::now();
        let overview = analytics.collect().await;
        Self::record(stats, "/analytics/viewers", &overview.viewers, started);
        Self::record(stats, "/analytics/engagement", &overview.engagement, started);
        Self::record(
            stats,
            "/analytics/performance",
            &overview.performance,
            started,
        );
        println!(
            "Analytics: {} total viewers across {} platform(s)",
            overview.total_viewers(),
            overview.viewers.success_count()
        );
    }

    /// Await a dispatch, then fold its report into metrics and stats
    async fn observed(
        stats: &mut SessionStats,
        endpoint: &str,
        dispatch: impl Future<Output = AggregateReport>,
    ) -> AggregateReport {
        let started = Instant::now();
        let report = dispatch.await;
        Self::record(stats, endpoint, &report, started);
        report
    }

    fn record(
        stats: &mut SessionStats,
        endpoint: &str,
        report: &AggregateReport,
        started: Instant,
    ) {
        record_dispatch_report(endpoint, report);
        stats
            .dispatch_metrics
            .update(report, started.elapsed().as_secs_f64() * 1000.0);
    }
}

//! Content moderation - platform filter and interaction management

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use contracts::{AggregateReport, Operation, PlatformExecutor, PlatformId};
use dispatcher::FanOutCoordinator;

/// Action a platform's moderation endpoint decided on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationAction {
    /// Content blocked outright
    Block,
    /// Offending viewer timed out
    Timeout,
    /// No action required (also the fallback for unknown/missing actions)
    Allow,
}

impl ModerationAction {
    /// Parse the `action` field of a moderation response body.
    ///
    /// Platform payloads are not trusted: anything other than the known
    /// action strings degrades to `Allow` rather than failing the call.
    pub fn from_body(body: &serde_json::Value) -> Self {
        match body["action"].as_str() {
            Some("block") => Self::Block,
            Some("timeout") => Self::Timeout,
            Some(other) => {
                warn!(action = other, "Unknown moderation action, treating as allow");
                Self::Allow
            }
            None => Self::Allow,
        }
    }
}

impl std::fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Block => write!(f, "block"),
            Self::Timeout => write!(f, "timeout"),
            Self::Allow => write!(f, "allow"),
        }
    }
}

/// One platform's moderation decision
#[derive(Debug, Clone, PartialEq)]
pub struct ModerationEvent {
    pub platform_id: PlatformId,
    pub action: ModerationAction,
}

/// Result of one moderation round across all platforms
#[derive(Debug)]
pub struct ModerationSummary {
    /// Content filter fan-out report
    pub filter: AggregateReport,
    /// Interaction management fan-out report
    pub manage: AggregateReport,
    /// Decisions extracted from the filter and manage responses, one per
    /// answering platform per round
    pub events: Vec<ModerationEvent>,
}

impl ModerationSummary {
    /// Platforms that decided to block or time out
    pub fn enforcements(&self) -> impl Iterator<Item = &ModerationEvent> {
        self.events
            .iter()
            .filter(|e| e.action != ModerationAction::Allow)
    }
}

/// Moderation across all registered platforms
pub struct ModerationService<E> {
    coordinator: Arc<FanOutCoordinator<E>>,
}

impl<E> ModerationService<E>
where
    E: PlatformExecutor + Send + Sync + 'static,
{
    /// Create a service over a shared coordinator
    pub fn new(coordinator: Arc<FanOutCoordinator<E>>) -> Self {
        Self { coordinator }
    }

    /// Run one moderation round: content filtering, then interaction
    /// management. Both responses carry platform decisions; platform
    /// outages surface in the reports, never as errors.
    #[instrument(name = "moderation_activate", skip(self))]
    pub async fn activate(&self) -> ModerationSummary {
        let filter = self
            .coordinator
            .dispatch(&Operation::moderation_filter())
            .await;
        let mut events = Self::decisions(&filter);

        let manage = self
            .coordinator
            .dispatch(&Operation::moderation_manage())
            .await;
        events.extend(Self::decisions(&manage));

        let summary = ModerationSummary {
            filter,
            manage,
            events,
        };
        info!(
            decisions = summary.events.len(),
            enforcements = summary.enforcements().count(),
            "Moderation round complete"
        );
        summary
    }

    /// One decision per platform that answered the round
    fn decisions(report: &AggregateReport) -> Vec<ModerationEvent> {
        report
            .successes()
            .iter()
            .map(|s| ModerationEvent {
                platform_id: s.platform_id.clone(),
                action: ModerationAction::from_body(&s.body),
            })
            .collect()
    }
}

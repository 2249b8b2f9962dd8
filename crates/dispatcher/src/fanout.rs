//! Fan-out coordinator - concurrent dispatch of one operation to many platforms

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use contracts::{
    AggregateReport, ContractError, ErrorKind, Operation, Outcome, PlatformConfig,
    PlatformExecutor, PlatformId,
};

use crate::metrics::{DispatchMetrics, MetricsSnapshot};
use crate::registry::PlatformRegistry;

/// Fan-out tuning
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchOptions {
    /// Optional whole-dispatch deadline. Calls still pending when it
    /// elapses are recorded as timeout failures.
    pub deadline: Option<Duration>,
}

/// Coordinates one operation across every registered platform.
///
/// Each platform call runs in its own task. A failing or panicking call
/// never affects the others; every dispatch produces exactly one outcome
/// per targeted platform.
pub struct FanOutCoordinator<E> {
    registry: PlatformRegistry,
    executor: Arc<E>,
    options: DispatchOptions,
    metrics: Arc<DispatchMetrics>,
}

impl<E> FanOutCoordinator<E>
where
    E: PlatformExecutor + Send + Sync + 'static,
{
    /// Create a coordinator over a registry and executor
    pub fn new(registry: PlatformRegistry, executor: E) -> Self {
        Self::with_options(registry, executor, DispatchOptions::default())
    }

    /// Create a coordinator with explicit dispatch options
    pub fn with_options(registry: PlatformRegistry, executor: E, options: DispatchOptions) -> Self {
        Self {
            registry,
            executor: Arc::new(executor),
            options,
            metrics: Arc::new(DispatchMetrics::new()),
        }
    }

    /// The underlying registry
    pub fn registry(&self) -> &PlatformRegistry {
        &self.registry
    }

    /// Snapshot of dispatch counters
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Dispatch an operation to every registered platform
    #[instrument(
        name = "fanout_dispatch",
        skip(self, operation),
        fields(endpoint = %operation.endpoint, platforms = self.registry.len())
    )]
    pub async fn dispatch(&self, operation: &Operation) -> AggregateReport {
        let configs: Vec<PlatformConfig> = self.registry.configs().into_iter().cloned().collect();
        self.fan_out(configs, operation).await
    }

    /// Dispatch an operation to an explicit subset of platforms
    ///
    /// Targets are treated as a set: a repeated id still yields exactly
    /// one call and one outcome.
    ///
    /// # Errors
    /// Returns `UnknownPlatform` if any target is not registered. No
    /// request is issued in that case.
    #[instrument(
        name = "fanout_dispatch_to",
        skip(self, operation, targets),
        fields(endpoint = %operation.endpoint, targets = targets.len())
    )]
    pub async fn dispatch_to(
        &self,
        operation: &Operation,
        targets: &[PlatformId],
    ) -> Result<AggregateReport, ContractError> {
        // Validate the whole target set before issuing anything
        let mut seen = HashSet::with_capacity(targets.len());
        let mut configs = Vec::with_capacity(targets.len());
        for target in targets {
            let config = self.registry.get(target)?;
            if seen.insert(target.clone()) {
                configs.push(config.clone());
            }
        }
        Ok(self.fan_out(configs, operation).await)
    }

    async fn fan_out(&self, configs: Vec<PlatformConfig>, operation: &Operation) -> AggregateReport {
        self.metrics.inc_dispatch_count();

        let handles: Vec<(PlatformId, JoinHandle<Outcome>)> = configs
            .into_iter()
            .map(|config| {
                let id = config.id.clone();
                (id, self.spawn_call(config, operation.clone()))
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for (id, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                // The task itself died; its platform still owes an outcome
                Err(e) => {
                    warn!(platform = %id, error = %e, "Platform task failed");
                    Outcome::failure(id, ErrorKind::Transport, format!("platform task failed: {e}"))
                }
            };
            self.record_outcome(&outcome);
            outcomes.push(outcome);
        }

        let report = AggregateReport::from_outcomes(outcomes);
        info!(
            successes = report.success_count(),
            failures = report.failure_count(),
            "Dispatch complete"
        );
        report
    }

    fn spawn_call(&self, config: PlatformConfig, operation: Operation) -> JoinHandle<Outcome> {
        let executor = Arc::clone(&self.executor);
        let deadline = self.options.deadline;

        tokio::spawn(async move {
            match deadline {
                Some(limit) => {
                    match tokio::time::timeout(limit, executor.execute(&config, &operation)).await {
                        Ok(outcome) => outcome,
                        Err(_) => {
                            debug!(platform = %config.id, "Dispatch deadline elapsed");
                            Outcome::failure(
                                config.id.clone(),
                                ErrorKind::Timeout,
                                format!("dispatch deadline of {limit:?} exceeded"),
                            )
                        }
                    }
                }
                None => executor.execute(&config, &operation).await,
            }
        })
    }

    fn record_outcome(&self, outcome: &Outcome) {
        match outcome {
            Outcome::Success(_) => self.metrics.inc_success_count(),
            Outcome::Failure(failure) => {
                self.metrics.inc_failure_count();
                if failure.kind == ErrorKind::Timeout {
                    self.metrics.inc_timeout_count();
                }
            }
        }
    }
}

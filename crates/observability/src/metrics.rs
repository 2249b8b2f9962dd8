//! Dispatch metrics recording and aggregation
//!
//! Records Prometheus metrics per dispatch and keeps an in-memory
//! aggregate for the end-of-session summary.

use std::collections::HashMap;

use contracts::{AggregateReport, ErrorKind};
use metrics::{counter, gauge, histogram};

/// Record that a dispatch was issued
pub fn record_dispatch_started(endpoint: &str) {
    counter!(
        "streamcast_dispatches_total",
        "endpoint" => endpoint.to_string()
    )
    .increment(1);
}

/// Record one platform outcome within a dispatch
pub fn record_outcome(platform_id: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "streamcast_outcomes_total",
        "platform" => platform_id.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record the wall-clock latency of one whole dispatch
pub fn record_dispatch_latency_ms(latency_ms: f64) {
    histogram!("streamcast_dispatch_latency_ms").record(latency_ms);
}

/// Record every metric derivable from a finished dispatch report
///
/// Call once per dispatch, after aggregation.
pub fn record_dispatch_report(endpoint: &str, report: &AggregateReport) {
    record_dispatch_started(endpoint);

    for success in report.successes() {
        record_outcome(success.platform_id.as_str(), true);
    }
    for failure in report.failures() {
        record_outcome(failure.platform_id.as_str(), false);
        counter!(
            "streamcast_failures_total",
            "platform" => failure.platform_id.to_string(),
            "kind" => failure.kind.to_string()
        )
        .increment(1);
    }

    gauge!("streamcast_last_dispatch_failures").set(report.failure_count() as f64);
}

/// In-memory dispatch metrics aggregator
///
/// Aggregates reports over a session for a printable summary.
#[derive(Debug, Clone, Default)]
pub struct DispatchMetricsAggregator {
    /// Total dispatches observed
    pub total_dispatches: u64,

    /// Total per-platform successes
    pub total_successes: u64,

    /// Total per-platform failures
    pub total_failures: u64,

    /// Failures that were timeouts
    pub total_timeouts: u64,

    /// Dispatch latency statistics (ms)
    pub latency_stats: RunningStats,

    /// Failure counts per platform
    pub platform_failures: HashMap<String, u64>,
}

impl DispatchMetricsAggregator {
    /// Create a new aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one finished dispatch into the aggregate
    pub fn update(&mut self, report: &AggregateReport, latency_ms: f64) {
        self.total_dispatches += 1;
        self.total_successes += report.success_count() as u64;
        self.total_failures += report.failure_count() as u64;
        self.latency_stats.push(latency_ms);

        for failure in report.failures() {
            if failure.kind == ErrorKind::Timeout {
                self.total_timeouts += 1;
            }
            *self
                .platform_failures
                .entry(failure.platform_id.to_string())
                .or_insert(0) += 1;
        }
    }

    /// Produce a summary report
    pub fn summary(&self) -> MetricsSummary {
        let total_outcomes = self.total_successes + self.total_failures;
        MetricsSummary {
            total_dispatches: self.total_dispatches,
            total_successes: self.total_successes,
            total_failures: self.total_failures,
            total_timeouts: self.total_timeouts,
            failure_rate: if total_outcomes > 0 {
                self.total_failures as f64 / total_outcomes as f64 * 100.0
            } else {
                0.0
            },
            latency_ms: StatsSummary::from(&self.latency_stats),
            platform_failures: self.platform_failures.clone(),
        }
    }

    /// Reset all aggregates
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Printable dispatch summary
#[derive(Debug, Clone, Default)]
pub struct MetricsSummary {
    pub total_dispatches: u64,
    pub total_successes: u64,
    pub total_failures: u64,
    pub total_timeouts: u64,
    pub failure_rate: f64,
    pub latency_ms: StatsSummary,
    pub platform_failures: HashMap<String, u64>,
}

impl std::fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Dispatch Summary ===")?;
        writeln!(f, "Dispatches: {}", self.total_dispatches)?;
        writeln!(f, "Platform successes: {}", self.total_successes)?;
        writeln!(
            f,
            "Platform failures: {} ({:.2}%)",
            self.total_failures, self.failure_rate
        )?;
        writeln!(f, "Timeouts: {}", self.total_timeouts)?;
        writeln!(f, "Dispatch latency (ms): {}", self.latency_ms)?;

        if !self.platform_failures.is_empty() {
            writeln!(f, "Failures by platform:")?;
            let mut platforms: Vec<_> = self.platform_failures.iter().collect();
            platforms.sort();
            for (platform, count) in platforms {
                writeln!(f, "  {}: {}", platform, count)?;
            }
        }

        Ok(())
    }
}

/// Summary of one statistic series
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count(),
            min: stats.min(),
            max: stats.max(),
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// Add a value
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    /// Sample count
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean value
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// Standard deviation
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Minimum observed value
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Maximum observed value
    pub fn max(&self) -> f64 {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::Outcome;

    #[test]
    fn test_running_stats() {
        let mut stats = RunningStats::default();

        stats.push(1.0);
        stats.push(2.0);
        stats.push(3.0);
        stats.push(4.0);
        stats.push(5.0);

        assert_eq!(stats.count(), 5);
        assert!((stats.mean() - 3.0).abs() < 1e-10);
        assert!((stats.min() - 1.0).abs() < 1e-10);
        assert!((stats.max() - 5.0).abs() < 1e-10);
        assert!((stats.variance() - 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_aggregator_update() {
        let mut aggregator = DispatchMetricsAggregator::new();

        let report = AggregateReport::from_outcomes(vec![
            Outcome::success("twitch", serde_json::json!({})),
            Outcome::failure("youtube", ErrorKind::Timeout, "deadline"),
            Outcome::failure("facebook", ErrorKind::HttpStatus(500), "boom"),
        ]);

        aggregator.update(&report, 12.5);

        assert_eq!(aggregator.total_dispatches, 1);
        assert_eq!(aggregator.total_successes, 1);
        assert_eq!(aggregator.total_failures, 2);
        assert_eq!(aggregator.total_timeouts, 1);
        assert_eq!(aggregator.platform_failures.get("youtube"), Some(&1));
    }

    #[test]
    fn test_summary_display() {
        let mut aggregator = DispatchMetricsAggregator::new();
        let report = AggregateReport::from_outcomes(vec![
            Outcome::success("twitch", serde_json::json!({})),
            Outcome::failure("facebook", ErrorKind::HttpStatus(500), "boom"),
        ]);
        aggregator.update(&report, 40.0);

        let output = aggregator.summary().to_string();
        assert!(output.contains("Dispatches: 1"));
        assert!(output.contains("50.00%"));
        assert!(output.contains("facebook: 1"));
    }
}

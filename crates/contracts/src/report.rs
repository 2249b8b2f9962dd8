//! AggregateReport - deterministic merge of per-platform outcomes

use serde::{Deserialize, Serialize};

use crate::{Failure, Outcome, Success};

/// Combined result of dispatching one Operation to all targeted platforms.
///
/// Built once per dispatch and never mutated afterwards; consumers read it as
/// a snapshot. Both partitions are sorted ascending by platform id, so two
/// reports built from the same outcome set compare equal regardless of the
/// order the calls completed in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateReport {
    successes: Vec<Success>,
    failures: Vec<Failure>,
}

impl AggregateReport {
    /// Partition outcomes into successes and failures, sorted by platform id.
    ///
    /// Pure: no I/O, inputs are consumed and re-ordered only.
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        let mut successes = Vec::new();
        let mut failures = Vec::new();

        for outcome in outcomes {
            match outcome {
                Outcome::Success(s) => successes.push(s),
                Outcome::Failure(f) => failures.push(f),
            }
        }

        successes.sort_by(|a, b| a.platform_id.cmp(&b.platform_id));
        failures.sort_by(|a, b| a.platform_id.cmp(&b.platform_id));

        Self {
            successes,
            failures,
        }
    }

    /// Successful outcomes, ascending by platform id
    pub fn successes(&self) -> &[Success] {
        &self.successes
    }

    /// Failed outcomes, ascending by platform id
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Number of successful platforms (derived, not stored)
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    /// Number of failed platforms (derived, not stored)
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Total outcomes in the report
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// Whether every targeted platform succeeded
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

impl std::fmt::Display for AggregateReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} succeeded, {} failed",
            self.success_count(),
            self.failure_count()
        )?;
        for failure in &self.failures {
            write!(
                f,
                "; {} ({}): {}",
                failure.platform_id, failure.kind, failure.message
            )?;
        }
        Ok(())
    }
}

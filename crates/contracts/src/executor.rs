//! PlatformExecutor trait - Request Executor interface
//!
//! Defines the abstract interface for executing one platform call.

use crate::{Operation, Outcome, PlatformConfig};

/// Single-call execution trait
///
/// An executor performs one authenticated call against one platform and
/// normalizes every failure into the returned `Outcome`. Implementations
/// must not return early by panicking or propagating transport errors;
/// the fan-out coordinator relies on always receiving an outcome.
#[trait_variant::make(PlatformExecutor: Send)]
pub trait LocalPlatformExecutor {
    /// Execute one operation against one platform
    async fn execute(&self, config: &PlatformConfig, operation: &Operation) -> Outcome;
}

//! # Dispatcher
//!
//! Platform registry and fan-out coordination module.
//!
//! Responsibilities:
//! - Maintain the write-once registry of configured platforms
//! - Replicate one operation to many platforms concurrently
//! - Isolate per-platform failures; a failed call never cancels its siblings
//! - Track dispatch counters for observability

mod fanout;
mod metrics;
mod registry;

pub use fanout::{DispatchOptions, FanOutCoordinator};
pub use metrics::{DispatchMetrics, MetricsSnapshot};
pub use registry::PlatformRegistry;

pub use contracts::{AggregateReport, Operation, Outcome, PlatformExecutor, PlatformId};

//! # Executor
//!
//! Request execution module.
//!
//! Responsibilities:
//! - Issue one authenticated HTTP call per invocation
//! - Bounded per-request timeout
//! - Normalize every failure path into an `Outcome` — callers of
//!   `execute` never observe a transport error directly

mod error;
mod http;

pub use contracts::{Operation, Outcome, PlatformConfig, PlatformExecutor};
pub use error::ExecutorError;
pub use http::HttpExecutor;

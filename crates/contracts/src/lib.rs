//! # Contracts
//!
//! Frozen interface contracts, defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Dispatch Model
//! - One `Operation` is replicated across N registered platforms
//! - Each platform produces exactly one `Outcome`
//! - Outcomes are folded into a deterministic `AggregateReport`

mod blueprint;
mod command;
mod error;
mod executor;
mod operation;
mod outcome;
mod platform_id;
mod report;

pub use blueprint::*;
pub use command::CommandSource;
pub use error::*;
pub use executor::PlatformExecutor;
pub use operation::*;
pub use outcome::*;
pub use platform_id::PlatformId;
pub use report::AggregateReport;

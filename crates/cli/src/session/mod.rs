//! Session orchestration module.

mod orchestrator;
mod source;
mod stats;

pub use orchestrator::{Session, SessionConfig};
pub use source::StdinCommandSource;
pub use stats::SessionStats;

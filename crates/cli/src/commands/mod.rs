//! CLI command implementations.

mod dispatch;
mod info;
mod run;
mod validate;

pub use dispatch::run_dispatch;
pub use info::run_info;
pub use run::run_session;
pub use validate::run_validate;

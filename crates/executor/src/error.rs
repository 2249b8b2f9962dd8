//! Executor error types

use thiserror::Error;

/// Executor-specific errors
///
/// Only construction can fail; the call path normalizes everything into
/// `Outcome::Failure` instead.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// HTTP client construction error
    #[error("failed to build http client: {message}")]
    ClientBuild { message: String },
}

impl ExecutorError {
    /// Create a client build error
    pub fn client_build(message: impl Into<String>) -> Self {
        Self::ClientBuild {
            message: message.into(),
        }
    }
}

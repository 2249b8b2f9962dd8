//! Outcome - per-platform result of executing one Operation

use serde::{Deserialize, Serialize};

use crate::PlatformId;

/// Normalized failure categories for a single platform call.
///
/// Every failure a call can hit maps to exactly one kind; callers never see
/// a raw transport or HTTP error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Request exceeded the configured timeout or the dispatch deadline
    Timeout,
    /// Connection refused, DNS failure, TLS failure
    Transport,
    /// Response status outside the 2xx range
    HttpStatus(u16),
    /// Response body could not be parsed as JSON
    Malformed,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Timeout => write!(f, "timeout"),
            ErrorKind::Transport => write!(f, "transport"),
            ErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            ErrorKind::Malformed => write!(f, "malformed response"),
        }
    }
}

/// Successful platform call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Success {
    /// Platform that produced the response
    pub platform_id: PlatformId,
    /// Parsed JSON response body
    pub body: serde_json::Value,
}

/// Failed platform call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    /// Platform whose call failed
    pub platform_id: PlatformId,
    /// Normalized failure category
    pub kind: ErrorKind,
    /// Human-readable detail
    pub message: String,
}

/// Per-platform result of one dispatched Operation.
///
/// Produced exactly once per platform per dispatch; immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Success(Success),
    Failure(Failure),
}

impl Outcome {
    /// Create a success outcome
    pub fn success(platform_id: impl Into<PlatformId>, body: serde_json::Value) -> Self {
        Self::Success(Success {
            platform_id: platform_id.into(),
            body,
        })
    }

    /// Create a failure outcome
    pub fn failure(
        platform_id: impl Into<PlatformId>,
        kind: ErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self::Failure(Failure {
            platform_id: platform_id.into(),
            kind,
            message: message.into(),
        })
    }

    /// Platform this outcome belongs to
    pub fn platform_id(&self) -> &PlatformId {
        match self {
            Outcome::Success(s) => &s.platform_id,
            Outcome::Failure(f) => &f.platform_id,
        }
    }

    /// Whether the call succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let ok = Outcome::success("twitch", serde_json::json!({"live": true}));
        assert!(ok.is_success());
        assert_eq!(ok.platform_id(), &PlatformId::from("twitch"));

        let err = Outcome::failure("facebook", ErrorKind::HttpStatus(500), "server error");
        assert!(!err.is_success());
        assert_eq!(err.platform_id().as_str(), "facebook");
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::HttpStatus(503).to_string(), "http status 503");
        assert_eq!(ErrorKind::Timeout.to_string(), "timeout");
    }
}

//! Operation - one logical request replicated across platforms

use serde::{Deserialize, Serialize};

/// HTTP method for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// One logical action to replicate across platforms.
///
/// Transient: created per call site and dropped after dispatch. The payload
/// is only sent for POST operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Endpoint path, appended to each platform's base URL
    pub endpoint: String,

    /// HTTP method
    pub method: Method,

    /// Optional JSON body for POST operations
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}

impl Operation {
    /// Create a GET operation
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: Method::Get,
            payload: None,
        }
    }

    /// Create a POST operation with an optional body
    pub fn post(endpoint: impl Into<String>, payload: Option<serde_json::Value>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: Method::Post,
            payload,
        }
    }

    // Well-known platform operations. Endpoint paths follow the platform
    // REST conventions this studio targets.

    /// Start the stream
    pub fn start_stream() -> Self {
        Self::post("/startStream", None)
    }

    /// Stop the stream
    pub fn stop_stream() -> Self {
        Self::post("/stopStream", None)
    }

    /// Fetch current stream status
    pub fn stream_status() -> Self {
        Self::get("/stream/status")
    }

    /// Update stream information (title, reels, metadata)
    pub fn update_stream_info(info: serde_json::Value) -> Self {
        Self::post("/stream/update", Some(info))
    }

    /// Fetch viewer analytics
    pub fn viewer_analytics() -> Self {
        Self::get("/analytics/viewers")
    }

    /// Fetch engagement analytics (likes, shares, comments)
    pub fn engagement_analytics() -> Self {
        Self::get("/analytics/engagement")
    }

    /// Fetch content performance analytics
    pub fn content_performance() -> Self {
        Self::get("/analytics/performance")
    }

    /// Run the platform content filter
    pub fn moderation_filter() -> Self {
        Self::post("/moderation/filter", None)
    }

    /// Run platform viewer-interaction management
    pub fn moderation_manage() -> Self {
        Self::post("/moderation/manage", None)
    }
}

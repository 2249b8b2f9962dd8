//! StudioBlueprint - Config Loader output
//!
//! Describes the complete studio configuration: identity, dispatch tuning,
//! and the set of platforms requests are replicated to.

use serde::{Deserialize, Serialize};

use crate::PlatformId;

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete studio configuration blueprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioBlueprint {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Studio-level settings
    pub studio: StudioConfig,

    /// Dispatch tuning
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Registered platforms
    pub platforms: Vec<PlatformConfig>,
}

/// Studio-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Studio name (used in logs and reports)
    pub name: String,

    /// Minimum engagement score for an event to enter a highlight reel
    #[serde(default = "default_highlight_threshold")]
    pub highlight_threshold: f64,
}

fn default_highlight_threshold() -> f64 {
    75.0
}

/// Dispatch tuning parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Per-request timeout in seconds, must be > 0
    #[serde(default = "default_request_timeout_sec")]
    pub request_timeout_sec: u64,

    /// Optional whole-dispatch deadline in seconds.
    /// Pending calls are recorded as timeouts once it elapses.
    #[serde(default)]
    pub deadline_sec: Option<u64>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            request_timeout_sec: default_request_timeout_sec(),
            deadline_sec: None,
        }
    }
}

fn default_request_timeout_sec() -> u64 {
    10
}

/// Connection configuration for one platform
///
/// Immutable after load; `id` is unique across the blueprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Unique identifier (e.g., "twitch")
    pub id: PlatformId,

    /// API base URL, joined with operation endpoints by concatenation
    pub base_url: String,

    /// Bearer credential attached to every request
    pub credential: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_config_defaults() {
        let config = DispatchConfig::default();
        assert_eq!(config.request_timeout_sec, 10);
        assert_eq!(config.deadline_sec, None);
    }

    #[test]
    fn test_blueprint_serde_round_trip() {
        let blueprint = StudioBlueprint {
            version: ConfigVersion::V1,
            studio: StudioConfig {
                name: "studio".into(),
                highlight_threshold: 50.0,
            },
            dispatch: DispatchConfig::default(),
            platforms: vec![PlatformConfig {
                id: "twitch".into(),
                base_url: "https://api.twitch.example".into(),
                credential: "token".into(),
            }],
        };

        let json = serde_json::to_string(&blueprint).unwrap();
        let parsed: StudioBlueprint = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.studio.name, "studio");
        assert_eq!(parsed.platforms.len(), 1);
        assert_eq!(parsed.platforms[0].id, "twitch");
    }
}

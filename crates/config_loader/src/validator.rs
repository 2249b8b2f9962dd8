//! Configuration validation
//!
//! Rules:
//! - platform ids unique and non-empty
//! - base_url non-empty, http(s) scheme, no trailing slash ambiguity
//! - credential non-empty
//! - request_timeout_sec > 0
//! - deadline_sec > 0 when present

use std::collections::HashSet;

use contracts::{ContractError, StudioBlueprint};

/// Validate a StudioBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &StudioBlueprint) -> Result<(), ContractError> {
    validate_platforms(blueprint)?;
    validate_dispatch(blueprint)?;
    Ok(())
}

fn validate_platforms(blueprint: &StudioBlueprint) -> Result<(), ContractError> {
    if blueprint.platforms.is_empty() {
        return Err(ContractError::config_validation(
            "platforms",
            "at least one platform must be configured",
        ));
    }

    let mut seen = HashSet::new();
    for (idx, platform) in blueprint.platforms.iter().enumerate() {
        if platform.id.is_empty() {
            return Err(ContractError::config_validation(
                format!("platforms[{idx}].id"),
                "platform id cannot be empty",
            ));
        }

        if !seen.insert(platform.id.clone()) {
            return Err(ContractError::config_validation(
                format!("platforms[id={}]", platform.id),
                "duplicate platform id",
            ));
        }

        if !platform.base_url.starts_with("http://") && !platform.base_url.starts_with("https://")
        {
            return Err(ContractError::config_validation(
                format!("platforms[{}].base_url", platform.id),
                format!(
                    "base_url must start with http:// or https://, got '{}'",
                    platform.base_url
                ),
            ));
        }

        if platform.credential.is_empty() {
            return Err(ContractError::config_validation(
                format!("platforms[{}].credential", platform.id),
                "credential cannot be empty",
            ));
        }
    }
    Ok(())
}

fn validate_dispatch(blueprint: &StudioBlueprint) -> Result<(), ContractError> {
    let dispatch = &blueprint.dispatch;

    if dispatch.request_timeout_sec == 0 {
        return Err(ContractError::config_validation(
            "dispatch.request_timeout_sec",
            "request timeout must be > 0",
        ));
    }

    if let Some(deadline) = dispatch.deadline_sec {
        if deadline == 0 {
            return Err(ContractError::config_validation(
                "dispatch.deadline_sec",
                "deadline must be > 0 when set",
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{ConfigVersion, DispatchConfig, PlatformConfig, StudioConfig};

    fn minimal_blueprint() -> StudioBlueprint {
        StudioBlueprint {
            version: ConfigVersion::V1,
            studio: StudioConfig {
                name: "demo".into(),
                highlight_threshold: 75.0,
            },
            dispatch: DispatchConfig::default(),
            platforms: vec![
                PlatformConfig {
                    id: "twitch".into(),
                    base_url: "https://api.twitch.example/v1".into(),
                    credential: "twitch-token".into(),
                },
                PlatformConfig {
                    id: "youtube".into(),
                    base_url: "https://api.youtube.example/v3".into(),
                    credential: "youtube-token".into(),
                },
            ],
        }
    }

    #[test]
    fn test_valid_config() {
        let bp = minimal_blueprint();
        assert!(validate(&bp).is_ok());
    }

    #[test]
    fn test_no_platforms() {
        let mut bp = minimal_blueprint();
        bp.platforms.clear();
        let err = validate(&bp).unwrap_err().to_string();
        assert!(err.contains("at least one platform"), "got: {err}");
    }

    #[test]
    fn test_duplicate_platform_id() {
        let mut bp = minimal_blueprint();
        bp.platforms.push(bp.platforms[0].clone());
        let err = validate(&bp).unwrap_err().to_string();
        assert!(err.contains("duplicate platform id"), "got: {err}");
    }

    #[test]
    fn test_invalid_base_url() {
        let mut bp = minimal_blueprint();
        bp.platforms[0].base_url = "ftp://example.com".into();
        let err = validate(&bp).unwrap_err().to_string();
        assert!(err.contains("http:// or https://"), "got: {err}");
    }

    #[test]
    fn test_empty_credential() {
        let mut bp = minimal_blueprint();
        bp.platforms[1].credential = String::new();
        let err = validate(&bp).unwrap_err().to_string();
        assert!(err.contains("credential cannot be empty"), "got: {err}");
    }

    #[test]
    fn test_zero_timeout() {
        let mut bp = minimal_blueprint();
        bp.dispatch.request_timeout_sec = 0;
        let err = validate(&bp).unwrap_err().to_string();
        assert!(err.contains("request timeout must be > 0"), "got: {err}");
    }

    #[test]
    fn test_zero_deadline() {
        let mut bp = minimal_blueprint();
        bp.dispatch.deadline_sec = Some(0);
        let err = validate(&bp).unwrap_err().to_string();
        assert!(err.contains("deadline must be > 0"), "got: {err}");
    }
}

//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    studio: String,
    platform_count: usize,
    request_timeout_sec: u64,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    // Check file exists
    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    // Try to load and validate
    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    version: format!("{:?}", blueprint.version),
                    studio: blueprint.studio.name.clone(),
                    platform_count: blueprint.platforms.len(),
                    request_timeout_sec: blueprint.dispatch.request_timeout_sec,
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &contracts::StudioBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    // A single platform makes fan-out pointless but is still legal
    if blueprint.platforms.len() == 1 {
        warnings.push("Only one platform configured - dispatches will not fan out".to_string());
    }

    // A deadline shorter than the per-request timeout will preempt it
    if let Some(deadline) = blueprint.dispatch.deadline_sec {
        if deadline < blueprint.dispatch.request_timeout_sec {
            warnings.push(format!(
                "dispatch.deadline_sec ({}) is shorter than request_timeout_sec ({}) - \
                 the deadline will cut requests off first",
                deadline, blueprint.dispatch.request_timeout_sec
            ));
        }
    }

    // Engagement scores are reported on a 0-100 scale
    if !(0.0..=100.0).contains(&blueprint.studio.highlight_threshold) {
        warnings.push(format!(
            "studio.highlight_threshold ({}) is outside the usual 0-100 engagement range",
            blueprint.studio.highlight_threshold
        ));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Studio: {}", summary.studio);
            println!("  Platforms: {}", summary.platform_count);
            println!("  Request timeout: {}s", summary.request_timeout_sec);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}

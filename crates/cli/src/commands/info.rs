//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    studio: StudioInfo,
    dispatch: DispatchInfo,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    platforms: Vec<PlatformInfo>,
    platform_count: usize,
}

#[derive(Serialize)]
struct StudioInfo {
    name: String,
    highlight_threshold: f64,
}

#[derive(Serialize)]
struct DispatchInfo {
    request_timeout_sec: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    deadline_sec: Option<u64>,
}

#[derive(Serialize)]
struct PlatformInfo {
    id: String,
    base_url: String,
    credential: String,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if args.json {
        let info = build_config_info(&blueprint, args);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&blueprint, args);
    }

    Ok(())
}

/// Redact a credential down to its first characters
fn mask_credential(credential: &str) -> String {
    let visible: String = credential.chars().take(4).collect();
    format!("{visible}****")
}

fn build_config_info(blueprint: &contracts::StudioBlueprint, args: &InfoArgs) -> ConfigInfo {
    let platforms = if args.platforms {
        blueprint
            .platforms
            .iter()
            .map(|p| PlatformInfo {
                id: p.id.to_string(),
                base_url: p.base_url.clone(),
                credential: mask_credential(&p.credential),
            })
            .collect()
    } else {
        Vec::new()
    };

    ConfigInfo {
        version: format!("{:?}", blueprint.version),
        studio: StudioInfo {
            name: blueprint.studio.name.clone(),
            highlight_threshold: blueprint.studio.highlight_threshold,
        },
        dispatch: DispatchInfo {
            request_timeout_sec: blueprint.dispatch.request_timeout_sec,
            deadline_sec: blueprint.dispatch.deadline_sec,
        },
        platforms,
        platform_count: blueprint.platforms.len(),
    }
}

fn print_config_info(blueprint: &contracts::StudioBlueprint, args: &InfoArgs) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                 streamcast Configuration                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    // Studio info
    println!("🎙  Studio");
    println!("   ├─ Version: {:?}", blueprint.version);
    println!("   ├─ Name: {}", blueprint.studio.name);
    println!(
        "   └─ Highlight threshold: {:.1}",
        blueprint.studio.highlight_threshold
    );

    // Dispatch settings
    println!("\n⚙️  Dispatch Settings");
    println!(
        "   ├─ Request timeout: {}s",
        blueprint.dispatch.request_timeout_sec
    );
    match blueprint.dispatch.deadline_sec {
        Some(deadline) => println!("   └─ Deadline: {}s", deadline),
        None => println!("   └─ Deadline: (none)"),
    }

    // Platforms
    println!("\n📡 Platforms ({})", blueprint.platforms.len());
    for (i, platform) in blueprint.platforms.iter().enumerate() {
        let is_last = i == blueprint.platforms.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };
        let child_prefix = if is_last { "   " } else { "│  " };

        println!("   {} {}", prefix, platform.id);

        if args.platforms {
            println!("   {}  ├─ URL: {}", child_prefix, platform.base_url);
            println!(
                "   {}  └─ Credential: {}",
                child_prefix,
                mask_credential(&platform.credential)
            );
        }
    }

    println!();
}

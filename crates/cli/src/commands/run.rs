//! `run` command implementation.

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::info;

use crate::cli::RunArgs;
use crate::session::{Session, SessionConfig};

/// Execute the `run` command
pub async fn run_session(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    // Validate config path
    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    // Load and parse configuration
    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    info!(
        studio = %blueprint.studio.name,
        platforms = blueprint.platforms.len(),
        request_timeout_sec = blueprint.dispatch.request_timeout_sec,
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_summary(&blueprint);
        return Ok(());
    }

    // Build session configuration
    let session_config = SessionConfig {
        blueprint,
        duration: if args.duration == 0 {
            None
        } else {
            Some(Duration::from_secs(args.duration))
        },
        moderation: !args.no_moderation,
        metrics_port: if args.metrics_port == 0 {
            None
        } else {
            Some(args.metrics_port)
        },
    };

    let session = Session::new(session_config);

    info!("Starting session...");

    let stats = session
        .run(setup_shutdown_signal())
        .await
        .context("Session execution failed")?;

    info!(
        duration_secs = stats.duration.as_secs_f64(),
        dispatches = stats.dispatch_metrics.total_dispatches,
        commands = stats.commands_handled,
        "Session completed"
    );

    stats.print_summary();

    info!("streamcast finished");
    Ok(())
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print configuration summary for dry-run mode
fn print_config_summary(blueprint: &contracts::StudioBlueprint) {
    println!("\n=== Configuration Summary ===\n");
    println!("Studio:");
    println!("  Name: {}", blueprint.studio.name);
    println!(
        "  Highlight threshold: {:.1}",
        blueprint.studio.highlight_threshold
    );

    println!("\nDispatch:");
    println!(
        "  Request timeout: {}s",
        blueprint.dispatch.request_timeout_sec
    );
    match blueprint.dispatch.deadline_sec {
        Some(deadline) => println!("  Deadline: {}s", deadline),
        None => println!("  Deadline: none"),
    }

    println!("\nPlatforms ({}):", blueprint.platforms.len());
    for platform in &blueprint.platforms {
        println!("  - {} ({})", platform.id, platform.base_url);
    }

    println!();
}

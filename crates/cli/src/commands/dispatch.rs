//! `dispatch` command implementation - one-shot operation dispatch.

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::info;

use contracts::{AggregateReport, Operation, PlatformId};
use dispatcher::{DispatchOptions, FanOutCoordinator, PlatformRegistry};
use executor::HttpExecutor;

use crate::cli::DispatchArgs;

/// Execute the `dispatch` command
pub async fn run_dispatch(args: &DispatchArgs) -> Result<()> {
    info!(config = %args.config.display(), endpoint = %args.endpoint, "One-shot dispatch");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    let operation = build_operation(args)?;

    let registry = PlatformRegistry::from_configs(blueprint.platforms.clone())
        .context("Failed to build platform registry")?;
    let executor = HttpExecutor::from_dispatch_config(&blueprint.dispatch)
        .context("Failed to build HTTP executor")?;
    let options = DispatchOptions {
        deadline: blueprint.dispatch.deadline_sec.map(Duration::from_secs),
    };
    let coordinator = FanOutCoordinator::with_options(registry, executor, options);

    let report = if args.platforms.is_empty() {
        coordinator.dispatch(&operation).await
    } else {
        let targets: Vec<PlatformId> = args
            .platforms
            .iter()
            .map(|p| PlatformId::from(p.as_str()))
            .collect();
        coordinator
            .dispatch_to(&operation, &targets)
            .await
            .context("Dispatch rejected")?
    };

    observability::record_dispatch_report(&operation.endpoint, &report);

    if args.json {
        let json =
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        print_report(&operation, &report);
    }

    // Exit non-zero when no platform answered
    if report.total() > 0 && report.success_count() == 0 {
        anyhow::bail!("All {} platform(s) failed", report.total());
    }

    Ok(())
}

fn build_operation(args: &DispatchArgs) -> Result<Operation> {
    let payload = args
        .payload
        .as_deref()
        .map(serde_json::from_str::<serde_json::Value>)
        .transpose()
        .context("Payload is not valid JSON")?;

    let operation = match contracts::Method::from(args.method) {
        contracts::Method::Get => {
            if payload.is_some() {
                anyhow::bail!("GET dispatches do not carry a payload");
            }
            Operation::get(&args.endpoint)
        }
        contracts::Method::Post => Operation::post(&args.endpoint, payload),
    };

    Ok(operation)
}

fn print_report(operation: &Operation, report: &AggregateReport) {
    println!(
        "\n{} {} -> {} platform(s)",
        operation.method,
        operation.endpoint,
        report.total()
    );

    for success in report.successes() {
        println!("  ✓ {}: {}", success.platform_id, success.body);
    }
    for failure in report.failures() {
        println!(
            "  ✗ {}: {} ({})",
            failure.platform_id, failure.kind, failure.message
        );
    }

    println!(
        "\n{} succeeded, {} failed",
        report.success_count(),
        report.failure_count()
    );
}

//! CLI entrypoint for conclave
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use conclave_application::{
    NoProgress, RunBasicFlowUseCase, RunLeadingFlowUseCase,
};
use conclave_domain::FlowType;
use conclave_infrastructure::{ConfigLoader, FsOutputSink, FsPromptStore, RunContext, create_providers};
use conclave_presentation::{Cli, ProgressReporter};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting conclave");

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };

    if cli.list_flows {
        println!("Configured flows:");
        for name in config.flow_names() {
            let flow = &config.flows[name];
            println!(
                "  {:<18} {} ({}, {} rounds)",
                name,
                flow.description.as_deref().unwrap_or(&flow.name),
                flow.flow_type,
                flow.max_rounds
            );
        }
        return Ok(());
    }

    // Both are present unless --list-flows was given; clap enforces it
    let (Some(flow_name), Some(input)) = (&cli.flow, &cli.input) else {
        bail!("A flow name and an input file are required. See --help.");
    };

    let Some(flow) = config.flow(flow_name) else {
        bail!(
            "Unknown flow '{}'. Available flows: {}",
            flow_name,
            config.flow_names().join(", ")
        );
    };
    let Some(input_path) = input.to_str() else {
        bail!("Input path is not valid UTF-8: {}", input.display());
    };

    // === Dependency Injection ===
    let participants = create_providers(&config);
    if participants.is_empty() {
        bail!("No providers configured. Check `active_providers` in conclave.toml.");
    }

    let ctx = RunContext::create();
    let sink = Arc::new(FsOutputSink::new(&ctx));
    let prompt_store = Arc::new(FsPromptStore);

    if !cli.quiet {
        println!();
        println!("Starting Flow: {} (Run ID: {})", flow.name, ctx.run_id);
        println!("Output Directory: {}", ctx.run_dir.display());
        println!();
    }

    // Execute with or without progress reporting
    let progress = ProgressReporter::new();
    let leading = flow.flow_type == FlowType::Leading;

    match flow.flow_type {
        FlowType::Basic => {
            let use_case = RunBasicFlowUseCase::new(
                participants,
                flow.clone(),
                sink,
                prompt_store,
            );
            if cli.quiet {
                use_case
                    .run_with_progress(input_path, cli.prompt.as_deref(), &NoProgress)
                    .await?;
            } else {
                use_case
                    .run_with_progress(input_path, cli.prompt.as_deref(), &progress)
                    .await?;
            }
        }
        FlowType::Leading => {
            let use_case = RunLeadingFlowUseCase::new(
                participants,
                flow.clone(),
                sink,
                prompt_store,
            );
            if cli.quiet {
                use_case
                    .run_with_progress(input_path, cli.prompt.as_deref(), &NoProgress)
                    .await?;
            } else {
                use_case
                    .run_with_progress(input_path, cli.prompt.as_deref(), &progress)
                    .await?;
            }
        }
    }

    if !cli.quiet {
        println!();
        println!("Flow Complete!");
        println!("Explore the results in: {}", ctx.run_dir.display());
        if leading {
            println!("The leader's final synthesis (*.synthesis.v*.md) is the recommended output.");
        }
    }

    Ok(())
}

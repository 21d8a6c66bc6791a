//! Command routing and execution
//!
//! This module loads configuration and routes CLI commands to their
//! respective implementations.

use crate::cli::args::{Cli, Commands};
use crate::cli::commands::*;
use crate::cli::help::generate_help;
use crate::config::ConfigLoader;
use anyhow::{Context, Result};
use tracing::debug;

/// Execute a CLI command based on the parsed arguments
pub async fn execute_command(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        println!("{}", generate_help());
        return Ok(());
    };

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let loaded = ConfigLoader::new(cwd)
        .load(cli.config.as_deref())
        .await
        .context("Failed to load configuration")?;
    if let Some(source) = &loaded.source {
        debug!("Using configuration from {}", source.display());
    }

    let ctx = CommandContext::new(loaded.config, cli.output_dir.as_ref(), cli.json);
    debug!("Writing reports to {}", ctx.output_dir().display());

    match command {
        Commands::AnalyzeExport { export } => run_analyze_export(&ctx, &export).await,
        Commands::Status { export, now } => run_status(&ctx, &export, now.as_deref()).await,
        Commands::MultipleActive { input } => run_multiple_active(&ctx, input).await,
        Commands::RefundedNoActive { input, as_of } => {
            run_refunded_no_active(&ctx, input, as_of.as_deref()).await
        }
        Commands::FilterTemporary { input, targets } => {
            run_filter_temporary(&ctx, input, &targets).await
        }
        Commands::FilterDisabled { input, targets } => {
            run_filter_disabled(&ctx, input, &targets).await
        }
    }
}

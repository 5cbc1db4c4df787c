//! Scaffold CLI.
//!
//! Walks the user through creating apps, extensions and scripts, calling the
//! Partners API where a project needs a remote counterpart.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use scaffold::commands::{CreateCommand, Runtime, TasksCommand, UpdateUrlsCommand};
use scaffold::forms::TerminalPrompt;
use scaffold::{
    global_registry, ui, Context, Metadata, PartnersClient, ScaffoldConfig,
};

/// Scaffold - interactive project scaffolding.
#[derive(Parser)]
#[command(
    name = "scaffold",
    version,
    about = "Create apps, extensions and scripts interactively"
)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(long, global = true, env = "SCAFFOLD_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Partners API host
    #[arg(long, global = true, env = "SCAFFOLD_PARTNERS_URL", value_name = "URL")]
    partners_url: Option<String>,

    /// Partners API token
    #[arg(long, global = true, env = "SCAFFOLD_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Extension point catalog replacing the bundled one
    #[arg(long, global = true, env = "SCAFFOLD_EXTENSION_POINTS", value_name = "FILE")]
    extension_points: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new app, extension or script.
    Create(CreateCommand),

    /// Update an app's application URL and redirect whitelist.
    UpdateUrls(UpdateUrlsCommand),

    /// List the tasks available to commands.
    Tasks(TasksCommand),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("info,scaffold=debug")
    } else {
        EnvFilter::new("warn,scaffold=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = ScaffoldConfig::discover(cli.config.as_deref())?.with_overrides(
        cli.partners_url,
        cli.token,
        cli.extension_points,
    );

    let transport = PartnersClient::new(config.partners_url(), config.token.as_deref())?;
    let metadata = Arc::new(Metadata::new());
    let ctx = Context::new(Arc::new(transport), metadata.clone());
    let prompt = TerminalPrompt::new();

    let rt = Runtime {
        ctx: &ctx,
        prompt: &prompt,
        registry: global_registry(),
        config: &config,
    };

    let result = match &cli.command {
        Commands::Create(cmd) => cmd.run(&rt).await,
        Commands::UpdateUrls(cmd) => cmd.run(&rt).await,
        Commands::Tasks(cmd) => cmd.run(&rt),
    };

    debug!(metadata = ?metadata.snapshot(), "Command finished");

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) if e.is_abort() => {
            ui::print_error(&e.to_string());
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

//! datadash - data-analysis dashboard client
//!
#![doc = "Main entry point for the datadash command-line client."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use datadash::app::AppContext;
use datadash::cli::Cli;
use datadash::commands;
use datadash::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    let ctx = AppContext::init(&config)?;

    tracing::debug!(command = ?cli.command, "Dispatching command");
    let outcome = commands::dispatch(&ctx, cli.command).await;

    commands::print_toasts(&ctx.toasts);
    ctx.teardown()?;

    if outcome.is_err() {
        std::process::exit(1);
    }
    Ok(())
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "datadash=debug"
    } else {
        "datadash=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

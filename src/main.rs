//! EventHub console client
//!
//! Main application entry point

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error};

use eventhub::{
    config::Settings,
    get_error_message,
    handlers::{handle_command, render, Cli},
    utils::logging,
    EventHubError, ServiceFactory,
};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        let message = match e.downcast_ref::<EventHubError>() {
            Some(err) => get_error_message(err),
            None => format!("{:#}", e),
        };
        eprintln!("{}", render::banner(&message));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Load configuration
    let settings = Settings::from_file(&cli.config)
        .with_context(|| format!("Failed to load configuration '{}'", cli.config))?;
    settings.validate()?;

    // Held until exit so buffered file logs are flushed
    let _guard = logging::init_logging(&settings.logging)?;
    debug!(version = eventhub::VERSION, api = %settings.api.base_url, "Starting");

    let services = ServiceFactory::from_settings(&settings)?;

    if let Err(e) = handle_command(cli.command, &services).await {
        error!(error = %e, severity = %e.severity(), "Command failed");
        return Err(e.into());
    }
    Ok(())
}

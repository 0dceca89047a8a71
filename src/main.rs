use calendar_assistant::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging(startup::SERVER_LOG_FILTER)?;

    info!("Starting calendar assistant");

    // Load configuration
    let config = startup::load_config()?;

    // Serve the UI and endpoints
    startup::start_server(config).await
}

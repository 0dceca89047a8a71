use crate::config::Config;
use crate::error::Error;
use crate::utils::{i18n, SystemClock, UuidGenerator};
use crate::web::{build_router, AppState};
use crate::shutdown;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Filter used by the server when `RUST_LOG` is unset
pub const SERVER_LOG_FILTER: &str = "info,tower_http=debug";

/// Initialize logging with environment-based configuration
pub fn init_logging(default_filter: &str) -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Build the app state and serve it until a shutdown signal arrives
pub async fn start_server(config: Config) -> miette::Result<()> {
    i18n::set_locale(&config.locale);
    info!("Replying in locale {}", config.locale);

    let state = AppState::from_config(&config, Arc::new(SystemClock), Arc::new(UuidGenerator))?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .map_err(Error::Io)?;
    let url = config.public_url();
    info!("Listening on {}", url);

    if config.open_browser {
        if let Err(e) = webbrowser::open(&url) {
            warn!("Could not open a browser at {}: {}", url, e);
        }
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::wait_for_signal())
        .await
        .map_err(Error::Io)?;

    info!("Server stopped");
    Ok(())
}

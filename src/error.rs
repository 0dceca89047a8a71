use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(calendar_assistant::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(calendar_assistant::config))]
    Config(String),

    #[error("Invalid request: {0}")]
    #[diagnostic(code(calendar_assistant::invalid_request))]
    InvalidRequest(String),

    #[error("Invalid event: {0}")]
    #[diagnostic(code(calendar_assistant::invalid_event))]
    InvalidEvent(String),

    #[error("{0}")]
    #[diagnostic(code(calendar_assistant::rejected))]
    Rejected(String),

    #[error("Calendar forwarding error: {0}")]
    #[diagnostic(
        code(calendar_assistant::forwarding),
        help("check that the calendar endpoint is reachable")
    )]
    Forwarding(String),

    #[error("HTTP client error: {0}")]
    #[diagnostic(code(calendar_assistant::http))]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    #[diagnostic(code(calendar_assistant::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(calendar_assistant::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(calendar_assistant::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Config(format!("Invalid URL: {}", err))
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create invalid request errors
pub fn invalid_request(message: &str) -> Error {
    Error::InvalidRequest(message.to_string())
}

/// Helper to create invalid event errors
pub fn invalid_event(message: &str) -> Error {
    Error::InvalidEvent(message.to_string())
}

/// Helper to create forwarding errors
pub fn forwarding_error(message: &str) -> Error {
    Error::Forwarding(message.to_string())
}


use super::service::CalendarService;
use crate::error::{forwarding_error, AppResult};
use crate::models::{ApiResponse, MessageRequest};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Path of the calendar endpoint relative to the assistant's base URL
pub const CALENDAR_PATH: &str = "/api/calendar";

/// Where chat sends calendar commands
#[async_trait]
pub trait CalendarBackend: Send + Sync {
    /// Submit a free-text message to the calendar endpoint
    async fn submit(&self, message: &str) -> AppResult<ApiResponse>;
}

/// Calls the calendar service in the same process
#[derive(Debug, Clone)]
pub struct LocalCalendarBackend {
    service: Arc<CalendarService>,
}

impl LocalCalendarBackend {
    pub fn new(service: Arc<CalendarService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CalendarBackend for LocalCalendarBackend {
    async fn submit(&self, message: &str) -> AppResult<ApiResponse> {
        Ok(self.service.handle_message(message))
    }
}

/// Posts messages to a calendar endpoint over HTTP
#[derive(Debug, Clone)]
pub struct HttpCalendarBackend {
    client: Client,
    endpoint: Url,
}

impl HttpCalendarBackend {
    /// Create a backend for the assistant running at `base_url`
    pub fn new(base_url: &str) -> AppResult<Self> {
        let endpoint = Url::parse(base_url)?.join(CALENDAR_PATH)?;
        Ok(Self {
            client: Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CalendarBackend for HttpCalendarBackend {
    async fn submit(&self, message: &str) -> AppResult<ApiResponse> {
        debug!("Forwarding message to {}", self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&MessageRequest {
                message: message.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(forwarding_error(&format!(
                "calendar endpoint returned {}",
                response.status()
            )));
        }

        Ok(response.json::<ApiResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_backend_endpoint() {
        let backend = HttpCalendarBackend::new("http://localhost:3000").unwrap();
        assert_eq!(backend.endpoint().as_str(), "http://localhost:3000/api/calendar");

        let backend = HttpCalendarBackend::new("http://assistant.lan/app/").unwrap();
        assert_eq!(backend.endpoint().as_str(), "http://assistant.lan/api/calendar");
    }

    #[test]
    fn test_http_backend_rejects_bad_url() {
        assert!(HttpCalendarBackend::new("localhost without scheme").is_err());
    }
}

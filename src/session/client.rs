use crate::error::{forwarding_error, AppResult};
use crate::models::{
    ApiResponse, CalendarCommandRequest, CalendarRequest, ChatReply, MessageRequest,
};
use crate::web::AppState;
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use url::Url;

/// Transport between a session and the assistant endpoints
#[async_trait]
pub trait AssistantApi: Send + Sync {
    /// Send a chat message
    async fn chat(&self, message: &str) -> AppResult<ChatReply>;

    /// Send a structured change from the calendar view
    async fn calendar(&self, request: &CalendarCommandRequest) -> AppResult<ApiResponse>;
}

/// Talks to a running assistant over HTTP
#[derive(Debug, Clone)]
pub struct HttpAssistantApi {
    client: Client,
    base: Url,
}

impl HttpAssistantApi {
    pub fn new(base_url: &str) -> AppResult<Self> {
        Ok(Self {
            client: Client::new(),
            base: Url::parse(base_url)?,
        })
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> AppResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.base.join(path)?;
        debug!("POST {}", url);

        let response = self.client.post(url).json(body).send().await?;
        if !response.status().is_success() {
            return Err(forwarding_error(&format!(
                "{} returned {}",
                path,
                response.status()
            )));
        }

        Ok(response.json::<R>().await?)
    }
}

#[async_trait]
impl AssistantApi for HttpAssistantApi {
    async fn chat(&self, message: &str) -> AppResult<ChatReply> {
        let body = MessageRequest {
            message: message.to_string(),
        };
        self.post("/api/chat", &body).await
    }

    async fn calendar(&self, request: &CalendarCommandRequest) -> AppResult<ApiResponse> {
        self.post("/api/calendar", request).await
    }
}

/// Calls the assistant services in the same process, no server needed
#[derive(Clone)]
pub struct LocalAssistantApi {
    state: AppState,
}

impl LocalAssistantApi {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl AssistantApi for LocalAssistantApi {
    async fn chat(&self, message: &str) -> AppResult<ChatReply> {
        Ok(self.state.chat.reply(message).await)
    }

    async fn calendar(&self, request: &CalendarCommandRequest) -> AppResult<ApiResponse> {
        Ok(self
            .state
            .calendar
            .handle(CalendarRequest::Command(request.clone())))
    }
}

//! HTTP implementation of the chat API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::types::{MessagesPage, RenamedSession, SendOutcome, SessionSummary};
use super::ChatApi;
use crate::config::ApiConfig;
use crate::error::ChatError;

/// reqwest-backed chat API client.
pub struct HttpChatApi {
    base_url: String,
    http: reqwest::Client,
}

/// Error body shape the backend uses for non-2xx responses.
#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

impl HttpChatApi {
    /// Creates a client from API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Maps a response to `ChatError::Api` unless it is a success,
    /// preferring the server's `message` field as the error text.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ChatError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        Err(ChatError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn send_message(
        &self,
        session_id: &str,
        text: &str,
        image_url: Option<&str>,
    ) -> Result<SendOutcome, ChatError> {
        let mut payload = json!({
            "sessionId": session_id,
            "message": text,
            "type": if image_url.is_some() { "image" } else { "text" },
        });
        if let Some(url) = image_url {
            payload["imageUrl"] = json!(url);
        }

        debug!(session_id, "POST /chat");
        let response = self
            .http
            .post(self.url("/chat"))
            .json(&payload)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn get_messages(
        &self,
        session_id: &str,
        page: u32,
        limit: u32,
    ) -> Result<MessagesPage, ChatError> {
        debug!(session_id, page, limit, "GET /chat/sessions/{{id}}/messages");
        let response = self
            .http
            .get(self.url(&format!("/chat/sessions/{session_id}/messages")))
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn get_sessions(&self) -> Result<Vec<SessionSummary>, ChatError> {
        debug!("GET /chat/sessions");
        let response = self.http.get(self.url("/chat/sessions")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn search_sessions(&self, query: &str) -> Result<Vec<SessionSummary>, ChatError> {
        debug!(query, "GET /chat/sessions/search");
        let response = self
            .http
            .get(self.url("/chat/sessions/search"))
            .query(&[("q", query)])
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn rename_session(
        &self,
        session_id: &str,
        title: &str,
    ) -> Result<RenamedSession, ChatError> {
        debug!(session_id, "PATCH /chat/sessions/{{id}}/title");
        let response = self
            .http
            .patch(self.url(&format!("/chat/sessions/{session_id}/title")))
            .json(&json!({ "title": title }))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete_session(&self, session_id: &str) -> Result<(), ChatError> {
        debug!(session_id, "DELETE /chat/sessions/{{id}}");
        let response = self
            .http
            .delete(self.url(&format!("/chat/sessions/{session_id}")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn export_session(&self, session_id: &str) -> Result<serde_json::Value, ChatError> {
        debug!(session_id, "GET /chat/sessions/{{id}}/export");
        let response = self
            .http
            .get(self.url(&format!("/chat/sessions/{session_id}/export")))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}

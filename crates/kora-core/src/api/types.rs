//! Wire types for the chat REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chat::Message;

/// Response of `POST /chat`.
///
/// `messages` contains at least the persisted user message; the backend
/// may append the assistant (and tool) responses produced in the same
/// call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOutcome {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub tool_results: Option<serde_json::Value>,
}

/// Response of `GET /chat/sessions/{id}/messages`.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesPage {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

/// Response of `PATCH /chat/sessions/{id}/title`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenamedSession {
    pub session_id: String,
    pub title: String,
}

/// Session summary from the list endpoint. Metadata only, no bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(default)]
    pub message_count: u64,
}

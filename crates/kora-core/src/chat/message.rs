//! Chat message model.
//!
//! One `Message` per chat turn. Two id spaces exist: client-generated
//! temporary ids (optimistic messages, created before the server has
//! seen the send) and server-assigned ids (authoritative). Within one
//! session the reconciler guarantees no two messages share an id and
//! that a temporary id is replaced, never annotated, once confirmed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
    Tool,
}

/// Message payload, tagged by the wire `type` field.
///
/// Optional fields depend on the variant, so this is a closed union
/// rather than a bag of `Option`s; merge and render code match on it
/// exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MessageBody {
    /// Plain text turn.
    Text { text: String },
    /// Image with an optional caption.
    Image {
        #[serde(rename = "imageUrl")]
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    /// Assistant requesting tool invocations.
    ToolRequest { calls: Vec<ToolCall> },
    /// Result of a single tool invocation.
    ToolResult { name: String, data: serde_json::Value },
}

/// A single call inside a `MessageBody::ToolRequest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// Local delivery status of a message.
///
/// `Pending` only ever applies to optimistic messages awaiting the server
/// response. Wire messages omit the field and default to `Confirmed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Pending,
    #[default]
    Confirmed,
    Failed,
}

impl MessageStatus {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, MessageStatus::Confirmed)
    }
}

/// One chat turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Globally unique id. Temporary (client uuid) until confirmed.
    pub id: String,
    /// Owning session.
    pub session_id: String,
    pub sender: Sender,
    #[serde(flatten)]
    pub body: MessageBody,
    /// Server-assigned for confirmed messages, client-assigned otherwise.
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "MessageStatus::is_confirmed")]
    pub status: MessageStatus,
    /// Failure reason, set only when `status == Failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Message {
    /// Creates an optimistic user message with a fresh temporary id and a
    /// client-side timestamp.
    pub fn optimistic(session_id: impl Into<String>, body: MessageBody) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.into(),
            sender: Sender::User,
            body,
            created_at: Utc::now(),
            status: MessageStatus::Pending,
            error: None,
        }
    }

    /// Returns true while a send is awaiting server confirmation.
    pub fn is_pending(&self) -> bool {
        self.status == MessageStatus::Pending
    }

    /// Marks this message as failed with the given reason.
    ///
    /// The message stays in the list so the user can see what failed and
    /// retry; only the status and error change.
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.status = MessageStatus::Failed;
        self.error = Some(reason.into());
    }
}

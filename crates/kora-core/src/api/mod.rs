//! Chat backend API surface.
//!
//! The chat core talks to the backend exclusively through the [`ChatApi`]
//! trait; [`HttpChatApi`] is the production implementation. Tests drive
//! the controller against an in-memory implementation instead of a
//! server.

mod client;
mod types;

use async_trait::async_trait;

pub use client::HttpChatApi;
pub use types::{MessagesPage, RenamedSession, SendOutcome, SessionSummary};

use crate::error::ChatError;

/// Narrow interface to the chat backend.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Sends a message to a session. The backend creates the session if
    /// the id is new.
    async fn send_message(
        &self,
        session_id: &str,
        text: &str,
        image_url: Option<&str>,
    ) -> Result<SendOutcome, ChatError>;

    /// Retrieves one page of a session's message history, newest first.
    async fn get_messages(
        &self,
        session_id: &str,
        page: u32,
        limit: u32,
    ) -> Result<MessagesPage, ChatError>;

    /// Retrieves the session summaries for the logged-in user.
    async fn get_sessions(&self) -> Result<Vec<SessionSummary>, ChatError>;

    /// Searches sessions by title.
    async fn search_sessions(&self, query: &str) -> Result<Vec<SessionSummary>, ChatError>;

    /// Renames a session.
    async fn rename_session(
        &self,
        session_id: &str,
        title: &str,
    ) -> Result<RenamedSession, ChatError>;

    /// Deletes a session.
    async fn delete_session(&self, session_id: &str) -> Result<(), ChatError>;

    /// Exports a full session as JSON.
    async fn export_session(&self, session_id: &str) -> Result<serde_json::Value, ChatError>;
}

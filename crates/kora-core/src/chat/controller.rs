//! Chat controller.
//!
//! Async operations over the session store: opening sessions, sending
//! with optimistic tracking, backward pagination, and session-list
//! maintenance. The controller owns the store (single writer); every
//! await point is a network round trip, with store mutations applied
//! synchronously before and after it.

use std::collections::HashSet;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::api::{ChatApi, SessionSummary};
use crate::chat::message::{Message, MessageBody};
use crate::chat::store::{ChatStore, SessionPage};
use crate::chat::{pagination, reconcile};
use crate::error::ChatError;

/// User input for a send: text, optionally an already-uploaded image.
#[derive(Debug, Clone, Default)]
pub struct OutgoingMessage {
    pub text: String,
    pub image_url: Option<String>,
}

impl OutgoingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image_url: None,
        }
    }

    pub fn image(url: impl Into<String>, caption: Option<String>) -> Self {
        Self {
            text: caption.unwrap_or_default(),
            image_url: Some(url.into()),
        }
    }

    fn body(&self) -> MessageBody {
        match &self.image_url {
            Some(url) => MessageBody::Image {
                url: url.clone(),
                caption: (!self.text.is_empty()).then(|| self.text.clone()),
            },
            None => MessageBody::Text {
                text: self.text.clone(),
            },
        }
    }
}

/// Drives the chat session core against a backend.
pub struct ChatController<A: ChatApi> {
    api: A,
    store: ChatStore,
    page_limit: u32,
    /// Sessions created locally and not yet confirmed by the server.
    /// These have no history to page through; the first successful send
    /// promotes them to persisted.
    unconfirmed: HashSet<String>,
}

impl<A: ChatApi> ChatController<A> {
    pub fn new(api: A, page_limit: u32) -> Self {
        Self {
            api,
            store: ChatStore::new(),
            page_limit,
            unconfirmed: HashSet::new(),
        }
    }

    // ========================================================================
    // Read accessors
    // ========================================================================

    /// Messages for a session, newest first.
    pub fn messages(&self, session_id: &str) -> &[Message] {
        self.store.messages(session_id)
    }

    /// Pagination/loading state for a session.
    pub fn page_state(&self, session_id: &str) -> &SessionPage {
        self.store.page_state(session_id)
    }

    /// Cached session summaries, if loaded.
    pub fn sessions(&self) -> Option<&[SessionSummary]> {
        self.store.sessions()
    }

    pub fn session_list_error(&self) -> Option<&str> {
        self.store.session_list.error.as_deref()
    }

    pub fn is_session_list_loading(&self) -> bool {
        self.store.session_list.is_loading()
    }

    pub fn current_session(&self) -> Option<&str> {
        self.store.current_session()
    }

    /// Whether the server has confirmed this session.
    pub fn is_persisted(&self, session_id: &str) -> bool {
        !self.unconfirmed.contains(session_id)
    }

    /// Consumes the empty-list redirect signal (at most once per load).
    pub fn take_empty_redirect(&mut self) -> bool {
        self.store.session_list.take_empty_redirect()
    }

    // ========================================================================
    // Session lifecycle
    // ========================================================================

    /// Opens a session and returns its effective id.
    ///
    /// With an existing id, focuses it and resyncs the newest history
    /// page. With `None`, generates a fresh local session id; no history
    /// fetch is issued for it (there is nothing to page through until
    /// the server confirms the first send).
    pub async fn open_session(&mut self, session_id: Option<&str>) -> Result<String, ChatError> {
        match session_id {
            Some(id) => {
                self.store.set_current_session(id);
                self.fetch_page(id, 1).await?;
                Ok(id.to_string())
            }
            None => {
                let id = format!("session_{}", Uuid::new_v4());
                debug!(session_id = %id, "opening new local session");
                self.unconfirmed.insert(id.clone());
                self.store.set_current_session(&id);
                Ok(id)
            }
        }
    }

    /// Clears all chat state. Used on logout.
    pub fn reset(&mut self) {
        self.store.reset();
        self.unconfirmed.clear();
    }

    // ========================================================================
    // Sending
    // ========================================================================

    /// Sends a message with optimistic tracking.
    ///
    /// The optimistic message is visible before the request is issued.
    /// Whatever the outcome, the matching reconcile transition runs once
    /// the call settles: success replaces the temporary entry with the
    /// authoritative messages, failure marks it failed in place and the
    /// error is also returned to the caller.
    pub async fn send(
        &mut self,
        session_id: &str,
        input: OutgoingMessage,
    ) -> Result<(), ChatError> {
        if session_id.is_empty() {
            return Err(ChatError::validation("Session ID is required."));
        }
        let text = input.text.trim().to_string();
        if text.is_empty() && input.image_url.is_none() {
            return Err(ChatError::validation("Message text is required."));
        }

        let optimistic = Message::optimistic(session_id, input.body());
        let temp_id = optimistic.id.clone();
        reconcile::add_optimistic(self.store.ensure_session(session_id), optimistic);

        let result = self
            .api
            .send_message(session_id, &text, input.image_url.as_deref())
            .await;

        // The reconcile transition must run on both paths; the page is
        // guaranteed present by the ensure above.
        let Some(page) = self.store.page_mut(session_id) else {
            return result.map(|_| ());
        };
        match result {
            Ok(outcome) => {
                reconcile::reconcile_send(page, &temp_id, Ok(outcome.messages));
                self.unconfirmed.remove(session_id);
                Ok(())
            }
            Err(err) => {
                warn!(session_id, error = %err, "send failed");
                reconcile::reconcile_send(page, &temp_id, Err(err.session_message()));
                Err(err)
            }
        }
    }

    // ========================================================================
    // Pagination
    // ========================================================================

    /// Fetches the next older history page, if the trigger policy allows.
    ///
    /// Returns `Ok(false)` when no fetch was issued: history exhausted, a
    /// fetch already running, or a brand-new local session.
    pub async fn load_more(&mut self, session_id: &str) -> Result<bool, ChatError> {
        let persisted = self.is_persisted(session_id);
        let Some(page) = pagination::next_page(self.store.page_state(session_id), persisted)
        else {
            debug!(session_id, persisted, "load_more skipped");
            return Ok(false);
        };
        self.fetch_page(session_id, page).await?;
        Ok(true)
    }

    /// Runs one guarded page fetch: begin, round trip, complete or fail.
    async fn fetch_page(&mut self, session_id: &str, page: u32) -> Result<(), ChatError> {
        let page_state = self.store.ensure_session(session_id);
        if !pagination::begin_fetch(page_state, page) {
            return Ok(());
        }

        let result = self
            .api
            .get_messages(session_id, page, self.page_limit)
            .await;
        let Some(page_state) = self.store.page_mut(session_id) else {
            return result.map(|_| ());
        };
        match result {
            Ok(fetched) => {
                pagination::complete_fetch(page_state, fetched);
                Ok(())
            }
            Err(err) => {
                warn!(session_id, page, error = %err, "history fetch failed");
                pagination::fail_fetch(page_state, err.session_message());
                Err(err)
            }
        }
    }

    // ========================================================================
    // Session list
    // ========================================================================

    /// Reloads the session summary list.
    ///
    /// On failure the previously loaded list is preserved and the error
    /// is surfaced on the list state as well as returned.
    pub async fn refresh_sessions(&mut self) -> Result<(), ChatError> {
        self.store.session_list.begin_load();
        match self.api.get_sessions().await {
            Ok(sessions) => {
                self.store.session_list.complete_load(sessions);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "session list load failed");
                self.store.session_list.fail_load(err.session_message());
                Err(err)
            }
        }
    }

    /// Searches sessions by title. Pass-through; does not touch the
    /// cached list.
    pub async fn search_sessions(&self, query: &str) -> Result<Vec<SessionSummary>, ChatError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ChatError::validation("Search query is required."));
        }
        self.api.search_sessions(query).await
    }

    /// Renames a session and updates the cached summary.
    pub async fn rename_session(
        &mut self,
        session_id: &str,
        title: &str,
    ) -> Result<(), ChatError> {
        let title = title.trim();
        if session_id.is_empty() || title.is_empty() {
            return Err(ChatError::validation(
                "Session ID and new title are required.",
            ));
        }
        let renamed = self.api.rename_session(session_id, title).await?;
        self.store
            .set_session_title(&renamed.session_id, &renamed.title);
        Ok(())
    }

    /// Deletes a session and evicts its local state.
    pub async fn delete_session(&mut self, session_id: &str) -> Result<(), ChatError> {
        if session_id.is_empty() {
            return Err(ChatError::validation("Session ID is required."));
        }
        self.api.delete_session(session_id).await?;
        self.store.remove_session(session_id);
        self.unconfirmed.remove(session_id);
        Ok(())
    }

    /// Exports a session as raw JSON.
    pub async fn export_session(&self, session_id: &str) -> Result<serde_json::Value, ChatError> {
        if session_id.is_empty() {
            return Err(ChatError::validation("Session ID is required."));
        }
        self.api.export_session(session_id).await
    }
}

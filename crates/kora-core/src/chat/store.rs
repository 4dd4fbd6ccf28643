//! Session store.
//!
//! Keyed mapping from session id to per-session page state, plus the
//! session summary list and the currently active session. The store is
//! the single source of truth for rendering; nothing mutates a session's
//! messages except the reconciler and pagination transitions, reached
//! through the methods here and on [`SessionPage`].

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::api::SessionSummary;
use crate::chat::bootstrap::SessionListState;
use crate::chat::message::Message;

/// Default messages requested per history page.
pub const DEFAULT_PAGE_LIMIT: u32 = 30;

/// Per-session pagination and loading state.
///
/// `messages` is ordered newest-first (index 0 = most recent), matching
/// the inverted-list rendering contract of a bottom-anchored chat view.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPage {
    /// Messages, newest first.
    pub messages: Vec<Message>,
    /// Last successfully fetched page (0 = none fetched yet).
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Total message count the server reported on the last fetch.
    pub total: u64,
    /// Whether an older page remains to be fetched.
    pub has_more: bool,
    /// Page currently in flight, if any.
    pub page_in_flight: Option<u32>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for SessionPage {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            page: 0,
            limit: DEFAULT_PAGE_LIMIT,
            total: 0,
            has_more: true,
            page_in_flight: None,
            is_loading: false,
            error: None,
        }
    }
}

impl SessionPage {
    /// True if the given id is already present in the sequence.
    pub(crate) fn contains_id(&self, id: &str) -> bool {
        self.messages.iter().any(|m| m.id == id)
    }
}

static EMPTY_PAGE: LazyLock<SessionPage> = LazyLock::new(SessionPage::default);

/// Process-wide chat state container.
///
/// Page states are created lazily the first time a session is opened or
/// an optimistic message lands in it, and destroyed only by [`reset`],
/// so they survive view mount/unmount cycles.
///
/// [`reset`]: ChatStore::reset
#[derive(Debug, Default)]
pub struct ChatStore {
    pages: HashMap<String, SessionPage>,
    /// Session list load state (summaries + redirect machine).
    pub session_list: SessionListState,
    current_session: Option<String>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the page state for a session if absent. Idempotent.
    pub fn ensure_session(&mut self, session_id: &str) -> &mut SessionPage {
        self.pages.entry(session_id.to_string()).or_default()
    }

    /// Records the session the UI is focused on, creating its state.
    pub fn set_current_session(&mut self, session_id: &str) {
        self.ensure_session(session_id);
        self.current_session = Some(session_id.to_string());
    }

    pub fn current_session(&self) -> Option<&str> {
        self.current_session.as_deref()
    }

    /// Message sequence for a session, newest first. Empty for unknown
    /// sessions; never fails.
    pub fn messages(&self, session_id: &str) -> &[Message] {
        self.pages
            .get(session_id)
            .map_or(&[], |page| page.messages.as_slice())
    }

    /// Page state for a session, or the default state for unknown
    /// sessions; never fails.
    pub fn page_state(&self, session_id: &str) -> &SessionPage {
        self.pages.get(session_id).unwrap_or(&EMPTY_PAGE)
    }

    pub(crate) fn page_mut(&mut self, session_id: &str) -> Option<&mut SessionPage> {
        self.pages.get_mut(session_id)
    }

    /// Updates a cached summary title after a successful rename.
    pub fn set_session_title(&mut self, session_id: &str, title: &str) {
        if let Some(sessions) = self.session_list.sessions.as_mut()
            && let Some(summary) = sessions.iter_mut().find(|s| s.session_id == session_id)
        {
            summary.title = Some(title.to_string());
        }
    }

    /// Evicts a deleted session: page state, summary entry, focus.
    pub fn remove_session(&mut self, session_id: &str) {
        self.pages.remove(session_id);
        if let Some(sessions) = self.session_list.sessions.as_mut() {
            sessions.retain(|s| s.session_id != session_id);
        }
        if self.current_session.as_deref() == Some(session_id) {
            self.current_session = None;
        }
    }

    /// Cached session summaries, if a list load has succeeded.
    pub fn sessions(&self) -> Option<&[SessionSummary]> {
        self.session_list.sessions.as_deref()
    }

    /// Clears all chat state. Used on logout.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::message::MessageBody;

    fn text(t: &str) -> MessageBody {
        MessageBody::Text {
            text: t.to_string(),
        }
    }

    #[test]
    fn test_unknown_session_reads_never_fail() {
        let store = ChatStore::new();
        assert!(store.messages("nope").is_empty());
        let page = store.page_state("nope");
        assert_eq!(page.page, 0);
        assert_eq!(page.limit, DEFAULT_PAGE_LIMIT);
        assert!(page.has_more);
        assert!(!page.is_loading);
    }

    #[test]
    fn test_ensure_session_is_idempotent() {
        let mut store = ChatStore::new();
        store
            .ensure_session("s1")
            .messages
            .push(Message::optimistic("s1", text("hi")));
        store.ensure_session("s1");
        assert_eq!(store.messages("s1").len(), 1);
    }

    #[test]
    fn test_set_current_session_creates_state() {
        let mut store = ChatStore::new();
        store.set_current_session("s1");
        assert_eq!(store.current_session(), Some("s1"));
        assert!(store.page_state("s1").messages.is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut store = ChatStore::new();
        store.set_current_session("s1");
        store
            .ensure_session("s1")
            .messages
            .push(Message::optimistic("s1", text("hi")));
        store.session_list.begin_load();

        store.reset();
        assert!(store.messages("s1").is_empty());
        assert!(store.current_session().is_none());
        assert!(store.sessions().is_none());
    }

    #[test]
    fn test_remove_session_evicts_page_and_focus() {
        let mut store = ChatStore::new();
        store.set_current_session("s1");
        store
            .ensure_session("s1")
            .messages
            .push(Message::optimistic("s1", text("hi")));

        store.remove_session("s1");
        assert!(store.messages("s1").is_empty());
        assert!(store.current_session().is_none());
    }
}

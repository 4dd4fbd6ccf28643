//! Session list bootstrap.
//!
//! Loads the user's session summaries and decides, once per load cycle,
//! whether the caller should redirect into a brand-new session because
//! the user has none yet. The redirect signal is consume-on-read so a
//! re-evaluated view cannot loop on it.

use tracing::debug;

use crate::api::SessionSummary;

/// Load phase of the session list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListPhase {
    /// No load requested yet.
    #[default]
    Idle,
    /// A load is in flight.
    Loading,
    /// Last load succeeded; `sessions` holds the result.
    Populated,
    /// Last load failed; any previously loaded list is preserved.
    Error,
}

/// Session-list load state and empty-redirect machine.
#[derive(Debug, Default)]
pub struct SessionListState {
    /// `None` until the first successful load, to distinguish "never
    /// loaded" from "loaded and empty".
    pub sessions: Option<Vec<SessionSummary>>,
    pub phase: ListPhase,
    pub error: Option<String>,
    /// Whether the post-load redirect check already ran this cycle.
    redirect_checked: bool,
}

impl SessionListState {
    /// Starts a load cycle: marks loading, clears the error, re-arms the
    /// redirect check.
    pub fn begin_load(&mut self) {
        self.phase = ListPhase::Loading;
        self.error = None;
        self.redirect_checked = false;
    }

    /// Applies a successful load, replacing the previous list verbatim.
    pub fn complete_load(&mut self, sessions: Vec<SessionSummary>) {
        debug!(count = sessions.len(), "session list loaded");
        self.sessions = Some(sessions);
        self.phase = ListPhase::Populated;
        self.error = None;
    }

    /// Applies a failed load. The stale list stays visible; only the
    /// error is surfaced for a retry affordance.
    pub fn fail_load(&mut self, error: String) {
        self.phase = ListPhase::Error;
        self.error = Some(error);
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }

    /// Consumes the empty-redirect signal.
    ///
    /// Returns `true` at most once per completed load cycle, and only
    /// when the load finished without error and found no sessions.
    /// Subsequent calls return `false` until the next `begin_load`.
    pub fn take_empty_redirect(&mut self) -> bool {
        if matches!(self.phase, ListPhase::Idle | ListPhase::Loading) || self.redirect_checked {
            return false;
        }
        self.redirect_checked = true;
        self.error.is_none() && self.sessions.as_ref().is_some_and(Vec::is_empty)
    }
}

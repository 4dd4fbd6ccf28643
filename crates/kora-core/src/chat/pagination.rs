//! History pagination.
//!
//! Extends a session's message history backward (toward older messages)
//! one page at a time. Page 1 is the newest window; higher pages append
//! at the oldest end of the inverted list.

use tracing::debug;

use crate::api::MessagesPage;
use crate::chat::message::Message;
use crate::chat::store::SessionPage;

/// Marks a page fetch as in flight.
///
/// Returns `false` (skip, not an error) when that same page is already
/// being fetched for this session; the duplicate is rejected at issue
/// time, not ignored at completion. Otherwise sets the loading flag,
/// records the page in flight and clears any previous error.
pub fn begin_fetch(page_state: &mut SessionPage, page: u32) -> bool {
    if page_state.is_loading && page_state.page_in_flight == Some(page) {
        debug!(page, "fetch already in flight, skipping");
        return false;
    }
    page_state.is_loading = true;
    page_state.page_in_flight = Some(page);
    page_state.error = None;
    true
}

/// Applies a successfully fetched page.
///
/// `has_more` uses the server's page arithmetic as-is: a full page that
/// does not yet cover the reported total implies older messages remain.
/// The heuristic can mispredict when `total` moves between fetches; that
/// behavior is inherited deliberately.
///
/// Page 1 replaces the whole sequence (a refetch of the newest window is
/// a full resync, discarding previously paginated older pages); pages
/// beyond 1 append at the oldest end, deduplicated by id.
pub fn complete_fetch(page_state: &mut SessionPage, fetched: MessagesPage) {
    let MessagesPage {
        messages,
        total,
        page,
        limit,
    } = fetched;

    let has_more = messages.len() as u32 == limit && u64::from(page) * u64::from(limit) < total;

    if page == 1 {
        page_state.messages = messages;
    } else {
        let fresh: Vec<Message> = messages
            .into_iter()
            .filter(|m| !page_state.contains_id(&m.id))
            .collect();
        page_state.messages.extend(fresh);
    }

    page_state.is_loading = false;
    page_state.page_in_flight = None;
    page_state.page = page;
    page_state.limit = limit;
    page_state.total = total;
    page_state.has_more = has_more;
    page_state.error = None;
}

/// Applies a failed page fetch.
///
/// Already-loaded history stays visible; only the loading flags and the
/// session-level error change.
pub fn fail_fetch(page_state: &mut SessionPage, error: String) {
    page_state.is_loading = false;
    page_state.page_in_flight = None;
    page_state.error = Some(error);
}

/// Caller-side trigger policy for "load more".
///
/// Returns the next page to request, or `None` when no fetch should be
/// issued: nothing older remains, a fetch is already running, or the
/// session only exists locally (`persisted == false`) and has no server
/// history to page through.
pub fn next_page(page_state: &SessionPage, persisted: bool) -> Option<u32> {
    if !persisted || page_state.is_loading || !page_state.has_more {
        return None;
    }
    Some(page_state.page + 1)
}

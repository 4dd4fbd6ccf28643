//! Message reconciliation.
//!
//! Merges locally created optimistic messages with server-confirmed
//! results without duplication, preserving the newest-first ordering
//! contract. The invariant these transitions uphold: for any interleaving
//! of optimistic adds, send reconciliations and page fetches, a session's
//! sequence never holds two messages with the same id, and a replaced
//! temporary id never reappears.

use tracing::{debug, warn};

use crate::chat::message::Message;
use crate::chat::store::SessionPage;

/// Prepends an optimistic message at position 0 (most recent end).
///
/// Applied before the network call is issued, so the UI reflects the
/// pending send immediately.
pub fn add_optimistic(page: &mut SessionPage, message: Message) {
    debug!(id = %message.id, "adding optimistic message");
    page.messages.insert(0, message);
}

/// Applies the settled outcome of a send for the optimistic message
/// identified by `temp_id`.
///
/// On success the temporary entry is removed and the authoritative
/// messages are prepended, skipping any id already present. On failure
/// the optimistic entry stays visible, marked failed with the reason,
/// and the session-level error carries the same reason.
///
/// An unknown `temp_id` mutates no messages but still settles the
/// session-level error state.
pub fn reconcile_send(page: &mut SessionPage, temp_id: &str, outcome: Result<Vec<Message>, String>) {
    if !page.contains_id(temp_id) {
        warn!(temp_id, "reconcile for unknown optimistic message");
    }

    match outcome {
        Ok(confirmed) => {
            page.messages.retain(|m| m.id != temp_id);

            // Prepend authoritative messages, newest first, deduplicating
            // against whatever a concurrent fetch may have merged already.
            let fresh: Vec<Message> = confirmed
                .into_iter()
                .filter(|m| !page.contains_id(&m.id))
                .collect();
            for message in fresh.into_iter().rev() {
                page.messages.insert(0, message);
            }

            page.error = None;
        }
        Err(reason) => {
            if let Some(message) = page.messages.iter_mut().find(|m| m.id == temp_id) {
                message.mark_failed(reason.clone());
            }
            page.error = Some(reason);
        }
    }
}

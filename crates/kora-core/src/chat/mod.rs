//! Chat session state core.
//!
//! The pieces, leaf to root:
//! - [`message`] - the message model (tagged body union, status, ids)
//! - [`store`] - keyed per-session page state, single source of truth
//! - [`reconcile`] - optimistic send tracking and server-confirm merge
//! - [`pagination`] - backward history paging for the inverted list
//! - [`bootstrap`] - session list load + empty-redirect state machine
//! - [`controller`] - async operations tying the store to the API
//!
//! All state mutation is synchronous and single-writer; the only
//! suspension points are the network round trips in the controller,
//! which applies store mutations before and after each await.

pub mod bootstrap;
pub mod controller;
pub mod message;
pub mod pagination;
pub mod reconcile;
pub mod store;

pub use bootstrap::{ListPhase, SessionListState};
pub use controller::{ChatController, OutgoingMessage};
pub use message::{Message, MessageBody, MessageStatus, Sender, ToolCall};
pub use store::{ChatStore, SessionPage};

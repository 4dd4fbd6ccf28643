//! Core kora library (chat session state, API client, config).

pub mod api;
pub mod chat;
pub mod config;
pub mod error;

pub use error::ChatError;

//! Chat command handlers (send, history).

use anyhow::{Context, Result};
use kora_core::api::ChatApi;
use kora_core::chat::{ChatController, Message, MessageBody, OutgoingMessage, Sender};

/// Sends one message, printing the messages the server confirmed for it.
pub async fn send<A: ChatApi>(
    controller: &mut ChatController<A>,
    session: Option<&str>,
    message: &str,
    image_url: Option<String>,
) -> Result<()> {
    let session_id = match session {
        // Opening an existing session resyncs its newest page first.
        Some(id) => controller.open_session(Some(id)).await.context("open session")?,
        None => {
            let id = controller.open_session(None).await.context("open session")?;
            println!("Started session {id}");
            id
        }
    };

    let outgoing = match image_url {
        Some(url) => OutgoingMessage::image(url, Some(message.to_string())),
        None => OutgoingMessage::text(message),
    };
    controller
        .send(&session_id, outgoing)
        .await
        .context("send message")?;

    // The store is newest-first; print oldest first.
    for msg in controller.messages(&session_id).iter().rev() {
        print_message(msg);
    }
    Ok(())
}

/// Prints a session's history, fetching up to `pages` pages.
pub async fn history<A: ChatApi>(
    controller: &mut ChatController<A>,
    session: &str,
    pages: u32,
) -> Result<()> {
    controller
        .open_session(Some(session))
        .await
        .context("load history")?;

    let mut fetched = 1;
    while fetched < pages && controller.load_more(session).await.context("load older page")? {
        fetched += 1;
    }

    let messages = controller.messages(session);
    if messages.is_empty() {
        println!("Session '{session}' is empty.");
        return Ok(());
    }
    for msg in messages.iter().rev() {
        print_message(msg);
    }
    let state = controller.page_state(session);
    if state.has_more {
        println!("({} of {} messages)", messages.len(), state.total);
    }
    Ok(())
}

fn print_message(msg: &Message) {
    let who = match msg.sender {
        Sender::User => "you",
        Sender::Ai => "kora",
        Sender::Tool => "tool",
    };
    match &msg.body {
        MessageBody::Text { text } => println!("[{who}] {text}"),
        MessageBody::Image { url, caption } => match caption {
            Some(caption) => println!("[{who}] {caption} <{url}>"),
            None => println!("[{who}] <{url}>"),
        },
        MessageBody::ToolRequest { calls } => {
            let names: Vec<&str> = calls.iter().map(|c| c.name.as_str()).collect();
            println!("[{who}] requested tools: {}", names.join(", "));
        }
        MessageBody::ToolResult { name, .. } => println!("[{who}] {name} finished"),
    }
    if let Some(error) = &msg.error {
        println!("    failed: {error}");
    }
}

//! Session command handlers.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use kora_core::api::{ChatApi, SessionSummary};
use kora_core::chat::ChatController;

pub async fn list<A: ChatApi>(controller: &mut ChatController<A>) -> Result<()> {
    controller
        .refresh_sessions()
        .await
        .context("fetch sessions")?;

    if controller.take_empty_redirect() {
        println!("No sessions found. Start one with: kora send -m \"...\"");
        return Ok(());
    }
    for summary in controller.sessions().unwrap_or_default() {
        print_summary(summary);
    }
    Ok(())
}

pub async fn search<A: ChatApi>(controller: &ChatController<A>, query: &str) -> Result<()> {
    let results = controller
        .search_sessions(query)
        .await
        .context("search sessions")?;
    if results.is_empty() {
        println!("No sessions matched '{query}'.");
    } else {
        for summary in &results {
            print_summary(summary);
        }
    }
    Ok(())
}

pub async fn rename<A: ChatApi>(
    controller: &mut ChatController<A>,
    id: &str,
    title: &str,
) -> Result<()> {
    controller
        .rename_session(id, title)
        .await
        .with_context(|| format!("rename session '{id}'"))?;
    println!("Renamed session {id} → {title}");
    Ok(())
}

pub async fn delete<A: ChatApi>(controller: &mut ChatController<A>, id: &str) -> Result<()> {
    controller
        .delete_session(id)
        .await
        .with_context(|| format!("delete session '{id}'"))?;
    println!("Deleted session {id}");
    Ok(())
}

pub async fn export<A: ChatApi>(controller: &ChatController<A>, id: &str) -> Result<()> {
    let data = controller
        .export_session(id)
        .await
        .with_context(|| format!("export session '{id}'"))?;
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}

fn print_summary(summary: &SessionSummary) {
    let title = summary.title.as_deref().unwrap_or("Chat Session");
    let last_active = summary
        .last_activity
        .map_or_else(|| "never".to_string(), format_timestamp);
    println!(
        "{}  {}  {} msgs  last active {}",
        summary.session_id, title, summary.message_count, last_active
    );
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use kora_core::api::HttpChatApi;
use kora_core::chat::ChatController;
use kora_core::config::Config;

mod commands;

#[derive(Parser)]
#[command(name = "kora")]
#[command(version)]
#[command(about = "Companion chat client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Send a message to a chat session
    Send {
        /// Session to send into (omit to start a new session)
        #[arg(long, value_name = "ID")]
        session: Option<String>,

        /// The message text
        #[arg(short, long)]
        message: String,

        /// URL of an already-uploaded image to attach
        #[arg(long, value_name = "URL")]
        image_url: Option<String>,
    },

    /// Show a session's message history
    History {
        /// Session to show
        #[arg(value_name = "ID")]
        session: String,

        /// Maximum number of history pages to fetch
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },

    /// Manage chat sessions
    Sessions {
        #[command(subcommand)]
        command: SessionCommands,
    },
}

#[derive(clap::Subcommand)]
enum SessionCommands {
    /// List chat sessions
    List,
    /// Search sessions by title
    Search {
        /// The search term
        #[arg(value_name = "QUERY")]
        query: String,
    },
    /// Rename a session
    Rename {
        /// Session to rename
        #[arg(value_name = "ID")]
        id: String,
        /// New title for the session
        #[arg(value_name = "TITLE")]
        title: String,
    },
    /// Delete a session
    Delete {
        /// Session to delete
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Export a session as JSON
    Export {
        /// Session to export
        #[arg(value_name = "ID")]
        id: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;
    tracing::debug!(base_url = %config.api.base_url, "configuration loaded");
    let api = HttpChatApi::new(&config.api).context("build API client")?;
    let mut controller = ChatController::new(api, config.chat.page_limit);

    match cli.command {
        Commands::Send {
            session,
            message,
            image_url,
        } => commands::chat::send(&mut controller, session.as_deref(), &message, image_url).await,
        Commands::History { session, pages } => {
            commands::chat::history(&mut controller, &session, pages).await
        }
        Commands::Sessions { command } => match command {
            SessionCommands::List => commands::sessions::list(&mut controller).await,
            SessionCommands::Search { query } => {
                commands::sessions::search(&controller, &query).await
            }
            SessionCommands::Rename { id, title } => {
                commands::sessions::rename(&mut controller, &id, &title).await
            }
            SessionCommands::Delete { id } => {
                commands::sessions::delete(&mut controller, &id).await
            }
            SessionCommands::Export { id } => commands::sessions::export(&controller, &id).await,
        },
    }
}

//! CLI for blogcast
//!
//! Subcommands:
//! - `serve`: run the HTTP CRUD surface and the WebSocket feed
//! - `submit`: run a simple example client that submits an article over a
//!   feed connection and waits for the finished notification (useful for
//!   smoke tests)

use clap::Parser;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

use blogcast::config::load_config;
use blogcast::http::{AppState, start_http_server};
use blogcast::registry::{ConnectionRegistry, EventDispatcher, Notifier};
use blogcast::store::BlogStore;
use blogcast::store::models::author_topic;
use blogcast::transport::start_websocket_server;

#[derive(Parser)]
#[command(name = "blogcast")]
enum Command {
    /// Start the HTTP and WebSocket servers
    Serve,
    /// Submit an article over a feed connection and wait for the notification
    Submit {
        /// WebSocket feed URL to connect to (default: ws://127.0.0.1:8001)
        #[arg(long, default_value = "ws://127.0.0.1:8001")]
        url: String,
        /// Author whose feed to join and submit under
        #[arg(long, default_value_t = 1)]
        author: i64,
        #[arg(long, default_value = "Hello from the example client")]
        title: String,
        #[arg(long, default_value = "An example article body submitted over the feed.")]
        text: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    blogcast::utils::logging::init("info");

    let cmd = Command::parse();

    match cmd {
        Command::Serve => {
            if let Err(e) = run_server().await {
                error!("Server failed: {}", e);
            }
        }
        Command::Submit {
            url,
            author,
            title,
            text,
        } => {
            if let Err(e) = run_submit(&url, author, &title, &text).await {
                error!("Submit failed: {}", e);
            }
        }
    }
}

async fn run_server() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    let registry = Arc::new(Mutex::new(ConnectionRegistry::new()));
    let notifier = Notifier::new(registry.clone());
    let dispatcher = EventDispatcher::spawn(notifier, config.notify.queue_capacity);
    let store = BlogStore::open(&config.store.path, dispatcher, author_topic)?;

    let http_addr = format!("{}:{}", config.server.host, config.server.http_port);
    let ws_addr = format!("{}:{}", config.server.host, config.server.ws_port);

    let state = AppState {
        store: store.clone(),
        ws_port: config.server.ws_port,
    };

    tokio::select! {
        _ = start_http_server(http_addr, state) => {
            error!("HTTP server exited unexpectedly.");
        }
        _ = start_websocket_server(ws_addr, registry, store, config.clone()) => {
            error!("WebSocket server exited unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    Ok(())
}

async fn run_submit(
    url: &str,
    author: i64,
    title: &str,
    text: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    use futures_util::{SinkExt, StreamExt};
    use serde_json::json;
    use tokio_tungstenite::connect_async;
    use tokio_tungstenite::tungstenite::Message as WsMessage;

    let feed_url = format!("{}/article/{}/ws", url.trim_end_matches('/'), author);
    let (mut ws_stream, _response) = connect_async(&feed_url).await?;
    println!("Connected to {feed_url}");

    let submission = json!({ "title": title, "text": text, "author_id": author });
    ws_stream
        .send(WsMessage::text(submission.to_string()))
        .await?;
    println!("Submitted: {submission}");

    // The article is announced on this same feed once it finishes.
    if let Some(Ok(WsMessage::Text(incoming))) = ws_stream.next().await {
        println!("Finished: {incoming}");
    }

    Ok(())
}

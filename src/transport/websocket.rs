//! WebSocket feed server
//!
//! This file implements the feed endpoint. Responsibilities:
//! - Accept TCP/WebSocket connections on `/article/{token}/ws`, where the
//!   token is the feed topic (a stringified author id); any other path
//!   rejects the handshake
//! - Register each accepted connection with the registry exactly once, and
//!   remove it exactly once when either direction of the socket dies
//! - Read inbound frames as article submissions: each one creates a draft
//!   article, which a spawned finisher marks `FINISHED` after the configured
//!   processing delay. That transition is what the notifier announces back
//!   on this same feed

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::spawn;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_hdr_async;
use tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tungstenite::http::StatusCode;
use tungstenite::protocol::Message as WsMessage;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::client::Connection;
use crate::config::Settings;
use crate::registry::SharedRegistry;
use crate::store::{ArticleStatus, BlogStore};
use crate::transport::message::ArticleSubmission;

/// Extract the feed topic from a handshake path of the form
/// `/article/{token}/ws`.
pub(crate) fn feed_topic(path: &str) -> Option<String> {
    let mut segments = path.trim_matches('/').split('/');
    match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some("article"), Some(token), Some("ws"), None) if !token.is_empty() => {
            Some(token.to_string())
        }
        _ => None,
    }
}

pub async fn start_websocket_server(
    addr: String,
    registry: SharedRegistry,
    store: BlogStore,
    settings: Settings,
) {
    let listener = TcpListener::bind(addr.clone()).await.expect("Can't bind");

    info!("WebSocket feed listening on ws://{addr}");

    while let Ok((stream, _)) = listener.accept().await {
        let registry = registry.clone();
        let store = store.clone();
        let settings = settings.clone();

        tokio::spawn(async move {
            let mut topic: Option<String> = None;
            let callback =
                |req: &Request, response: Response| -> Result<Response, ErrorResponse> {
                    match feed_topic(req.uri().path()) {
                        Some(t) => {
                            topic = Some(t);
                            Ok(response)
                        }
                        None => {
                            let mut resp = ErrorResponse::new(Some(
                                "expected /article/{author}/ws".to_string(),
                            ));
                            *resp.status_mut() = StatusCode::NOT_FOUND;
                            Err(resp)
                        }
                    }
                };

            let ws_stream = match accept_hdr_async(stream, callback).await {
                Ok(ws) => ws,
                Err(e) => {
                    debug!("WebSocket handshake rejected: {e}");
                    return;
                }
            };
            let Some(topic) = topic else {
                debug!("handshake accepted without a topic, dropping connection");
                return;
            };

            let (mut ws_sender, mut ws_receiver) = ws_stream.split();
            let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();
            let conn = Connection::new(tx);
            let conn_id = conn.id.clone();
            {
                let mut registry = registry.lock().unwrap();
                registry.add(&topic, conn);
            }
            info!("{conn_id} joined feed {topic}");

            let cleanup_called = Arc::new(AtomicBool::new(false));

            let do_cleanup = {
                let registry = registry.clone();
                let topic = topic.clone();
                let conn_id = conn_id.clone();
                let cleanup_called = cleanup_called.clone();

                move || {
                    if !cleanup_called.swap(true, Ordering::SeqCst) {
                        registry.lock().unwrap().remove(&topic, &conn_id);
                        info!("{conn_id} left feed {topic}");
                    }
                }
            };

            // Forward task: notifier → socket
            {
                let conn_id = conn_id.clone();
                let do_cleanup = do_cleanup.clone();

                spawn(async move {
                    while let Some(msg) = rx.recv().await {
                        if let Err(e) = ws_sender.send(msg).await {
                            debug!("Failed to send message to {conn_id}: {e}");
                            break;
                        }
                    }

                    do_cleanup();
                    debug!("Send loop closed for {conn_id}");
                });
            }

            while let Some(Ok(msg)) = ws_receiver.next().await {
                if msg.is_text() {
                    let text = msg.to_text().unwrap();
                    match serde_json::from_str::<ArticleSubmission>(text) {
                        Ok(submission) => {
                            match store.create_article(submission.into_create()) {
                                Ok(article) => {
                                    info!(
                                        "{conn_id} submitted article {} to feed {topic}",
                                        article.id
                                    );
                                    finish_later(
                                        store.clone(),
                                        article.id,
                                        settings.notify.finish_delay_ms,
                                    );
                                }
                                Err(e) => warn!("rejected submission from {conn_id}: {e}"),
                            }
                        }
                        Err(err) => {
                            warn!(
                                "Invalid submission from {conn_id}: {err} | {}",
                                &text.chars().take(100).collect::<String>()
                            );
                        }
                    }
                }
            }

            do_cleanup();
        });
    }
}

/// Mark an article finished after its processing delay, off the read loop so
/// one submission cannot stall the connection it arrived on. The status
/// write is what triggers the feed notification.
fn finish_later(store: BlogStore, article_id: i64, delay_ms: u64) {
    spawn(async move {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        if let Err(e) = store.set_article_status(article_id, ArticleStatus::Finished) {
            warn!("failed to finish article {article_id}: {e}");
        }
    });
}

//! Notifier
//!
//! Delivers one article snapshot to every connection currently subscribed to
//! a topic. Delivery is best-effort on top of an already-committed write:
//! `broadcast` never surfaces a failure to its caller. A connection whose
//! send fails has lost its transport and is pruned from the registry, so the
//! subscriber list converges on the connections that took the last delivery.

use tracing::{debug, error, info};
use tungstenite::protocol::Message as WsMessage;

use crate::client::ConnectionId;
use crate::registry::SharedRegistry;
use crate::store::models::Article;

#[derive(Clone)]
pub struct Notifier {
    registry: SharedRegistry,
}

impl Notifier {
    pub fn new(registry: SharedRegistry) -> Self {
        Self { registry }
    }

    /// Send `article` to every subscriber of `topic`.
    ///
    /// The subscriber list is snapshotted under the registry lock, then the
    /// lock is released before any send. Sends go through each connection's
    /// unbounded outbound queue and cannot block on a slow peer; a failed
    /// send means the receiving side is gone and the connection is removed
    /// from the topic afterwards. A removal that races this call can still
    /// see one in-flight message, never one queued after `remove` returned.
    pub fn broadcast(&self, topic: &str, article: &Article) {
        let subscribers = self.registry.lock().unwrap().snapshot(topic);
        if subscribers.is_empty() {
            return;
        }

        let text = match serde_json::to_string(article) {
            Ok(json) => json,
            Err(e) => {
                error!("failed to serialize article {}: {e}", article.id);
                return;
            }
        };
        let msg = WsMessage::text(text);

        let mut stale: Vec<ConnectionId> = Vec::new();
        for conn in &subscribers {
            if conn.sender.send(msg.clone()).is_err() {
                debug!("send to {} failed, transport closed", conn.id);
                stale.push(conn.id.clone());
            }
        }

        if !stale.is_empty() {
            let mut registry = self.registry.lock().unwrap();
            for conn_id in &stale {
                registry.remove(topic, conn_id);
            }
            info!(
                "pruned {} stale subscriber(s) from topic {topic}",
                stale.len()
            );
        }
    }
}

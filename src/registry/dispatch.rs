//! Event dispatch queue
//!
//! The bounded hand-off between the persistence write path and the notifier.
//! The store calls [`EventDispatcher::dispatch`] after a finished-article
//! write has committed; the call enqueues and returns immediately, so the
//! commit path never blocks on (or fails because of) delivery. A background
//! drain task owns the receiving side and runs the actual broadcast.
//!
//! A full queue drops the notification with a warning. The write it
//! announced is durable either way.

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::registry::Notifier;
use crate::store::models::Article;

/// One finished-article notification waiting to be broadcast.
#[derive(Debug, Clone)]
pub struct ArticleEvent {
    pub topic: String,
    pub article: Article,
    /// Milliseconds since epoch when the event was queued. Used to log how
    /// long events sit in the queue under load.
    pub queued_at: i64,
}

#[derive(Clone)]
pub struct EventDispatcher {
    tx: mpsc::Sender<ArticleEvent>,
}

impl EventDispatcher {
    /// Create a dispatcher plus the receiving half of its queue, without
    /// starting a drain task. Tests use this to observe dispatched events.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ArticleEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Create a dispatcher and spawn the drain task that forwards every
    /// queued event to `notifier`.
    pub fn spawn(notifier: Notifier, capacity: usize) -> Self {
        let (dispatcher, mut rx) = Self::channel(capacity);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let waited_ms = Utc::now().timestamp_millis() - event.queued_at;
                debug!(
                    "broadcasting article {} to topic {} after {waited_ms}ms in queue",
                    event.article.id, event.topic
                );
                notifier.broadcast(&event.topic, &event.article);
            }
            debug!("notification queue closed");
        });
        dispatcher
    }

    /// Queue a finished-article notification. Non-blocking: if the queue is
    /// full or the drain task is gone, the notification is dropped and
    /// logged, never propagated to the caller.
    pub fn dispatch(&self, topic: String, article: Article) {
        let event = ArticleEvent {
            topic,
            article,
            queued_at: Utc::now().timestamp_millis(),
        };
        if let Err(e) = self.tx.try_send(event) {
            warn!("dropping finished-article notification: {e}");
        }
    }
}

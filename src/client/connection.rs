//! Connection handle
//!
//! `Connection` models one connected feed subscriber and holds the sending
//! side of the per-connection channel used by the notifier to push messages.
//! The handle is a lookup entry, not a lifetime holder: the transport layer
//! owns the socket, and the registry only keeps clones of this handle
//! between registration and removal.

use tokio::sync::mpsc::UnboundedSender;
use tungstenite::protocol::Message as WsMessage;
use uuid::Uuid;

/// Identifier for one connection. Two handles with the same id refer to the
/// same underlying socket.
pub type ConnectionId = String;

#[derive(Debug, Clone)]
pub struct Connection {
    pub id: ConnectionId,
    pub sender: UnboundedSender<WsMessage>,
}

impl Connection {
    /// Create a new handle with a sender channel. The `id` is a UUID used
    /// to identify the connection across registry operations.
    pub fn new(sender: UnboundedSender<WsMessage>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender,
        }
    }
}

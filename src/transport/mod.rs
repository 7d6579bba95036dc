//! The `transport` module is responsible for the real-time side of the
//! network surface: the WebSocket server where feed connections live.
//!
//! It parses the feed topic out of the handshake path, registers the
//! connection with the registry for exactly as long as the socket is up,
//! and turns inbound frames into article submissions for the store.

pub mod message;
pub mod websocket;

pub use websocket::start_websocket_server;

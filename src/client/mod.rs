//! The `client` module defines the representation of a feed subscriber.
//!
//! It provides the `Connection` struct, which encapsulates one live
//! WebSocket connection: its unique identifier and the channel used to
//! push messages to it.

pub mod connection;
pub use connection::{Connection, ConnectionId};

#[cfg(test)]
mod tests;

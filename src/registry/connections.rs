//! Connection registry
//!
//! Topic-keyed bookkeeping of live feed subscribers. A topic is an opaque
//! string (in practice the stringified author id, but nothing in here knows
//! that) mapped to the ordered list of connections registered under it.
//!
//! Concurrency note: callers must synchronize access via the shared mutex
//! (`SharedRegistry`) when calling any method here. All three operations are
//! short and never touch the network, so holding the lock across them is
//! cheap.
//!
//! Topics are never deleted, even once their subscriber list drains; growth
//! is bounded by the number of distinct authors ever subscribed to.

use std::collections::HashMap;

use crate::client::{Connection, ConnectionId};

#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    topics: HashMap<String, Vec<Connection>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            topics: HashMap::new(),
        }
    }

    /// Register `conn` under `topic`, creating the topic entry lazily.
    ///
    /// Always succeeds. Registering the same connection twice leaves two
    /// entries in the list; normal operation registers each connection
    /// exactly once per topic.
    pub fn add(&mut self, topic: &str, conn: Connection) {
        self.topics.entry(topic.to_string()).or_default().push(conn);
    }

    /// Unregister the connection with id `conn_id` from `topic`.
    ///
    /// Removes at most the first matching occurrence; removing an unknown
    /// connection or topic is a no-op. After this returns, the connection is
    /// excluded from every subsequent snapshot of `topic`.
    pub fn remove(&mut self, topic: &str, conn_id: &ConnectionId) {
        if let Some(subscribers) = self.topics.get_mut(topic) {
            if let Some(pos) = subscribers.iter().position(|c| &c.id == conn_id) {
                subscribers.remove(pos);
            }
        }
    }

    /// Current subscriber list for `topic` as an independent copy, in
    /// registration order. Empty if the topic is unknown.
    ///
    /// The copy lets a broadcast iterate without holding the registry lock,
    /// so a concurrent add/remove can never corrupt a delivery pass.
    pub fn snapshot(&self, topic: &str) -> Vec<Connection> {
        self.topics.get(topic).cloned().unwrap_or_default()
    }

    /// Number of connections currently registered under `topic`.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics.get(topic).map(Vec::len).unwrap_or(0)
    }
}

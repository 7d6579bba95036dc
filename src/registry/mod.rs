//! The `registry` module is the real-time core of the system.
//!
//! - `connections` tracks which live WebSocket connections are interested in
//!   which feed topic and supports safe mutation under concurrent
//!   connect/disconnect.
//! - `notifier` delivers an article snapshot to every subscriber of a topic,
//!   pruning connections whose transport has gone away.
//! - `dispatch` is the bounded hand-off between the persistence write path
//!   and the notifier, so a commit never blocks on delivery.

pub mod connections;
pub mod dispatch;
pub mod notifier;

pub use connections::ConnectionRegistry;
pub use dispatch::{ArticleEvent, EventDispatcher};
pub use notifier::Notifier;

use std::sync::{Arc, Mutex};

/// Shared handle to the process-wide registry. Constructed once in `main`
/// and cloned into every connection handler and the notifier.
pub type SharedRegistry = Arc<Mutex<ConnectionRegistry>>;
